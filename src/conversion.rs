use indicatif::ProgressBar;
use log::{error, warn};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs::{copy, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::coco::{Annotation, ClassTable, Image};
use crate::config::Args;
use crate::types::ProcessingStats;
use crate::utils::output_file_name;

/// Convert a COCO pixel bbox (top-left x, top-left y, width, height) to
/// normalized YOLO center coordinates.
///
/// No validation: a bbox outside the image produces values outside [0, 1].
pub fn normalize_bbox(bbox: &[f64; 4], width: u32, height: u32) -> (f64, f64, f64, f64) {
    let [x, y, w, h] = *bbox;
    let x_center = (x + w / 2.0) / width as f64;
    let y_center = (y + h / 2.0) / height as f64;
    let norm_w = w / width as f64;
    let norm_h = h / height as f64;
    (x_center, y_center, norm_w, norm_h)
}

fn clamp_unit(value: f64) -> f64 {
    value.max(0.0).min(1.0)
}

/// Render the YOLO label lines for one image.
///
/// Returns the label file content and the number of annotations skipped
/// because their category id is absent from the class table. Values are
/// written unrounded, one annotation per line.
pub fn annotations_to_yolo(
    annotations: &[&Annotation],
    image: &Image,
    class_table: &ClassTable,
    clamp: bool,
) -> (String, usize) {
    let mut yolo_data = String::with_capacity(annotations.len() * 64);
    let mut skipped = 0;

    for annotation in annotations {
        let class_index = match class_table.class_index(annotation.category_id) {
            Some(class_index) => class_index,
            None => {
                warn!(
                    "annotation for image {} references unknown category id {}",
                    image.id, annotation.category_id
                );
                skipped += 1;
                continue;
            }
        };

        let (mut x_center, mut y_center, mut norm_w, mut norm_h) =
            normalize_bbox(&annotation.bbox, image.width, image.height);
        if clamp {
            x_center = clamp_unit(x_center);
            y_center = clamp_unit(y_center);
            norm_w = clamp_unit(norm_w);
            norm_h = clamp_unit(norm_h);
        }

        yolo_data.push_str(&format!(
            "{} {} {} {} {}\n",
            class_index, x_center, y_center, norm_w, norm_h
        ));
    }

    (yolo_data, skipped)
}

/// Process a single image: copy its bytes into the split's image directory
/// and write the matching label file.
///
/// A missing source image is recoverable: the image is skipped with a
/// warning and no label file is written for it.
pub fn process_image(
    image: &Image,
    annotations: &[&Annotation],
    labels_dir: &Path,
    images_dir: &Path,
    class_table: &ClassTable,
    args: &Args,
    stats: &ProcessingStats,
) -> std::io::Result<()> {
    let source_path = args.image_dir.join(&image.file_name);
    if !source_path.exists() {
        warn!("Image file not found: {}", source_path.display());
        stats.increment_skipped_missing_image();
        return Ok(());
    }

    let file_name = output_file_name(&image.file_name);
    let image_output_path = images_dir.join(&file_name);
    copy(&source_path, &image_output_path)?;

    // An image without annotations still gets an (empty) label file.
    let label_output_path = labels_dir.join(&file_name).with_extension("txt");
    let (yolo_data, skipped) = annotations_to_yolo(annotations, image, class_table, args.clamp);
    let mut writer = BufWriter::new(File::create(&label_output_path)?);
    writer.write_all(yolo_data.as_bytes())?;

    stats.increment_processed();
    stats.add_annotations_written(annotations.len() - skipped);
    for _ in 0..skipped {
        stats.increment_skipped_unknown_category();
    }

    Ok(())
}

/// Process all images of one split in parallel
pub fn process_split(
    image_ids: &[i64],
    images_by_id: &HashMap<i64, &Image>,
    annotations_by_image: &HashMap<i64, Vec<&Annotation>>,
    labels_dir: &Path,
    images_dir: &Path,
    class_table: &ClassTable,
    args: &Args,
    stats: &ProcessingStats,
    pb: &ProgressBar,
) {
    image_ids.par_iter().for_each(|image_id| {
        if let Some(image) = images_by_id.get(image_id) {
            let annotations = annotations_by_image
                .get(image_id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            if let Err(e) = process_image(
                image,
                annotations,
                labels_dir,
                images_dir,
                class_table,
                args,
                stats,
            ) {
                error!("Failed to process image {}: {}", image.file_name, e);
                stats.increment_failed();
            }
        }
        pb.inc(1);
    });
}
