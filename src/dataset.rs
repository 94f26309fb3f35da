use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashMap;

use crate::coco::{Annotation, ClassTable, CocoDataset, Image};
use crate::config::Args;
use crate::conversion::process_split;
use crate::io::create_dataset_yaml;
use crate::types::{OutputDirs, ProcessingStats, SplitData};
use crate::utils::create_progress_bar;

/// Partition image ids into training and validation sets.
///
/// Ids are sorted before the seeded shuffle so the assignment depends only
/// on the id set, the ratio, and the seed. The validation split takes
/// `ceil(n * val_size)` ids; the rest train.
pub fn split_image_ids(image_ids: &mut Vec<i64>, val_size: f32, seed: u64) -> SplitData {
    image_ids.sort_unstable();

    let mut rng = StdRng::seed_from_u64(seed);
    image_ids.shuffle(&mut rng);

    let val_count = (image_ids.len() as f32 * val_size).ceil() as usize;
    let (val_ids, train_ids) = image_ids.split_at(val_count);

    SplitData {
        train_ids: train_ids.to_vec(),
        val_ids: val_ids.to_vec(),
    }
}

/// Main dataset processing pipeline
pub fn process_dataset(
    dataset: &CocoDataset,
    output_dirs: &OutputDirs,
    args: &Args,
) -> Result<(), Box<dyn std::error::Error>> {
    let class_table = ClassTable::from_categories(&dataset.categories);

    // Index images and group annotations by image id
    let images_by_id: HashMap<i64, &Image> =
        dataset.images.iter().map(|image| (image.id, image)).collect();
    let mut annotations_by_image: HashMap<i64, Vec<&Annotation>> = HashMap::new();
    for annotation in &dataset.annotations {
        annotations_by_image
            .entry(annotation.image_id)
            .or_default()
            .push(annotation);
    }

    let mut image_ids: Vec<i64> = images_by_id.keys().copied().collect();
    let split_data = split_image_ids(&mut image_ids, args.val_size, args.seed);

    info!("Total images: {}", image_ids.len());
    info!("Training images: {}", split_data.train_ids.len());
    info!("Validation images: {}", split_data.val_ids.len());

    let stats = ProcessingStats::new();

    let splits = [
        (
            "Train",
            &split_data.train_ids,
            &output_dirs.train_labels_dir,
            &output_dirs.train_images_dir,
        ),
        (
            "Val",
            &split_data.val_ids,
            &output_dirs.val_labels_dir,
            &output_dirs.val_images_dir,
        ),
    ];

    for (label, ids, labels_dir, images_dir) in splits {
        let pb = create_progress_bar(ids.len() as u64, label);
        process_split(
            ids,
            &images_by_id,
            &annotations_by_image,
            labels_dir,
            images_dir,
            &class_table,
            args,
            &stats,
            &pb,
        );
        pb.finish_with_message(format!("{} processing complete", label));
    }

    stats.print_summary();

    info!("Creating data.yaml file...");
    create_dataset_yaml(&args.output_dir, &class_table)
        .map_err(|e| format!("Failed to create data.yaml: {}", e))?;
    info!("Conversion process completed successfully.");

    Ok(())
}
