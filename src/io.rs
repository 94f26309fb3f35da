use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::coco::ClassTable;
use crate::types::OutputDirs;
use crate::utils::create_output_directory;

/// Set up the directory structure for YOLO dataset output
pub fn setup_output_directories(output_dir: &Path) -> std::io::Result<OutputDirs> {
    let labels_dir = create_output_directory(&output_dir.join("labels"))?;
    let images_dir = create_output_directory(&output_dir.join("images"))?;

    let train_labels_dir = create_output_directory(&labels_dir.join("train"))?;
    let val_labels_dir = create_output_directory(&labels_dir.join("val"))?;
    let train_images_dir = create_output_directory(&images_dir.join("train"))?;
    let val_images_dir = create_output_directory(&images_dir.join("val"))?;

    Ok(OutputDirs {
        train_labels_dir,
        val_labels_dir,
        train_images_dir,
        val_images_dir,
    })
}

/// Create the data.yaml file describing the converted dataset for YOLO training
pub fn create_dataset_yaml(output_dir: &Path, class_table: &ClassTable) -> std::io::Result<()> {
    let dataset_yaml_path = output_dir.join("data.yaml");
    let mut dataset_yaml = BufWriter::new(File::create(&dataset_yaml_path)?);

    let absolute_path = fs::canonicalize(output_dir)?;
    let mut yaml_content = format!(
        "path: {}\ntrain: images/train\nval: images/val\n",
        absolute_path.to_string_lossy()
    );

    yaml_content.push_str(&format!("\nnc: {}\n", class_table.len()));
    yaml_content.push_str("names:\n");
    for name in class_table.names() {
        yaml_content.push_str(&format!("  - {}\n", name));
    }

    dataset_yaml.write_all(yaml_content.as_bytes())
}
