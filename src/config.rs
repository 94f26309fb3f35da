use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

/// Command-line arguments parser for converting COCO annotations to YOLO format.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Path to the COCO annotation JSON file
    #[arg(short = 'a', long = "annotations")]
    pub annotations: PathBuf,

    /// Directory containing the source images referenced by the annotations
    #[arg(short = 'i', long = "image_dir")]
    pub image_dir: PathBuf,

    /// Output directory for the YOLO dataset
    #[arg(short = 'o', long = "output_dir", default_value = "YOLODataset")]
    pub output_dir: PathBuf,

    /// Proportion of the dataset to use for validation
    #[arg(long = "val_size", default_value_t = 0.2, value_parser = validate_size)]
    pub val_size: f32,

    /// Seed for random shuffling
    #[arg(long = "seed", default_value_t = 42)]
    pub seed: u64,

    /// Clamp normalized bounding-box values to [0, 1]
    #[arg(long = "clamp")]
    pub clamp: bool,
}

// Validate that the size is between 0.0 and 1.0
pub fn validate_size(s: &str) -> Result<f32, String> {
    match f32::from_str(s) {
        Ok(val) if (0.0..=1.0).contains(&val) => Ok(val),
        _ => Err("SIZE must be between 0.0 and 1.0".to_string()),
    }
}
