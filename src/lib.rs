//! Waste segregation toolkit
//!
//! This library provides two independent pieces: a classifier that buckets
//! detected waste-item labels into disposal categories, and a converter
//! that turns COCO object-detection annotations into a YOLO training
//! dataset layout.

pub mod coco;
pub mod config;
pub mod conversion;
pub mod dataset;
pub mod io;
pub mod segregation;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use coco::{load_coco_dataset, ClassTable, CocoDataset};
pub use config::Args;
pub use dataset::{process_dataset, split_image_ids};
pub use io::setup_output_directories;
pub use segregation::{lookup_category, segregate, Breakdown, Category, ItemCount};
pub use types::{OutputDirs, SplitData};
