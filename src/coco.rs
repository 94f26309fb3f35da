//! COCO format data structures and parsing
//!
//! This module provides the read side of the COCO object-detection format:
//! the annotation file layout and the class-index table derived from its
//! `categories` collection.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// COCO category information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub supercategory: String,
}

/// COCO image information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub id: i64,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

/// COCO annotation information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    pub image_id: i64,
    pub category_id: i64,
    pub bbox: [f64; 4], // [x, y, width, height] in pixels
}

/// The subset of a COCO annotation file consumed by the converter.
///
/// All three collections are required; unknown fields (`info`, `licenses`,
/// segmentation data) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CocoDataset {
    pub categories: Vec<Category>,
    pub images: Vec<Image>,
    pub annotations: Vec<Annotation>,
}

/// Parse a COCO annotation file.
///
/// Parses directly from the file stream instead of loading the whole file
/// into memory first. Any I/O or structural error is fatal to the caller;
/// nothing has been written at this point.
pub fn load_coco_dataset(path: &Path) -> Result<CocoDataset, Box<dyn std::error::Error>> {
    let file = File::open(path)
        .map_err(|e| format!("failed to open annotation file {}: {}", path.display(), e))?;
    let dataset: CocoDataset = serde_json::from_reader(file)
        .map_err(|e| format!("failed to parse annotation file {}: {}", path.display(), e))?;
    Ok(dataset)
}

/// Class-index table built from the `categories` collection.
///
/// Class index is the category's rank in ascending-id order, independent of
/// the raw 1-based ids. For a contiguous 1-based id block this coincides
/// with `id - 1`; for anything else the rank is still well-defined.
#[derive(Debug, Clone)]
pub struct ClassTable {
    names: Vec<String>,
    index_by_id: HashMap<i64, usize>,
}

impl ClassTable {
    pub fn from_categories(categories: &[Category]) -> Self {
        let mut sorted: Vec<&Category> = categories.iter().collect();
        sorted.sort_by_key(|c| c.id);

        let contiguous = sorted
            .iter()
            .enumerate()
            .all(|(index, category)| category.id == index as i64 + 1);
        if !contiguous {
            warn!(
                "category ids are not a contiguous 1-based block; \
                 class indices are assigned by ascending-id rank"
            );
        }

        let names = sorted.iter().map(|c| c.name.clone()).collect();
        let index_by_id = sorted
            .iter()
            .enumerate()
            .map(|(index, category)| (category.id, index))
            .collect();

        Self { names, index_by_id }
    }

    /// Look up the class index for a raw category id.
    pub fn class_index(&self, category_id: i64) -> Option<usize> {
        self.index_by_id.get(&category_id).copied()
    }

    /// Class names in class-index order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
