use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering::Relaxed};

// Struct to hold the paths to the output directories for train/val splits
pub struct OutputDirs {
    pub train_labels_dir: PathBuf,
    pub val_labels_dir: PathBuf,
    pub train_images_dir: PathBuf,
    pub val_images_dir: PathBuf,
}

// Struct to hold the image ids assigned to the training and validation splits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitData {
    pub train_ids: Vec<i64>,
    pub val_ids: Vec<i64>,
}

// Struct to hold processing statistics
//
// Counters are atomic because per-image processing runs in parallel.
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub images_processed: AtomicUsize,
    pub skipped_missing_image: AtomicUsize,
    pub annotations_written: AtomicUsize,
    pub skipped_unknown_category: AtomicUsize,
    pub failed_images: AtomicUsize,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_processed(&self) {
        self.images_processed.fetch_add(1, Relaxed);
    }

    pub fn increment_skipped_missing_image(&self) {
        self.skipped_missing_image.fetch_add(1, Relaxed);
    }

    pub fn add_annotations_written(&self, count: usize) {
        self.annotations_written.fetch_add(count, Relaxed);
    }

    pub fn increment_skipped_unknown_category(&self) {
        self.skipped_unknown_category.fetch_add(1, Relaxed);
    }

    pub fn increment_failed(&self) {
        self.failed_images.fetch_add(1, Relaxed);
    }

    pub fn print_summary(&self) {
        log::info!("=== Processing Summary ===");
        log::info!("Images processed: {}", self.images_processed.load(Relaxed));
        log::info!(
            "Annotations written: {}",
            self.annotations_written.load(Relaxed)
        );

        let missing = self.skipped_missing_image.load(Relaxed);
        if missing > 0 {
            log::warn!("Skipped (missing image file): {}", missing);
        }
        let unknown = self.skipped_unknown_category.load(Relaxed);
        if unknown > 0 {
            log::warn!("Skipped annotations (unknown category id): {}", unknown);
        }
        let failed = self.failed_images.load(Relaxed);
        if failed > 0 {
            log::warn!("Failed images: {}", failed);
        }
    }
}
