use clap::Parser;

use log::{error, info};

use wastesort::{load_coco_dataset, process_dataset, setup_output_directories, Args};

fn main() {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if !args.image_dir.exists() {
        error!(
            "The specified image_dir does not exist: {}",
            args.image_dir.display()
        );
        return;
    }

    // Parse the annotation file before touching the output directory; a
    // broken file must abort with nothing written.
    let dataset = match load_coco_dataset(&args.annotations) {
        Ok(dataset) => dataset,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };

    info!("Starting the conversion process...");

    match setup_output_directories(&args.output_dir) {
        Ok(output_dirs) => {
            if let Err(e) = process_dataset(&dataset, &output_dirs, &args) {
                error!("Failed to process dataset: {}", e);
            }
        }
        Err(e) => error!("Failed to set up output directories: {}", e),
    }
}
