use clap::Parser;
use log::error;
use std::io::BufRead;

use wastesort::segregation::{segregate, NO_ITEMS_DETECTED};

/// Classify detected waste-item labels into disposal categories.
#[derive(Parser, Debug)]
#[command(version, long_about = None)]
struct Args {
    /// Detected item labels; read from stdin (one per line) when omitted
    labels: Vec<String>,

    /// Emit the breakdown as JSON instead of a table
    #[arg(long = "json")]
    json: bool,
}

fn read_labels_from_stdin() -> std::io::Result<Vec<String>> {
    let stdin = std::io::stdin();
    let mut labels = Vec::new();
    for line in stdin.lock().lines() {
        let line = line?;
        let label = line.trim();
        if !label.is_empty() {
            labels.push(label.to_string());
        }
    }
    Ok(labels)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let labels = if args.labels.is_empty() {
        match read_labels_from_stdin() {
            Ok(labels) => labels,
            Err(e) => {
                error!("Failed to read labels from stdin: {}", e);
                return;
            }
        }
    } else {
        args.labels
    };

    let (summary, breakdown) = segregate(&labels);

    if args.json {
        match serde_json::to_string_pretty(&breakdown) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Failed to serialize breakdown: {}", e),
        }
        return;
    }

    println!("{}", summary);
    if summary == NO_ITEMS_DETECTED {
        return;
    }

    let label_width = breakdown
        .items
        .iter()
        .map(|item| item.label.len())
        .max()
        .unwrap_or(0)
        .max("Item Detected".len());

    println!();
    println!("{:>5}  {:<label_width$}  Category", "Count", "Item Detected");
    for item in &breakdown.items {
        println!(
            "{:>5}  {:<label_width$}  {}",
            item.count, item.label, item.category
        );
    }
}
