use std::fs;
use std::path::Path;

use wastesort::coco::{Annotation, Category as CocoCategory, ClassTable, Image};
use wastesort::config::{validate_size, Args};
use wastesort::conversion::{annotations_to_yolo, normalize_bbox};
use wastesort::dataset::{process_dataset, split_image_ids};
use wastesort::io::setup_output_directories;
use wastesort::segregation::{lookup_category, segregate, Category, NO_ITEMS_DETECTED};
use wastesort::CocoDataset;

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_segregate_empty_batch() {
    let (summary, breakdown) = segregate(&[]);
    assert_eq!(summary, NO_ITEMS_DETECTED);
    assert_eq!(breakdown.total(), 0);
    assert!(breakdown.items.is_empty());
}

#[test]
fn test_segregate_counts_per_category() {
    let (summary, breakdown) = segregate(&labels(&["Food waste", "Food waste", "Battery"]));
    assert_eq!(breakdown.organic, 2);
    assert_eq!(breakdown.landfill, 1);
    assert_eq!(breakdown.recyclable, 0);
    assert_eq!(breakdown.items.len(), 2);
    assert!(summary.contains("2 Organic"));
    assert!(summary.contains("0 Recyclable"));
    assert!(summary.contains("1 Other/Landfill"));
}

#[test]
fn test_segregate_totals_sum_to_input_length() {
    let batch = labels(&[
        "Paper cup",
        "Aerosol",
        "Food waste",
        "Cigarette",
        "Paper cup",
        "Mystery object",
    ]);
    let (_, breakdown) = segregate(&batch);
    assert_eq!(breakdown.total(), batch.len());
}

#[test]
fn test_segregate_unknown_label_defaults_to_landfill() {
    let (_, breakdown) = segregate(&labels(&["UnknownZZZ"]));
    assert_eq!(breakdown.landfill, 1);
    assert_eq!(breakdown.items[0].category, Category::OtherLandfill);
}

#[test]
fn test_segregate_preserves_first_occurrence_order() {
    let (_, breakdown) = segregate(&labels(&["Paper cup", "Aerosol", "Paper cup", "Paper cup"]));
    assert_eq!(breakdown.items.len(), 2);
    assert_eq!(breakdown.items[0].label, "Paper cup");
    assert_eq!(breakdown.items[0].count, 3);
    assert_eq!(breakdown.items[1].label, "Aerosol");
    assert_eq!(breakdown.items[1].count, 1);
    assert_eq!(breakdown.recyclable, 4);
}

#[test]
fn test_lookup_category() {
    assert_eq!(lookup_category("Food waste"), Category::Organic);
    assert_eq!(lookup_category("Drink can"), Category::Recyclable);
    assert_eq!(lookup_category("Pizza box"), Category::Recyclable);
    assert_eq!(lookup_category("Battery"), Category::OtherLandfill);
    assert_eq!(lookup_category("not a real label"), Category::OtherLandfill);
}

#[test]
fn test_validate_size() {
    assert!(validate_size("0.5").is_ok());
    assert!(validate_size("1.0").is_ok());
    assert!(validate_size("0.0").is_ok());
    assert!(validate_size("-0.1").is_err());
    assert!(validate_size("1.1").is_err());
    assert!(validate_size("abc").is_err());
}

#[test]
fn test_normalize_bbox() {
    let (x_center, y_center, norm_w, norm_h) = normalize_bbox(&[10.0, 20.0, 30.0, 40.0], 100, 200);
    assert_eq!(x_center, 0.25);
    assert_eq!(y_center, 0.2);
    assert_eq!(norm_w, 0.3);
    assert_eq!(norm_h, 0.2);
}

fn test_class_table() -> ClassTable {
    ClassTable::from_categories(&[
        CocoCategory {
            id: 1,
            name: "Food waste".to_string(),
            supercategory: String::new(),
        },
        CocoCategory {
            id: 2,
            name: "Drink can".to_string(),
            supercategory: String::new(),
        },
    ])
}

#[test]
fn test_annotations_to_yolo() {
    let image = Image {
        id: 0,
        file_name: "000000.jpg".to_string(),
        width: 100,
        height: 200,
    };
    let annotation = Annotation {
        image_id: 0,
        category_id: 1,
        bbox: [10.0, 20.0, 30.0, 40.0],
    };

    let (yolo_data, skipped) =
        annotations_to_yolo(&[&annotation], &image, &test_class_table(), false);
    assert_eq!(yolo_data, "0 0.25 0.2 0.3 0.2\n");
    assert_eq!(skipped, 0);
}

#[test]
fn test_annotations_to_yolo_unknown_category_is_skipped() {
    let image = Image {
        id: 0,
        file_name: "000000.jpg".to_string(),
        width: 100,
        height: 200,
    };
    let annotation = Annotation {
        image_id: 0,
        category_id: 99,
        bbox: [10.0, 20.0, 30.0, 40.0],
    };

    let (yolo_data, skipped) =
        annotations_to_yolo(&[&annotation], &image, &test_class_table(), false);
    assert!(yolo_data.is_empty());
    assert_eq!(skipped, 1);
}

#[test]
fn test_annotations_to_yolo_clamp_toggle() {
    let image = Image {
        id: 0,
        file_name: "000000.jpg".to_string(),
        width: 100,
        height: 200,
    };
    // Malformed bbox hanging off the image
    let annotation = Annotation {
        image_id: 0,
        category_id: 1,
        bbox: [-10.0, -10.0, 200.0, 300.0],
    };

    let (passthrough, _) = annotations_to_yolo(&[&annotation], &image, &test_class_table(), false);
    assert_eq!(passthrough, "0 0.9 0.7 2 1.5\n");

    let (clamped, _) = annotations_to_yolo(&[&annotation], &image, &test_class_table(), true);
    for value in clamped.trim().split(' ').skip(1) {
        let value: f64 = value.parse().unwrap();
        assert!((0.0..=1.0).contains(&value));
    }
}

#[test]
fn test_class_table_orders_by_ascending_id() {
    let table = ClassTable::from_categories(&[
        CocoCategory {
            id: 5,
            name: "c".to_string(),
            supercategory: String::new(),
        },
        CocoCategory {
            id: 1,
            name: "a".to_string(),
            supercategory: String::new(),
        },
        CocoCategory {
            id: 3,
            name: "b".to_string(),
            supercategory: String::new(),
        },
    ]);

    assert_eq!(table.names(), &["a", "b", "c"]);
    assert_eq!(table.class_index(1), Some(0));
    assert_eq!(table.class_index(3), Some(1));
    assert_eq!(table.class_index(5), Some(2));
    assert_eq!(table.class_index(2), None);
}

#[test]
fn test_split_image_ids_partitions_without_overlap() {
    let ids: Vec<i64> = (0..10).collect();
    let split = split_image_ids(&mut ids.clone(), 0.2, 42);

    assert_eq!(split.val_ids.len(), 2);
    assert_eq!(split.train_ids.len(), 8);

    let mut combined: Vec<i64> = split
        .train_ids
        .iter()
        .chain(split.val_ids.iter())
        .copied()
        .collect();
    combined.sort_unstable();
    assert_eq!(combined, ids);
}

#[test]
fn test_split_image_ids_is_reproducible() {
    let ids: Vec<i64> = (0..50).collect();
    let first = split_image_ids(&mut ids.clone(), 0.3, 7);
    let second = split_image_ids(&mut ids.clone(), 0.3, 7);
    assert_eq!(first, second);
}

fn list_file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_convert_end_to_end() {
    let temp_dir = tempfile::tempdir().unwrap();
    let image_dir = temp_dir.path().join("data");
    let output_dir = temp_dir.path().join("out");

    // Two real images (one in a batch subdirectory) and one referenced
    // image that does not exist on disk.
    fs::create_dir_all(image_dir.join("batch_1")).unwrap();
    fs::write(image_dir.join("batch_1/000000.jpg"), [0xFF, 0xD8, 0xFF, 0xE0]).unwrap();
    fs::write(image_dir.join("000001.jpg"), [0xFF, 0xD8, 0xFF, 0xE1]).unwrap();

    let annotations_path = temp_dir.path().join("annotations.json");
    fs::write(
        &annotations_path,
        r#"{
            "categories": [
                {"id": 1, "name": "Food waste"},
                {"id": 2, "name": "Drink can"}
            ],
            "images": [
                {"id": 0, "file_name": "batch_1/000000.jpg", "width": 100, "height": 200},
                {"id": 1, "file_name": "000001.jpg", "width": 50, "height": 50},
                {"id": 2, "file_name": "000002.jpg", "width": 10, "height": 10}
            ],
            "annotations": [
                {"image_id": 0, "category_id": 1, "bbox": [10.0, 20.0, 30.0, 40.0]},
                {"image_id": 0, "category_id": 2, "bbox": [0.0, 0.0, 50.0, 100.0]}
            ]
        }"#,
    )
    .unwrap();

    let args = Args {
        annotations: annotations_path.clone(),
        image_dir,
        output_dir: output_dir.clone(),
        val_size: 0.34,
        seed: 42,
        clamp: false,
    };

    let dataset: CocoDataset =
        serde_json::from_str(&fs::read_to_string(&annotations_path).unwrap()).unwrap();
    let output_dirs = setup_output_directories(&output_dir).unwrap();
    process_dataset(&dataset, &output_dirs, &args).unwrap();

    let mut label_files = list_file_names(&output_dirs.train_labels_dir);
    label_files.extend(list_file_names(&output_dirs.val_labels_dir));
    label_files.sort();
    assert_eq!(label_files, vec!["000000.txt", "000001.txt"]);

    let mut image_files = list_file_names(&output_dirs.train_images_dir);
    image_files.extend(list_file_names(&output_dirs.val_images_dir));
    image_files.sort();
    assert_eq!(image_files, vec!["000000.jpg", "000001.jpg"]);

    // Annotated image: one line per annotation, indices re-based to 0
    let annotated = if output_dirs.train_labels_dir.join("000000.txt").exists() {
        output_dirs.train_labels_dir.join("000000.txt")
    } else {
        output_dirs.val_labels_dir.join("000000.txt")
    };
    let content = fs::read_to_string(annotated).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "0 0.25 0.2 0.3 0.2");
    assert!(lines[1].starts_with("1 "));

    // Image without annotations: empty label file
    let background = if output_dirs.train_labels_dir.join("000001.txt").exists() {
        output_dirs.train_labels_dir.join("000001.txt")
    } else {
        output_dirs.val_labels_dir.join("000001.txt")
    };
    assert_eq!(fs::read_to_string(background).unwrap(), "");

    // Copied image bytes are unchanged
    let copied = if output_dirs.train_images_dir.join("000000.jpg").exists() {
        output_dirs.train_images_dir.join("000000.jpg")
    } else {
        output_dirs.val_images_dir.join("000000.jpg")
    };
    assert_eq!(fs::read(copied).unwrap(), [0xFF, 0xD8, 0xFF, 0xE0]);

    let yaml_content = fs::read_to_string(output_dir.join("data.yaml")).unwrap();
    assert!(yaml_content.contains("train: images/train"));
    assert!(yaml_content.contains("val: images/val"));
    assert!(yaml_content.contains("nc: 2"));
    assert!(yaml_content.contains("names:"));
    assert!(yaml_content.contains("- Food waste"));
    assert!(yaml_content.contains("- Drink can"));
}

#[test]
fn test_malformed_annotation_file_is_fatal() {
    let temp_dir = tempfile::tempdir().unwrap();

    let truncated = temp_dir.path().join("broken.json");
    fs::write(&truncated, "{\"images\": [").unwrap();
    assert!(wastesort::load_coco_dataset(&truncated).is_err());

    // Structurally valid JSON missing a required collection
    let missing = temp_dir.path().join("missing.json");
    fs::write(&missing, r#"{"images": [], "annotations": []}"#).unwrap();
    assert!(wastesort::load_coco_dataset(&missing).is_err());

    assert!(wastesort::load_coco_dataset(&temp_dir.path().join("absent.json")).is_err());
}
