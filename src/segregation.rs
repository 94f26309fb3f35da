//! Waste segregation: map detected item labels to disposal categories.
//!
//! Detection itself happens elsewhere; this module takes the raw label
//! strings a detector produced for one image and buckets them into the
//! three disposal categories, with per-item frequency counts.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Summary returned when the detector found nothing.
pub const NO_ITEMS_DETECTED: &str = "No waste items were clearly detected.";

/// The three disposal categories. Every label maps to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Organic,
    Recyclable,
    #[serde(rename = "Other/Landfill")]
    OtherLandfill,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Organic => write!(f, "Organic"),
            Category::Recyclable => write!(f, "Recyclable"),
            Category::OtherLandfill => write!(f, "Other/Landfill"),
        }
    }
}

const ORGANIC_LABELS: &[&str] = &["Food waste"];

const RECYCLABLE_LABELS: &[&str] = &[
    // Metal
    "Aluminium foil",
    "Aluminium blister pack",
    "Metal bottle cap",
    "Food Can",
    "Aerosol",
    "Drink can",
    "Scrap metal",
    "Pop tab",
    // Glass
    "Glass bottle",
    "Broken glass",
    "Glass jar",
    "Glass cup",
    // Plastic
    "Other plastic bottle",
    "Clear plastic bottle",
    "Plastic bottle cap",
    "Other plastic cup",
    "Plastic lid",
    "Other plastic",
    "Plastic film",
    "Six pack rings",
    "Garbage bag",
    "Other plastic wrapper",
    "Single-use carrier bag",
    "Polypropylene bag",
    "Spread tub",
    "Tupperware",
    "Other plastic container",
    "Plastic glooves",
    "Plastic utensils",
    "Squeezable tube",
    "Plastic straw",
    "Disposable plastic cup",
    "Disposable food container",
    // Paper and cardboard
    "Carded blister pack",
    "Toilet tube",
    "Other carton",
    "Egg carton",
    "Drink carton",
    "Corrugated carton",
    "Meal carton",
    "Pizza box",
    "Paper cup",
    "Magazine paper",
    "Tissues",
    "Wrapping paper",
    "Normal paper",
    "Paper bag",
    "Plastified paper bag",
    "Paper straw",
];

const LANDFILL_LABELS: &[&str] = &[
    "Battery",
    "Crisp packet",
    "Foam cup",
    "Foam food container",
    "Rope & strings",
    "Shoe",
    "Styrofoam piece",
    "Unlabeled litter",
    "Cigarette",
];

// Label lookup table, built once on first use
static CLASS_TO_CATEGORY: OnceLock<HashMap<&'static str, Category>> = OnceLock::new();

fn class_to_category() -> &'static HashMap<&'static str, Category> {
    CLASS_TO_CATEGORY.get_or_init(|| {
        let groups = [
            (Category::Organic, ORGANIC_LABELS),
            (Category::Recyclable, RECYCLABLE_LABELS),
            (Category::OtherLandfill, LANDFILL_LABELS),
        ];
        groups
            .into_iter()
            .flat_map(|(category, labels)| labels.iter().map(move |label| (*label, category)))
            .collect()
    })
}

/// Resolve a label to its disposal category.
///
/// Labels absent from the table fall back to `Other/Landfill`; this is the
/// expected path for classes the table does not cover, not an error.
pub fn lookup_category(label: &str) -> Category {
    class_to_category()
        .get(label)
        .copied()
        .unwrap_or(Category::OtherLandfill)
}

/// One distinct detected label with its frequency and resolved category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemCount {
    pub label: String,
    pub count: usize,
    pub category: Category,
}

/// Per-category totals plus the per-item records, in first-occurrence order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    pub organic: usize,
    pub recyclable: usize,
    pub landfill: usize,
    pub items: Vec<ItemCount>,
}

impl Breakdown {
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Organic => self.organic,
            Category::Recyclable => self.recyclable,
            Category::OtherLandfill => self.landfill,
        }
    }

    /// Total number of detected items across all categories.
    pub fn total(&self) -> usize {
        self.organic + self.recyclable + self.landfill
    }
}

/// Categorize a batch of detected item labels and count frequency.
///
/// Duplicates are meaningful: a label appearing three times contributes
/// three to its category total. The three totals always sum to the input
/// length. An empty batch returns [`NO_ITEMS_DETECTED`] and an empty
/// breakdown.
pub fn segregate(detected: &[String]) -> (String, Breakdown) {
    if detected.is_empty() {
        return (NO_ITEMS_DETECTED.to_string(), Breakdown::default());
    }

    let mut items: Vec<ItemCount> = Vec::new();
    let mut index_by_label: HashMap<&str, usize> = HashMap::new();

    for label in detected {
        match index_by_label.get(label.as_str()) {
            Some(&index) => items[index].count += 1,
            None => {
                index_by_label.insert(label, items.len());
                items.push(ItemCount {
                    label: label.clone(),
                    count: 1,
                    category: lookup_category(label),
                });
            }
        }
    }

    let mut organic = 0;
    let mut recyclable = 0;
    let mut landfill = 0;
    for item in &items {
        match item.category {
            Category::Organic => organic += item.count,
            Category::Recyclable => recyclable += item.count,
            Category::OtherLandfill => landfill += item.count,
        }
    }

    let summary = format!(
        "Detection complete. Found {} Organic, {} Recyclable, and {} Other/Landfill item(s).",
        organic, recyclable, landfill
    );

    (
        summary,
        Breakdown {
            organic,
            recyclable,
            landfill,
            items,
        },
    )
}
