#![allow(clippy::unwrap_used)]

use gradient_gallery::catalog::{Gradient, embedded_catalog};
use gradient_gallery::gallery::Gallery;
use gradient_gallery::indexer::{self, ColorCategory};
use std::collections::BTreeSet;

use test_utils::sample_catalog;

#[test]
fn test_unique_colors_sorted_without_duplicates() {
    let catalog = vec![
        Gradient::new("A", &["#000000", "#111111"]).with_color_names(&[" Navy Blue", "red"]),
        Gradient::new("B", &["#222222", "#333333"]).with_color_names(&["navy blue", "RED "]),
    ];
    assert_eq!(indexer::unique_colors(&catalog), vec!["navy blue", "red"]);

    let embedded = embedded_catalog().unwrap();
    let unique = indexer::unique_colors(&embedded);
    let mut sorted = unique.clone();
    sorted.sort();
    assert_eq!(unique, sorted);
    let distinct: BTreeSet<String> = unique.iter().map(|c| c.to_lowercase()).collect();
    assert_eq!(distinct.len(), unique.len());
}

#[test]
fn test_basic_colors_are_substring_matches() {
    let catalog = vec![
        Gradient::new("A", &["#000000"]).with_color_names(&["dusty rose pink"]),
        Gradient::new("B", &["#000000"]).with_color_names(&["mauve"]),
    ];
    assert_eq!(indexer::basic_colors(&catalog), vec!["dusty rose pink"]);
}

#[test]
fn test_categories_from_catalog() {
    let unique = indexer::unique_colors(&sample_catalog());
    let groups = indexer::color_categories(&unique);

    let summary: Vec<(ColorCategory, Vec<String>)> = groups
        .into_iter()
        .map(|group| (group.category, group.colors))
        .collect();
    assert_eq!(
        summary,
        vec![
            (ColorCategory::Red, vec!["red".to_string()]),
            (ColorCategory::Yellow, vec!["yellow".to_string()]),
            (ColorCategory::Green, vec!["cyan".to_string()]),
            (ColorCategory::Blue, vec!["blue".to_string()]),
        ]
    );
}

#[test]
fn test_categories_are_deterministic() {
    let catalog = embedded_catalog().unwrap();
    let first = Gallery::new(catalog.clone()).color_vocabulary();
    let second = Gallery::new(catalog).color_vocabulary();
    assert_eq!(first, second);
}
