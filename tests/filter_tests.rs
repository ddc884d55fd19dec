#![allow(clippy::unwrap_used)]

use gradient_gallery::catalog::Gradient;
use gradient_gallery::filter::{FavoriteFilter, FilterState, filter_gradients};
use gradient_gallery::gallery::compute_visible_gradients;
use gradient_gallery::indexer;
use gradient_gallery::sort::SortKey;
use std::collections::BTreeSet;

use test_utils::{favorites, names, sample_catalog};

#[test]
fn test_search_by_name() {
    let catalog = sample_catalog();
    let state = FilterState::default().with_search("sun");
    let result = filter_gradients(&catalog, &state, &BTreeSet::new());
    assert_eq!(names(&result), vec!["Sunrise"]);
}

#[test]
fn test_search_matches_keywords_and_color_names() {
    let catalog = sample_catalog();
    let by_keyword = FilterState::default().with_search("CALM");
    assert_eq!(
        names(&filter_gradients(&catalog, &by_keyword, &BTreeSet::new())),
        vec!["Ocean"]
    );

    let by_color = FilterState::default().with_search("yell");
    assert_eq!(
        names(&filter_gradients(&catalog, &by_color, &BTreeSet::new())),
        vec!["Sunrise"]
    );
}

#[test]
fn test_selected_color() {
    let catalog = sample_catalog();
    let state = FilterState::default().with_color("blue");
    let result = filter_gradients(&catalog, &state, &BTreeSet::new());
    assert_eq!(names(&result), vec!["Ocean"]);
}

#[test]
fn test_selected_colors_are_any_of() {
    let catalog = sample_catalog();
    let state = FilterState::default().with_color("blue").with_color("red");
    let result = filter_gradients(&catalog, &state, &BTreeSet::new());
    assert_eq!(names(&result), vec!["Sunrise", "Ocean"]);
}

#[test]
fn test_favorites_only_with_no_favorites() {
    let catalog = sample_catalog();
    let state = FilterState::default().with_filter(FavoriteFilter::Favorites);
    assert!(filter_gradients(&catalog, &state, &BTreeSet::new()).is_empty());
}

#[test]
fn test_favorites_only() {
    let catalog = sample_catalog();
    let state = FilterState::default().with_filter(FavoriteFilter::Favorites);
    let result = filter_gradients(&catalog, &state, &favorites(&["Ocean"]));
    assert_eq!(names(&result), vec!["Ocean"]);
}

#[test]
fn test_clauses_are_combined() {
    let catalog = sample_catalog();
    let state = FilterState::default()
        .with_search("sun")
        .with_color("blue");
    assert!(filter_gradients(&catalog, &state, &BTreeSet::new()).is_empty());
}

#[test]
fn test_synonyms() {
    let catalog = vec![
        Gradient::new("Violet Hour", &["#8E2DE2"]).with_color_names(&["violet"]),
        Gradient::new("Sand", &["#E6D3A3"]).with_color_names(&["beige"]),
        Gradient::new("Grass", &["#56AB2F"]).with_color_names(&["green"]),
    ];

    let purple = FilterState::default().with_color("purple");
    assert_eq!(
        names(&filter_gradients(&catalog, &purple, &BTreeSet::new())),
        vec!["Violet Hour"]
    );

    let brown = FilterState::default().with_color("brown");
    assert_eq!(
        names(&filter_gradients(&catalog, &brown, &BTreeSet::new())),
        vec!["Sand"]
    );
}

#[test]
fn test_missing_fields_never_match_and_never_panic() {
    let catalog = vec![Gradient::default(), Gradient::new("Named", &[])];
    let state = FilterState::default().with_search("x").with_color("red");
    assert!(filter_gradients(&catalog, &state, &BTreeSet::new()).is_empty());
}

#[test]
fn test_basic_color_filter_results_contain_selected_color() {
    let catalog = gradient_gallery::catalog::embedded_catalog().unwrap();
    for color in indexer::basic_colors(&catalog) {
        let state = FilterState::default().with_color(&color);
        let result = filter_gradients(&catalog, &state, &BTreeSet::new());
        assert!(!result.is_empty(), "no gradient for basic color {color}");
        for gradient in result {
            assert!(
                gradient.colorsname.iter().any(|name| {
                    let name = name.to_lowercase();
                    name.contains(color.as_str())
                        || gradient_gallery::filter::color_synonyms(&color)
                            .iter()
                            .any(|token| name.contains(token))
                }),
                "{} does not contain {}",
                gradient.name,
                color
            );
        }
    }
}

#[test]
fn test_filtering_is_idempotent() {
    let catalog = gradient_gallery::catalog::embedded_catalog().unwrap();
    let state = FilterState::default().with_search("blue").with_color("blue");
    let first: Vec<Gradient> = filter_gradients(&catalog, &state, &BTreeSet::new())
        .into_iter()
        .cloned()
        .collect();
    let second = filter_gradients(&first, &state, &BTreeSet::new());
    assert_eq!(names(&second), first.iter().map(|g| g.name.clone()).collect::<Vec<_>>());
}

#[test]
fn test_pipeline_sorts_after_filtering() {
    let catalog = sample_catalog();
    let state = FilterState::default().with_sort(Some(SortKey::Hue));
    let result = compute_visible_gradients(&catalog, &state, &BTreeSet::new());
    assert_eq!(names(&result), vec!["Sunrise", "Ocean"]);

    let state = FilterState::default().with_sort(Some(SortKey::Favorites));
    let result = compute_visible_gradients(&catalog, &state, &favorites(&["Ocean"]));
    assert_eq!(names(&result), vec!["Ocean", "Sunrise"]);
}

#[test]
fn test_synonym_selection_matches_base_color_names() {
    let catalog = vec![
        Gradient::new("Grape", &["#6A3093"]).with_color_names(&["dark purple"]),
        Gradient::new("Bark", &["#8E5B3A"]).with_color_names(&["brown"]),
        Gradient::new("Lime", &["#A8E063"]).with_color_names(&["light green"]),
    ];

    let violet = FilterState::default().with_color("violet");
    assert_eq!(names(&filter_gradients(&catalog, &violet, &BTreeSet::new())), vec!["Grape"]);

    let beige = FilterState::default().with_color("Beige");
    assert_eq!(names(&filter_gradients(&catalog, &beige, &BTreeSet::new())), vec!["Bark"]);
}
