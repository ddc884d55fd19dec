//! Gradient filtering by favorites, search term and color names.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::catalog::Gradient;
use crate::sort::SortKey;

/// Whether to show every gradient or only favorites.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FavoriteFilter {
    #[default]
    All,
    Favorites,
}

/// User-controlled filter and ordering inputs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub search_term: String,
    /// Lower-cased color tokens; a gradient matches if any one of them matches.
    pub selected_colors: BTreeSet<String>,
    pub filter: FavoriteFilter,
    /// `None` keeps catalog order.
    pub sort_key: Option<SortKey>,
}

impl FilterState {
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: &str) -> Self {
        self.selected_colors.insert(color.trim().to_lowercase());
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: FavoriteFilter) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort_key: Option<SortKey>) -> Self {
        self.sort_key = sort_key;
        self
    }

    pub fn favorites_only(&self) -> bool {
        self.filter == FavoriteFilter::Favorites
    }

    /// Toggle a color token on or off; returns true if it is now selected.
    pub fn toggle_color(&mut self, color: &str) -> bool {
        let token = color.trim().to_lowercase();
        if self.selected_colors.remove(&token) {
            false
        } else {
            self.selected_colors.insert(token);
            true
        }
    }
}

/// Tokens a selected color also matches.
pub fn color_synonyms(token: &str) -> &'static [&'static str] {
    match token {
        "purple" | "violet" => &["purple", "violet"],
        "brown" | "beige" => &["brown", "beige"],
        _ => &[],
    }
}

fn matches_search(gradient: &Gradient, term: &str) -> bool {
    gradient.name.to_lowercase().contains(term)
        || gradient
            .colorsname
            .iter()
            .any(|name| name.to_lowercase().contains(term))
        || gradient
            .keywords
            .iter()
            .flatten()
            .any(|tag| tag.to_lowercase().contains(term))
}

fn matches_colors(gradient: &Gradient, selected: &BTreeSet<String>) -> bool {
    let names: Vec<String> = gradient
        .colorsname
        .iter()
        .map(|name| name.to_lowercase())
        .collect();

    selected.iter().any(|token| {
        let token = token.to_lowercase();
        let synonyms = color_synonyms(&token);
        names.iter().any(|name| {
            name.contains(token.as_str()) || synonyms.iter().any(|s| name.contains(*s))
        })
    })
}

/// Whether a single gradient passes every active clause.
pub fn matches(gradient: &Gradient, state: &FilterState, favorites: &BTreeSet<String>) -> bool {
    if state.favorites_only() && !favorites.contains(&gradient.name) {
        return false;
    }

    let term = state.search_term.trim().to_lowercase();
    if !term.is_empty() && !matches_search(gradient, &term) {
        return false;
    }

    state.selected_colors.is_empty() || matches_colors(gradient, &state.selected_colors)
}

/// Apply the filter state to the catalog, preserving catalog order.
pub fn filter_gradients<'a>(
    catalog: &'a [Gradient],
    state: &FilterState,
    favorites: &BTreeSet<String>,
) -> Vec<&'a Gradient> {
    if state.favorites_only() && favorites.is_empty() {
        return Vec::new();
    }

    catalog
        .iter()
        .filter(|gradient| matches(gradient, state, favorites))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Gradient> {
        vec![
            Gradient::new("Dusk", &["#41295A"])
                .with_color_names(&["Deep Violet"])
                .with_keywords(&[&["night"]]),
            Gradient::new("Sand", &["#DFA579"])
                .with_color_names(&["beige"])
                .with_keywords(&[&["Dune"]]),
            Gradient::default(),
        ]
    }

    fn names(list: &[&Gradient]) -> Vec<String> {
        list.iter().map(|g| g.name.clone()).collect()
    }

    #[test]
    fn test_synonyms_match_both_ways() {
        let catalog = sample();
        let purple = FilterState::default().with_color("Purple");
        assert_eq!(names(&filter_gradients(&catalog, &purple, &BTreeSet::new())), vec!["Dusk"]);

        let brown = FilterState::default().with_color("brown");
        assert_eq!(names(&filter_gradients(&catalog, &brown, &BTreeSet::new())), vec!["Sand"]);
    }

    #[test]
    fn test_search_falls_back_to_keywords() {
        let catalog = sample();
        let state = FilterState::default().with_search("DUNE");
        assert_eq!(names(&filter_gradients(&catalog, &state, &BTreeSet::new())), vec!["Sand"]);
    }

    #[test]
    fn test_blank_entry_never_panics() {
        let catalog = sample();
        let state = FilterState::default().with_search("x").with_color("red");
        assert!(filter_gradients(&catalog, &state, &BTreeSet::new()).is_empty());
        // With no clauses every entry passes, including the blank one
        assert_eq!(
            filter_gradients(&catalog, &FilterState::default(), &BTreeSet::new()).len(),
            3
        );
    }

    #[test]
    fn test_toggle_color() {
        let mut state = FilterState::default();
        assert!(state.toggle_color(" Blue"));
        assert!(state.selected_colors.contains("blue"));
        assert!(!state.toggle_color("BLUE"));
        assert!(state.selected_colors.is_empty());
    }

    #[test]
    fn test_favorite_filter_parses() {
        assert_eq!("favorites".parse::<FavoriteFilter>().ok(), Some(FavoriteFilter::Favorites));
        assert_eq!("ALL".parse::<FavoriteFilter>().ok(), Some(FavoriteFilter::All));
    }
}
