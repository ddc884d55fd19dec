//! Gradient ordering.
//!
//! All orderings are stable, so ties keep their catalog order. Brightness and
//! hue read the first color stop; gradients whose first stop does not parse
//! as `#RRGGBB` sink to the end of the list.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::catalog::Gradient;
use crate::color::hex_to_hsl;
use crate::log_warn;

/// Available list orderings.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortKey {
    Name,
    Brightness,
    Hue,
    Favorites,
}

impl SortKey {
    /// Parse a sort key, treating unknown keys as "keep catalog order".
    pub fn parse_lenient(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse() {
            Ok(key) => Some(key),
            Err(_) => {
                log_warn!("Unknown sort key '{}', keeping catalog order", trimmed);
                None
            }
        }
    }
}

/// `Some(value)` for parsable first colors; `None` sorts last.
fn compare_optional(a: Option<u16>, b: Option<u16>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn lightness(gradient: &Gradient) -> Option<u16> {
    gradient
        .first_color()
        .and_then(hex_to_hsl)
        .map(|hsl| u16::from(hsl.l))
}

fn hue(gradient: &Gradient) -> Option<u16> {
    gradient.first_color().and_then(hex_to_hsl).map(|hsl| hsl.h)
}

/// Reorder `list` in place. `None` leaves the order untouched.
pub fn sort_gradients(
    list: &mut [&Gradient],
    sort_key: Option<SortKey>,
    favorites: &BTreeSet<String>,
) {
    match sort_key {
        None => {}
        Some(SortKey::Name) => list.sort_by_cached_key(|g| g.name.to_lowercase()),
        Some(SortKey::Brightness) => {
            let mut keyed: Vec<(Option<u16>, &Gradient)> =
                list.iter().map(|g| (lightness(g), *g)).collect();
            keyed.sort_by(|a, b| compare_optional(a.0, b.0));
            write_back(list, keyed);
        }
        Some(SortKey::Hue) => {
            let mut keyed: Vec<(Option<u16>, &Gradient)> =
                list.iter().map(|g| (hue(g), *g)).collect();
            keyed.sort_by(|a, b| compare_optional(a.0, b.0));
            write_back(list, keyed);
        }
        Some(SortKey::Favorites) => {
            list.sort_by_key(|g| !favorites.contains(&g.name));
        }
    }
}

fn write_back<'a>(list: &mut [&'a Gradient], keyed: Vec<(Option<u16>, &'a Gradient)>) {
    for (slot, (_, gradient)) in list.iter_mut().zip(keyed) {
        *slot = gradient;
    }
}

/// Owned-list convenience over [`sort_gradients`].
pub fn sorted<'a>(
    mut list: Vec<&'a Gradient>,
    sort_key: Option<SortKey>,
    favorites: &BTreeSet<String>,
) -> Vec<&'a Gradient> {
    sort_gradients(&mut list, sort_key, favorites);
    list
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&Gradient]) -> Vec<String> {
        list.iter().map(|g| g.name.clone()).collect()
    }

    #[test]
    fn test_name_sort_is_case_insensitive() {
        let catalog = vec![
            Gradient::new("beta", &["#000000"]),
            Gradient::new("Alpha", &["#000000"]),
            Gradient::new("Gamma", &["#000000"]),
        ];
        let list = sorted(catalog.iter().collect(), Some(SortKey::Name), &BTreeSet::new());
        assert_eq!(names(&list), vec!["Alpha", "beta", "Gamma"]);
    }

    #[test]
    fn test_brightness_sinks_invalid_colors() {
        let catalog = vec![
            Gradient::new("Broken", &["oops"]),
            Gradient::new("White", &["#FFFFFF"]),
            Gradient::new("Empty", &[]),
            Gradient::new("Black", &["#000000"]),
            Gradient::new("Signed", &["#+0+0+0"]),
        ];
        let list = sorted(catalog.iter().collect(), Some(SortKey::Brightness), &BTreeSet::new());
        assert_eq!(names(&list), vec!["Black", "White", "Broken", "Empty", "Signed"]);
    }

    #[test]
    fn test_hue_sort_is_stable() {
        let catalog = vec![
            Gradient::new("Blue", &["#0000FF"]),
            Gradient::new("Red A", &["#FF0000"]),
            Gradient::new("Green", &["#00FF00"]),
            Gradient::new("Red B", &["#FF0000"]),
        ];
        let list = sorted(catalog.iter().collect(), Some(SortKey::Hue), &BTreeSet::new());
        assert_eq!(names(&list), vec!["Red A", "Red B", "Green", "Blue"]);
    }

    #[test]
    fn test_favorites_first() {
        let catalog = vec![
            Gradient::new("One", &["#000000"]),
            Gradient::new("Two", &["#000000"]),
            Gradient::new("Three", &["#000000"]),
        ];
        let favorites: BTreeSet<String> = ["Three".to_string(), "Two".to_string()].into();
        let list = sorted(catalog.iter().collect(), Some(SortKey::Favorites), &favorites);
        assert_eq!(names(&list), vec!["Two", "Three", "One"]);
    }

    #[test]
    fn test_unknown_key_keeps_order() {
        assert_eq!(SortKey::parse_lenient("rainbow"), None);
        assert_eq!(SortKey::parse_lenient("HUE"), Some(SortKey::Hue));

        let catalog = vec![Gradient::new("Z", &["#000000"]), Gradient::new("A", &["#000000"])];
        let list = sorted(catalog.iter().collect(), None, &BTreeSet::new());
        assert_eq!(names(&list), vec!["Z", "A"]);
    }
}
