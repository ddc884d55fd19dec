//! Color vocabulary extracted from the catalog, for building filter menus.

use std::collections::BTreeSet;

use strum_macros::{AsRefStr, Display, EnumIter};

use crate::catalog::Gradient;

/// Basic color-family tokens offered as filters.
pub const BASIC_COLOR_KEYWORDS: [&str; 14] = [
    "red", "pink", "orange", "yellow", "green", "blue", "purple", "brown", "black", "white",
    "gray", "grey", "teal", "cyan",
];

/// Display buckets for the color menu, in classification order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ColorCategory {
    Red,
    Pink,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Brown,
    Black,
    White,
    Gray,
    Other,
}

impl ColorCategory {
    /// Substrings that place a color in this bucket.
    ///
    /// Green also takes olive, teal and cyan here, while teal and cyan stay
    /// separate filter tokens in [`BASIC_COLOR_KEYWORDS`].
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Red => &["red"],
            Self::Pink => &["pink"],
            Self::Orange => &["orange"],
            Self::Yellow => &["yellow"],
            Self::Green => &["green", "olive", "teal", "cyan"],
            Self::Blue => &["blue"],
            Self::Purple => &["purple", "violet"],
            Self::Brown => &["brown", "beige"],
            Self::Black => &["black"],
            Self::White => &["white"],
            Self::Gray => &["gray", "grey"],
            Self::Other => &[],
        }
    }

    /// First bucket whose keywords match `color` (case-insensitive), else
    /// [`ColorCategory::Other`].
    pub fn classify(color: &str) -> Self {
        use strum::IntoEnumIterator;

        let color = color.to_lowercase();
        Self::iter()
            .find(|category| category.keywords().iter().any(|k| color.contains(*k)))
            .unwrap_or(Self::Other)
    }
}

/// One non-empty bucket of [`color_categories`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    pub category: ColorCategory,
    pub colors: Vec<String>,
}

/// Every distinct color name in the catalog, trimmed, lower-cased and sorted.
pub fn unique_colors(catalog: &[Gradient]) -> Vec<String> {
    catalog
        .iter()
        .flat_map(|gradient| gradient.colorsname.iter())
        .map(|name| name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The unique colors that contain one of the basic color-family keywords.
pub fn basic_colors(catalog: &[Gradient]) -> Vec<String> {
    unique_colors(catalog)
        .into_iter()
        .filter(|color| BASIC_COLOR_KEYWORDS.iter().any(|k| color.contains(*k)))
        .collect()
}

/// Bucket colors into display categories, dropping empty buckets.
///
/// Colors keep their input order within a bucket; buckets keep declaration order.
pub fn color_categories<S: AsRef<str>>(colors: &[S]) -> Vec<CategoryGroup> {
    use strum::IntoEnumIterator;

    let mut groups: Vec<CategoryGroup> = ColorCategory::iter()
        .map(|category| CategoryGroup {
            category,
            colors: Vec::new(),
        })
        .collect();

    for color in colors {
        let color = color.as_ref();
        let category = ColorCategory::classify(color);
        if let Some(group) = groups.iter_mut().find(|g| g.category == category) {
            group.colors.push(color.to_string());
        }
    }

    groups.retain(|g| !g.colors.is_empty());
    groups
}
