//! Gradient catalog - records and loading.
//!
//! The catalog is a JSON array of gradient records, either shipped with the
//! binary, read from a file, or fetched once from a static URL. Loading never
//! fails hard: a failed load yields an empty catalog plus the error, and the
//! caller retries by loading again.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};
use tokio_retry::Retry;
use tokio_retry::strategy::ExponentialBackoff;

use crate::{log_debug, log_warn};

/// Starter catalog bundled into the binary.
const EMBEDDED_CATALOG: &str = include_str!("../data/gradients.json");

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// A named gradient from the catalog.
///
/// Every field tolerates being absent or `null`; such entries are still
/// searchable but [`Gradient::is_displayable`] keeps them out of listings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Gradient {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Ordered color stops, expected to be `#RRGGBB`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub colors: Vec<String>,
    /// Human color names used only for search and filtering.
    #[serde(default, deserialize_with = "null_as_default")]
    pub colorsname: Vec<String>,
    /// Search tags, one group per color stop.
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<Vec<String>>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Gradient {
    pub fn new(name: impl Into<String>, colors: &[&str]) -> Self {
        Self {
            name: name.into(),
            colors: colors.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_color_names(mut self, names: &[&str]) -> Self {
        self.colorsname = names.iter().map(ToString::to_string).collect();
        self
    }

    #[must_use]
    pub fn with_keywords(mut self, groups: &[&[&str]]) -> Self {
        self.keywords = groups
            .iter()
            .map(|group| group.iter().map(ToString::to_string).collect())
            .collect();
        self
    }

    /// Whether the entry can be rendered: it needs a name and at least one color.
    pub fn is_displayable(&self) -> bool {
        !self.name.trim().is_empty() && !self.colors.is_empty()
    }

    /// First color stop, used for brightness and hue ordering.
    pub fn first_color(&self) -> Option<&str> {
        self.colors.first().map(String::as_str)
    }
}

/// Errors raised while loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to fetch catalog from {url}: {source}")]
    Fetch {
        url: String,
        source: reqwest::Error,
    },
    #[error("catalog must be a JSON array of gradients")]
    NotAnArray,
}

/// Where a catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogSource {
    /// The starter catalog compiled into the binary.
    #[default]
    Embedded,
    File(PathBuf),
    Url(String),
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Embedded => f.write_str("embedded catalog"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Outcome of a catalog load: the gradients plus the error, if any.
#[derive(Debug, Default)]
pub struct CatalogLoad {
    pub gradients: Vec<Gradient>,
    pub error: Option<CatalogError>,
}

impl CatalogLoad {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    fn failed(error: CatalogError) -> Self {
        Self {
            gradients: Vec::new(),
            error: Some(error),
        }
    }
}

impl From<Result<Vec<Gradient>, CatalogError>> for CatalogLoad {
    fn from(result: Result<Vec<Gradient>, CatalogError>) -> Self {
        match result {
            Ok(gradients) => Self {
                gradients,
                error: None,
            },
            Err(e) => Self::failed(e),
        }
    }
}

/// Parse a JSON catalog.
///
/// Entries that are not gradient-shaped objects are skipped with a warning
/// rather than failing the whole catalog.
///
/// # Errors
/// Returns an error if the document is not valid JSON or not an array.
pub fn parse_catalog(json: &str) -> Result<Vec<Gradient>, CatalogError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let serde_json::Value::Array(entries) = value else {
        return Err(CatalogError::NotAnArray);
    };

    let total = entries.len();
    let gradients: Vec<Gradient> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(gradient) => Some(gradient),
            Err(e) => {
                log_warn!("Skipping catalog entry {}: {}", index, e);
                None
            }
        })
        .collect();

    log_debug!("Parsed {} of {} catalog entries", gradients.len(), total);
    Ok(gradients)
}

/// The bundled starter catalog.
///
/// # Errors
/// Only fails if the bundled data is corrupt.
pub fn embedded_catalog() -> Result<Vec<Gradient>, CatalogError> {
    parse_catalog(EMBEDDED_CATALOG)
}

/// Read and parse a catalog file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_from_file(path: &Path) -> Result<Vec<Gradient>, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_catalog(&content)
}

/// Fetch a catalog from a static JSON URL, retrying transient failures.
///
/// # Errors
/// Returns the last fetch or parse error once retries are exhausted.
pub async fn fetch_remote(url: &str) -> Result<Vec<Gradient>, CatalogError> {
    let client = reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| CatalogError::Fetch {
            url: url.to_string(),
            source: e,
        })?;

    // 3 attempts total: initial + 2 retries
    let retry_strategy = ExponentialBackoff::from_millis(50).factor(4).take(2);

    let body = Retry::spawn(retry_strategy, || async {
        log_debug!("Fetching catalog from {}", url);
        match client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
        {
            Ok(response) => response.text().await,
            Err(e) => Err(e),
        }
    })
    .await
    .map_err(|e| CatalogError::Fetch {
        url: url.to_string(),
        source: e,
    })?;

    parse_catalog(&body)
}

/// Load a catalog from any source.
///
/// Never fails: the returned [`CatalogLoad`] carries the error instead, with
/// an empty gradient list. Retrying means calling this again.
#[tracing::instrument(level = "debug")]
pub async fn load_catalog(source: &CatalogSource) -> CatalogLoad {
    let result = match source {
        CatalogSource::Embedded => embedded_catalog(),
        CatalogSource::File(path) => load_from_file(path),
        CatalogSource::Url(url) => fetch_remote(url).await,
    };

    if let Err(e) = &result {
        log_warn!("Catalog load from {} failed: {}", source, e);
    }
    result.into()
}

/// Load from `primary`, falling back to `fallback` if the primary load fails.
///
/// When both fail, the primary's error is reported.
pub async fn load_with_fallback(primary: &CatalogSource, fallback: &CatalogSource) -> CatalogLoad {
    let first = load_catalog(primary).await;
    if first.is_ok() {
        return first;
    }

    log_debug!("Falling back to {}", fallback);
    let second = load_catalog(fallback).await;
    if second.is_ok() { second } else { first }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_null_fields_default() {
        let json = r##"[
            {"name": "Only Name"},
            {"name": null, "colors": null, "colorsname": null, "keywords": null},
            {"colors": ["#000000"]}
        ]"##;

        let gradients = parse_catalog(json).unwrap();
        assert_eq!(gradients.len(), 3);
        assert_eq!(gradients[0].name, "Only Name");
        assert!(gradients[0].colors.is_empty());
        assert_eq!(gradients[1], Gradient::default());
        assert_eq!(gradients[2].name, "");
    }

    #[test]
    fn test_non_object_entries_are_skipped() {
        let json = r##"[42, "text", {"name": "Kept", "colors": ["#FFFFFF"]}]"##;
        let gradients = parse_catalog(json).unwrap();
        assert_eq!(gradients.len(), 1);
        assert_eq!(gradients[0].name, "Kept");
    }

    #[test]
    fn test_not_an_array() {
        assert!(matches!(
            parse_catalog(r#"{"name": "x"}"#),
            Err(CatalogError::NotAnArray)
        ));
        assert!(matches!(parse_catalog("not json"), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_is_displayable() {
        assert!(Gradient::new("Sunrise", &["#FF0000"]).is_displayable());
        assert!(!Gradient::new("", &["#FF0000"]).is_displayable());
        assert!(!Gradient::new("   ", &["#FF0000"]).is_displayable());
        assert!(!Gradient::new("Empty", &[]).is_displayable());
    }

    #[test]
    fn test_embedded_catalog_is_valid() {
        let gradients = embedded_catalog().unwrap();
        assert!(!gradients.is_empty());
        assert!(gradients.iter().all(Gradient::is_displayable));
    }
}
