//! Copy history: which gradient was copied, when, and in which format.
//!
//! The log is newest-first, capped at a fixed number of entries, and entries
//! past the maximum age are dropped whenever the history is loaded.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::codegen::CodeFormat;
use crate::log_debug;
use crate::store::{Store, StoreError};

pub const MAX_HISTORY_ENTRIES: usize = 50;
pub const MAX_HISTORY_AGE_DAYS: i64 = 30;

/// What was put on the clipboard.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CopyType {
    Css,
    Tailwind,
    Sass,
    Bootstrap,
    Xml,
    Svg,
    Json,
    /// The raw color list.
    Colors,
}

impl From<CodeFormat> for CopyType {
    fn from(format: CodeFormat) -> Self {
        match format {
            CodeFormat::Css => Self::Css,
            CodeFormat::Tailwind => Self::Tailwind,
            CodeFormat::Sass => Self::Sass,
            CodeFormat::Bootstrap => Self::Bootstrap,
            CodeFormat::Xml => Self::Xml,
            CodeFormat::Svg => Self::Svg,
            CodeFormat::Json => Self::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyHistoryEntry {
    pub name: String,
    pub colors: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub copy_type: CopyType,
}

impl CopyHistoryEntry {
    pub fn new(name: &str, colors: &[String], copy_type: CopyType, timestamp: DateTime<Utc>) -> Self {
        Self {
            name: name.to_string(),
            colors: colors.to_vec(),
            timestamp,
            copy_type,
        }
    }
}

/// Retention policy for the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryLimits {
    pub max_entries: usize,
    pub max_age: Duration,
}

impl Default for HistoryLimits {
    fn default() -> Self {
        Self {
            max_entries: MAX_HISTORY_ENTRIES,
            max_age: Duration::days(MAX_HISTORY_AGE_DAYS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CopyHistory {
    entries: Vec<CopyHistoryEntry>,
    limits: HistoryLimits,
}

impl CopyHistory {
    /// Build from persisted entries, pruning stale ones relative to `now`.
    pub fn load(entries: Vec<CopyHistoryEntry>, limits: HistoryLimits, now: DateTime<Utc>) -> Self {
        let before = entries.len();
        // An age past the representable range keeps everything
        let cutoff = now.checked_sub_signed(limits.max_age);

        let mut entries: Vec<CopyHistoryEntry> = entries
            .into_iter()
            .filter(|entry| cutoff.is_none_or(|cutoff| entry.timestamp >= cutoff))
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(limits.max_entries);

        if entries.len() != before {
            log_debug!("Pruned copy history from {} to {} entries", before, entries.len());
        }
        Self { entries, limits }
    }

    pub fn record(&mut self, entry: CopyHistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(self.limits.max_entries);
    }

    /// Newest first.
    pub fn entries(&self) -> &[CopyHistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn into_entries(self) -> Vec<CopyHistoryEntry> {
        self.entries
    }
}

pub fn load_history<S: Store<Vec<CopyHistoryEntry>>>(
    store: &S,
    limits: HistoryLimits,
    now: DateTime<Utc>,
) -> CopyHistory {
    CopyHistory::load(store.get(), limits, now)
}

/// Append a copy action and persist the pruned, capped log.
///
/// # Errors
/// Returns an error if the history cannot be persisted.
pub fn record_copy<S: Store<Vec<CopyHistoryEntry>>>(
    store: &mut S,
    entry: CopyHistoryEntry,
    limits: HistoryLimits,
) -> Result<CopyHistory, StoreError> {
    let mut history = CopyHistory::load(store.get(), limits, entry.timestamp);
    history.record(entry);
    store.set(history.entries().to_vec())?;
    Ok(history)
}

/// # Errors
/// Returns an error if the empty history cannot be persisted.
pub fn clear_history<S: Store<Vec<CopyHistoryEntry>>>(store: &mut S) -> Result<(), StoreError> {
    store.set(Vec::new())
}
