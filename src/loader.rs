//! Incremental loading ("infinite scroll") over a filtered, sorted list.
//!
//! The loader only tracks counts; the list itself stays with the caller and is
//! windowed with [`IncrementalLoader::window`]. A page load is split in two:
//! [`IncrementalLoader::begin_load_more`] hands out a [`LoadTicket`] and
//! [`IncrementalLoader::complete_load`] applies it. Any [`reset`] in between
//! bumps the generation, so a completion that arrives after the inputs changed
//! is discarded instead of growing the new, reset window.
//!
//! [`reset`]: IncrementalLoader::reset

use std::time::Duration;

use parking_lot::Mutex;

use crate::log_debug;

/// Items shown before the first `load_more`, and added by each one.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Artificial latency for a page load. The data is local; this only paces the UI.
pub const DEFAULT_LOAD_DELAY: Duration = Duration::from_millis(300);

/// Proof that a page load was started for a particular loader generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

#[derive(Debug, Clone)]
pub struct IncrementalLoader {
    page_size: usize,
    displayed_count: usize,
    total: usize,
    generation: u64,
    pending: Option<LoadTicket>,
}

impl Default for IncrementalLoader {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl IncrementalLoader {
    /// A zero page size is bumped to 1 so loading always makes progress.
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            page_size,
            displayed_count: page_size,
            total: 0,
            generation: 0,
            pending: None,
        }
    }

    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Upper bound of the window; may exceed `total` before the first cap.
    pub const fn displayed_count(&self) -> usize {
        self.displayed_count
    }

    pub const fn total(&self) -> usize {
        self.total
    }

    pub const fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of items currently visible.
    pub fn visible_count(&self) -> usize {
        self.displayed_count.min(self.total)
    }

    pub fn has_more(&self) -> bool {
        self.visible_count() < self.total
    }

    /// The visible prefix of `list`.
    pub fn window<'a, T>(&self, list: &'a [T]) -> &'a [T] {
        &list[..self.displayed_count.min(list.len())]
    }

    /// Filter or sort inputs changed: show page one of the new results and
    /// drop any in-flight load.
    pub fn reset(&mut self, total: usize) {
        if self.pending.take().is_some() {
            log_debug!("Discarding in-flight page load after input change");
        }
        self.generation = self.generation.wrapping_add(1);
        self.displayed_count = self.page_size;
        self.total = total;
    }

    /// Start a page load. Returns `None` while another load is in flight or
    /// when everything is already shown.
    pub fn begin_load_more(&mut self) -> Option<LoadTicket> {
        if self.is_loading() || !self.has_more() {
            return None;
        }
        let ticket = LoadTicket {
            generation: self.generation,
        };
        self.pending = Some(ticket);
        Some(ticket)
    }

    /// Finish a page load. Returns false, changing nothing, for stale tickets.
    pub fn complete_load(&mut self, ticket: LoadTicket) -> bool {
        if self.pending != Some(ticket) {
            log_debug!("Ignoring stale page load (generation {})", ticket.generation);
            return false;
        }
        self.pending = None;
        self.displayed_count = (self.displayed_count + self.page_size).min(self.total);
        log_debug!("Showing {} of {} gradients", self.displayed_count, self.total);
        true
    }
}

/// Load one more page after `delay`.
///
/// The lock is released while waiting so other callers can observe the
/// loading state (and have their own `load_more` ignored) or reset the loader.
/// Returns true if the page was applied.
pub async fn load_more(loader: &Mutex<IncrementalLoader>, delay: Duration) -> bool {
    let Some(ticket) = loader.lock().begin_load_more() else {
        return false;
    };

    tokio::time::sleep(delay).await;

    loader.lock().complete_load(ticket)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_window() {
        let items: Vec<usize> = (0..30).collect();
        let mut loader = IncrementalLoader::default();
        loader.reset(items.len());
        assert_eq!(loader.window(&items).len(), 12);
        assert!(loader.has_more());
        assert!(!loader.is_loading());
    }

    #[test]
    fn test_growth_is_capped() {
        let mut loader = IncrementalLoader::default();
        loader.reset(30);

        let ticket = loader.begin_load_more().unwrap();
        assert!(loader.complete_load(ticket));
        assert_eq!(loader.displayed_count(), 24);

        let ticket = loader.begin_load_more().unwrap();
        assert!(loader.complete_load(ticket));
        assert_eq!(loader.displayed_count(), 30);
        assert!(!loader.has_more());
        assert!(loader.begin_load_more().is_none());
    }

    #[test]
    fn test_reentrant_begin_is_ignored() {
        let mut loader = IncrementalLoader::default();
        loader.reset(40);
        let first = loader.begin_load_more();
        assert!(first.is_some());
        assert!(loader.begin_load_more().is_none());
        assert_eq!(loader.displayed_count(), 12);
    }

    #[test]
    fn test_reset_discards_pending_completion() {
        let mut loader = IncrementalLoader::default();
        loader.reset(40);
        let ticket = loader.begin_load_more().unwrap();

        loader.reset(40);
        assert!(!loader.is_loading());
        assert!(!loader.complete_load(ticket));
        assert_eq!(loader.displayed_count(), 12);
    }

    #[test]
    fn test_short_list_has_no_more() {
        let mut loader = IncrementalLoader::default();
        loader.reset(5);
        assert!(!loader.has_more());
        assert_eq!(loader.window(&[1, 2, 3, 4, 5]).len(), 5);
    }

    #[test]
    fn test_zero_page_size() {
        let loader = IncrementalLoader::new(0);
        assert_eq!(loader.page_size(), 1);
    }
}
