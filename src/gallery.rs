//! The gallery pipeline: filter, sort, drop undisplayable entries, window.
//!
//! [`compute_visible_gradients`] is the pure pipeline. [`Gallery`] wraps it
//! with the stateful pieces a front end needs: the current [`FilterState`],
//! the [`IncrementalLoader`] that is reset on every input change, and a
//! [`SearchDebouncer`] for keystroke-driven search.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::catalog::Gradient;
use crate::filter::{FavoriteFilter, FilterState, filter_gradients};
use crate::indexer::{self, CategoryGroup};
use crate::loader::{self, DEFAULT_LOAD_DELAY, DEFAULT_PAGE_SIZE, IncrementalLoader};
use crate::log_debug;
use crate::sort::{SortKey, sort_gradients};

pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(250);

/// Filter, sort, then keep only entries that can be displayed.
pub fn compute_visible_gradients<'a>(
    catalog: &'a [Gradient],
    state: &FilterState,
    favorites: &BTreeSet<String>,
) -> Vec<&'a Gradient> {
    let mut list = filter_gradients(catalog, state, favorites);
    sort_gradients(&mut list, state.sort_key, favorites);
    list.retain(|gradient| gradient.is_displayable());
    list
}

/// Holds back search terms until typing pauses.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE)
    }
}

impl SearchDebouncer {
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record a keystroke; restarts the quiet period.
    pub fn push(&mut self, term: impl Into<String>, now: Instant) {
        self.pending = Some((term.into(), now));
    }

    /// The settled term, once `delay` has passed since the last push.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|(_, at)| now.saturating_duration_since(*at) >= self.delay);
        if ready {
            self.pending.take().map(|(term, _)| term)
        } else {
            None
        }
    }

    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Stateful view over a catalog.
#[derive(Debug)]
pub struct Gallery {
    catalog: Vec<Gradient>,
    state: FilterState,
    favorites: BTreeSet<String>,
    loader: Arc<Mutex<IncrementalLoader>>,
    load_delay: Duration,
    debouncer: SearchDebouncer,
}

impl Gallery {
    pub fn new(catalog: Vec<Gradient>) -> Self {
        Self::with_settings(catalog, DEFAULT_PAGE_SIZE, DEFAULT_LOAD_DELAY, DEFAULT_SEARCH_DEBOUNCE)
    }

    pub fn with_settings(
        catalog: Vec<Gradient>,
        page_size: usize,
        load_delay: Duration,
        debounce: Duration,
    ) -> Self {
        let mut gallery = Self {
            catalog,
            state: FilterState::default(),
            favorites: BTreeSet::new(),
            loader: Arc::new(Mutex::new(IncrementalLoader::new(page_size))),
            load_delay,
            debouncer: SearchDebouncer::new(debounce),
        };
        gallery.refresh();
        gallery
    }

    pub fn catalog(&self) -> &[Gradient] {
        &self.catalog
    }

    pub const fn state(&self) -> &FilterState {
        &self.state
    }

    pub const fn favorites(&self) -> &BTreeSet<String> {
        &self.favorites
    }

    pub fn find(&self, name: &str) -> Option<&Gradient> {
        self.catalog
            .iter()
            .find(|g| g.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Full filtered and sorted list.
    pub fn visible(&self) -> Vec<&Gradient> {
        compute_visible_gradients(&self.catalog, &self.state, &self.favorites)
    }

    /// The part of [`Gallery::visible`] loaded so far.
    pub fn page(&self) -> Vec<&Gradient> {
        let visible = self.visible();
        let count = self.loader.lock().visible_count().min(visible.len());
        visible.into_iter().take(count).collect()
    }

    pub fn has_more(&self) -> bool {
        self.loader.lock().has_more()
    }

    pub fn is_loading(&self) -> bool {
        self.loader.lock().is_loading()
    }

    pub fn displayed_count(&self) -> usize {
        self.loader.lock().visible_count()
    }

    /// Shared handle for driving [`loader::load_more`] from another task.
    pub fn loader(&self) -> Arc<Mutex<IncrementalLoader>> {
        Arc::clone(&self.loader)
    }

    /// Load the next page after the configured delay.
    pub async fn load_more(&self) -> bool {
        loader::load_more(&self.loader, self.load_delay).await
    }

    /// Load every remaining page immediately.
    pub fn load_all(&self) {
        let mut loader = self.loader.lock();
        while let Some(ticket) = loader.begin_load_more() {
            loader.complete_load(ticket);
        }
    }

    /// Unique, basic and categorized color names for the filter menu.
    pub fn color_vocabulary(&self) -> (Vec<String>, Vec<String>, Vec<CategoryGroup>) {
        let unique = indexer::unique_colors(&self.catalog);
        let basic = indexer::basic_colors(&self.catalog);
        let categories = indexer::color_categories(&unique);
        (unique, basic, categories)
    }

    fn refresh(&mut self) {
        let total = self.visible().len();
        self.loader.lock().reset(total);
        log_debug!("Gallery refreshed: {} matching gradients", total);
    }

    /// Apply a search term immediately.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.state.search_term = term.into();
        self.refresh();
    }

    /// Queue a search term behind the debouncer.
    pub fn type_search(&mut self, term: impl Into<String>, now: Instant) {
        self.debouncer.push(term, now);
    }

    /// Apply a debounced search term if typing has paused. Returns true if applied.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(term) => {
                self.set_search_term(term);
                true
            }
            None => false,
        }
    }

    pub fn toggle_color(&mut self, color: &str) -> bool {
        let selected = self.state.toggle_color(color);
        self.refresh();
        selected
    }

    pub fn clear_colors(&mut self) {
        self.state.selected_colors.clear();
        self.refresh();
    }

    pub fn set_filter(&mut self, filter: FavoriteFilter) {
        self.state.filter = filter;
        self.refresh();
    }

    pub fn set_sort(&mut self, sort_key: Option<SortKey>) {
        self.state.sort_key = sort_key;
        self.refresh();
    }

    /// Replace the whole filter state at once.
    pub fn set_state(&mut self, state: FilterState) {
        self.state = state;
        self.refresh();
    }

    /// Favorites changed in the backing store.
    pub fn set_favorites(&mut self, favorites: BTreeSet<String>) {
        self.favorites = favorites;
        self.refresh();
    }
}
