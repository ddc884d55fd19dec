//! Favorite gradients, keyed by gradient name.

use std::collections::BTreeSet;

use crate::log_debug;
use crate::store::{Store, StoreError};

pub type Favorites = BTreeSet<String>;

pub fn is_favorite<S: Store<Favorites>>(store: &S, name: &str) -> bool {
    store.get().contains(name)
}

/// Add or remove `name`; returns whether it is a favorite afterwards.
///
/// # Errors
/// Returns an error if the updated set cannot be persisted.
pub fn toggle_favorite<S: Store<Favorites>>(store: &mut S, name: &str) -> Result<bool, StoreError> {
    let mut favorites = store.get();
    let now_favorite = if favorites.remove(name) {
        false
    } else {
        favorites.insert(name.to_string());
        true
    };
    store.set(favorites)?;
    log_debug!("Favorite '{}' -> {}", name, now_favorite);
    Ok(now_favorite)
}
