#![allow(clippy::unwrap_used)]

use gradient_gallery::gallery::Gallery;
use gradient_gallery::loader::{self, IncrementalLoader};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use test_utils::numbered_catalog;

fn loader_with(total: usize) -> IncrementalLoader {
    let mut loader = IncrementalLoader::default();
    loader.reset(total);
    loader
}

#[tokio::test]
async fn test_load_more_adds_one_page() {
    let loader = Mutex::new(loader_with(30));
    assert!(loader::load_more(&loader, Duration::from_millis(1)).await);
    assert_eq!(loader.lock().visible_count(), 24);

    assert!(loader::load_more(&loader, Duration::from_millis(1)).await);
    assert_eq!(loader.lock().visible_count(), 30);
    assert!(!loader::load_more(&loader, Duration::from_millis(1)).await);
}

#[tokio::test]
async fn test_concurrent_load_more_is_ignored() {
    let loader = Mutex::new(loader_with(40));
    let delay = Duration::from_millis(20);

    let (first, second) = tokio::join!(
        loader::load_more(&loader, delay),
        loader::load_more(&loader, delay)
    );

    assert!(first);
    assert!(!second);
    assert_eq!(loader.lock().visible_count(), 24);
    assert!(!loader.lock().is_loading());
}

#[tokio::test]
async fn test_reset_discards_pending_load() {
    let loader = Arc::new(Mutex::new(loader_with(40)));

    let task = tokio::spawn({
        let loader = Arc::clone(&loader);
        async move { loader::load_more(&loader, Duration::from_millis(50)).await }
    });

    while !loader.lock().is_loading() {
        tokio::task::yield_now().await;
    }
    loader.lock().reset(40);

    assert!(!task.await.unwrap());
    assert_eq!(loader.lock().visible_count(), 12);
    assert!(!loader.lock().is_loading());
}

#[tokio::test]
async fn test_gallery_pages_and_resets() {
    let mut gallery = Gallery::with_settings(
        numbered_catalog(30),
        12,
        Duration::from_millis(1),
        Duration::from_millis(250),
    );
    assert_eq!(gallery.page().len(), 12);
    assert!(gallery.has_more());

    assert!(gallery.load_more().await);
    assert_eq!(gallery.page().len(), 24);

    gallery.set_search_term("Gradient 1");
    assert_eq!(gallery.page().len(), 10);
    assert!(!gallery.has_more());
    assert!(!gallery.load_more().await);
}

#[tokio::test]
async fn test_gallery_filter_change_cancels_in_flight_load() {
    let mut gallery = Gallery::with_settings(
        numbered_catalog(40),
        12,
        Duration::from_millis(50),
        Duration::from_millis(250),
    );

    let shared = gallery.loader();
    let task = tokio::spawn(async move {
        loader::load_more(&shared, Duration::from_millis(50)).await
    });
    while !gallery.is_loading() {
        tokio::task::yield_now().await;
    }

    gallery.set_sort(Some(gradient_gallery::sort::SortKey::Name));
    assert!(!task.await.unwrap());
    assert_eq!(gallery.displayed_count(), 12);
}
