//! Gradient Gallery - browse color gradients and generate code for them
//!
//! The library holds the gallery pipeline (catalog loading, color indexing,
//! filtering, sorting and incremental paging) and the code generators for
//! CSS, Tailwind, Sass, Bootstrap, Android XML, SVG and JSON. The binary in
//! `main.rs` is a thin command-line front end over it.

#![allow(clippy::uninlined_format_args)] // Style preference
#![allow(clippy::format_push_string)] // Performance improvement but stylistic
#![allow(clippy::return_self_not_must_use)] // Builder pattern is clear enough
#![allow(clippy::items_after_statements)] // Locally-scoped use statements are fine
#![allow(clippy::too_many_arguments)] // Some functions legitimately need many params

pub mod catalog;
pub mod cli;
pub mod codegen;
pub mod color;
pub mod commands;
pub mod config;
pub mod favorites;
pub mod filter;
pub mod gallery;
pub mod history;
pub mod indexer;
pub mod loader;
pub mod logger;
pub mod sort;
pub mod store;
pub mod ui;

pub use catalog::{CatalogError, CatalogSource, Gradient};
pub use codegen::{CodeFormat, CodeGenerator, GradientOptions, GradientType};
pub use color::{Hsl, Rgb, hex_to_hsl, hex_to_rgb};
pub use config::Config;
pub use filter::{FavoriteFilter, FilterState, filter_gradients};
pub use gallery::{Gallery, compute_visible_gradients};
pub use loader::IncrementalLoader;
pub use sort::{SortKey, sort_gradients};
