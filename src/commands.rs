use crate::catalog::{self, CatalogSource, Gradient};
use crate::cli::CatalogArgs;
use crate::codegen::{CodeFormat, CodeGenerator, GradientOptions, GradientType, export_filename};
use crate::color::hex_to_hsl;
use crate::config::Config;
use crate::favorites::{self, Favorites};
use crate::filter::{FavoriteFilter, FilterState, filter_gradients};
use crate::gallery::Gallery;
use crate::history::{self, CopyHistoryEntry, CopyType};
use crate::store::{JsonFileStore, Store};
use crate::ui::{self, SWATCH_WIDTH};
use crate::{log_debug, log_error, log_info};

use anyhow::{Context, Result, anyhow};
use arboard::Clipboard;
use chrono::{Local, Utc};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

type FavoritesStore = JsonFileStore<Favorites>;
type HistoryStore = JsonFileStore<Vec<CopyHistoryEntry>>;

/// Options for the `list` command
#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    pub search: Option<String>,
    pub colors: Vec<String>,
    pub favorites_only: bool,
    pub sort: Option<String>,
    pub pages: usize,
    pub all: bool,
}

/// A gradient to generate code for, with per-call overrides of the configured defaults
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    pub name: String,
    pub format: Option<CodeFormat>,
    pub angle: Option<u16>,
    pub animated: bool,
    pub speed: Option<f64>,
    pub text: bool,
}

#[derive(Debug, Clone)]
pub struct ExportArgs {
    pub gradient: GenerateArgs,
    pub dir: PathBuf,
}

/// Which catalog to load: command-line flags win over configuration
fn catalog_sources(config: &Config, args: &CatalogArgs) -> (CatalogSource, CatalogSource) {
    match (&args.path, &args.url) {
        (Some(path), _) => (CatalogSource::File(path.clone()), CatalogSource::Embedded),
        (None, Some(url)) => (CatalogSource::Url(url.clone()), CatalogSource::Embedded),
        (None, None) => config.catalog_sources(),
    }
}

async fn load_catalog(config: &Config, args: &CatalogArgs) -> Result<Vec<Gradient>> {
    let (primary, fallback) = catalog_sources(config, args);

    let spinner = matches!(primary, CatalogSource::Url(_))
        .then(|| ui::create_spinner(&format!("Fetching gradients from {primary}...")));
    let loaded = catalog::load_with_fallback(&primary, &fallback).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    if let Some(error) = loaded.error {
        log_error!("No catalog could be loaded: {}", error);
        return Err(anyhow::Error::new(error).context(format!("Failed to load gradients from {primary}")));
    }
    log_info!("Loaded {} gradients", loaded.gradients.len());
    Ok(loaded.gradients)
}

fn open_favorites(config: &Config) -> Result<FavoritesStore> {
    let path = config.favorites_path()?;
    JsonFileStore::open(path).context("Failed to open favorites")
}

fn open_history(config: &Config) -> Result<HistoryStore> {
    let path = config.history_path()?;
    JsonFileStore::open(path).context("Failed to open copy history")
}

/// Exact (case-insensitive) match, otherwise an error listing close names
fn find_gradient<'a>(catalog: &'a [Gradient], name: &str) -> Result<&'a Gradient> {
    if let Some(gradient) = catalog
        .iter()
        .find(|g| g.name.eq_ignore_ascii_case(name.trim()))
    {
        return Ok(gradient);
    }

    let state = FilterState::default().with_search(name);
    let suggestions: Vec<&str> = filter_gradients(catalog, &state, &Favorites::new())
        .into_iter()
        .take(5)
        .map(|g| g.name.as_str())
        .collect();

    if suggestions.is_empty() {
        Err(anyhow!("No gradient named '{}'", name))
    } else {
        Err(anyhow!(
            "No gradient named '{}'. Did you mean: {}?",
            name,
            suggestions.join(", ")
        ))
    }
}

fn print_gradient_line(index: usize, gradient: &Gradient, favorite: bool) {
    let star = if favorite {
        let (r, g, b) = ui::rgb::FAVORITE;
        format!(" {}", "★".truecolor(r, g, b))
    } else {
        String::new()
    };
    println!(
        "{}  {}  {}{}",
        format!("{:>4}", format!("{index}.")).dimmed(),
        ui::swatch(&gradient.colors, SWATCH_WIDTH),
        gradient.name.bold(),
        star
    );
}

pub async fn handle_list(catalog_args: &CatalogArgs, args: ListArgs) -> Result<()> {
    let config = Config::load()?;
    let catalog = load_catalog(&config, catalog_args).await?;
    let favorites = open_favorites(&config)?.get();

    let mut gallery = Gallery::with_settings(
        catalog,
        config.display.page_size,
        config.load_delay(),
        config.search_debounce(),
    );
    gallery.set_favorites(favorites);

    let sort = match &args.sort {
        Some(key) => crate::sort::SortKey::parse_lenient(key),
        None => config.sort_key(),
    };
    let filter = if args.favorites_only {
        FavoriteFilter::Favorites
    } else {
        FavoriteFilter::All
    };
    let mut state = FilterState::default().with_sort(sort).with_filter(filter);
    if let Some(search) = args.search {
        state = state.with_search(search);
    }
    for color in &args.colors {
        state = state.with_color(color);
    }
    gallery.set_state(state);

    if args.all {
        gallery.load_all();
    } else {
        for _ in 1..args.pages.max(1) {
            if !gallery.load_more().await {
                break;
            }
        }
    }

    let page = gallery.page();
    if page.is_empty() {
        ui::print_warning("No gradients match.");
        return Ok(());
    }

    for (i, gradient) in page.iter().enumerate() {
        print_gradient_line(i + 1, gradient, gallery.favorites().contains(&gradient.name));
    }

    let total = gallery.visible().len();
    ui::print_info(&format!("Showing {} of {} gradients", page.len(), total));
    if gallery.has_more() {
        ui::print_message(&format!(
            "{}",
            format!("Use --pages {} or --all to see more", args.pages.max(1) + 1).dimmed()
        ));
    }
    Ok(())
}

pub async fn handle_show(catalog_args: &CatalogArgs, name: &str) -> Result<()> {
    let config = Config::load()?;
    let catalog = load_catalog(&config, catalog_args).await?;
    let gradient = find_gradient(&catalog, name)?;
    let favorite = favorites::is_favorite(&open_favorites(&config)?, &gradient.name);

    let title = if favorite {
        format!("{} ★", gradient.name)
    } else {
        gradient.name.clone()
    };
    println!("{}", title.bold());
    println!("{}", ui::swatch(&gradient.colors, SWATCH_WIDTH * 2));
    println!();

    for (i, hex) in gradient.colors.iter().enumerate() {
        let label = gradient.colorsname.get(i).map_or("", String::as_str);
        let hsl = hex_to_hsl(hex).map_or_else(String::new, |hsl| {
            format!("hsl({}, {}%, {}%)", hsl.h, hsl.s, hsl.l)
        });
        println!("  {}  {:<12} {}", ui::color_chip(hex), label, hsl.dimmed());
    }

    let keywords: Vec<String> = gradient
        .keywords
        .iter()
        .map(|group| group.join(" "))
        .filter(|group| !group.is_empty())
        .collect();
    if !keywords.is_empty() {
        println!();
        println!("  {} {}", "Keywords:".cyan(), keywords.join(", "));
    }
    Ok(())
}

pub async fn handle_colors(catalog_args: &CatalogArgs, basic: bool, categories: bool) -> Result<()> {
    let config = Config::load()?;
    let gallery = Gallery::new(load_catalog(&config, catalog_args).await?);
    let (unique, basic_colors, groups) = gallery.color_vocabulary();

    if categories {
        for group in groups {
            println!(
                "{} {}",
                format!("{:<8}", format!("{}:", group.category)).cyan().bold(),
                group.colors.join(", ")
            );
        }
    } else if basic {
        println!("{}", basic_colors.join("\n"));
    } else {
        println!("{}", unique.join("\n"));
    }
    Ok(())
}

fn build_options(config: &Config, gradient: &Gradient, args: &GenerateArgs) -> (CodeFormat, GradientOptions) {
    let format = args.format.unwrap_or(config.export.format);
    let gradient_type = if args.text {
        GradientType::Text
    } else {
        config.export.gradient_type
    };

    let mut options = GradientOptions::new(&gradient.colors)
        .with_angle(args.angle.unwrap_or(config.export.angle))
        .with_type(gradient_type);
    if args.animated {
        options = options.animated(args.speed.unwrap_or(config.export.animation_speed));
    }
    (format, options)
}

/// Put `content` on the system clipboard
pub fn copy_to_clipboard(content: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().map_err(|e| anyhow!("Clipboard unavailable: {e}"))?;
    clipboard
        .set_text(content)
        .map_err(|e| anyhow!("Failed to copy: {e}"))
}

fn record_copy(config: &Config, gradient: &Gradient, copy_type: CopyType) -> Result<()> {
    let mut store = open_history(config)?;
    let entry = CopyHistoryEntry::new(&gradient.name, &gradient.colors, copy_type, Utc::now());
    history::record_copy(&mut store, entry, config.history_limits())
        .context("Failed to save copy history")?;
    Ok(())
}

pub async fn handle_generate(
    catalog_args: &CatalogArgs,
    args: &GenerateArgs,
    copy: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = Config::load()?;
    let catalog = load_catalog(&config, catalog_args).await?;
    let gradient = find_gradient(&catalog, &args.name)?;
    let (format, options) = build_options(&config, gradient, args);

    let code = CodeGenerator::new().generate(format, &options, &gradient.name);
    log_debug!("Generated {} for '{}' ({} bytes)", format, gradient.name, code.len());

    if let Some(path) = output {
        fs::write(&path, &code)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        ui::print_success(&format!("Wrote {}", path.display()));
    } else {
        println!("{code}");
    }

    if copy {
        copy_to_clipboard(&code)?;
        record_copy(&config, gradient, CopyType::from(format))?;
        ui::print_success(&format!("{} code copied to clipboard", format.as_ref().to_uppercase()));
    }
    Ok(())
}

pub async fn handle_export(catalog_args: &CatalogArgs, args: &ExportArgs) -> Result<()> {
    let config = Config::load()?;
    let catalog = load_catalog(&config, catalog_args).await?;
    let gradient = find_gradient(&catalog, &args.gradient.name)?;
    let (format, options) = build_options(&config, gradient, &args.gradient);

    let code = CodeGenerator::new().generate(format, &options, &gradient.name);
    fs::create_dir_all(&args.dir)
        .with_context(|| format!("Failed to create {}", args.dir.display()))?;
    let path = args.dir.join(export_filename(&gradient.name, format));
    fs::write(&path, code).with_context(|| format!("Failed to write {}", path.display()))?;

    ui::print_success(&format!("Exported {} ({})", path.display(), format.mime_type()));
    Ok(())
}

pub async fn handle_copy_colors(catalog_args: &CatalogArgs, name: &str) -> Result<()> {
    let config = Config::load()?;
    let catalog = load_catalog(&config, catalog_args).await?;
    let gradient = find_gradient(&catalog, name)?;

    let colors = gradient.colors.join(", ");
    copy_to_clipboard(&colors)?;
    record_copy(&config, gradient, CopyType::Colors)?;
    ui::print_success(&format!("Copied {colors}"));
    Ok(())
}

pub async fn handle_favorite(catalog_args: &CatalogArgs, name: &str) -> Result<()> {
    let config = Config::load()?;
    let catalog = load_catalog(&config, catalog_args).await?;
    let gradient = find_gradient(&catalog, name)?;

    let mut store = open_favorites(&config)?;
    let now_favorite =
        favorites::toggle_favorite(&mut store, &gradient.name).context("Failed to save favorites")?;

    if now_favorite {
        ui::print_success(&format!("Added {} to favorites", gradient.name));
    } else {
        ui::print_info(&format!("Removed {} from favorites", gradient.name));
    }
    Ok(())
}

pub async fn handle_favorites(catalog_args: &CatalogArgs) -> Result<()> {
    handle_list(
        catalog_args,
        ListArgs {
            favorites_only: true,
            all: true,
            ..ListArgs::default()
        },
    )
    .await
}

pub fn handle_history(clear: bool) -> Result<()> {
    let config = Config::load()?;
    let mut store = open_history(&config)?;

    if clear {
        history::clear_history(&mut store).context("Failed to clear copy history")?;
        ui::print_success("Copy history cleared");
        return Ok(());
    }

    let history = history::load_history(&store, config.history_limits(), Utc::now());
    if history.is_empty() {
        ui::print_warning("No copies recorded yet.");
        return Ok(());
    }

    for entry in history.entries() {
        println!(
            "{}  {} {}  {}",
            entry
                .timestamp
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .dimmed(),
            format!("{:<9}", entry.copy_type.to_string()).cyan(),
            ui::swatch(&entry.colors, 12),
            entry.name.bold()
        );
    }
    Ok(())
}

pub fn handle_config(
    format: Option<CodeFormat>,
    angle: Option<u16>,
    speed: Option<f64>,
    page_size: Option<usize>,
    sort: Option<String>,
    catalog_url: Option<String>,
) -> Result<()> {
    let mut config = Config::load()?;
    let changed = format.is_some()
        || angle.is_some()
        || speed.is_some()
        || page_size.is_some()
        || sort.is_some()
        || catalog_url.is_some();

    if changed {
        config.update(format, angle, speed, page_size, sort, catalog_url)?;
        config.save()?;
        ui::print_success("Configuration updated successfully.");
        println!();
    }

    print_configuration(&config);
    Ok(())
}

fn print_configuration(config: &Config) {
    let row = |label: &str, value: String| {
        println!("  {} {}", format!("{:<20}", format!("{label}:")).cyan(), value);
    };

    println!("{}", "Current Configuration".bright_magenta().bold());
    if let Ok(path) = Config::get_config_path() {
        row("Config file", path.display().to_string());
    }
    let (primary, fallback) = config.catalog_sources();
    row("Catalog", primary.to_string());
    if primary != fallback {
        row("Catalog fallback", fallback.to_string());
    }
    row("Page size", config.display.page_size.to_string());
    row("Load delay", format!("{}ms", config.display.load_delay_ms));
    row("Search debounce", format!("{}ms", config.display.search_debounce_ms));
    row(
        "Sort",
        config
            .sort_key()
            .map_or_else(|| "catalog order".to_string(), |key| key.to_string()),
    );
    row("Format", config.export.format.to_string());
    row("Angle", format!("{}deg", config.export.angle));
    row("Animation speed", format!("{}x", config.export.animation_speed));
    row("Gradient type", config.export.gradient_type.to_string());
    row(
        "History",
        format!(
            "{} entries, {} days",
            config.history.max_entries, config.history.max_age_days
        ),
    );
    if let Ok(dir) = config.data_dir() {
        row("Data directory", dir.display().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Gradient> {
        vec![
            Gradient::new("Ocean Breeze", &["#2E3192", "#1BFFFF"]),
            Gradient::new("Ocean Depths", &["#000428", "#004E92"]),
        ]
    }

    #[test]
    fn test_find_gradient_ignores_case() {
        let catalog = catalog();
        assert_eq!(find_gradient(&catalog, "ocean breeze").unwrap().name, "Ocean Breeze");
    }

    #[test]
    fn test_find_gradient_suggests() {
        let catalog = catalog();
        let error = find_gradient(&catalog, "ocean").unwrap_err().to_string();
        assert!(error.contains("Did you mean: Ocean Breeze, Ocean Depths?"));
    }

    #[test]
    fn test_flags_override_configured_catalog() {
        let config = Config {
            catalog: crate::config::CatalogConfig {
                path: None,
                url: Some("https://example.com/a.json".to_string()),
            },
            ..Config::default()
        };
        let args = CatalogArgs {
            path: Some(PathBuf::from("local.json")),
            url: None,
        };
        assert_eq!(
            catalog_sources(&config, &args).0,
            CatalogSource::File(PathBuf::from("local.json"))
        );
        assert_eq!(
            catalog_sources(&config, &CatalogArgs::default()).0,
            CatalogSource::Url("https://example.com/a.json".to_string())
        );
    }

    #[test]
    fn test_build_options_uses_config_defaults() {
        let mut config = Config::default();
        config.export.angle = 45;
        config.export.animation_speed = 2.0;

        let gradient = Gradient::new("Ocean Breeze", &["#2E3192", "#1BFFFF"]);
        let args = GenerateArgs {
            name: gradient.name.clone(),
            format: Some(CodeFormat::Sass),
            angle: None,
            animated: true,
            speed: None,
            text: true,
        };

        let (format, options) = build_options(&config, &gradient, &args);
        assert_eq!(format, CodeFormat::Sass);
        assert_eq!(options.angle, 45);
        assert!(options.is_animated);
        assert!((options.animation_speed - 2.0).abs() < f64::EPSILON);
        assert!(options.is_text());
    }
}
