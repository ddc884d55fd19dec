use crate::codegen::CodeFormat;
use crate::commands::{self, ExportArgs, GenerateArgs, ListArgs};
use crate::log_debug;
use crate::ui;
use clap::builder::{Styles, styling::AnsiColor};
use clap::{Args, Parser, Subcommand, crate_version};
use std::path::PathBuf;

const LOG_FILE: &str = "gradient-gallery-debug.log";

/// CLI structure defining the available commands and global arguments
#[derive(Parser)]
#[command(
    author,
    version = crate_version!(),
    about = "Gradient Gallery: browse gradients and generate code for them",
    long_about = "Browse a catalog of color gradients, filter them by name or color, and generate CSS, Tailwind, Sass, Bootstrap, Android XML, SVG or JSON for any of them.",
    disable_version_flag = true,
    styles = get_styles(),
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log debug messages to a file
    #[arg(short = 'l', long = "log", global = true)]
    pub log: bool,

    /// Specify a custom log file path
    #[arg(long = "log-file", global = true)]
    pub log_file: Option<PathBuf>,

    /// Show debug output on stderr
    #[arg(long = "verbose", global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Display the version
    #[arg(short = 'v', long = "version", global = true)]
    pub version: bool,

    #[command(flatten)]
    pub catalog: CatalogArgs,
}

/// Catalog overrides shared by every command
#[derive(Args, Clone, Debug, Default)]
pub struct CatalogArgs {
    /// Load the catalog from a local JSON file
    #[arg(long = "catalog", global = true, value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Load the catalog from a URL
    #[arg(long = "catalog-url", global = true, value_name = "URL")]
    pub url: Option<String>,
}

#[derive(Subcommand)]
#[command(subcommand_negates_reqs = true)]
#[command(subcommand_precedence_over_arg = true)]
pub enum Commands {
    /// List gradients, one page at a time
    List {
        /// Search names, color names and keywords
        #[arg(short, long)]
        search: Option<String>,

        /// Only gradients with this color name (repeatable)
        #[arg(short, long = "color", value_name = "COLOR")]
        colors: Vec<String>,

        /// Only favorites
        #[arg(short, long)]
        favorites: bool,

        /// Sort by name, brightness, hue or favorites
        #[arg(long)]
        sort: Option<String>,

        /// How many pages to show
        #[arg(short, long, default_value_t = 1)]
        pages: usize,

        /// Show every match
        #[arg(short, long, conflicts_with = "pages")]
        all: bool,
    },

    /// Show a gradient's colors and details
    Show {
        /// Gradient name (case-insensitive)
        name: String,
    },

    /// List the color names used in the catalog
    Colors {
        /// Only the basic color words
        #[arg(long, conflicts_with = "categories")]
        basic: bool,

        /// Group colors into hue families
        #[arg(long)]
        categories: bool,
    },

    /// Generate code for a gradient
    Generate {
        #[command(flatten)]
        gradient: GradientArgs,

        /// Copy the code to the clipboard and record it in the history
        #[arg(long)]
        copy: bool,

        /// Write the code to a file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Write generated code to a file named after the gradient
    Export {
        #[command(flatten)]
        gradient: GradientArgs,

        /// Directory to write into
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Copy a gradient's colors to the clipboard
    Copy {
        name: String,
    },

    /// Toggle a gradient as favorite
    Favorite {
        name: String,
    },

    /// List favorite gradients
    Favorites,

    /// Show recently copied gradients
    History {
        /// Remove every entry
        #[arg(long)]
        clear: bool,
    },

    /// Show or change configuration
    Config {
        /// Default output format
        #[arg(long)]
        format: Option<CodeFormat>,

        /// Default gradient angle in degrees
        #[arg(long)]
        angle: Option<u16>,

        /// Default animation speed multiplier
        #[arg(long)]
        speed: Option<f64>,

        /// Gradients per page
        #[arg(long)]
        page_size: Option<usize>,

        /// Default sort key
        #[arg(long)]
        sort: Option<String>,

        /// Default remote catalog; pass an empty string to unset
        #[arg(long = "set-catalog-url", value_name = "URL")]
        set_catalog_url: Option<String>,
    },
}

/// What to generate: a gradient and how to render it
#[derive(Args, Clone, Debug)]
pub struct GradientArgs {
    /// Gradient name (case-insensitive)
    pub name: String,

    /// Output format
    #[arg(short, long)]
    pub format: Option<CodeFormat>,

    /// Gradient angle in degrees
    #[arg(long)]
    pub angle: Option<u16>,

    /// Animate the gradient
    #[arg(long)]
    pub animated: bool,

    /// Animation speed multiplier
    #[arg(long, requires = "animated")]
    pub speed: Option<f64>,

    /// Apply the gradient to text instead of a background
    #[arg(long)]
    pub text: bool,
}

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Magenta.on_default().bold())
        .usage(AnsiColor::Cyan.on_default().bold())
        .literal(AnsiColor::Green.on_default().bold())
        .placeholder(AnsiColor::Yellow.on_default())
        .valid(AnsiColor::Blue.on_default().bold())
        .invalid(AnsiColor::Red.on_default().bold())
        .error(AnsiColor::Red.on_default().bold())
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

pub async fn main() -> anyhow::Result<()> {
    let cli = parse_args();

    if cli.version {
        ui::print_version(crate_version!());
        return Ok(());
    }

    if let Err(e) = crate::logger::init(cli.verbose) {
        eprintln!("Warning: {e}");
    }

    if cli.log || cli.log_file.is_some() {
        let log_file = cli.log_file.clone().unwrap_or_else(|| PathBuf::from(LOG_FILE));
        crate::logger::set_log_file(&log_file)?;
        crate::logger::set_verbose_logging(true);
        crate::logger::set_log_to_stderr(cli.verbose);
        log_debug!("Logging to {}", log_file.display());
    }

    if cli.quiet {
        ui::set_quiet_mode(true);
    }

    if let Some(command) = cli.command {
        handle_command(command, &cli.catalog).await
    } else {
        let _ = Cli::parse_from(["gradient-gallery", "--help"]);
        Ok(())
    }
}

pub async fn handle_command(command: Commands, catalog: &CatalogArgs) -> anyhow::Result<()> {
    match command {
        Commands::List {
            search,
            colors,
            favorites,
            sort,
            pages,
            all,
        } => {
            let args = ListArgs {
                search,
                colors,
                favorites_only: favorites,
                sort,
                pages,
                all,
            };
            log_debug!("Handling 'list' command with {:?}", args);
            commands::handle_list(catalog, args).await
        }
        Commands::Show { name } => commands::handle_show(catalog, &name).await,
        Commands::Colors { basic, categories } => {
            commands::handle_colors(catalog, basic, categories).await
        }
        Commands::Generate {
            gradient,
            copy,
            output,
        } => {
            log_debug!("Handling 'generate' command with {:?}", gradient);
            commands::handle_generate(catalog, &GenerateArgs::from(gradient), copy, output).await
        }
        Commands::Export { gradient, dir } => {
            let args = ExportArgs {
                gradient: GenerateArgs::from(gradient),
                dir,
            };
            commands::handle_export(catalog, &args).await
        }
        Commands::Copy { name } => commands::handle_copy_colors(catalog, &name).await,
        Commands::Favorite { name } => commands::handle_favorite(catalog, &name).await,
        Commands::Favorites => commands::handle_favorites(catalog).await,
        Commands::History { clear } => commands::handle_history(clear),
        Commands::Config {
            format,
            angle,
            speed,
            page_size,
            sort,
            set_catalog_url,
        } => commands::handle_config(format, angle, speed, page_size, sort, set_catalog_url),
    }
}

impl From<GradientArgs> for GenerateArgs {
    fn from(args: GradientArgs) -> Self {
        Self {
            name: args.name,
            format: args.format,
            angle: args.angle,
            animated: args.animated,
            speed: args.speed,
            text: args.text,
        }
    }
}
