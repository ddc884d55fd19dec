//! Source-code generation for a selected gradient.
//!
//! Every generator is a pure function of [`GradientOptions`]. The one source of
//! nondeterminism is the CSS keyframe name, which comes from a
//! [`KeyframeNamer`]; the default namer is random so pasted snippets do not
//! collide, and tests inject a [`FixedKeyframeNamer`].

mod bootstrap;
mod css;
mod json;
mod sass;
mod svg;
mod tailwind;
mod xml;

use rand::Rng;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

pub use tailwind::{direction as tailwind_direction, speed_tier as tailwind_speed_tier};

/// Base animation cycle in seconds at speed 1.0.
pub const BASE_ANIMATION_SECS: f64 = 4.0;

/// Placeholder stop used when a gradient has no colors at all.
const EMPTY_STOP: &str = "transparent";

/// Output formats offered for copy and export.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CodeFormat {
    #[default]
    Css,
    Tailwind,
    Sass,
    Bootstrap,
    Xml,
    Svg,
    Json,
}

impl CodeFormat {
    pub const fn file_extension(self) -> &'static str {
        match self {
            Self::Css | Self::Bootstrap => "css",
            Self::Tailwind => "txt",
            Self::Sass => "scss",
            Self::Xml => "xml",
            Self::Svg => "svg",
            Self::Json => "json",
        }
    }

    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Css | Self::Bootstrap | Self::Sass => "text/css",
            Self::Tailwind => "text/plain",
            Self::Xml => "application/xml",
            Self::Svg => "image/svg+xml",
            Self::Json => "application/json",
        }
    }
}

/// What the gradient paints.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GradientType {
    #[default]
    Background,
    Text,
}

/// Inputs for every generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientOptions {
    pub colors: Vec<String>,
    /// Degrees; normalized into `0..360` on use.
    pub angle: u16,
    pub is_animated: bool,
    /// Multiplier on the base cycle; non-positive values fall back to 1.0.
    pub animation_speed: f64,
    pub gradient_type: GradientType,
}

impl Default for GradientOptions {
    fn default() -> Self {
        Self {
            colors: Vec::new(),
            angle: 90,
            is_animated: false,
            animation_speed: 1.0,
            gradient_type: GradientType::Background,
        }
    }
}

impl GradientOptions {
    pub fn new<S: AsRef<str>>(colors: &[S]) -> Self {
        Self {
            colors: colors.iter().map(|c| c.as_ref().to_string()).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_angle(mut self, angle: u16) -> Self {
        self.angle = angle;
        self
    }

    #[must_use]
    pub fn animated(mut self, speed: f64) -> Self {
        self.is_animated = true;
        self.animation_speed = speed;
        self
    }

    #[must_use]
    pub fn with_type(mut self, gradient_type: GradientType) -> Self {
        self.gradient_type = gradient_type;
        self
    }

    pub const fn angle(&self) -> u16 {
        self.angle % 360
    }

    pub fn speed(&self) -> f64 {
        if self.animation_speed.is_finite() && self.animation_speed > 0.0 {
            self.animation_speed
        } else {
            1.0
        }
    }

    /// Length of one animation cycle, rounded to hundredths of a second.
    pub fn duration_secs(&self) -> f64 {
        round2(BASE_ANIMATION_SECS / self.speed())
    }

    pub const fn is_text(&self) -> bool {
        matches!(self.gradient_type, GradientType::Text)
    }

    fn first_color(&self) -> &str {
        self.colors.first().map_or(EMPTY_STOP, String::as_str)
    }

    fn last_color(&self) -> &str {
        self.colors.last().map_or(EMPTY_STOP, String::as_str)
    }

    fn middle_color(&self) -> &str {
        self.colors
            .get(self.colors.len() / 2)
            .map_or(EMPTY_STOP, String::as_str)
    }

    fn joined_colors(&self) -> String {
        if self.colors.is_empty() {
            EMPTY_STOP.to_string()
        } else {
            self.colors.join(", ")
        }
    }

    /// `linear-gradient(<angle>deg, <colors>)`
    pub fn gradient_style(&self) -> String {
        format!("linear-gradient({}deg, {})", self.angle(), self.joined_colors())
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Escape text for use inside XML attributes and text nodes.
fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a number without trailing zeros (`4`, `1.33`).
fn format_number(value: f64) -> String {
    format!("{}", round2(value))
}

/// The diagonal background-position sweep shared by CSS, Sass and Bootstrap.
fn keyframes_block(name: &str) -> String {
    format!(
        "@keyframes {name} {{\n  \
         0% {{ background-position: 0% 50%; }}\n  \
         25% {{ background-position: 100% 50%; }}\n  \
         50% {{ background-position: 100% 100%; }}\n  \
         75% {{ background-position: 0% 100%; }}\n  \
         100% {{ background-position: 0% 50%; }}\n\
         }}"
    )
}

/// Declarations that paint `image` into the text glyphs.
fn text_fill_lines(image: &str) -> Vec<String> {
    vec![
        "color: transparent;".to_string(),
        format!("background-image: {image};"),
        "-webkit-background-clip: text;".to_string(),
        "background-clip: text;".to_string(),
    ]
}

/// Source of CSS `@keyframes` names.
pub trait KeyframeNamer {
    fn next_name(&self) -> String;
}

/// `gradient-` followed by nine random lowercase alphanumerics.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomKeyframeNamer;

impl KeyframeNamer for RandomKeyframeNamer {
    fn next_name(&self) -> String {
        let suffix: String = rand::rng()
            .sample_iter(Alphanumeric)
            .take(9)
            .map(|b| char::from(b).to_ascii_lowercase())
            .collect();
        format!("gradient-{suffix}")
    }
}

/// Always returns the same name, for reproducible output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedKeyframeNamer(pub String);

impl KeyframeNamer for FixedKeyframeNamer {
    fn next_name(&self) -> String {
        self.0.clone()
    }
}

/// Dispatches [`GradientOptions`] to the per-format generators.
#[derive(Debug, Clone, Default)]
pub struct CodeGenerator<N = RandomKeyframeNamer> {
    namer: N,
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<N: KeyframeNamer> CodeGenerator<N> {
    pub const fn with_namer(namer: N) -> Self {
        Self { namer }
    }

    /// Generate `format` source for `options`. `name` labels SVG text output.
    pub fn generate(&self, format: CodeFormat, options: &GradientOptions, name: &str) -> String {
        match format {
            CodeFormat::Css => self.css(options),
            CodeFormat::Tailwind => tailwind::generate(options),
            CodeFormat::Sass => sass::generate(options),
            CodeFormat::Bootstrap => bootstrap::generate(options),
            CodeFormat::Xml => xml::generate(options),
            CodeFormat::Svg => svg::generate(options, name),
            CodeFormat::Json => {
                json::generate(options, self.css(options), tailwind::generate(options))
            }
        }
    }

    pub fn css(&self, options: &GradientOptions) -> String {
        if options.is_animated {
            css::generate(options, &self.namer.next_name())
        } else {
            css::generate(options, "")
        }
    }
}

/// File name for exporting `name` as `format`, e.g. `ocean-breeze.scss`.
pub fn export_filename(name: &str, format: CodeFormat) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    let stem = if slug.is_empty() { "gradient" } else { slug };
    format!("{stem}.{}", format.file_extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_from_speed() {
        let options = GradientOptions::new(&["#000000"]);
        assert!((options.clone().animated(2.0).duration_secs() - 2.0).abs() < f64::EPSILON);
        assert!((options.clone().animated(3.0).duration_secs() - 1.33).abs() < f64::EPSILON);
        assert!((options.clone().animated(0.0).duration_secs() - 4.0).abs() < f64::EPSILON);
        assert!((options.animated(f64::NAN).duration_secs() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(8.0), "8");
        assert_eq!(format_number(100.0 / 3.0), "33.33");
    }

    #[test]
    fn test_angle_normalized() {
        let options = GradientOptions::new(&["#000000", "#FFFFFF"]).with_angle(450);
        assert_eq!(options.gradient_style(), "linear-gradient(90deg, #000000, #FFFFFF)");
    }

    #[test]
    fn test_random_names_differ() {
        let namer = RandomKeyframeNamer;
        let a = namer.next_name();
        let b = namer.next_name();
        assert!(a.starts_with("gradient-"));
        assert_eq!(a.len(), "gradient-".len() + 9);
        assert_ne!(a, b);
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename("Ocean Breeze", CodeFormat::Sass), "ocean-breeze.scss");
        assert_eq!(export_filename("  Rosé & Gold!! ", CodeFormat::Svg), "ros-gold.svg");
        assert_eq!(export_filename("", CodeFormat::Json), "gradient.json");
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("TAILWIND".parse::<CodeFormat>().ok(), Some(CodeFormat::Tailwind));
        assert_eq!(CodeFormat::Sass.to_string(), "sass");
        assert!("less".parse::<CodeFormat>().is_err());
    }
}
