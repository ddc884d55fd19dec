use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use parking_lot::Mutex;
use std::fmt::Write;
use std::time::Duration;

use crate::color::Rgb;

/// Width of a swatch bar in terminal cells
pub const SWATCH_WIDTH: usize = 32;

// RGB tuples for `colored`'s `.truecolor()`
pub mod rgb {
    pub const ACCENT: (u8, u8, u8) = (225, 53, 255);
    pub const HIGHLIGHT: (u8, u8, u8) = (128, 255, 234);
    pub const FAVORITE: (u8, u8, u8) = (255, 106, 193);
    pub const INVALID: (u8, u8, u8) = (60, 60, 70);
}

static QUIET_MODE: std::sync::LazyLock<Mutex<bool>> =
    std::sync::LazyLock::new(|| Mutex::new(false));

pub fn set_quiet_mode(enabled: bool) {
    *QUIET_MODE.lock() = enabled;
}

pub fn is_quiet_mode() -> bool {
    *QUIET_MODE.lock()
}

/// Spinner for slow work such as fetching a remote catalog; hidden in quiet mode
pub fn create_spinner(message: &str) -> ProgressBar {
    if is_quiet_mode() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("✦✧✶✷✸✹✺✻✼✽")
        .template("{spinner} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn print_info(message: &str) {
    if !is_quiet_mode() {
        eprintln!("{}", message.cyan().bold());
    }
}

pub fn print_warning(message: &str) {
    if !is_quiet_mode() {
        eprintln!("{}", message.yellow().bold());
    }
}

pub fn print_error(message: &str) {
    // Always print errors, even in quiet mode
    eprintln!("{}", message.red().bold());
}

pub fn print_success(message: &str) {
    if !is_quiet_mode() {
        eprintln!("{}", message.green().bold());
    }
}

/// Print a plain message to stderr (respects quiet mode)
pub fn print_message(message: &str) {
    if !is_quiet_mode() {
        eprintln!("{message}");
    }
}

pub fn print_version(version: &str) {
    println!(
        "{} {} {}",
        gradient_text("Gradient Gallery", &[rgb::ACCENT, rgb::HIGHLIGHT]).bold(),
        "version".cyan(),
        version.green()
    );
}

/// Color each character of `text` along `stops`
pub fn gradient_text(text: &str, stops: &[(u8, u8, u8)]) -> String {
    let chars: Vec<char> = text.chars().collect();
    let palette = smooth_gradient(stops, chars.len());

    let mut result = String::new();
    for (c, (r, g, b)) in chars.iter().zip(palette) {
        let _ = write!(result, "{}", c.to_string().truecolor(r, g, b));
    }
    result
}

/// A bar of `width` block characters blending through `colors`.
///
/// Colors that fail to parse are skipped; with nothing left the bar is dim.
pub fn swatch<S: AsRef<str>>(colors: &[S], width: usize) -> String {
    let stops: Vec<(u8, u8, u8)> = colors
        .iter()
        .filter_map(|hex| Rgb::from_hex(hex.as_ref()).ok())
        .map(|rgb| rgb.to_rgb_tuple())
        .collect();

    if stops.is_empty() {
        let (r, g, b) = rgb::INVALID;
        return "░".repeat(width).truecolor(r, g, b).to_string();
    }

    let mut bar = String::new();
    for (r, g, b) in smooth_gradient(&stops, width) {
        let _ = write!(bar, "{}", "█".truecolor(r, g, b));
    }
    bar
}

/// A single colored block followed by the hex value
pub fn color_chip(hex: &str) -> String {
    match Rgb::from_hex(hex) {
        Ok(rgb) => format!("{} {}", "██".truecolor(rgb.r, rgb.g, rgb.b), rgb.to_hex()),
        Err(_) => {
            let (r, g, b) = rgb::INVALID;
            format!("{} {}", "░░".truecolor(r, g, b), hex.dimmed())
        }
    }
}

/// Interpolate smoothly between two colors
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub fn interpolate_color(start: (u8, u8, u8), end: (u8, u8, u8), t: f32) -> (u8, u8, u8) {
    let t = t.clamp(0.0, 1.0);
    (
        (f32::from(start.0) + (f32::from(end.0) - f32::from(start.0)) * t).round() as u8,
        (f32::from(start.1) + (f32::from(end.1) - f32::from(start.1)) * t).round() as u8,
        (f32::from(start.2) + (f32::from(end.2) - f32::from(start.2)) * t).round() as u8,
    )
}

/// Spread `stops` evenly over `steps` colors
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub fn smooth_gradient(stops: &[(u8, u8, u8)], steps: usize) -> Vec<(u8, u8, u8)> {
    if steps == 0 || stops.is_empty() {
        return vec![];
    }
    if steps == 1 || stops.len() == 1 {
        return vec![stops[0]; steps];
    }

    let last = stops.len() - 1;
    (0..steps)
        .map(|i| {
            let t = i as f32 / (steps - 1) as f32;
            let scaled = t * last as f32;
            let idx = scaled.floor() as usize;
            if idx >= last {
                stops[last]
            } else {
                interpolate_color(stops[idx], stops[idx + 1], scaled - scaled.floor())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_gradient_endpoints() {
        let palette = smooth_gradient(&[(0, 0, 0), (255, 255, 255)], 5);
        assert_eq!(palette.len(), 5);
        assert_eq!(palette[0], (0, 0, 0));
        assert_eq!(palette[2], (128, 128, 128));
        assert_eq!(palette[4], (255, 255, 255));
    }

    #[test]
    fn test_single_stop_fills() {
        assert_eq!(smooth_gradient(&[(1, 2, 3)], 3), vec![(1, 2, 3); 3]);
        assert!(smooth_gradient(&[], 3).is_empty());
    }
}
