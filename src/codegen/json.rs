//! Machine-readable envelope embedding the CSS and Tailwind output.

use serde::Serialize;

use super::{GradientOptions, GradientType};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GradientExport<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    gradient_type: GradientType,
    angle: u16,
    colors: &'a [String],
    animated: bool,
    animation_speed: f64,
    animation_duration: f64,
    css: String,
    tailwind: String,
}

pub fn generate(options: &GradientOptions, css: String, tailwind: String) -> String {
    let export = GradientExport {
        kind: "linear",
        gradient_type: options.gradient_type,
        angle: options.angle(),
        colors: &options.colors,
        animated: options.is_animated,
        animation_speed: options.speed(),
        animation_duration: options.duration_secs(),
        css,
        tailwind,
    };
    // Serializing plain strings and numbers cannot fail.
    serde_json::to_string_pretty(&export).unwrap_or_default()
}
