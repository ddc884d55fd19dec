//! Standalone SVG document.

use super::{GradientOptions, escape_xml, format_number};

const WIDTH: u32 = 400;
const HEIGHT: u32 = 200;
const GRADIENT_ID: &str = "gradient";

/// Stop offsets in percent, evenly spaced. A single stop sits at 0%.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn stop_offsets(count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        n => (0..n)
            .map(|i| i as f64 / (n - 1) as f64 * 100.0)
            .collect(),
    }
}

pub fn generate(options: &GradientOptions, name: &str) -> String {
    // SVG gradients run left to right by default, which is 90deg in CSS.
    let rotation = (options.angle() + 270) % 360;

    let mut out = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{HEIGHT}\" \
         viewBox=\"0 0 {WIDTH} {HEIGHT}\">\n  <defs>\n    \
         <linearGradient id=\"{GRADIENT_ID}\" gradientTransform=\"rotate({rotation} 0.5 0.5)\">\n"
    );

    let stops: Vec<&str> = if options.colors.is_empty() {
        vec![options.first_color()]
    } else {
        options.colors.iter().map(String::as_str).collect()
    };
    for (color, offset) in stops.iter().zip(stop_offsets(stops.len())) {
        out.push_str(&format!(
            "      <stop offset=\"{}%\" stop-color=\"{}\" />\n",
            format_number(offset),
            escape_xml(color)
        ));
    }

    if options.is_animated {
        out.push_str(&format!(
            "      <animateTransform attributeName=\"gradientTransform\" type=\"rotate\" \
             from=\"{rotation} 0.5 0.5\" to=\"{} 0.5 0.5\" dur=\"{}s\" repeatCount=\"indefinite\" />\n",
            u32::from(rotation) + 360,
            format_number(options.duration_secs())
        ));
    }

    out.push_str("    </linearGradient>\n  </defs>\n");

    if options.is_text() {
        out.push_str(&format!(
            "  <text x=\"50%\" y=\"50%\" dominant-baseline=\"middle\" text-anchor=\"middle\" \
             font-family=\"sans-serif\" font-size=\"48\" font-weight=\"bold\" \
             fill=\"url(#{GRADIENT_ID})\">{}</text>\n",
            escape_xml(name)
        ));
    } else {
        out.push_str(&format!(
            "  <rect width=\"100%\" height=\"100%\" fill=\"url(#{GRADIENT_ID})\" />\n"
        ));
    }

    out.push_str("</svg>");
    out
}
