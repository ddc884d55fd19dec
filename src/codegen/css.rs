//! Plain CSS declarations.

use super::{GradientOptions, format_number, keyframes_block, text_fill_lines};

/// `keyframe_name` is only used for animated output.
pub fn generate(options: &GradientOptions, keyframe_name: &str) -> String {
    let style = options.gradient_style();

    let mut lines = if options.is_text() {
        text_fill_lines(&style)
    } else {
        vec![format!("background: {style};")]
    };

    if !options.is_animated {
        return lines.join("\n");
    }

    lines.push("background-size: 400% 400%;".to_string());
    lines.push(format!(
        "animation: {keyframe_name} {}s ease infinite;",
        format_number(options.duration_secs())
    ));

    format!("{}\n\n{}", lines.join("\n"), keyframes_block(keyframe_name))
}
