//! SCSS with variables.

use super::{GradientOptions, format_number, keyframes_block, text_fill_lines};

const KEYFRAMES: &str = "gradientShift";

pub fn generate(options: &GradientOptions) -> String {
    let mut out = format!(
        "$gradient-colors: {};\n$gradient-angle: {}deg;\n",
        options.joined_colors(),
        options.angle()
    );
    if options.is_animated {
        out.push_str(&format!(
            "$animation-duration: {}s;\n",
            format_number(options.duration_secs())
        ));
    }

    let style = "linear-gradient($gradient-angle, $gradient-colors)";
    let (selector, mut body) = if options.is_text() {
        (".gradient-text", text_fill_lines(style))
    } else {
        (".gradient-background", vec![format!("background: {style};")])
    };

    if options.is_animated {
        body.push("background-size: 400% 400%;".to_string());
        body.push(format!(
            "animation: {KEYFRAMES} $animation-duration ease infinite;"
        ));
    }

    out.push('\n');
    out.push_str(selector);
    out.push_str(" {\n");
    for line in &body {
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }
    out.push('}');

    if options.is_animated {
        out.push_str("\n\n");
        out.push_str(&keyframes_block(KEYFRAMES));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_sass() {
        let options = GradientOptions::new(&["#FF0000", "#00FF00"]);
        assert_eq!(
            generate(&options),
            "$gradient-colors: #FF0000, #00FF00;\n\
             $gradient-angle: 90deg;\n\
             \n\
             .gradient-background {\n  \
             background: linear-gradient($gradient-angle, $gradient-colors);\n\
             }"
        );
    }

    #[test]
    fn test_animated_sass() {
        let options = GradientOptions::new(&["#FF0000", "#00FF00"]).animated(2.0);
        let sass = generate(&options);
        assert!(sass.contains("$animation-duration: 2s;"));
        assert!(sass.contains("animation: gradientShift $animation-duration ease infinite;"));
        assert!(sass.ends_with("100% { background-position: 0% 50%; }\n}"));
        assert!(!sass.contains("gradient-text"));
    }
}
