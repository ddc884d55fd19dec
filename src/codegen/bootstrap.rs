//! Bootstrap-style utility classes.

use super::{GradientOptions, format_number, keyframes_block, text_fill_lines};

const KEYFRAMES: &str = "gradientShift";

fn class_name(options: &GradientOptions) -> &'static str {
    match (options.is_animated, options.is_text()) {
        (false, false) => "bg-gradient",
        (false, true) => "text-gradient",
        (true, false) => "animated-bg-gradient",
        (true, true) => "animated-text-gradient",
    }
}

pub fn generate(options: &GradientOptions) -> String {
    let style = options.gradient_style();
    let mut body = if options.is_text() {
        text_fill_lines(&style)
    } else {
        vec![format!("background: {style};")]
    };

    if options.is_animated {
        body.push("background-size: 400% 400%;".to_string());
        body.push(format!(
            "animation: {KEYFRAMES} {}s ease infinite;",
            format_number(options.duration_secs())
        ));
    }

    let body: String = body.iter().map(|line| format!("  {line}\n")).collect();
    let block = format!(".{} {{\n{body}}}", class_name(options));

    if options.is_animated {
        format!("{block}\n\n{}", keyframes_block(KEYFRAMES))
    } else {
        block
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::GradientType;

    #[test]
    fn test_static_classes() {
        let options = GradientOptions::new(&["#FF0000", "#00FF00"]);
        assert_eq!(
            generate(&options),
            ".bg-gradient {\n  background: linear-gradient(90deg, #FF0000, #00FF00);\n}"
        );

        let text = options.with_type(GradientType::Text);
        assert!(generate(&text).starts_with(".text-gradient {\n  color: transparent;\n"));
    }

    #[test]
    fn test_animated_classes() {
        let options = GradientOptions::new(&["#FF0000", "#00FF00"]).animated(1.0);
        let css = generate(&options);
        assert!(css.starts_with(".animated-bg-gradient {\n"));
        assert!(css.contains("  animation: gradientShift 4s ease infinite;\n"));
        assert!(css.contains("@keyframes gradientShift {"));

        let text = options.with_type(GradientType::Text);
        assert!(generate(&text).starts_with(".animated-text-gradient {\n"));
    }
}
