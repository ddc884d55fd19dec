//! Tailwind utility classes.
//!
//! Animated output references `animate-gradient-*` classes that the consuming
//! stylesheet is expected to define.

use super::GradientOptions;

/// Bucket an angle into one of Tailwind's gradient directions.
pub fn direction(angle: u16) -> &'static str {
    match angle % 360 {
        45..=134 => "to-br",
        135..=224 => "to-b",
        225..=314 => "to-bl",
        _ => "to-r",
    }
}

/// Animation class suffix for a speed multiplier.
pub fn speed_tier(speed: f64) -> &'static str {
    if speed <= 0.5 {
        "slow"
    } else if speed <= 1.0 {
        "normal"
    } else if speed <= 2.0 {
        "fast"
    } else {
        "very-fast"
    }
}

pub fn generate(options: &GradientOptions) -> String {
    let mut classes = vec![
        format!("bg-gradient-{}", direction(options.angle())),
        format!("from-[{}]", options.first_color()),
    ];
    if options.colors.len() > 2 {
        classes.push(format!("via-[{}]", options.colors[1]));
    }
    classes.push(format!("to-[{}]", options.last_color()));

    if options.is_text() {
        classes.push("bg-clip-text".to_string());
        classes.push("text-transparent".to_string());
    }

    if options.is_animated {
        classes.push("bg-[length:400%_400%]".to_string());
        classes.push(format!("animate-gradient-{}", speed_tier(options.speed())));
    }

    classes.join(" ")
}
