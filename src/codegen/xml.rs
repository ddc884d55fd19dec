//! Android shape drawable.
//!
//! Android measures gradient angles from a different origin than CSS, so the
//! CSS angle is rotated by 90 degrees. Drawables cannot animate on their own;
//! the animated variant emits a start/center/end snapshot and leaves the
//! animation to a `ValueAnimator` in app code.

use super::{GradientOptions, escape_xml};

/// Map a CSS angle onto Android's gradient angle convention.
pub fn android_angle(css_angle: u16) -> u16 {
    (css_angle % 360 + 90) % 360
}

pub fn generate(options: &GradientOptions) -> String {
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <shape xmlns:android=\"http://schemas.android.com/apk/res/android\"\n    \
         android:shape=\"rectangle\">\n",
    );

    if options.is_animated {
        out.push_str(&format!(
            "    <!-- Animated gradient: animate these colors with a ValueAnimator \
             ({}s cycle) in code. -->\n",
            super::format_number(options.duration_secs())
        ));
    }

    out.push_str("    <gradient\n        android:type=\"linear\"\n");
    out.push_str(&format!(
        "        android:angle=\"{}\"\n",
        android_angle(options.angle())
    ));
    out.push_str(&format!(
        "        android:startColor=\"{}\"\n",
        escape_xml(options.first_color())
    ));
    if options.is_animated {
        out.push_str(&format!(
            "        android:centerColor=\"{}\"\n",
            escape_xml(options.middle_color())
        ));
    }
    out.push_str(&format!(
        "        android:endColor=\"{}\" />\n</shape>",
        escape_xml(options.last_color())
    ));
    out
}
