//! Unit conversion utilities
//!
//! All model values are stored in inches. Screen space is pixels, related
//! to inches by the layout's `scale` (pixels per inch). Nothing here caches
//! a scale: callers pass the current one on every conversion.

/// Converts a length in inches to pixels at the given scale.
pub fn inches_to_pixels(value: f64, scale: f64) -> f64 {
    value * scale
}

/// Converts a length in pixels to inches at the given scale.
///
/// A non-positive or non-finite scale yields 0 rather than infinity.
pub fn pixels_to_inches(value: f64, scale: f64) -> f64 {
    if !scale.is_finite() || scale <= 0.0 {
        return 0.0;
    }
    value / scale
}

/// Format a length in inches with two decimals and a trailing `"`.
pub fn format_inches(value: f64) -> String {
    format!("{:.2}\"", value)
}

/// Format a number rounded to three decimals with trailing zeros removed.
///
/// Whole numbers print without a decimal point (`20`, `3.125`, `0.25`).
/// Used for piece and sink measurements, which are entered to the
/// sixteenth of an inch.
pub fn format_trimmed(value: f64) -> String {
    let v = (sanitize_number(value, 0.0) * 1000.0).round() / 1000.0;
    if (v % 1.0).abs() < 1e-9 {
        return format!("{}", v.round() as i64);
    }
    let text = format!("{:.3}", v);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Replace NaN or infinite input with `fallback`.
pub fn sanitize_number(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Replace NaN, infinite or negative input with `fallback`.
pub fn sanitize_non_negative(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        fallback
    }
}

/// Replace NaN, infinite, zero or negative input with `fallback`.
pub fn sanitize_positive(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}
