// =============================================================================
// Folio Web - Utility Functions
// =============================================================================
// Table of Contents:
// 1. Attribute Parsing
// 2. Format Utilities
// 3. Validation Utilities
// =============================================================================

// -----------------------------------------------------------------------------
// 1. Attribute Parsing
// -----------------------------------------------------------------------------

/// Parse a numeric data attribute the way the page's markup expects numbers
/// to read: decimal, `0x`/`0o`/`0b` integers, or a signed `Infinity`.
/// Missing, empty or malformed values are 0.
pub fn parse_number(raw: Option<&str>) -> f64 {
    let Some(s) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return 0.0;
    };
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(n) = parse_radix(s) {
        return n;
    }
    // Rust also accepts `inf`, `nan` and friends; those stay malformed here.
    s.parse::<f64>().ok().filter(|n| n.is_finite()).unwrap_or(0.0)
}

fn parse_radix(s: &str) -> Option<f64> {
    let prefix = s.get(..2)?.to_ascii_lowercase();
    let radix = match prefix.as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    let digits = &s[2..];
    if digits.is_empty() {
        return Some(0.0);
    }
    let value = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    });
    Some(value.unwrap_or(0.0))
}

/// Parse an integer data attribute, truncating any fractional part.
/// Infinite values have no integer form and read as 0.
pub fn parse_integer(raw: Option<&str>) -> i64 {
    let n = parse_number(raw);
    if n.is_finite() {
        n.trunc() as i64
    } else {
        0
    }
}

/// Clamp a percentage into `0..=100`.
pub fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

// -----------------------------------------------------------------------------
// 2. Format Utilities
// -----------------------------------------------------------------------------

/// Format a number for a CSS value: shortest form, integers without a
/// fraction, and no negative zero.
pub fn css_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Format a percentage CSS value, e.g. `42.5%`.
pub fn css_percent(value: f64) -> String {
    format!("{}%", css_number(value))
}

// -----------------------------------------------------------------------------
// 3. Validation Utilities
// -----------------------------------------------------------------------------

/// True when every field has non-whitespace content.
pub fn all_present(fields: &[&str]) -> bool {
    fields.iter().all(|f| !f.trim().is_empty())
}
