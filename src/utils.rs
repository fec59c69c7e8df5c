pub mod date_formatter;

/// Formats a number with three significant digits and a K/M/B/T suffix.
pub fn significant_digits(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1e12 {
        (value / 1e12, "T")
    } else if abs >= 1e9 {
        (value / 1e9, "B")
    } else if abs >= 1e6 {
        (value / 1e6, "M")
    } else if abs >= 1e3 {
        (value / 1e3, "K")
    } else {
        (value, "")
    };

    let abs = scaled.abs();
    if abs < 0.001 {
        return format!("{:.2e}", scaled);
    }
    let text = if abs >= 100.0 {
        format!("{:.0}", scaled)
    } else if abs >= 10.0 {
        format!("{:.1}", scaled)
    } else if abs >= 1.0 {
        format!("{:.2}", scaled)
    } else {
        format!("{:.3}", scaled)
    };
    format!("{}{}", trim_zeros(&text), suffix)
}

/// Formats a fraction in [0, 1] as a percentage.
pub fn percent(fraction: f64) -> String {
    format!("{}%", significant_digits(fraction * 100.0))
}

/// Returns the two values in ascending order.
pub fn reorder(a: f64, b: f64) -> (f64, f64) {
    if a > b {
        (b, a)
    } else {
        (a, b)
    }
}

/// Shortens a label to at most `max_chars` characters; 0 disables truncation.
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if max_chars == 0 || label.chars().count() <= max_chars {
        return label.to_string();
    }
    if max_chars <= 3 {
        return label.chars().take(max_chars).collect();
    }
    let mut out: String = label.chars().take(max_chars - 3).collect();
    out.push_str("...");
    out
}

fn trim_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
