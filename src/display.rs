//! Number rounding and display formatting
//!
//! Dashboard panels show money as `$127,450`, counts with thousands
//! separators and percentages with one decimal. The helpers here produce
//! those strings from raw values.

/// Round to a fixed number of decimal places, half away from zero
pub fn round_dp(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Group an integer with comma thousands separators
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole-dollar amount, e.g. `$127,450`
pub fn format_dollars(value: u64) -> String {
    format!("${}", group_thousands(value))
}

/// Dollar amount with cents, e.g. `$1,085.53`
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, group_thousands(cents / 100), cents % 100)
}

/// Percentage with one decimal, e.g. `92.9%`
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Whole milliseconds, e.g. `142ms`
pub fn format_millis(value: u64) -> String {
    format!("{}ms", value)
}
