//! Common display utilities and helpers

use crate::client::MUTEZ_PER_TEZ;

/// Truncate string to max length with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format a mutez amount as tez with thousands separators, e.g. `1,234.57 ꜩ`
pub fn format_tez(mutez: i64) -> String {
    let tez = mutez as f64 / MUTEZ_PER_TEZ;
    let whole = tez.trunc().abs() as u64;
    let cents = ((tez.abs() - whole as f64) * 100.0).round() as u64;
    let (whole, cents) = if cents == 100 { (whole + 1, 0) } else { (whole, cents) };

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if mutez < 0 { "-" } else { "" };
    format!("{}{}.{:02} ꜩ", sign, grouped, cents)
}

/// Format milliseconds as a short human duration (`45s`, `3m 12s`, `1h 5m`)
pub fn format_millis(millis: i64) -> String {
    let secs = millis.max(0) / 1000;
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
