//! Text formatting for prices, returns, and dates shown to users.

use chrono::NaiveDate;

/// `$1,234.56`. Negative amounts render as `-$1,234.56`.
pub fn usd(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".into();
    }
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${}.{frac:02}", group_thousands(whole))
}

/// `$1,000` for round amounts, full cents otherwise.
pub fn usd_compact(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{sign}${}", group_thousands(value.abs() as u64))
    } else {
        usd(value)
    }
}

/// Signed percentage from a fraction: `0.2` → `+20.00%`.
pub fn signed_pct(fraction: f64) -> String {
    if !fraction.is_finite() {
        return "n/a".into();
    }
    format!("{:+.2}%", fraction * 100.0)
}

/// Unsigned percentage magnitude: `-0.0321` → `3.21%`.
pub fn abs_pct(fraction: f64) -> String {
    if !fraction.is_finite() {
        return "n/a".into();
    }
    format!("{:.2}%", fraction.abs() * 100.0)
}

/// `Aug 8` style tag used for annotation labels.
pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
