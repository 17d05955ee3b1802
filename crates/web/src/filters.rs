//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Format a rupiah amount with dotted thousands groups.
///
/// Usage in templates: `{{ product.price|rupiah }}` renders `350000` as
/// `Rp 350.000`.
#[askama::filter_fn]
pub fn rupiah(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_rupiah(&value.to_string()))
}

fn format_rupiah(raw: &str) -> String {
    let (sign, digits) = raw.strip_prefix('-').map_or(("", raw), |d| ("-", d));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    format!("Rp {sign}{grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rupiah_groups_thousands() {
        assert_eq!(format_rupiah("350000"), "Rp 350.000");
        assert_eq!(format_rupiah("1500000"), "Rp 1.500.000");
    }

    #[test]
    fn test_rupiah_small_amounts() {
        assert_eq!(format_rupiah("0"), "Rp 0");
        assert_eq!(format_rupiah("999"), "Rp 999");
        assert_eq!(format_rupiah("1000"), "Rp 1.000");
    }

    #[test]
    fn test_rupiah_negative() {
        assert_eq!(format_rupiah("-25000"), "Rp -25.000");
    }
}
