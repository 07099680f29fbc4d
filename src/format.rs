// en-US number formatting for view slots
//
// Mirrors `toLocaleString('en-US')`: comma thousands separators, at most
// three fraction digits with trailing zeros dropped.

/// Default currency prefix for monetary fields
pub const DEFAULT_CURRENCY: &str = "$";

const MAX_FRACTION_DIGITS: usize = 3;

/// Grouped whole count, e.g. `12,345`
pub fn format_count(n: u64) -> String {
    group_thousands(&n.to_string())
}

/// Grouped number, e.g. `1,234.5`
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-∞" } else { "∞" }.to_string();
    }

    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, round_ties_up(value.abs()));
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// `{:.3}` rounds exact ties to even; en-US formatting rounds them away from zero.
/// An exact tie at the third digit is always a multiple of 1/16, so the
/// scaled value below is exact whenever it matters.
fn round_ties_up(x: f64) -> f64 {
    let scaled = x * 1000.0;
    if (x * 16.0).fract() == 0.0 && scaled.fract() == 0.5 {
        scaled.ceil() / 1000.0
    } else {
        x
    }
}

/// Monetary amount with prefix, e.g. `$1,234`
pub fn format_currency(value: f64, prefix: &str) -> String {
    format!("{}{}", prefix, format_number(value))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count_grouping() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(5198), "5,198");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_format_number_whole_values_have_no_decimals() {
        assert_eq!(format_number(455401.0), "455,401");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(100.0), "100");
    }

    #[test]
    fn test_format_number_fraction_digits() {
        assert_eq!(format_number(1234.5), "1,234.5");
        assert_eq!(format_number(0.125), "0.125");
        assert_eq!(format_number(2.0004), "2");
        assert_eq!(format_number(1234.56789), "1,234.568");
    }

    #[test]
    fn test_format_number_ties_round_away_from_zero() {
        assert_eq!(format_number(0.0625), "0.063");
        assert_eq!(format_number(2.5625), "2.563");
        assert_eq!(format_number(1000.0625), "1,000.063");
        assert_eq!(format_number(-0.0625), "-0.063");
        assert_eq!(format_number(0.0626), "0.063");
        assert_eq!(format_number(0.0624), "0.062");
    }

    #[test]
    fn test_format_number_negative_and_infinite() {
        assert_eq!(format_number(-1500.0), "-1,500");
        assert_eq!(format_number(f64::INFINITY), "∞");
        assert_eq!(format_number(f64::NEG_INFINITY), "-∞");
    }

    #[test]
    fn test_format_currency_prefix() {
        assert_eq!(format_currency(202212.0, "$"), "$202,212");
        assert_eq!(format_currency(10.0, "€"), "€10");
        assert_eq!(format_currency(-5.0, DEFAULT_CURRENCY), "$-5");
    }
}
