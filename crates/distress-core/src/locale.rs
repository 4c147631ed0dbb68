//! Indonesian number formatting: `.` groups thousands and `,` marks decimals.
//!
//! Parsing is total. Blank or malformed text degrades to zero rather than
//! surfacing an error, since every form field on the ratio calculator is
//! free text that defaults to `0`.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::types::{Probability, Ratio};

/// Decimal places shown for ratios.
pub const RATIO_DISPLAY_DP: u32 = 3;

/// Decimal places shown for the distress probability.
pub const PROBABILITY_DISPLAY_DP: usize = 4;

/// Parse an Indonesian-formatted number such as `1.234.567,50`.
///
/// All `.` characters are dropped, `,` becomes the decimal point and the
/// remainder is parsed as a plain or scientific decimal. Anything that does
/// not parse (including values outside the `Decimal` range) yields zero.
pub fn parse_number(text: &str) -> Decimal {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }

    let normalized = trimmed.replace('.', "").replace(',', ".");
    match parse_normalized(&normalized) {
        Ok(value) => value,
        Err(Rejection::Malformed) => {
            tracing::debug!(input = text, "unparseable number, defaulting to zero");
            Decimal::ZERO
        }
        Err(Rejection::OutOfRange) => {
            tracing::warn!(input = text, "number outside the decimal range, defaulting to zero");
            Decimal::ZERO
        }
    }
}

/// Like [`parse_number`], treating a missing field as blank.
pub fn parse_number_opt(text: Option<&str>) -> Decimal {
    text.map(parse_number).unwrap_or(Decimal::ZERO)
}

/// Round half away from zero to the displayed precision: `0.0125` -> `0.013`.
pub fn round_ratio(value: Decimal) -> Ratio {
    value.round_dp_with_strategy(RATIO_DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a ratio with three decimals and a comma separator: `2,000`.
///
/// The fraction is padded by hand; `{:.3}` on a 29-digit `Decimal` exceeds
/// its formatting buffer.
pub fn format_ratio(value: Ratio) -> String {
    let text = round_ratio(value).to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    format!(
        "{},{:0<width$}",
        whole,
        fraction,
        width = RATIO_DISPLAY_DP as usize
    )
}

/// Format a probability with four decimals: `0.7312`.
pub fn format_probability(value: Probability) -> String {
    format!("{:.prec$}", value, prec = PROBABILITY_DISPLAY_DP)
}

/// Largest exponent magnitude accepted in scientific notation.
const MAX_SCIENTIFIC_EXPONENT: u32 = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    Malformed,
    OutOfRange,
}

fn parse_normalized(s: &str) -> Result<Decimal, Rejection> {
    if let Ok(value) = Decimal::from_str(s) {
        return Ok(value);
    }
    if is_plain_number(s) {
        return Err(Rejection::OutOfRange);
    }

    let (mantissa, exponent) = s.split_once(['e', 'E']).ok_or(Rejection::Malformed)?;
    if !is_plain_number(mantissa) {
        return Err(Rejection::Malformed);
    }
    let magnitude: u32 = exponent
        .strip_prefix('-')
        .unwrap_or(exponent)
        .parse()
        .map_err(|_| Rejection::Malformed)?;
    if magnitude > MAX_SCIENTIFIC_EXPONENT {
        return Err(Rejection::OutOfRange);
    }
    Decimal::from_scientific(s).map_err(|_| Rejection::OutOfRange)
}

/// Optional sign, digits, at most one decimal point.
fn is_plain_number(s: &str) -> bool {
    let body = s.strip_prefix(['-', '+']).unwrap_or(s);
    let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));
    !(whole.is_empty() && fraction.is_empty())
        && whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_thousands_and_decimal_separators() {
        assert_eq!(parse_number("1.234.567,50"), dec!(1234567.50));
        assert_eq!(parse_number("1.000"), dec!(1000));
        assert_eq!(parse_number("0,25"), dec!(0.25));
    }

    #[test]
    fn test_blank_is_zero() {
        assert_eq!(parse_number(""), Decimal::ZERO);
        assert_eq!(parse_number("   "), Decimal::ZERO);
        assert_eq!(parse_number_opt(None), Decimal::ZERO);
    }

    #[test]
    fn test_negative_values_allowed() {
        assert_eq!(parse_number("-2.500,75"), dec!(-2500.75));
    }

    #[test]
    fn test_garbage_is_zero() {
        assert_eq!(parse_number("abc"), Decimal::ZERO);
        assert_eq!(parse_number("1,2,3"), Decimal::ZERO);
        assert_eq!(parse_number("Rp 1.000"), Decimal::ZERO);
        assert_eq!(parse_number("inf"), Decimal::ZERO);
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        assert_eq!(parse_number("  42,5 "), dec!(42.5));
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(parse_number("1e3"), dec!(1000));
        assert_eq!(parse_number("25e-2"), dec!(0.25));
        assert_eq!(parse_number("1e400"), Decimal::ZERO);
        assert_eq!(parse_number("1,5e-4000000000"), Decimal::ZERO);
    }

    #[test]
    fn test_dot_is_never_a_decimal_point() {
        // "1.5" in Indonesian format is fifteen
        assert_eq!(parse_number("1.5"), dec!(15));
    }

    #[test]
    fn test_format_ratio_uses_comma() {
        assert_eq!(format_ratio(dec!(2)), "2,000");
        assert_eq!(format_ratio(dec!(0.067)), "0,067");
        assert_eq!(format_ratio(dec!(-1.25)), "-1,250");
    }

    #[test]
    fn test_format_ratio_rounds_half_away_from_zero() {
        assert_eq!(format_ratio(dec!(0.0125)), "0,013");
        assert_eq!(format_ratio(dec!(-0.0125)), "-0,013");
        assert_eq!(round_ratio(dec!(0.0124)), dec!(0.012));
    }

    #[test]
    fn test_format_ratio_at_decimal_extremes() {
        assert_eq!(
            format_ratio(Decimal::from_i128_with_scale(10_i128.pow(28), 0)),
            "10000000000000000000000000000,000"
        );
        assert_eq!(
            format_ratio(Decimal::MAX),
            "79228162514264337593543950335,000"
        );
        assert_eq!(format_ratio(Decimal::MIN), "-79228162514264337593543950335,000");
    }

    #[test]
    fn test_out_of_range_distinguished_from_malformed() {
        assert_eq!(
            parse_normalized("79228162514264337593543950336"),
            Err(Rejection::OutOfRange)
        );
        assert_eq!(parse_normalized("1e400"), Err(Rejection::OutOfRange));
        assert_eq!(parse_normalized("abc"), Err(Rejection::Malformed));
        assert_eq!(parse_normalized("1.2.3"), Err(Rejection::Malformed));
        assert_eq!(
            parse_number("79.228.162.514.264.337.593.543.950.336"),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_format_probability_four_places() {
        assert_eq!(format_probability(0.5), "0.5000");
        assert_eq!(format_probability(0.123456), "0.1235");
    }
}
