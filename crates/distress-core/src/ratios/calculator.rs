use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::locale::{self, RATIO_DISPLAY_DP};
use crate::types::*;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// The eight free-text fields of the ratio calculator, as typed by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RatioForm {
    #[serde(default)]
    pub current_assets: Option<String>,
    #[serde(default)]
    pub current_liabilities: Option<String>,
    #[serde(default)]
    pub inventory: Option<String>,
    #[serde(default)]
    pub cash: Option<String>,
    #[serde(default)]
    pub net_income: Option<String>,
    #[serde(default)]
    pub total_assets: Option<String>,
    #[serde(default)]
    pub equity: Option<String>,
    #[serde(default)]
    pub sales: Option<String>,
}

/// Raw statement figures. Any sign is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFinancials {
    pub current_assets: Money,
    pub current_liabilities: Money,
    pub inventory: Money,
    /// Cash and cash equivalents
    pub cash: Money,
    pub net_income: Money,
    pub total_assets: Money,
    pub equity: Money,
    pub sales: Money,
}

impl RawFinancials {
    /// Parse every form field with the Indonesian number format.
    pub fn from_form(form: &RatioForm) -> Self {
        Self {
            current_assets: locale::parse_number_opt(form.current_assets.as_deref()),
            current_liabilities: locale::parse_number_opt(form.current_liabilities.as_deref()),
            inventory: locale::parse_number_opt(form.inventory.as_deref()),
            cash: locale::parse_number_opt(form.cash.as_deref()),
            net_income: locale::parse_number_opt(form.net_income.as_deref()),
            total_assets: locale::parse_number_opt(form.total_assets.as_deref()),
            equity: locale::parse_number_opt(form.equity.as_deref()),
            sales: locale::parse_number_opt(form.sales.as_deref()),
        }
    }
}

/// The six ratios, in classifier input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatioKind {
    CurrentRatio,
    QuickRatio,
    CashRatio,
    ReturnOnAssets,
    ReturnOnEquity,
    NetProfitMargin,
}

impl RatioKind {
    pub const ALL: [RatioKind; 6] = [
        Self::CurrentRatio,
        Self::QuickRatio,
        Self::CashRatio,
        Self::ReturnOnAssets,
        Self::ReturnOnEquity,
        Self::NetProfitMargin,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::CurrentRatio => "Current Ratio (CR)",
            Self::QuickRatio => "Quick Ratio (QR)",
            Self::CashRatio => "Cash Ratio",
            Self::ReturnOnAssets => "ROA",
            Self::ReturnOnEquity => "ROE",
            Self::NetProfitMargin => "NPM",
        }
    }

    pub fn formula(&self) -> &'static str {
        match self {
            Self::CurrentRatio => "Current Assets / Current Liabilities",
            Self::QuickRatio => "(Current Assets - Inventory) / Current Liabilities",
            Self::CashRatio => "Cash & Equivalents / Current Liabilities",
            Self::ReturnOnAssets => "Net Income / Total Assets",
            Self::ReturnOnEquity => "Net Income / Equity",
            Self::NetProfitMargin => "Net Income / Sales",
        }
    }
}

impl std::fmt::Display for RatioKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Ratios rounded to three decimals. A zero denominator yields exactly zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioSet {
    #[serde(alias = "cr")]
    pub current_ratio: Ratio,
    #[serde(alias = "qr")]
    pub quick_ratio: Ratio,
    pub cash_ratio: Ratio,
    pub roa: Ratio,
    pub roe: Ratio,
    pub npm: Ratio,
}

impl RatioSet {
    pub fn get(&self, kind: RatioKind) -> Ratio {
        match kind {
            RatioKind::CurrentRatio => self.current_ratio,
            RatioKind::QuickRatio => self.quick_ratio,
            RatioKind::CashRatio => self.cash_ratio,
            RatioKind::ReturnOnAssets => self.roa,
            RatioKind::ReturnOnEquity => self.roe,
            RatioKind::NetProfitMargin => self.npm,
        }
    }

    /// Values paired with their kind, in classifier input order.
    pub fn iter(&self) -> impl Iterator<Item = (RatioKind, Ratio)> + '_ {
        RatioKind::ALL.into_iter().map(move |k| (k, self.get(k)))
    }
}

/// One line of the calculator's result panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatioLine {
    pub ratio: RatioKind,
    pub label: String,
    pub formula: String,
    /// Comma-decimal display value, e.g. `1,500`
    pub display: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatioReport {
    pub ratios: RatioSet,
    pub lines: Vec<RatioLine>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the six liquidity and profitability ratios.
pub fn compute_ratios(raw: &RawFinancials) -> RatioSet {
    compute_with_warnings(raw, &mut Vec::new())
}

/// Compute ratios and wrap them with display lines and zero-denominator warnings.
pub fn calculate_ratio_report(raw: &RawFinancials) -> ComputationOutput<RatioReport> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let ratios = compute_with_warnings(raw, &mut warnings);
    let lines = ratios
        .iter()
        .map(|(kind, value)| RatioLine {
            ratio: kind,
            label: kind.label().to_string(),
            formula: kind.formula().to_string(),
            display: locale::format_ratio(value),
        })
        .collect();

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Liquidity (CR, QR, Cash Ratio) and profitability (ROA, ROE, NPM) ratios, \
         rounded to 3 decimals; zero denominators yield 0",
        raw,
        warnings,
        elapsed,
        RatioReport { ratios, lines },
    )
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn compute_with_warnings(raw: &RawFinancials, warnings: &mut Vec<String>) -> RatioSet {
    RatioSet {
        current_ratio: guarded_ratio(
            raw.current_assets,
            raw.current_liabilities,
            RatioKind::CurrentRatio,
            warnings,
        ),
        quick_ratio: match raw.current_assets.checked_sub(raw.inventory) {
            Some(quick_assets) => guarded_ratio(
                quick_assets,
                raw.current_liabilities,
                RatioKind::QuickRatio,
                warnings,
            ),
            None => overflowed(RatioKind::QuickRatio, warnings),
        },
        cash_ratio: guarded_ratio(
            raw.cash,
            raw.current_liabilities,
            RatioKind::CashRatio,
            warnings,
        ),
        roa: guarded_ratio(
            raw.net_income,
            raw.total_assets,
            RatioKind::ReturnOnAssets,
            warnings,
        ),
        roe: guarded_ratio(raw.net_income, raw.equity, RatioKind::ReturnOnEquity, warnings),
        npm: guarded_ratio(raw.net_income, raw.sales, RatioKind::NetProfitMargin, warnings),
    }
}

/// Divide and round, substituting zero for a zero denominator or overflow.
fn guarded_ratio(
    numerator: Decimal,
    denominator: Decimal,
    kind: RatioKind,
    warnings: &mut Vec<String>,
) -> Ratio {
    if denominator.is_zero() {
        warnings.push(format!("{}: denominator is zero; ratio set to 0.", kind.label()));
        return to_ratio(Decimal::ZERO);
    }
    match numerator.checked_div(denominator) {
        Some(value) => to_ratio(value),
        None => overflowed(kind, warnings),
    }
}

fn overflowed(kind: RatioKind, warnings: &mut Vec<String>) -> Ratio {
    tracing::warn!(ratio = kind.label(), "ratio overflowed, defaulting to zero");
    warnings.push(format!("{}: arithmetic overflowed; ratio set to 0.", kind.label()));
    to_ratio(Decimal::ZERO)
}

/// Round half away from zero to three places and pin the scale so `2` is
/// stored as `2.000`.
fn to_ratio(value: Decimal) -> Ratio {
    let mut ratio = locale::round_ratio(value);
    ratio.rescale(RATIO_DISPLAY_DP);
    ratio
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_company() -> RawFinancials {
        RawFinancials {
            current_assets: dec!(2_000_000),
            current_liabilities: dec!(1_000_000),
            inventory: dec!(500_000),
            cash: dec!(300_000),
            net_income: dec!(100_000),
            total_assets: dec!(5_000_000),
            equity: dec!(2_000_000),
            sales: dec!(1_500_000),
        }
    }

    #[test]
    fn test_sample_company_ratios() {
        let r = compute_ratios(&sample_company());
        assert_eq!(r.current_ratio, dec!(2.000));
        assert_eq!(r.quick_ratio, dec!(1.500));
        assert_eq!(r.cash_ratio, dec!(0.300));
        assert_eq!(r.roa, dec!(0.020));
        assert_eq!(r.roe, dec!(0.050));
        // 100k / 1.5M = 0.0666... rounds up
        assert_eq!(r.npm, dec!(0.067));
    }

    #[test]
    fn test_all_zero_inputs() {
        let r = compute_ratios(&RawFinancials::default());
        assert_eq!(r, RatioSet::default());
    }

    #[test]
    fn test_zero_current_liabilities_zeroes_liquidity_only() {
        let mut raw = sample_company();
        raw.current_liabilities = Decimal::ZERO;
        let r = compute_ratios(&raw);
        assert_eq!(r.current_ratio, Decimal::ZERO);
        assert_eq!(r.quick_ratio, Decimal::ZERO);
        assert_eq!(r.cash_ratio, Decimal::ZERO);
        assert_eq!(r.roa, dec!(0.020));
    }

    #[test]
    fn test_negative_net_income() {
        let mut raw = sample_company();
        raw.net_income = dec!(-250_000);
        let r = compute_ratios(&raw);
        assert_eq!(r.roa, dec!(-0.050));
        assert_eq!(r.roe, dec!(-0.125));
    }

    #[test]
    fn test_from_form_parses_locale_text() {
        let form = RatioForm {
            current_assets: Some("2.000.000".into()),
            current_liabilities: Some("1.000.000,00".into()),
            inventory: Some("".into()),
            cash: Some("tiga ratus".into()),
            ..Default::default()
        };
        let raw = RawFinancials::from_form(&form);
        assert_eq!(raw.current_assets, dec!(2_000_000));
        assert_eq!(raw.current_liabilities, dec!(1_000_000));
        assert_eq!(raw.inventory, Decimal::ZERO);
        assert_eq!(raw.cash, Decimal::ZERO);
        assert_eq!(raw.sales, Decimal::ZERO);
    }

    #[test]
    fn test_report_lines_and_warnings() {
        let mut raw = sample_company();
        raw.sales = Decimal::ZERO;
        let out = calculate_ratio_report(&raw);

        assert_eq!(out.result.lines.len(), 6);
        assert_eq!(out.result.lines[0].display, "2,000");
        assert_eq!(out.result.lines[5].display, "0,000");
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].starts_with("NPM"));
    }

    #[test]
    fn test_ratios_keep_three_decimal_scale() {
        let r = compute_ratios(&sample_company());
        assert_eq!(r.current_ratio.to_string(), "2.000");
        assert_eq!(compute_ratios(&RawFinancials::default()).roe.to_string(), "0.000");
    }

    #[test]
    fn test_overflowing_quick_assets_yield_zero() {
        let raw = RawFinancials {
            current_assets: Decimal::MAX,
            current_liabilities: dec!(1),
            inventory: dec!(-1),
            ..Default::default()
        };
        let out = calculate_ratio_report(&raw);
        assert_eq!(out.result.ratios.quick_ratio, Decimal::ZERO);
        assert!(out.warnings.iter().any(|w| w.contains("overflowed")));
    }

    #[test]
    fn test_largest_decimal_ratio_still_displays() {
        let form = RatioForm {
            current_assets: Some("10.000.000.000.000.000.000.000.000.000".into()),
            current_liabilities: Some("1".into()),
            ..Default::default()
        };
        let out = calculate_ratio_report(&RawFinancials::from_form(&form));
        assert_eq!(
            out.result.ratios.current_ratio,
            Decimal::from_i128_with_scale(10_i128.pow(28), 0)
        );
        assert_eq!(out.result.lines[0].display, "10000000000000000000000000000,000");
        assert_eq!(out.result.lines[1].display, "10000000000000000000000000000,000");
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        let raw = RawFinancials {
            net_income: dec!(125),
            total_assets: dec!(10_000),
            equity: dec!(-10_000),
            ..Default::default()
        };
        let r = compute_ratios(&raw);
        assert_eq!(r.roa, dec!(0.013));
        assert_eq!(r.roe, dec!(-0.013));
    }

    #[test]
    fn test_iter_follows_fixed_order() {
        let r = compute_ratios(&sample_company());
        let kinds: Vec<RatioKind> = r.iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, RatioKind::ALL.to_vec());
    }

    #[test]
    fn test_session_keys_accepted_on_deserialize() {
        let json = r#"{"cr":"1.2","qr":"0.8","cash_ratio":"0.1","roa":"0.01","roe":"0.02","npm":"0.03"}"#;
        let r: RatioSet = serde_json::from_str(json).unwrap();
        assert_eq!(r.current_ratio, dec!(1.2));
        assert_eq!(r.quick_ratio, dec!(0.8));
    }
}
