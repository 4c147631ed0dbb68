use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::ratios::{RatioKind, RatioSet};

/// Number of leading flags surfaced as "most influential".
pub const INFLUENTIAL_COUNT: usize = 2;

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// A ratio is flagged when it falls strictly below `floor`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Benchmark {
    pub ratio: RatioKind,
    pub floor: Decimal,
    pub explanation: &'static str,
}

/// Evaluation order is the order of this table.
pub const BENCHMARKS: [Benchmark; 6] = [
    Benchmark {
        ratio: RatioKind::CurrentRatio,
        floor: dec!(1.5),
        explanation: "Short-term liquidity is relatively weak; current assets are not \
                      sufficient to cover current liabilities.",
    },
    Benchmark {
        ratio: RatioKind::QuickRatio,
        floor: dec!(1.0),
        explanation: "Reliance on inventory is high; the ability to pay obligations \
                      without selling inventory is limited.",
    },
    Benchmark {
        ratio: RatioKind::CashRatio,
        floor: dec!(0.2),
        explanation: "Cash reserves are thin relative to current liabilities. The company \
                      is sensitive to cash-flow disruptions.",
    },
    Benchmark {
        ratio: RatioKind::ReturnOnAssets,
        floor: dec!(0.05),
        explanation: "Efficiency in using assets to generate profit is still low.",
    },
    Benchmark {
        ratio: RatioKind::ReturnOnEquity,
        floor: dec!(0.10),
        explanation: "Return to shareholders is not yet optimal; capital structure and \
                      profitability should be evaluated.",
    },
    Benchmark {
        ratio: RatioKind::NetProfitMargin,
        floor: dec!(0.05),
        explanation: "Net profit margin is thin; the company is vulnerable to rising costs \
                      or falling sales.",
    },
];

// ---------------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatioFlag {
    pub ratio: RatioKind,
    pub name: &'static str,
    pub explanation: &'static str,
}

/// Compare each ratio against its benchmark floor, in fixed order.
///
/// Independent of the classifier's prediction.
pub fn flag_ratios(ratios: &RatioSet) -> Vec<RatioFlag> {
    BENCHMARKS
        .iter()
        .filter(|b| ratios.get(b.ratio) < b.floor)
        .map(|b| RatioFlag {
            ratio: b.ratio,
            name: b.ratio.label(),
            explanation: b.explanation,
        })
        .collect()
}

/// Names of the first flagged ratios. This is evaluation order, not a
/// measure of model sensitivity.
pub fn most_influential(flags: &[RatioFlag]) -> Vec<&'static str> {
    flags.iter().take(INFLUENTIAL_COUNT).map(|f| f.name).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
