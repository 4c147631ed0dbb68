pub mod calculator;

pub use calculator::{
    calculate_ratio_report, compute_ratios, RatioForm, RatioKind, RatioLine, RatioReport,
    RatioSet, RawFinancials,
};
