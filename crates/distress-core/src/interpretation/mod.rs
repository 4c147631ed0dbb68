pub mod flags;
pub mod narrative;

pub use flags::{flag_ratios, most_influential, Benchmark, RatioFlag, BENCHMARKS};
pub use narrative::{interpret, Interpretation, InvestorNote, Recommendation};
