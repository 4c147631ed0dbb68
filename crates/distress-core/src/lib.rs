pub mod classifier;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod interpretation;
pub mod locale;
pub mod ratios;
pub mod session;
pub mod types;

pub use error::DistressError;
pub use types::*;

/// Standard result type for all distress operations
pub type DistressResult<T> = Result<T, DistressError>;
