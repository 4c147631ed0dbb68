use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::path::PathBuf;

use distress_core::classifier::shared_model;
use distress_core::config::DashboardConfig;
use distress_core::dashboard::prediction_page;
use distress_core::interpretation::{flag_ratios, most_influential};
use distress_core::ratios::RatioSet;
use distress_core::session::SessionContext;

use crate::input;

/// The six ratios in standard decimal notation. Missing values come from
/// the session carryover, else zero.
#[derive(Args, Default)]
#[command(allow_hyphen_values = true)]
pub struct RatioValueArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Current ratio
    #[arg(long, alias = "current-ratio")]
    pub cr: Option<Decimal>,

    /// Quick ratio
    #[arg(long, alias = "quick-ratio")]
    pub qr: Option<Decimal>,

    /// Cash ratio
    #[arg(long)]
    pub cash_ratio: Option<Decimal>,

    /// Return on assets
    #[arg(long)]
    pub roa: Option<Decimal>,

    /// Return on equity
    #[arg(long)]
    pub roe: Option<Decimal>,

    /// Net profit margin
    #[arg(long)]
    pub npm: Option<Decimal>,
}

impl RatioValueArgs {
    fn has_values(&self) -> bool {
        [self.cr, self.qr, self.cash_ratio, self.roa, self.roe, self.npm]
            .iter()
            .any(|v| v.is_some())
    }

    fn apply_to(&self, mut ratios: RatioSet) -> RatioSet {
        if let Some(v) = self.cr {
            ratios.current_ratio = v;
        }
        if let Some(v) = self.qr {
            ratios.quick_ratio = v;
        }
        if let Some(v) = self.cash_ratio {
            ratios.cash_ratio = v;
        }
        if let Some(v) = self.roa {
            ratios.roa = v;
        }
        if let Some(v) = self.roe {
            ratios.roe = v;
        }
        if let Some(v) = self.npm {
            ratios.npm = v;
        }
        ratios
    }

    /// Input file, then flags over the session defaults, then piped stdin.
    fn resolve(&self, config: &DashboardConfig) -> Result<RatioSet, Box<dyn std::error::Error>> {
        if let Some(ref path) = self.input {
            return input::file::read_json(path);
        }

        let session = match config.session_path {
            Some(ref path) => SessionContext::load(path)?,
            None => SessionContext::new(),
        };
        let defaults = session.prediction_defaults();

        if self.has_values() {
            return Ok(self.apply_to(defaults));
        }
        match input::stdin::read_stdin()? {
            Some(ratios) => Ok(ratios),
            None => Ok(defaults),
        }
    }
}

/// Arguments for distress prediction
#[derive(Args, Default)]
pub struct PredictArgs {
    #[command(flatten)]
    pub ratios: RatioValueArgs,
}

/// Arguments for benchmark flags
#[derive(Args, Default)]
pub struct FlagArgs {
    #[command(flatten)]
    pub ratios: RatioValueArgs,
}

pub fn run_predict(
    args: PredictArgs,
    config: &DashboardConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let model = shared_model(&config.model_path)?;
    let ratios = args.ratios.resolve(config)?;
    let result = prediction_page(model, &ratios);
    Ok(serde_json::to_value(result)?)
}

pub fn run_flags(
    args: FlagArgs,
    config: &DashboardConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let ratios = args.ratios.resolve(config)?;
    let flags = flag_ratios(&ratios);
    Ok(json!({
        "ratios": ratios,
        "most_influential": most_influential(&flags),
        "flags": flags,
    }))
}
