use clap::Args;
use serde_json::Value;
use std::path::PathBuf;

use distress_core::config::DashboardConfig;
use distress_core::dashboard::calculate_page;
use distress_core::ratios::RatioForm;
use distress_core::session::SessionContext;

use crate::input;

/// Arguments for the ratio calculator. Every figure is free text in
/// Indonesian format and defaults to 0 when blank or unparseable.
#[derive(Args, Default)]
#[command(allow_hyphen_values = true)]
pub struct RatioArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Current assets
    #[arg(long)]
    pub current_assets: Option<String>,

    /// Current liabilities
    #[arg(long)]
    pub current_liabilities: Option<String>,

    /// Inventory
    #[arg(long)]
    pub inventory: Option<String>,

    /// Cash and cash equivalents
    #[arg(long)]
    pub cash: Option<String>,

    /// Net income
    #[arg(long)]
    pub net_income: Option<String>,

    /// Total assets
    #[arg(long)]
    pub total_assets: Option<String>,

    /// Total equity
    #[arg(long)]
    pub equity: Option<String>,

    /// Sales / revenue
    #[arg(long, alias = "revenue")]
    pub sales: Option<String>,
}

impl RatioArgs {
    fn has_figures(&self) -> bool {
        [
            &self.current_assets,
            &self.current_liabilities,
            &self.inventory,
            &self.cash,
            &self.net_income,
            &self.total_assets,
            &self.equity,
            &self.sales,
        ]
        .iter()
        .any(|f| f.is_some())
    }

    fn into_form(self) -> RatioForm {
        RatioForm {
            current_assets: self.current_assets,
            current_liabilities: self.current_liabilities,
            inventory: self.inventory,
            cash: self.cash,
            net_income: self.net_income,
            total_assets: self.total_assets,
            equity: self.equity,
            sales: self.sales,
        }
    }
}

pub fn run_ratios(
    args: RatioArgs,
    config: &DashboardConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let form: RatioForm = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if args.has_figures() {
        args.into_form()
    } else if let Some(form) = input::stdin::read_stdin()? {
        form
    } else {
        RatioForm::default()
    };

    let mut session = match config.session_path {
        Some(ref path) => SessionContext::load(path)?,
        None => SessionContext::new(),
    };

    let report = calculate_page(&form, &mut session);

    if let Some(ref path) = config.session_path {
        session.save(path)?;
        tracing::info!(path = %path.display(), "ratios saved for the prediction page");
    }

    Ok(serde_json::to_value(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_args() -> RatioArgs {
        RatioArgs {
            current_assets: Some("2.000.000".into()),
            current_liabilities: Some("1.000.000".into()),
            inventory: Some("500.000".into()),
            cash: Some("300.000".into()),
            net_income: Some("100.000".into()),
            total_assets: Some("5.000.000".into()),
            equity: Some("2.000.000".into()),
            sales: Some("1.500.000".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_ratios_from_flags() {
        let out = run_ratios(sample_args(), &DashboardConfig::default()).unwrap();
        let ratios = &out["result"]["ratios"];
        assert_eq!(ratios["current_ratio"], "2.000");
        assert_eq!(ratios["npm"], "0.067");
        assert_eq!(out["result"]["lines"][1]["display"], "1,500");
    }

    #[test]
    fn test_session_file_written() {
        let dir = tempfile::tempdir().unwrap();
        let session_path = dir.path().join("session.json");
        let config = DashboardConfig::default().with_overrides(None, Some(session_path.clone()));

        run_ratios(sample_args(), &config).unwrap();

        let session = SessionContext::load(&session_path).unwrap();
        let ratios = session.last_ratios.unwrap();
        assert_eq!(ratios.quick_ratio.to_string(), "1.500");
    }
}
