//! Carryover between the ratio calculator and the prediction page.
//!
//! The context is owned by whoever drives the session and passed in
//! explicitly; nothing here is global.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::ratios::RatioSet;
use crate::DistressResult;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    /// Most recently computed ratios, used to pre-fill the prediction form
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "rasio_values")]
    pub last_ratios: Option<RatioSet>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the carryover with freshly computed ratios.
    pub fn remember(&mut self, ratios: RatioSet) {
        self.last_ratios = Some(ratios);
    }

    /// Prediction form defaults: the last computed ratios, else all zero.
    pub fn prediction_defaults(&self) -> RatioSet {
        self.last_ratios.unwrap_or_default()
    }

    /// Read a saved context. A missing file is an empty session.
    pub fn load(path: impl AsRef<Path>) -> DistressResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no session file, starting empty");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> DistressResult<()> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_to_zero_without_carryover() {
        let session = SessionContext::new();
        assert_eq!(session.prediction_defaults(), RatioSet::default());
    }

    #[test]
    fn test_remember_latest_ratios() {
        let mut session = SessionContext::new();
        let first = RatioSet {
            current_ratio: dec!(1.1),
            ..Default::default()
        };
        let second = RatioSet {
            current_ratio: dec!(2.2),
            ..Default::default()
        };
        session.remember(first);
        session.remember(second);
        assert_eq!(session.prediction_defaults().current_ratio, dec!(2.2));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut session = SessionContext::new();
        session.remember(RatioSet {
            roa: dec!(0.02),
            ..Default::default()
        });
        session.save(&path).unwrap();

        let loaded = SessionContext::load(&path).unwrap();
        assert_eq!(loaded, session);
    }

    #[test]
    fn test_missing_file_is_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = SessionContext::load(dir.path().join("absent.json")).unwrap();
        assert!(loaded.last_ratios.is_none());
    }
}
