use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::network::{DistressModel, INPUT_FEATURES};
use crate::ratios::RatioSet;
use crate::types::Probability;

/// Probabilities at or above this value are classified as distressed.
pub const DISTRESS_THRESHOLD: Probability = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistressLabel {
    #[serde(rename = "Financial Distress")]
    FinancialDistress,
    #[serde(rename = "Non-Financial Distress")]
    NonFinancialDistress,
}

impl std::fmt::Display for DistressLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FinancialDistress => write!(f, "Financial Distress"),
            Self::NonFinancialDistress => write!(f, "Non-Financial Distress"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub probability: Probability,
    pub label: DistressLabel,
    pub threshold: Probability,
}

/// Map a probability to its label; the threshold itself counts as distress.
pub fn classify(probability: Probability) -> DistressLabel {
    if probability >= DISTRESS_THRESHOLD {
        DistressLabel::FinancialDistress
    } else {
        DistressLabel::NonFinancialDistress
    }
}

/// Classifier input in fixed order: CR, QR, Cash Ratio, ROA, ROE, NPM.
pub fn feature_vector(ratios: &RatioSet) -> [f64; INPUT_FEATURES] {
    let mut features = [0.0; INPUT_FEATURES];
    for (slot, (_, value)) in features.iter_mut().zip(ratios.iter()) {
        *slot = value.to_f64().unwrap_or(0.0);
    }
    features
}

/// Run one forward pass and label the result.
pub fn predict<M: DistressModel + ?Sized>(model: &M, ratios: &RatioSet) -> PredictionResult {
    let features = feature_vector(ratios);
    let probability = model.forward(&features);
    tracing::debug!(?features, probability, "distress prediction");

    PredictionResult {
        probability,
        label: classify(probability),
        threshold: DISTRESS_THRESHOLD,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    /// Always returns the same probability.
    struct FixedModel(f64);

    impl DistressModel for FixedModel {
        fn forward(&self, _features: &[f64; INPUT_FEATURES]) -> f64 {
            self.0
        }

        fn kind(&self) -> String {
            "fixed".into()
        }
    }

    /// Echoes one input feature, to check ordering.
    struct EchoFeature(usize);

    impl DistressModel for EchoFeature {
        fn forward(&self, features: &[f64; INPUT_FEATURES]) -> f64 {
            features[self.0]
        }

        fn kind(&self) -> String {
            "probe".into()
        }
    }

    fn sample_ratios() -> RatioSet {
        RatioSet {
            current_ratio: dec!(0.5),
            quick_ratio: dec!(0.3),
            cash_ratio: dec!(0.05),
            roa: dec!(0.01),
            roe: dec!(0.02),
            npm: dec!(0.01),
        }
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert_eq!(classify(0.5), DistressLabel::FinancialDistress);
        assert_eq!(classify(0.4999), DistressLabel::NonFinancialDistress);
        assert_eq!(classify(1.0), DistressLabel::FinancialDistress);
        assert_eq!(classify(0.0), DistressLabel::NonFinancialDistress);
    }

    #[test]
    fn test_predict_uses_model_output() {
        let result = predict(&FixedModel(0.73), &sample_ratios());
        assert_eq!(result.probability, 0.73);
        assert_eq!(result.label, DistressLabel::FinancialDistress);
        assert_eq!(result.threshold, 0.5);
    }

    #[test]
    fn test_feature_order() {
        let features = feature_vector(&sample_ratios());
        assert_eq!(features, [0.5, 0.3, 0.05, 0.01, 0.02, 0.01]);

        let ratios = sample_ratios();
        assert_eq!(predict(&EchoFeature(1), &ratios).probability, 0.3);
        assert_eq!(predict(&EchoFeature(5), &ratios).probability, 0.01);
    }

    #[test]
    fn test_label_display_and_serde() {
        assert_eq!(
            DistressLabel::NonFinancialDistress.to_string(),
            "Non-Financial Distress"
        );
        let json = serde_json::to_string(&DistressLabel::FinancialDistress).unwrap();
        assert_eq!(json, "\"Financial Distress\"");
    }

    #[test]
    fn test_dyn_model_accepted() {
        let model: Box<dyn DistressModel> = Box::new(FixedModel(0.2));
        let result = predict(model.as_ref(), &RatioSet::default());
        assert_eq!(result.label, DistressLabel::NonFinancialDistress);
    }
}
