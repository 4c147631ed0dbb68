//! Static content for the home and guide pages.

use rust_decimal_macros::dec;
use serde::Serialize;

use crate::classifier::{HIDDEN_UNITS, INPUT_FEATURES};
use crate::ratios::RatioKind;
use crate::types::Rate;

/// Hold-out performance reported when the network was trained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationMetrics {
    pub accuracy: Rate,
    pub auc: Rate,
    pub f1_score: Rate,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelCard {
    pub purpose: &'static str,
    pub algorithm: &'static str,
    pub architecture: String,
    pub inputs: Vec<&'static str>,
    pub output: &'static str,
    pub classes: [&'static str; 2],
    pub validation: ValidationMetrics,
    pub training_scope: &'static str,
    pub disclaimer: &'static str,
}

pub fn model_card() -> ModelCard {
    ModelCard {
        purpose: "Estimate the likelihood that a company experiences financial distress, \
                  as an early screening aid for analysts, financial managers and investors.",
        algorithm: "Artificial Neural Network (multilayer perceptron)",
        architecture: format!("{}-{}-1 neurons", INPUT_FEATURES, HIDDEN_UNITS),
        inputs: RatioKind::ALL.iter().map(|k| k.label()).collect(),
        output: "Probability that the company experiences financial distress",
        classes: ["Non-Financial Distress", "Financial Distress"],
        validation: ValidationMetrics {
            accuracy: dec!(0.8918),
            auc: dec!(0.923),
            f1_score: dec!(0.90),
        },
        training_scope: "Historical data of consumer cyclicals companies in Indonesia",
        disclaimer: "Predictions depend on the quality and accuracy of the financial \
                     statement data entered. The more accurate the data (total assets, \
                     equity, net income, sales and ratios), the more representative the \
                     prediction is of the company's actual condition.",
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GuideSection {
    pub title: &'static str,
    pub points: Vec<&'static str>,
}

pub fn usage_guide() -> Vec<GuideSection> {
    vec![
        GuideSection {
            title: "Entering data",
            points: vec![
                "If the ratios (CR, QR, Cash Ratio, ROA, ROE, NPM) are already known, go \
                 straight to the prediction page.",
                "If only raw financial statement data is available, use the ratio \
                 calculator first.",
            ],
        },
        GuideSection {
            title: "Data validity",
            points: vec![
                "Use data from official financial statements (annual or quarterly reports).",
                "Use a comma as the decimal separator and a dot for thousands, e.g. \
                 1.234.567,50.",
            ],
        },
        GuideSection {
            title: "Prediction output",
            points: vec![
                "Probability that the company experiences financial distress.",
                "Category: Non-Financial Distress (safe) or Financial Distress (at risk).",
                "Short recommendations based on the pattern of the ratios entered.",
            ],
        },
        GuideSection {
            title: "Interpretation",
            points: vec![
                "The model is a decision aid, not the only basis for a decision.",
                "Combine it with other analysis: industry trends, business strategy, \
                 governance and macroeconomic conditions.",
            ],
        },
        GuideSection {
            title: "Model limitations",
            points: vec![
                "The model was trained on historical data of Indonesian consumer \
                 cyclicals companies.",
                "Use for other sectors or countries requires additional study.",
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_card_matches_architecture() {
        let card = model_card();
        assert_eq!(card.architecture, "6-12-1 neurons");
        assert_eq!(card.inputs.len(), INPUT_FEATURES);
        assert_eq!(card.inputs[0], "Current Ratio (CR)");
        assert_eq!(card.validation.accuracy, dec!(0.8918));
    }

    #[test]
    fn test_guide_has_five_sections() {
        let guide = usage_guide();
        assert_eq!(guide.len(), 5);
        assert!(guide.iter().all(|s| !s.points.is_empty()));
    }
}
