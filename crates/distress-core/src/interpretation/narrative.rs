use serde::Serialize;

use super::flags::{flag_ratios, most_influential, RatioFlag};
use crate::classifier::{DistressLabel, PredictionResult};
use crate::ratios::RatioSet;

/// Shown in place of the flag list when nothing breaches a benchmark.
pub const HEALTHY_SUMMARY: &str = "Overall, the combination of ratios entered is at a relatively \
     healthy level based on the simple benchmarks used.";

/// Lead-in shown above a non-empty flag list.
pub const FLAGS_HEADLINE: &str = "Some ratios need particular attention:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub headline: &'static str,
    pub actions: [&'static str; 3],
}

impl Recommendation {
    pub fn for_label(label: DistressLabel) -> Self {
        match label {
            DistressLabel::FinancialDistress => Self {
                headline: "The company is in the Financial Distress category. \
                           Steps worth considering:",
                actions: [
                    "Restructure debt to reduce short-term liquidity pressure.",
                    "Review operational efficiency to improve the net profit margin.",
                    "Strengthen cash and current assets, for example by accelerating \
                     receivable collection.",
                ],
            },
            DistressLabel::NonFinancialDistress => Self {
                headline: "The company is in the Non-Financial Distress category, \
                           but still needs to maintain the quality of its financial performance:",
                actions: [
                    "Keep liquidity at a comfortable level to withstand short-term shocks.",
                    "Keep monitoring profitability and margins so rising costs do not erode them.",
                    "Use excess cash wisely, for example for productive investment or \
                     repaying expensive debt.",
                ],
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvestorNote {
    pub points: [&'static str; 3],
}

impl InvestorNote {
    pub fn for_label(label: DistressLabel) -> Self {
        match label {
            DistressLabel::FinancialDistress => Self {
                points: [
                    "Consider the higher level of risk before adding exposure to this issuer.",
                    "Carry out further analysis of restructuring plans, support from majority \
                     shareholders and the industry outlook.",
                    "Diversify the portfolio to avoid concentration in companies with a \
                     similar risk profile.",
                ],
            },
            DistressLabel::NonFinancialDistress => Self {
                points: [
                    "The company currently looks relatively healthy in terms of liquidity and \
                     profitability, but should still be monitored periodically.",
                    "Also review non-financial factors such as governance, management quality \
                     and long-term strategy.",
                    "Use this prediction as one component of a more thorough fundamental \
                     analysis.",
                ],
            },
        }
    }
}

/// Everything the prediction page prints below the probability and label.
#[derive(Debug, Clone, Serialize)]
pub struct Interpretation {
    pub flags: Vec<RatioFlag>,
    /// Healthy summary when `flags` is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<&'static str>,
    pub most_influential: Vec<&'static str>,
    pub recommendation: Recommendation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub influential_note: Option<String>,
    pub investor_note: InvestorNote,
}

/// Build the rule-based commentary for a prediction.
///
/// Templates depend only on the label; ratio values reach the text solely
/// through the flag list.
pub fn interpret(prediction: &PredictionResult, ratios: &RatioSet) -> Interpretation {
    let flags = flag_ratios(ratios);
    let influential = most_influential(&flags);
    let summary = flags.is_empty().then_some(HEALTHY_SUMMARY);

    Interpretation {
        summary,
        influential_note: influential_sentence(&influential),
        most_influential: influential,
        recommendation: Recommendation::for_label(prediction.label),
        investor_note: InvestorNote::for_label(prediction.label),
        flags,
    }
}

fn influential_sentence(names: &[&str]) -> Option<String> {
    if names.is_empty() {
        return None;
    }
    Some(format!(
        "The ratios with the most influence on the current risk assessment \
         (based on deviation from the healthy range) are: {}.",
        names.join(", ")
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
