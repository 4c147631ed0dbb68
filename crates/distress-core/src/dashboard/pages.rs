use serde::Serialize;
use std::time::Instant;

use crate::classifier::{predict, DistressModel, PredictionResult, DISTRESS_THRESHOLD};
use crate::interpretation::{interpret, Interpretation};
use crate::locale;
use crate::ratios::{calculate_ratio_report, RatioForm, RatioReport, RatioSet, RawFinancials};
use crate::session::SessionContext;
use crate::types::*;

#[derive(Debug, Clone, Serialize)]
pub struct PredictionReport {
    pub inputs: RatioSet,
    pub prediction: PredictionResult,
    /// Four-decimal display value
    pub probability_display: String,
    pub interpretation: Interpretation,
}

/// Ratio calculator page: parse the form, compute ratios and keep them as
/// the prediction page's defaults.
pub fn calculate_page(
    form: &RatioForm,
    session: &mut SessionContext,
) -> ComputationOutput<RatioReport> {
    let raw = RawFinancials::from_form(form);
    let report = calculate_ratio_report(&raw);
    session.remember(report.result.ratios);
    report
}

/// Prediction page: one forward pass plus the rule-based commentary.
pub fn prediction_page<M: DistressModel + ?Sized>(
    model: &M,
    ratios: &RatioSet,
) -> ComputationOutput<PredictionReport> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if *ratios == RatioSet::default() {
        warnings.push(
            "All ratios are zero; compute them with the ratio calculator or enter values."
                .into(),
        );
    }

    let prediction = predict(model, ratios);
    let interpretation = interpret(&prediction, ratios);

    let report = PredictionReport {
        inputs: *ratios,
        probability_display: locale::format_probability(prediction.probability),
        prediction,
        interpretation,
    };

    let methodology = format!(
        "ANN ({}) distress probability, label threshold {} inclusive; \
         static benchmark flags",
        model.kind(),
        DISTRESS_THRESHOLD
    );
    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        &methodology,
        ratios,
        warnings,
        elapsed,
        report,
    )
}
