pub mod info;
pub mod pages;

pub use info::{model_card, usage_guide, GuideSection, ModelCard, ValidationMetrics};
pub use pages::{calculate_page, prediction_page, PredictionReport};
