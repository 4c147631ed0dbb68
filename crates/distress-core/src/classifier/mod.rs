pub mod loader;
pub mod network;
pub mod predict;

pub use loader::{load_model, parse_model, shared_model, LoadedModel};
pub use network::{DistressModel, DistressNet, SequentialNet, HIDDEN_UNITS, INPUT_FEATURES};
pub use predict::{
    classify, feature_vector, predict, DistressLabel, PredictionResult, DISTRESS_THRESHOLD,
};
