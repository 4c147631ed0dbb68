//! Model artifact loading.
//!
//! An artifact is a JSON file in one of two shapes:
//!
//! 1. a parameter dictionary keyed like a PyTorch `nn.Sequential` state dict
//!    (`0.weight`, `0.bias`, `2.weight`, `2.bias`) for the fixed 6-12-1
//!    architecture;
//! 2. a complete model object, `{"layers": [{"kind": "linear", ...}, ...]}`.
//!
//! The parameter dictionary is tried first. The outcome is a tagged
//! [`LoadedModel`] so callers can tell which shape was found.

use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::network::{Dense, DistressModel, DistressNet, Layer, SequentialNet, INPUT_FEATURES};
use crate::{DistressError, DistressResult};

// ---------------------------------------------------------------------------
// Artifact shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ParameterDict {
    #[serde(rename = "0.weight")]
    hidden_weight: Vec<Vec<f64>>,
    #[serde(rename = "0.bias")]
    hidden_bias: Vec<f64>,
    #[serde(rename = "2.weight")]
    output_weight: Vec<Vec<f64>>,
    #[serde(rename = "2.bias")]
    output_bias: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct FullModelObject {
    layers: Vec<LayerSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum LayerSpec {
    Linear {
        weight: Vec<Vec<f64>>,
        bias: Vec<f64>,
    },
    Relu,
    Tanh,
    Sigmoid,
    Dropout {
        #[serde(default)]
        #[allow(dead_code)]
        p: f64,
    },
}

/// A model produced by either loading strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedModel {
    /// Parameter dictionary poured into the fixed architecture.
    Parameters(DistressNet),
    /// Complete model object deserialized as-is.
    Sequential(SequentialNet),
}

impl DistressModel for LoadedModel {
    fn forward(&self, features: &[f64; INPUT_FEATURES]) -> f64 {
        match self {
            Self::Parameters(net) => net.forward(features),
            Self::Sequential(net) => net.forward(features),
        }
    }

    fn kind(&self) -> String {
        match self {
            Self::Parameters(net) => format!("parameter dictionary, {}", net.kind()),
            Self::Sequential(net) => format!("full model object, {}", net.kind()),
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Read and decode a model artifact from disk.
pub fn load_model(path: impl AsRef<Path>) -> DistressResult<LoadedModel> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| DistressError::ModelArtifact {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let model = parse_model(&contents, &path.display().to_string())?;
    tracing::info!(path = %path.display(), kind = %model.kind(), "model loaded");
    Ok(model)
}

/// Decode artifact contents, trying the parameter dictionary before the
/// complete model object. `source` only labels errors.
pub fn parse_model(contents: &str, source: &str) -> DistressResult<LoadedModel> {
    let primary = match parse_parameter_dict(contents) {
        Ok(net) => return Ok(LoadedModel::Parameters(net)),
        Err(e) => e,
    };
    tracing::warn!(
        source,
        error = %primary,
        "artifact is not a parameter dictionary, trying full model object"
    );

    match parse_full_model(contents) {
        Ok(net) => Ok(LoadedModel::Sequential(net)),
        Err(fallback) => Err(DistressError::ModelLoad {
            path: source.to_string(),
            parameters: primary.to_string(),
            full_model: fallback.to_string(),
        }),
    }
}

static SHARED_MODEL: OnceCell<(PathBuf, LoadedModel)> = OnceCell::new();

/// Process-wide model, loaded on first use and read-only afterwards.
///
/// Only the first successful call loads anything; later calls return the
/// same model even when given another path.
pub fn shared_model(path: impl AsRef<Path>) -> DistressResult<&'static LoadedModel> {
    let path = path.as_ref();
    let (loaded_from, model) =
        SHARED_MODEL.get_or_try_init(|| load_model(path).map(|m| (path.to_path_buf(), m)))?;
    if loaded_from.as_path() != path {
        tracing::warn!(
            requested = %path.display(),
            loaded = %loaded_from.display(),
            "model already loaded from another path; reusing it"
        );
    }
    Ok(model)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn parse_parameter_dict(contents: &str) -> DistressResult<DistressNet> {
    let dict: ParameterDict = serde_json::from_str(contents)?;
    let hidden = Dense::new("0.weight", dict.hidden_weight, dict.hidden_bias)?;
    let output = Dense::new("2.weight", dict.output_weight, dict.output_bias)?;
    DistressNet::new(hidden, output)
}

fn parse_full_model(contents: &str) -> DistressResult<SequentialNet> {
    let object: FullModelObject = serde_json::from_str(contents)?;
    let layers = object
        .layers
        .into_iter()
        .enumerate()
        .map(|(i, spec)| match spec {
            LayerSpec::Linear { weight, bias } => {
                Dense::new(&format!("layers[{}]", i), weight, bias).map(Layer::Linear)
            }
            LayerSpec::Relu => Ok(Layer::Relu),
            LayerSpec::Tanh => Ok(Layer::Tanh),
            LayerSpec::Sigmoid => Ok(Layer::Sigmoid),
            LayerSpec::Dropout { .. } => Ok(Layer::Dropout),
        })
        .collect::<DistressResult<Vec<Layer>>>()?;
    SequentialNet::new(layers)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
