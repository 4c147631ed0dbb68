//! Feed-forward networks evaluated with plain `f64` arithmetic.
//!
//! Weights follow the PyTorch `nn.Linear` layout: `weight[out][in]`.


use crate::{DistressError, DistressResult};

/// Number of ratios fed to the classifier.
pub const INPUT_FEATURES: usize = 6;

/// Width of the single hidden layer of the reference architecture.
pub const HIDDEN_UNITS: usize = 12;

/// A loaded classifier. Evaluation never mutates the model.
pub trait DistressModel: Send + Sync {
    /// One forward pass returning a probability in [0, 1].
    fn forward(&self, features: &[f64; INPUT_FEATURES]) -> f64;

    /// Short description of the network shape.
    fn kind(&self) -> String;
}

// ---------------------------------------------------------------------------
// Dense layer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Dense {
    weight: Vec<Vec<f64>>,
    bias: Vec<f64>,
}

impl Dense {
    /// Build a layer, checking the weight matrix is rectangular, matches the
    /// bias length and holds only finite values.
    pub fn new(name: &str, weight: Vec<Vec<f64>>, bias: Vec<f64>) -> DistressResult<Self> {
        let rows = weight.len();
        if rows == 0 {
            return Err(shape_error(name, "weight matrix has no rows".into()));
        }
        let cols = weight[0].len();
        if cols == 0 {
            return Err(shape_error(name, "weight matrix has no columns".into()));
        }
        if let Some((i, row)) = weight.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(shape_error(
                name,
                format!("row {} has {} columns, expected {}", i, row.len(), cols),
            ));
        }
        if bias.len() != rows {
            return Err(shape_error(
                name,
                format!("bias has {} entries, weight has {} rows", bias.len(), rows),
            ));
        }
        let all_finite = weight.iter().flatten().chain(bias.iter()).all(|v| v.is_finite());
        if !all_finite {
            return Err(shape_error(name, "parameters contain NaN or infinity".into()));
        }
        Ok(Self { weight, bias })
    }

    pub fn in_features(&self) -> usize {
        self.weight[0].len()
    }

    pub fn out_features(&self) -> usize {
        self.weight.len()
    }

    /// `y = W x + b`. `input` must have `in_features` entries.
    fn apply(&self, input: &[f64]) -> Vec<f64> {
        self.weight
            .iter()
            .zip(&self.bias)
            .map(|(row, b)| row.iter().zip(input).map(|(w, x)| w * x).sum::<f64>() + b)
            .collect()
    }
}

fn shape_error(name: &str, reason: String) -> DistressError {
    DistressError::InvalidInput {
        field: name.to_string(),
        reason,
    }
}

pub fn relu(x: f64) -> f64 {
    x.max(0.0)
}

pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

// ---------------------------------------------------------------------------
// Fixed 6 -> 12 (ReLU) -> 1 (Sigmoid) network
// ---------------------------------------------------------------------------

/// The reference architecture populated from a parameter dictionary.
#[derive(Debug, Clone, PartialEq)]
pub struct DistressNet {
    hidden: Dense,
    output: Dense,
}

impl DistressNet {
    pub fn new(hidden: Dense, output: Dense) -> DistressResult<Self> {
        if hidden.in_features() != INPUT_FEATURES || hidden.out_features() != HIDDEN_UNITS {
            return Err(shape_error(
                "0.weight",
                format!(
                    "expected [{}, {}], got [{}, {}]",
                    HIDDEN_UNITS,
                    INPUT_FEATURES,
                    hidden.out_features(),
                    hidden.in_features()
                ),
            ));
        }
        if output.in_features() != HIDDEN_UNITS || output.out_features() != 1 {
            return Err(shape_error(
                "2.weight",
                format!(
                    "expected [1, {}], got [{}, {}]",
                    HIDDEN_UNITS,
                    output.out_features(),
                    output.in_features()
                ),
            ));
        }
        Ok(Self { hidden, output })
    }
}

impl DistressModel for DistressNet {
    fn forward(&self, features: &[f64; INPUT_FEATURES]) -> f64 {
        let hidden: Vec<f64> = self.hidden.apply(features).into_iter().map(relu).collect();
        sigmoid(self.output.apply(&hidden)[0])
    }

    fn kind(&self) -> String {
        format!("{}-{}-1 (ReLU, Sigmoid)", INPUT_FEATURES, HIDDEN_UNITS)
    }
}

// ---------------------------------------------------------------------------
// Arbitrary sequential network
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Linear(Dense),
    Relu,
    Tanh,
    Sigmoid,
    /// Identity at inference time
    Dropout,
}

/// A complete model object: any layer stack mapping 6 ratios to one
/// sigmoid-bounded output.
#[derive(Debug, Clone, PartialEq)]
pub struct SequentialNet {
    layers: Vec<Layer>,
}

impl SequentialNet {
    pub fn new(layers: Vec<Layer>) -> DistressResult<Self> {
        let mut width: Option<usize> = None;
        for (i, layer) in layers.iter().enumerate() {
            if let Layer::Linear(dense) = layer {
                let expected = width.unwrap_or(INPUT_FEATURES);
                if dense.in_features() != expected {
                    return Err(shape_error(
                        &format!("layers[{}]", i),
                        format!(
                            "linear layer takes {} inputs, previous width is {}",
                            dense.in_features(),
                            expected
                        ),
                    ));
                }
                width = Some(dense.out_features());
            }
        }

        match width {
            None => return Err(shape_error("layers", "no linear layer found".into())),
            Some(1) => {}
            Some(w) => {
                return Err(shape_error(
                    "layers",
                    format!("network produces {} outputs, expected 1", w),
                ))
            }
        }

        let last_active = layers.iter().rev().find(|l| !matches!(l, Layer::Dropout));
        if !matches!(last_active, Some(Layer::Sigmoid)) {
            return Err(shape_error(
                "layers",
                "final activation must be sigmoid".into(),
            ));
        }

        Ok(Self { layers })
    }
}

impl DistressModel for SequentialNet {
    fn forward(&self, features: &[f64; INPUT_FEATURES]) -> f64 {
        let mut activations: Vec<f64> = features.to_vec();
        for layer in &self.layers {
            activations = match layer {
                Layer::Linear(dense) => dense.apply(&activations),
                Layer::Relu => activations.into_iter().map(relu).collect(),
                Layer::Tanh => activations.into_iter().map(f64::tanh).collect(),
                Layer::Sigmoid => activations.into_iter().map(sigmoid).collect(),
                Layer::Dropout => activations,
            };
        }
        activations[0]
    }

    fn kind(&self) -> String {
        let widths: Vec<String> = std::iter::once(INPUT_FEATURES)
            .chain(self.layers.iter().filter_map(|l| match l {
                Layer::Linear(d) => Some(d.out_features()),
                _ => None,
            }))
            .map(|w| w.to_string())
            .collect();
        format!("sequential {} ({} layers)", widths.join("-"), self.layers.len())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_dense(name: &str, rows: usize, cols: usize) -> Dense {
        Dense::new(name, vec![vec![0.0; cols]; rows], vec![0.0; rows]).unwrap()
    }

    #[test]
    fn test_dense_rejects_ragged_matrix() {
        let err = Dense::new("w", vec![vec![1.0, 2.0], vec![3.0]], vec![0.0, 0.0]);
        assert!(err.is_err());
    }

    #[test]
    fn test_dense_rejects_bias_mismatch() {
        let err = Dense::new("w", vec![vec![1.0, 2.0]], vec![0.0, 0.0]);
        assert!(err.is_err());
    }

    #[test]
    fn test_dense_rejects_nan() {
        let err = Dense::new("w", vec![vec![f64::NAN]], vec![0.0]);
        assert!(err.is_err());
    }

    #[test]
    fn test_dense_apply() {
        let d = Dense::new("w", vec![vec![1.0, 2.0], vec![-1.0, 0.5]], vec![0.5, 0.0]).unwrap();
        assert_eq!(d.apply(&[1.0, 1.0]), vec![3.5, -0.5]);
    }

    #[test]
    fn test_zero_network_outputs_half() {
        let net = DistressNet::new(
            zero_dense("0.weight", HIDDEN_UNITS, INPUT_FEATURES),
            zero_dense("2.weight", 1, HIDDEN_UNITS),
        )
        .unwrap();
        assert_eq!(net.forward(&[1.0; INPUT_FEATURES]), 0.5);
    }

    #[test]
    fn test_distress_net_rejects_wrong_hidden_width() {
        let result = DistressNet::new(
            zero_dense("0.weight", 8, INPUT_FEATURES),
            zero_dense("2.weight", 1, 8),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_relu_blocks_negative_hidden_units() {
        // hidden unit 0 = -x0, output = 10 * h0 - 5
        let mut hw = vec![vec![0.0; INPUT_FEATURES]; HIDDEN_UNITS];
        hw[0][0] = -1.0;
        let hidden = Dense::new("0.weight", hw, vec![0.0; HIDDEN_UNITS]).unwrap();
        let mut ow = vec![vec![0.0; HIDDEN_UNITS]];
        ow[0][0] = 10.0;
        let output = Dense::new("2.weight", ow, vec![-5.0]).unwrap();
        let net = DistressNet::new(hidden, output).unwrap();

        // positive input is clipped by ReLU, leaving sigmoid(-5)
        let p = net.forward(&[2.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert!((p - sigmoid(-5.0)).abs() < 1e-12);

        // negative input passes: sigmoid(10 * 2 - 5)
        let p = net.forward(&[-2.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert!((p - sigmoid(15.0)).abs() < 1e-12);
    }

    #[test]
    fn test_sigmoid_saturates_without_nan() {
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert_eq!(sigmoid(1000.0), 1.0);
    }

    #[test]
    fn test_sequential_requires_sigmoid_tail() {
        let layers = vec![Layer::Linear(zero_dense("l0", 1, INPUT_FEATURES)), Layer::Relu];
        assert!(SequentialNet::new(layers).is_err());
    }

    #[test]
    fn test_sequential_requires_chained_widths() {
        let layers = vec![
            Layer::Linear(zero_dense("l0", 4, INPUT_FEATURES)),
            Layer::Relu,
            Layer::Linear(zero_dense("l2", 1, 5)),
            Layer::Sigmoid,
        ];
        assert!(SequentialNet::new(layers).is_err());
    }

    #[test]
    fn test_sequential_trailing_dropout_allowed() {
        let layers = vec![
            Layer::Linear(zero_dense("l0", 1, INPUT_FEATURES)),
            Layer::Sigmoid,
            Layer::Dropout,
        ];
        let net = SequentialNet::new(layers).unwrap();
        assert_eq!(net.forward(&[0.0; INPUT_FEATURES]), 0.5);
        assert_eq!(net.kind(), "sequential 6-1 (3 layers)");
    }
}
