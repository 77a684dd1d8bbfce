use serde::{Deserialize, Serialize};

/// A single neuron: its activation state plus the weights of every connection
/// to the next layer.
///
/// `weights[k]` connects this neuron to neuron `k` of the next layer;
/// `previous_weight_deltas[k]` remembers the last update applied to that
/// weight so the trainer can add a momentum term. Both vectors are empty for
/// final-layer neurons. `error` and `delta` are training-time scratch values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Neuron {
    pub value: f64,
    pub error: f64,
    pub delta: f64,
    pub weights: Vec<f64>,
    pub previous_weight_deltas: Vec<f64>,
}
