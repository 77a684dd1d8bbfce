use log::debug;
use rand::prelude::*;
use rand_chacha::ChaCha12Rng;

use crate::activation::activation::Activation;
use crate::error::NetworkError;
use crate::network::layer::Layer;

/// A feedforward network: an ordered sequence of layers, an activation pair,
/// and a flag controlling whether bias neurons contribute to sums.
///
/// Layers and neurons are allocated exactly once, at construction or load,
/// and mutated in place by every `evaluate`/train call. A `Network` is
/// mutable shared state: it must not be used from more than one thread of
/// control at a time.
#[derive(Debug)]
pub struct Network {
    pub layers: Vec<Layer>,
    pub use_bias_neurons: bool,
    activation: Activation,
}

impl Network {
    /// Builds a zero-initialized network from per-layer neuron counts.
    ///
    /// # Panics
    /// Panics if fewer than two layer counts are given.
    pub fn new(activation: Activation, use_bias_neurons: bool, neuron_counts: &[usize]) -> Network {
        assert!(
            neuron_counts.len() >= 2,
            "a network needs at least an input and an output layer"
        );
        let layers = neuron_counts.iter().map(|&count| Layer::new(count)).collect();
        let mut network = Network {
            layers,
            use_bias_neurons,
            activation,
        };
        network.init_weights();
        network
    }

    /// Reassembles a network from already-validated state. Used by the
    /// persistence adapter; the activation pair is never persisted and must
    /// be supplied again.
    pub(crate) fn from_parts(
        activation: Activation,
        use_bias_neurons: bool,
        layers: Vec<Layer>,
    ) -> Network {
        Network {
            layers,
            use_bias_neurons,
            activation,
        }
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Zero initializer: sizes every weight vector for the next layer and
    /// sets all weights and previous weight deltas to 0.0. Called by `new`.
    pub fn init_weights(&mut self) {
        for layer_index in 0..self.layers.len() - 1 {
            let next_count = self.layers[layer_index + 1].neuron_count();
            let layer = &mut self.layers[layer_index];
            for neuron in &mut layer.neurons {
                neuron.weights = vec![0.0; next_count];
                neuron.previous_weight_deltas = vec![0.0; next_count];
            }
            if self.use_bias_neurons {
                layer.bias_neuron.weights = vec![0.0; next_count];
                layer.bias_neuron.previous_weight_deltas = vec![0.0; next_count];
            }
        }
    }

    /// Seeded uniform initializer: every weight is drawn from
    /// `[-border, border)` and previous weight deltas are zeroed. The same
    /// seed always yields the same weights. Bias weights are never
    /// randomized; they start at zero.
    pub fn randomize_weights(&mut self, seed: u64, border: f64) {
        let mut rng = ChaCha12Rng::seed_from_u64(seed);
        for layer_index in 0..self.layers.len() - 1 {
            let next_count = self.layers[layer_index + 1].neuron_count();
            let layer = &mut self.layers[layer_index];
            for neuron in &mut layer.neurons {
                neuron.weights = (0..next_count)
                    .map(|_| rng.gen::<f64>() * 2.0 * border - border)
                    .collect();
                neuron.previous_weight_deltas = vec![0.0; next_count];
            }
            if self.use_bias_neurons {
                layer.bias_neuron.weights = vec![0.0; next_count];
                layer.bias_neuron.previous_weight_deltas = vec![0.0; next_count];
            }
        }
        debug!("randomized weights: seed={seed} border={border}");
    }

    /// Forward pass: copies `input` into the first layer (no activation
    /// applied to inputs), feeds each consecutive layer pair, and returns the
    /// final layer's values in neuron order.
    ///
    /// Overwrites every neuron's `value`; the shape check happens before any
    /// mutation.
    pub fn evaluate(&mut self, input: &[f64]) -> Result<Vec<f64>, NetworkError> {
        let input_count = self.layers[0].neuron_count();
        if input.len() != input_count {
            return Err(NetworkError::InputShape {
                expected: input_count,
                actual: input.len(),
            });
        }

        for (neuron, &value) in self.layers[0].neurons.iter_mut().zip(input) {
            neuron.value = value;
        }
        for i in 0..self.layers.len() - 1 {
            let (upstream, downstream) = self.layers.split_at_mut(i + 1);
            feed_pair(&upstream[i], &mut downstream[0], self.activation, self.use_bias_neurons);
        }

        let output_layer = &self.layers[self.layers.len() - 1];
        Ok(output_layer.neurons.iter().map(|n| n.value).collect())
    }
}

/// Computes one downstream layer from its upstream layer: each downstream
/// neuron's value is the activation of the bias weight (when enabled) plus
/// the weighted sum of upstream values.
fn feed_pair(upstream: &Layer, downstream: &mut Layer, activation: Activation, use_bias: bool) {
    for (out_index, out_neuron) in downstream.neurons.iter_mut().enumerate() {
        let mut sum = if use_bias {
            upstream.bias_neuron.weights[out_index]
        } else {
            0.0
        };
        for in_neuron in &upstream.neurons {
            sum += in_neuron.weights[out_index] * in_neuron.value;
        }
        out_neuron.value = activation.function(sum);
    }
}
