use crate::activation::activation::Activation;
use crate::error::NetworkError;
use crate::network::layer::Layer;
use crate::network::network::Network;

/// Online backpropagation with momentum.
///
/// The trainer carries only its hyperparameters; every operation takes a
/// temporary exclusive borrow of the network being trained, so all
/// per-sample state lives in the network's own neurons (error, delta,
/// previous weight deltas).
pub struct Trainer {
    pub learning_rate: f64,
    pub momentum: f64,
}

impl Trainer {
    pub fn new(learning_rate: f64, momentum: f64) -> Trainer {
        Trainer {
            learning_rate,
            momentum,
        }
    }

    /// One backward pass against `targets`, reusing the neuron values left
    /// by the most recent `evaluate` call.
    ///
    /// On a freshly constructed network all values default to 0.0, so a
    /// `train` call before any `evaluate` is still deterministic; it is not
    /// rejected.
    ///
    /// The shape check happens before any mutation. On success: output
    /// errors and deltas are computed, deltas are propagated back to (but
    /// not into) the input layer, then every weight receives
    /// `learning_rate * grad + momentum * previous_delta`. Neuron values are
    /// left untouched.
    pub fn train(&self, network: &mut Network, targets: &[f64]) -> Result<(), NetworkError> {
        let activation = network.activation();
        let use_bias = network.use_bias_neurons;
        let layers = &mut network.layers;
        let last = layers.len() - 1;

        let output_count = layers[last].neuron_count();
        if targets.len() != output_count {
            return Err(NetworkError::OutputShape {
                expected: output_count,
                actual: targets.len(),
            });
        }

        // Output layer: error against the target, then the local gradient.
        for (neuron, &target) in layers[last].neurons.iter_mut().zip(targets) {
            neuron.error = target - neuron.value;
            neuron.delta = neuron.error * activation.derivative(neuron.value);
        }

        // Walk the pairs backward to fill in every upstream delta.
        for i in (1..=last).rev() {
            let (upstream, downstream) = layers.split_at_mut(i);
            propagate_deltas(&mut upstream[i - 1], &downstream[0], activation, use_bias);
        }

        // Then forward again to apply the momentum-smoothed updates.
        for i in 0..last {
            let (upstream, downstream) = layers.split_at_mut(i + 1);
            adjust_weights(
                &mut upstream[i],
                &downstream[0],
                self.learning_rate,
                self.momentum,
                use_bias,
            );
        }

        Ok(())
    }

    /// Mean of the squared output-layer errors left by the most recent
    /// `train` call. Stale (or zero) before the first training step.
    pub fn mean_squared_error(&self, network: &Network) -> f64 {
        let output_layer = &network.layers[network.layers.len() - 1];
        let sum: f64 = output_layer.neurons.iter().map(|n| n.error * n.error).sum();
        sum / output_layer.neuron_count() as f64
    }
}

/// Backpropagates deltas one layer pair: each upstream neuron's delta is its
/// activation derivative times the delta-weighted sum over downstream
/// neurons.
fn propagate_deltas(upstream: &mut Layer, downstream: &Layer, activation: Activation, use_bias: bool) {
    for neuron in &mut upstream.neurons {
        let mut sum = 0.0;
        for (k, out_neuron) in downstream.neurons.iter().enumerate() {
            sum += neuron.weights[k] * out_neuron.delta;
        }
        neuron.delta = activation.derivative(neuron.value) * sum;
    }
    if use_bias {
        let bias = &mut upstream.bias_neuron;
        let mut sum = 0.0;
        for (k, out_neuron) in downstream.neurons.iter().enumerate() {
            sum += bias.weights[k] * out_neuron.delta;
        }
        // The bias value term is derivative(1.0) by convention, not an
        // actual activation. Changing it would change trained outcomes.
        bias.delta = activation.derivative(1.0) * sum;
    }
}

/// Applies the momentum update to every weight between one layer pair.
fn adjust_weights(
    upstream: &mut Layer,
    downstream: &Layer,
    learning_rate: f64,
    momentum: f64,
    use_bias: bool,
) {
    for neuron in &mut upstream.neurons {
        for (k, out_neuron) in downstream.neurons.iter().enumerate() {
            let grad = neuron.value * out_neuron.delta;
            let delta_w = learning_rate * grad + momentum * neuron.previous_weight_deltas[k];
            neuron.previous_weight_deltas[k] = delta_w;
            neuron.weights[k] += delta_w;
        }
    }
    if use_bias {
        let bias = &mut upstream.bias_neuron;
        for (k, out_neuron) in downstream.neurons.iter().enumerate() {
            // The bias neuron's value is implicitly 1, so grad is the bare delta.
            let grad = out_neuron.delta;
            let delta_w = learning_rate * grad + momentum * bias.previous_weight_deltas[k];
            bias.previous_weight_deltas[k] = delta_w;
            bias.weights[k] += delta_w;
        }
    }
}
