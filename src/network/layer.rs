use serde::{Deserialize, Serialize};

use crate::network::neuron::Neuron;

/// An ordered group of neurons plus one bias neuron.
///
/// The bias neuron is always allocated but only carries weights when the
/// owning network enables bias neurons; it is never counted in
/// `neuron_count()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub neurons: Vec<Neuron>,
    pub bias_neuron: Neuron,
}

impl Layer {
    pub fn new(neuron_count: usize) -> Layer {
        Layer {
            neurons: vec![Neuron::default(); neuron_count],
            bias_neuron: Neuron::default(),
        }
    }

    pub fn neuron_count(&self) -> usize {
        self.neurons.len()
    }
}
