//! JSON persistence for network state.
//!
//! The blob holds exactly the bias flag and every layer's full neuron
//! records. Activation functions are never persisted; the loader requires
//! them to be supplied again by the caller. Loading re-validates the
//! topology, so a failed load never hands back a partially built network.

use std::fs::File;
use std::io::{BufReader, BufWriter};

use log::info;
use serde::{Deserialize, Serialize};

use crate::activation::activation::Activation;
use crate::error::NetworkError;
use crate::network::layer::Layer;
use crate::network::network::Network;

#[derive(Serialize)]
struct NetworkStateRef<'a> {
    use_bias_neurons: bool,
    layers: &'a [Layer],
}

#[derive(Deserialize)]
struct NetworkState {
    use_bias_neurons: bool,
    layers: Vec<Layer>,
}

/// Serializes the network's persistent state to a JSON string.
pub fn to_json(network: &Network) -> Result<String, NetworkError> {
    let state = NetworkStateRef {
        use_bias_neurons: network.use_bias_neurons,
        layers: &network.layers,
    };
    serde_json::to_string(&state)
        .map_err(|e| NetworkError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))
}

/// Rebuilds a network from a JSON string previously produced by `to_json`.
pub fn from_json(json: &str, activation: Activation) -> Result<Network, NetworkError> {
    let state: NetworkState =
        serde_json::from_str(json).map_err(|e| NetworkError::CorruptState(e.to_string()))?;
    validate(&state)?;
    Ok(Network::from_parts(activation, state.use_bias_neurons, state.layers))
}

/// Writes the network's persistent state to a pretty-printed JSON file.
pub fn save(network: &Network, path: &str) -> Result<(), NetworkError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let state = NetworkStateRef {
        use_bias_neurons: network.use_bias_neurons,
        layers: &network.layers,
    };
    serde_json::to_writer_pretty(writer, &state)
        .map_err(|e| NetworkError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
    info!("saved network to {path}");
    Ok(())
}

/// Reads a network back from a JSON file previously written by `save`.
pub fn load(path: &str, activation: Activation) -> Result<Network, NetworkError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let state: NetworkState =
        serde_json::from_reader(reader).map_err(|e| NetworkError::CorruptState(e.to_string()))?;
    validate(&state)?;
    info!("loaded network from {path}: {} layers", state.layers.len());
    Ok(Network::from_parts(activation, state.use_bias_neurons, state.layers))
}

/// Structural consistency: every weight vector (bias included when enabled)
/// must match the next layer's neuron count.
fn validate(state: &NetworkState) -> Result<(), NetworkError> {
    if state.layers.len() < 2 {
        return Err(NetworkError::CorruptState(format!(
            "expected at least 2 layers, found {}",
            state.layers.len()
        )));
    }
    for i in 0..state.layers.len() - 1 {
        let next_count = state.layers[i + 1].neuron_count();
        for (j, neuron) in state.layers[i].neurons.iter().enumerate() {
            if neuron.weights.len() != next_count
                || neuron.previous_weight_deltas.len() != next_count
            {
                return Err(NetworkError::CorruptState(format!(
                    "layer {i} neuron {j} carries {} weights but layer {} has {next_count} neurons",
                    neuron.weights.len(),
                    i + 1
                )));
            }
        }
        if state.use_bias_neurons {
            let bias = &state.layers[i].bias_neuron;
            if bias.weights.len() != next_count
                || bias.previous_weight_deltas.len() != next_count
            {
                return Err(NetworkError::CorruptState(format!(
                    "layer {i} bias neuron carries {} weights but layer {} has {next_count} neurons",
                    bias.weights.len(),
                    i + 1
                )));
            }
        }
    }
    Ok(())
}
