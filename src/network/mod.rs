pub mod layer;
pub mod network;
pub mod neuron;

pub use layer::Layer;
pub use network::Network;
pub use neuron::Neuron;
