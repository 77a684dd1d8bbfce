pub mod activation;
pub mod error;
pub mod network;
pub mod persist;
pub mod train;

// Convenience re-exports
pub use activation::activation::Activation;
pub use error::NetworkError;
pub use network::layer::Layer;
pub use network::network::Network;
pub use network::neuron::Neuron;
pub use train::trainer::Trainer;
