use std::f64::consts::E;

/// Activation applied to a neuron's weighted input sum.
///
/// Every variant's `derivative()` follows one convention: it receives the
/// neuron's *already activated* value, not the pre-activation sum. This is
/// what lets the trainer reuse stored neuron values during backpropagation
/// instead of recomputing sums. A `Custom` pair must follow the same
/// convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activation {
    /// `1 / (1 + e^-x)`, output in (0, 1).
    Sigmoid,
    /// `(e^2x - 1) / (e^2x + 1)`, output in (-1, 1).
    Tanh,
    /// Caller-supplied pair; `derivative` is evaluated at the activated value.
    Custom {
        function: fn(f64) -> f64,
        derivative: fn(f64) -> f64,
    },
}

impl Activation {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            Activation::Tanh => (E.powf(2.0 * x) - 1.0) / (E.powf(2.0 * x) + 1.0),
            Activation::Custom { function, .. } => function(x),
        }
    }

    /// Derivative evaluated at the activated output `y`.
    pub fn derivative(&self, y: f64) -> f64 {
        match self {
            Activation::Sigmoid => y * (1.0 - y),
            Activation::Tanh => (1.0 + y) * (1.0 - y),
            Activation::Custom { derivative, .. } => derivative(y),
        }
    }
}
