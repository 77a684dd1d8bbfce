use std::fmt;
use std::io;

/// All errors the engine can produce.
#[derive(Debug)]
pub enum NetworkError {
    /// `evaluate` was called with an input vector of the wrong length.
    InputShape { expected: usize, actual: usize },
    /// `train` was called with a target vector of the wrong length.
    OutputShape { expected: usize, actual: usize },
    /// A persisted network could not be parsed or is structurally inconsistent.
    CorruptState(String),
    /// An underlying I/O error while saving or loading.
    Io(io::Error),
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputShape { expected, actual } => {
                write!(f, "input length {actual} does not match the input layer size {expected}")
            }
            Self::OutputShape { expected, actual } => {
                write!(f, "target length {actual} does not match the output layer size {expected}")
            }
            Self::CorruptState(msg) => write!(f, "corrupt network state: {msg}"),
            Self::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl std::error::Error for NetworkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for NetworkError {
    fn from(e: io::Error) -> Self {
        NetworkError::Io(e)
    }
}
