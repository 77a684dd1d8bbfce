pub mod json;

pub use json::{from_json, load, save, to_json};
