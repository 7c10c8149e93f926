pub mod config;
pub mod normalizer;
pub mod validation;

pub use config::*;
pub use normalizer::{normalize, normalize_all};
pub use validation::validate_conversion;
