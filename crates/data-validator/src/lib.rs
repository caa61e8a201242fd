//! Data Validation and Normalization
//!
//! Turns an untrusted JSON request body into a complete [`RawSample`]:
//! case-insensitive field normalization, presence checks and numeric conversion.
//!
//! [`RawSample`]: feature_engine::RawSample

mod error;
mod normalizer;
mod validator;

pub use error::ValidationError;
pub use normalizer::NormalizedInput;
pub use validator::{ValidationConfig, Validator};
