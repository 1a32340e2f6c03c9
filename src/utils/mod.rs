//! Helper functions shared across layers.
//!
//! - [`code_generator`] - Random short code generation
//! - [`url_normalizer`] - Long URL normalization

pub mod code_generator;
pub mod url_normalizer;
