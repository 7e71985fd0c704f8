//! isulimg shared code
//!
//! Error types and constants used by the marshalling layer, the CLI
//! and the test utilities.

pub mod constants;
pub mod errors;

pub use errors::{IsulimgError, IsulimgResult};
