//! # GraphQL Schema Module
//!
//! GraphQL type system for the fleet API.

pub mod enums;
pub mod inputs;
pub mod objects;

// Re-export all types
pub use enums::*;
pub use inputs::*;
pub use objects::*;
