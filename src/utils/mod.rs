//! Utility modules shared by the algebra, the frontend and the binary.
//!
//! This module contains:
//! - Error types
//! - Source location tracking
//! - Pretty printing

pub mod errors;
pub mod location;
pub mod pretty;

// Re-exports
pub use errors::*;
pub use location::{SourceLocation, Span};
pub use pretty::{classification_report, PrettyPrint};
