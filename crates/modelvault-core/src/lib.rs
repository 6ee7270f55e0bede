//! modelvault-core: Core types for the model artifact loader
//!
//! This crate provides the fundamental types used throughout modelvault:
//! - Asset registry and ticker resolution
//! - Model metadata parsing and validation
//! - Configuration types
//! - Error handling

pub mod config;
pub mod error;
pub mod metadata;
pub mod registry;

pub use config::*;
pub use error::*;
pub use metadata::*;
pub use registry::*;
