//! # studium-core
//!
//! Core types, traits, and abstractions for the studium study-assistant
//! backend.
//!
//! This crate provides the foundational data structures and trait
//! definitions that other studium crates depend on: the content hierarchy
//! models (folders, resources, spaces, chat messages), the error taxonomy,
//! and the capability traits for the external collaborators (completion
//! provider, text extractor, identity verifier).

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;
pub mod uuid_utils;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
pub use uuid_utils::new_v7;
