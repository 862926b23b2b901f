//! # studium-api
//!
//! HTTP API server for the studium backend. The interesting logic lives in
//! [`services`] (the generation orchestrator and text extraction); handlers
//! are thin adapters from HTTP to the store and services.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod services;

use std::sync::Arc;

use studium_core::{IdentityVerifier, TextExtractor};
use studium_db::Database;

pub use handlers::router;
pub use services::{GenerationService, PlainTextExtractor};

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub generation: GenerationService,
    pub extractor: Arc<dyn TextExtractor>,
    pub verifier: Arc<dyn IdentityVerifier>,
}
