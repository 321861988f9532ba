//! Engine error taxonomy.
//!
//! Only configuration problems are fatal. Empty batches are valid,
//! reportable outcomes everywhere in the engine, and malformed numeric
//! fields on individual records are normalized defensively rather than
//! rejected (upstream validation is a collaborator's responsibility).

use thiserror::Error;

/// Errors surfaced by the analysis engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Invalid weights or batch parameters. Aborts the whole run; the
    /// message names the offending field so the caller can report it.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl EngineError {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        EngineError::Config(reason.into())
    }
}
