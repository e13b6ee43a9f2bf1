//! Error types for Muster.
//!
//! Rejected chat commands (cooldown, wrong role, nothing to confirm) are
//! outcome values, not errors — nothing in the dispatch path is allowed to
//! take the event loop down. These variants cover process-level failures:
//! configuration, the admin API transport, and serialization.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MusterError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Admin API error: {0}")]
    AdminApi(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MusterError>;
