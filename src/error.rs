//! Error types.
//!
//! The collision pass itself never fails; these errors only surface from
//! configuration loading and from collaborator calls, which the dispatcher
//! absorbs at the call site.

use thiserror::Error;

/// Failure reported by an external collaborator (audio, particles, damage, ...).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    /// A referenced asset (sound, effect template) is not loaded.
    #[error("missing asset: {0}")]
    MissingAsset(String),

    /// The collaborator is temporarily unable to accept work.
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),

    /// The request itself was refused.
    #[error("request rejected: {0}")]
    Rejected(String),
}

/// Errors raised while loading or validating a [`CollisionConfig`](crate::config::CollisionConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
