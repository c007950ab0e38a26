//! Builder Errors
//!
//! Tick anomalies and config/catalog load failures.

use thiserror::Error;

use crate::game::catalog::DefinitionId;
use crate::handle::InstanceId;

/// Anomalies inside a placement tick.
///
/// None of these are fatal: the controller absorbs every one of them and
/// the tick degrades to "nothing happens".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("no active candidate to commit")]
    NoActiveCandidate,
    #[error("hit collider has no owning structure")]
    InvalidHitTarget,
    #[error("instance {0} no longer exists")]
    StaleReference(InstanceId),
    #[error("unknown structure definition '{0}'")]
    UnknownDefinition(DefinitionId),
}

pub type PlacementResult<T> = Result<T, PlacementError>;

/// Failures while loading builder configuration or the structure catalog.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("duplicate structure definition '{0}'")]
    DuplicateDefinition(DefinitionId),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
