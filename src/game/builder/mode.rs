//! Builder Mode
//!
//! Build / Delete interaction modes and the observable sub-state of the
//! placement state machine.

use std::fmt;

/// Current interaction mode. The session starts in `Build`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuildMode {
    #[default]
    Build,
    Delete,
}

impl BuildMode {
    pub fn toggled(self) -> Self {
        match self {
            BuildMode::Build => BuildMode::Delete,
            BuildMode::Delete => BuildMode::Build,
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildMode::Build => f.write_str("Building Mode"),
            BuildMode::Delete => f.write_str("Delete Mode"),
        }
    }
}

/// Build-mode sub-state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase {
    NoCandidate,
    CandidateInvalid,
    CandidateValid,
}

/// Delete-mode sub-state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePhase {
    NoTarget,
    TargetHovered,
    TargetFlagged,
}

/// Mode x sub-state summary. Initial state is `Build(NoCandidate)`; there is
/// no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementState {
    Build(BuildPhase),
    Delete(DeletePhase),
}

impl PlacementState {
    pub fn mode(self) -> BuildMode {
        match self {
            PlacementState::Build(_) => BuildMode::Build,
            PlacementState::Delete(_) => BuildMode::Delete,
        }
    }
}
