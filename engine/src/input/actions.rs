//! Builder Input Actions
//!
//! Discrete, already-debounced events the builder reacts to. One event per
//! press; holding a key never repeats an action.

use crate::game::catalog::DefinitionId;

/// High-level builder input event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderInput {
    /// Flip between Build and Delete mode
    ToggleMode,
    /// Place the candidate (Build) or remove the flagged structure (Delete)
    Confirm,
    /// Rotate the candidate one step clockwise (seen from above)
    RotateClockwise,
    /// Rotate the candidate one step counter-clockwise
    RotateCounterClockwise,
    /// Switch the structure being placed
    SelectDefinition(DefinitionId),
}

impl BuilderInput {
    /// Signed rotation step carried by this input (clockwise is positive).
    pub fn rotation_steps(&self) -> i32 {
        match self {
            BuilderInput::RotateClockwise => 1,
            BuilderInput::RotateCounterClockwise => -1,
            _ => 0,
        }
    }
}
