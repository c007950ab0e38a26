//! One-Shot Input Latch
//!
//! Input arrives at frame rate, the builder steps at a fixed tick. Events
//! are latched the moment they happen and handed to exactly one tick via
//! [`InputLatch::take`], which clears the latch in the same step. An event
//! pushed after `take` belongs to the next tick.

use super::actions::BuilderInput;
use crate::game::catalog::DefinitionId;

/// Inputs consumed by a single tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInputs {
    /// Toggle presses, each applied as its own mode flip with its side effects
    pub toggle_presses: u32,
    pub confirm: bool,
    /// Accumulated rotation, clockwise positive
    pub rotation_steps: i32,
    /// Most recent selection since the previous tick
    pub selection: Option<DefinitionId>,
}

impl TickInputs {
    pub fn is_empty(&self) -> bool {
        *self == TickInputs::default()
    }
}

/// Accumulates input events between ticks.
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    toggle_presses: u32,
    confirm: bool,
    rotation_steps: i32,
    selection: Option<DefinitionId>,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, input: BuilderInput) {
        match input {
            BuilderInput::ToggleMode => self.toggle_presses = self.toggle_presses.saturating_add(1),
            BuilderInput::Confirm => self.confirm = true,
            BuilderInput::RotateClockwise | BuilderInput::RotateCounterClockwise => {
                self.rotation_steps = self.rotation_steps.saturating_add(input.rotation_steps());
            }
            BuilderInput::SelectDefinition(id) => self.selection = Some(id),
        }
    }

    /// Hand the latched inputs to the current tick and clear the latch.
    pub fn take(&mut self) -> TickInputs {
        let latched = std::mem::take(self);
        TickInputs {
            toggle_presses: latched.toggle_presses,
            confirm: latched.confirm,
            rotation_steps: latched.rotation_steps,
            selection: latched.selection,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.toggle_presses == 0
            && !self.confirm
            && self.rotation_steps == 0
            && self.selection.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_clears() {
        let mut latch = InputLatch::new();
        latch.push(BuilderInput::Confirm);
        assert!(!latch.is_empty());

        let inputs = latch.take();
        assert!(inputs.confirm);
        assert!(latch.is_empty());
        assert!(latch.take().is_empty());
    }

    #[test]
    fn test_rotation_accumulates() {
        let mut latch = InputLatch::new();
        latch.push(BuilderInput::RotateClockwise);
        latch.push(BuilderInput::RotateClockwise);
        latch.push(BuilderInput::RotateCounterClockwise);
        assert_eq!(latch.take().rotation_steps, 1);
    }

    #[test]
    fn test_toggle_presses_are_counted() {
        let mut latch = InputLatch::new();
        latch.push(BuilderInput::ToggleMode);
        latch.push(BuilderInput::ToggleMode);
        let inputs = latch.take();
        assert_eq!(inputs.toggle_presses, 2);
        assert!(!inputs.is_empty());

        latch.push(BuilderInput::ToggleMode);
        assert_eq!(latch.take().toggle_presses, 1);
        assert_eq!(latch.take().toggle_presses, 0);
    }

    #[test]
    fn test_latest_selection_wins() {
        let mut latch = InputLatch::new();
        latch.push(BuilderInput::SelectDefinition(DefinitionId::from("large_box")));
        latch.push(BuilderInput::SelectDefinition(DefinitionId::from("sphere")));
        assert_eq!(latch.take().selection, Some(DefinitionId::from("sphere")));
    }

    #[test]
    fn test_event_after_take_goes_to_next_tick() {
        let mut latch = InputLatch::new();
        latch.push(BuilderInput::Confirm);
        let first = latch.take();
        latch.push(BuilderInput::Confirm);
        let second = latch.take();
        assert!(first.confirm);
        assert!(second.confirm);
        assert!(!latch.take().confirm);
    }
}
