//! Input Bindings Module
//!
//! Maps physical keys and mouse buttons to builder actions, allowing for
//! key remapping without touching the placement logic.

use std::collections::HashMap;

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use super::actions::BuilderInput;
use crate::game::catalog::StructureCatalog;

/// Digit keys bound to catalog slots 0..=8 by default.
const SLOT_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Logical builder actions that can be bound to physical inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuilderAction {
    /// Switch Build / Delete (default: Q)
    ToggleMode,
    /// Place or delete (default: left mouse)
    Confirm,
    /// Rotate clockwise (default: E)
    RotateClockwise,
    /// Rotate counter-clockwise (default: R)
    RotateCounterClockwise,
    /// Select catalog slot (default: 1-9)
    SelectSlot(usize),
}

/// Physical input bound to a builder action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalInput {
    Key(KeyCode),
    Mouse(MouseButton),
}

/// Two-way map between physical inputs and builder actions.
#[derive(Debug, Clone)]
pub struct BuilderBindings {
    input_to_action: HashMap<PhysicalInput, BuilderAction>,
    action_to_input: HashMap<BuilderAction, PhysicalInput>,
}

impl Default for BuilderBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl BuilderBindings {
    /// Default bindings:
    /// - Q = ToggleMode
    /// - Left mouse = Confirm
    /// - E = RotateClockwise
    /// - R = RotateCounterClockwise
    /// - 1..9 = SelectSlot(0..8)
    pub fn new() -> Self {
        let mut bindings = Self::empty();
        bindings.bind(PhysicalInput::Key(KeyCode::KeyQ), BuilderAction::ToggleMode);
        bindings.bind(PhysicalInput::Mouse(MouseButton::Left), BuilderAction::Confirm);
        bindings.bind(PhysicalInput::Key(KeyCode::KeyE), BuilderAction::RotateClockwise);
        bindings.bind(PhysicalInput::Key(KeyCode::KeyR), BuilderAction::RotateCounterClockwise);
        for (slot, key) in SLOT_KEYS.iter().enumerate() {
            bindings.bind(PhysicalInput::Key(*key), BuilderAction::SelectSlot(slot));
        }
        bindings
    }

    pub fn empty() -> Self {
        Self {
            input_to_action: HashMap::new(),
            action_to_input: HashMap::new(),
        }
    }

    /// Bind an input to an action, replacing any previous binding of either.
    pub fn bind(&mut self, input: PhysicalInput, action: BuilderAction) {
        if let Some(old_action) = self.input_to_action.remove(&input) {
            self.action_to_input.remove(&old_action);
        }
        if let Some(old_input) = self.action_to_input.remove(&action) {
            self.input_to_action.remove(&old_input);
        }
        self.input_to_action.insert(input, action);
        self.action_to_input.insert(action, input);
    }

    pub fn action_for(&self, input: PhysicalInput) -> Option<BuilderAction> {
        self.input_to_action.get(&input).copied()
    }

    pub fn input_for(&self, action: BuilderAction) -> Option<PhysicalInput> {
        self.action_to_input.get(&action).copied()
    }

    /// Translate a key press into a builder input. Slots outside the catalog map to nothing.
    pub fn map_key(&self, key: KeyCode, catalog: &StructureCatalog) -> Option<BuilderInput> {
        self.resolve(self.action_for(PhysicalInput::Key(key))?, catalog)
    }

    pub fn map_mouse(
        &self,
        button: MouseButton,
        catalog: &StructureCatalog,
    ) -> Option<BuilderInput> {
        self.resolve(self.action_for(PhysicalInput::Mouse(button))?, catalog)
    }

    fn resolve(&self, action: BuilderAction, catalog: &StructureCatalog) -> Option<BuilderInput> {
        match action {
            BuilderAction::ToggleMode => Some(BuilderInput::ToggleMode),
            BuilderAction::Confirm => Some(BuilderInput::Confirm),
            BuilderAction::RotateClockwise => Some(BuilderInput::RotateClockwise),
            BuilderAction::RotateCounterClockwise => Some(BuilderInput::RotateCounterClockwise),
            BuilderAction::SelectSlot(slot) => {
                catalog.id_at(slot).cloned().map(BuilderInput::SelectDefinition)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::catalog::DefinitionId;

    fn catalog() -> StructureCatalog {
        StructureCatalog::from_json_str(
            r#"[
                {"id": "large_box", "name": "Large Box", "footprint": [2.0, 1.0, 2.0],
                 "prefab": "large_box", "cell_size": 1},
                {"id": "tall_box", "name": "Tall Box", "footprint": [1.0, 3.0, 1.0],
                 "prefab": "tall_box", "cell_size": 1}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_default_bindings() {
        let bindings = BuilderBindings::new();
        let catalog = catalog();
        assert_eq!(bindings.map_key(KeyCode::KeyQ, &catalog), Some(BuilderInput::ToggleMode));
        assert_eq!(bindings.map_key(KeyCode::KeyE, &catalog), Some(BuilderInput::RotateClockwise));
        assert_eq!(bindings.map_mouse(MouseButton::Left, &catalog), Some(BuilderInput::Confirm));
        assert_eq!(bindings.map_mouse(MouseButton::Right, &catalog), None);
    }

    #[test]
    fn test_slot_keys_follow_catalog_order() {
        let bindings = BuilderBindings::new();
        let catalog = catalog();
        assert_eq!(
            bindings.map_key(KeyCode::Digit2, &catalog),
            Some(BuilderInput::SelectDefinition(DefinitionId::from("tall_box")))
        );
        // Slot 3 has no definition
        assert_eq!(bindings.map_key(KeyCode::Digit3, &catalog), None);
    }

    #[test]
    fn test_rebind_replaces_old_key() {
        let mut bindings = BuilderBindings::new();
        bindings.bind(PhysicalInput::Key(KeyCode::Tab), BuilderAction::ToggleMode);
        assert_eq!(bindings.action_for(PhysicalInput::Key(KeyCode::KeyQ)), None);
        assert_eq!(
            bindings.input_for(BuilderAction::ToggleMode),
            Some(PhysicalInput::Key(KeyCode::Tab))
        );
    }
}
