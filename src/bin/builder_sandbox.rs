//! Builder Sandbox - Headless Placement Demo
//!
//! Run with: `cargo run --bin builder_sandbox [config.json] [structures.json]`
//!
//! Drives the placement controller at a fixed tick against the in-memory
//! collision world, feeding it a scripted sequence of key and mouse presses
//! through the default bindings:
//! - 1-9: Select structure
//! - E / R: Rotate clockwise / counter-clockwise
//! - Left mouse: Place (Build) or remove (Delete)
//! - Q: Toggle Build / Delete mode
//!
//! Set `RUST_LOG=base_builder_engine=debug` for per-tick detail.

use std::collections::HashSet;

use glam::Vec3;
use tracing::info;
use tracing_subscriber::EnvFilter;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use base_builder_engine::InstanceId;
use base_builder_engine::game::builder::{PlacementEvent, StructureScene, aim_down_at};
use base_builder_engine::game::{BuilderConfig, ConfigError, PlacementController, StructureCatalog};
use base_builder_engine::input::BuilderBindings;
use base_builder_engine::physics::InMemoryWorld;
use base_builder_engine::render::{FeedbackLog, VisualState};

const DEFAULT_CONFIG_PATH: &str = "assets/builder_config.json";
const DEFAULT_CATALOG_PATH: &str = "assets/structures.json";

/// Presses delivered before a tick.
#[derive(Clone, Copy)]
enum Press {
    Key(KeyCode),
    Mouse(MouseButton),
}

/// One fixed tick of the script: where the player aims and what they press.
struct Step {
    aim: Vec3,
    presses: &'static [Press],
}

fn script() -> Vec<Step> {
    use Press::{Key, Mouse};
    vec![
        // Hover, rotate once, place a large box at (1, 0, 1)
        Step { aim: Vec3::new(1.2, 0.0, 0.9), presses: &[] },
        Step { aim: Vec3::new(1.2, 0.0, 0.9), presses: &[Key(KeyCode::KeyE)] },
        Step { aim: Vec3::new(1.2, 0.0, 0.9), presses: &[Mouse(MouseButton::Left)] },
        // Move to a free cell and place a second box
        Step { aim: Vec3::new(5.0, 0.0, 1.0), presses: &[] },
        Step { aim: Vec3::new(5.0, 0.0, 1.0), presses: &[Mouse(MouseButton::Left)] },
        // Tall box next to it
        Step { aim: Vec3::new(-2.3, 0.0, 4.4), presses: &[Key(KeyCode::Digit2)] },
        Step { aim: Vec3::new(-2.3, 0.0, 4.4), presses: &[Mouse(MouseButton::Left)] },
        // Back to the large box, pushed into the tall one: confirm is discarded
        Step { aim: Vec3::new(-1.4, 0.0, 4.0), presses: &[Key(KeyCode::Digit1)] },
        Step { aim: Vec3::new(-1.4, 0.0, 4.0), presses: &[Mouse(MouseButton::Left)] },
        // Delete mode: hover the first box, then the second, then remove it
        Step { aim: Vec3::new(1.0, 0.0, 1.0), presses: &[Key(KeyCode::KeyQ)] },
        Step { aim: Vec3::new(5.0, 0.0, 1.0), presses: &[] },
        Step { aim: Vec3::new(5.0, 0.0, 1.0), presses: &[Mouse(MouseButton::Left)] },
        // Hover the first box and leave Delete mode without removing it
        Step { aim: Vec3::new(1.0, 0.0, 1.0), presses: &[] },
        Step { aim: Vec3::new(8.0, 0.0, 8.0), presses: &[Key(KeyCode::KeyQ)] },
        Step { aim: Vec3::new(8.0, 0.0, 8.0), presses: &[Mouse(MouseButton::Left)] },
    ]
}

fn main() -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let catalog_path = args.next().unwrap_or_else(|| DEFAULT_CATALOG_PATH.to_string());

    let config = BuilderConfig::load(&config_path)?;
    let catalog = StructureCatalog::load(&catalog_path)?;
    if catalog.is_empty() {
        return Err(ConfigError::Invalid(format!("{catalog_path} defines no structures")));
    }
    for (slot, definition) in catalog.iter().enumerate() {
        info!(
            key = slot + 1,
            definition = %definition.id,
            name = %definition.name,
            "structure slot"
        );
    }

    let bindings = BuilderBindings::new();
    let mut world = InMemoryWorld::new(0.0, config.ground_layer);
    let mut feedback = FeedbackLog::new();
    let mut controller = PlacementController::new(config.clone(), catalog.clone());

    // Stand-in for the mode label the UI would draw.
    let _label = controller.subscribe(Box::new(|event: &PlacementEvent| {
        if let PlacementEvent::ModeChanged(mode) = event {
            info!("[UI] {mode}");
        }
    }));

    for (index, step) in script().iter().enumerate() {
        for press in step.presses {
            let input = match *press {
                Press::Key(key) => bindings.map_key(key, &catalog),
                Press::Mouse(button) => bindings.map_mouse(button, &catalog),
            };
            if let Some(input) = input {
                controller.push_input(input);
            }
        }

        let report = controller.tick(&aim_down_at(step.aim), &world, &mut feedback);

        // Collision subsystem runs between ticks
        sync_world(&mut world, controller.scene(), &config);
        if let Some(candidate) = controller.active_candidate() {
            for event in world.update_overlaps(candidate) {
                event.deliver(&mut controller);
            }
        }

        info!(
            tick = index + 1,
            state = ?controller.state(),
            committed = ?report.committed,
            deleted = ?report.deleted,
            "tick done"
        );
    }

    info!(
        placed = controller.scene().committed_count(),
        flagged = feedback.count_in_state(VisualState::DeleteFlagged),
        "sandbox finished"
    );
    Ok(())
}

/// Mirror the instance set into the collision world.
fn sync_world(world: &mut InMemoryWorld, scene: &StructureScene, config: &BuilderConfig) {
    let live: HashSet<InstanceId> = scene.iter().map(|instance| instance.id()).collect();
    let stale: Vec<InstanceId> = world.ids().filter(|id| !live.contains(id)).collect();
    for id in stale {
        world.remove(id);
    }

    for instance in scene.iter() {
        let layer = if instance.is_committed() {
            config.structure_layer
        } else {
            config.preview_layer
        };
        world.insert(instance.id(), instance.bounds(), layer);
    }
}
