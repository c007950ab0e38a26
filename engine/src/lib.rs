//! Base Builder Engine Library
//!
//! Interactive placement and removal of grid-aligned structures in a live
//! 3D scene, driven by a ray cast from the player's viewpoint.
//!
//! # Modules
//!
//! - [`world`] - Grid snapping
//! - [`physics`] - Layers, bounds, overlap tracking and the spatial query ports
//! - [`input`] - Key bindings and the per-tick input latch
//! - [`render`] - Visual feedback port
//! - [`game`] - The placement controller, structure catalog and config
//!
//! # Example
//!
//! ```ignore
//! use base_builder_engine::game::{BuilderConfig, PlacementController, StructureCatalog};
//! use base_builder_engine::input::BuilderInput;
//! use base_builder_engine::physics::{InMemoryWorld, Ray};
//! use base_builder_engine::render::FeedbackLog;
//!
//! let catalog = StructureCatalog::load("assets/structures.json")?;
//! let mut controller = PlacementController::new(BuilderConfig::default(), catalog);
//! let world = InMemoryWorld::default();
//! let mut feedback = FeedbackLog::new();
//!
//! // Once per fixed tick
//! controller.push_input(BuilderInput::Confirm);
//! let report = controller.tick(&aim_ray, &world, &mut feedback);
//! ```

pub mod handle;
pub mod input;
pub mod physics;
pub mod render;
pub mod world;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

pub use handle::InstanceId;
pub use world::snap_to_grid;
