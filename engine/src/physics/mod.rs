//! Physics Module
//!
//! Collision plumbing for the builder. No physics engine lives here: the
//! builder consumes ray hits and overlap events through ports, and
//! [`world::InMemoryWorld`] is a minimal backend for headless runs.
//!
//! # Unit System
//!
//! **1 unit = 1 meter**
//!
//! # Submodules
//!
//! - [`layers`] - Collision layers and layer masks
//! - [`bounds`] - Axis-aligned boxes and the ray slab test
//! - [`overlap`] - Per-candidate overlap counter
//! - [`query`] - Spatial query and collision event ports
//! - [`world`] - Ground plane + box world implementing the ports

pub mod bounds;
pub mod layers;
pub mod overlap;
pub mod query;
pub mod world;

pub use bounds::Aabb;
pub use layers::{GROUND_LAYER, Layer, LayerMask, PREVIEW_LAYER, STRUCTURE_LAYER};
pub use overlap::OverlapTracker;
pub use query::{CollisionEventPort, Ray, RayHit, SpatialQueryPort};
pub use world::{InMemoryWorld, OverlapEvent};
