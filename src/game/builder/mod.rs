//! Builder Module
//!
//! Grid-snapped structure placement and deletion driven by an aiming ray.

pub mod controller;
pub mod instance;
pub mod mode;
pub mod observer;
pub mod scene;

pub use controller::{PlacementController, TickReport, aim_down_at};
pub use instance::{Pose, StructureInstance, yaw_rotation};
pub use mode::{BuildMode, BuildPhase, DeletePhase, PlacementState};
pub use observer::{ObserverRegistry, PlacementEvent, PlacementObserver, Subscription};
pub use scene::StructureScene;
