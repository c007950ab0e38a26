//! Game Module
//!
//! Base-building systems layered on the engine plumbing.

pub mod builder;
pub mod catalog;
pub mod config;
pub mod error;

pub use builder::{
    BuildMode, PlacementController, PlacementEvent, PlacementState, Pose, StructureInstance,
    TickReport,
};
pub use catalog::{CatalogPort, DefinitionId, StructureCatalog, StructureDefinition};
pub use config::BuilderConfig;
pub use error::{ConfigError, PlacementError};
