//! Input Module
//!
//! Turns debounced key and mouse presses into builder inputs and latches
//! them until the next fixed tick. Raw device polling stays with the
//! windowing layer.
//!
//! # Example
//!
//! ```rust,ignore
//! use base_builder_engine::input::{BuilderBindings, InputLatch};
//! use winit::keyboard::KeyCode;
//!
//! let bindings = BuilderBindings::new();
//! let mut latch = InputLatch::new();
//! if let Some(input) = bindings.map_key(KeyCode::KeyQ, &catalog) {
//!     latch.push(input);
//! }
//! let this_tick = latch.take();
//! ```

pub mod actions;
pub mod bindings;
pub mod latch;

pub use actions::BuilderInput;
pub use bindings::{BuilderAction, BuilderBindings, PhysicalInput};
pub use latch::{InputLatch, TickInputs};
