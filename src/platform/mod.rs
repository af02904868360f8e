//! Platform abstraction layer
//!
//! Normalizes browser input (keyboard and on-screen touch controls) into
//! the simulation's intents. Visibility/focus handling lives in the wasm
//! entry point.

pub mod input;

pub use input::{InputState, TouchControl};
