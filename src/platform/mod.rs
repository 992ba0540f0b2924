//! Platform layer
//!
//! - `input`: device readings to simulation force
//! - `web`: browser binding (wasm only)

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{ArrowKey, ControlMode, MotionPermission, ScreenOrientation};
