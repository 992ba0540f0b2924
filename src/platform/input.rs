//! Input mapping
//!
//! Turns raw device readings into the force vector the simulation consumes.
//! Screen frame everywhere: x right, y down.
//!
//! Tilt comes from `DeviceMotionEvent.accelerationIncludingGravity`, which is
//! reported in the device frame (x toward the right edge, y toward the top
//! edge, z out of the screen) as the reaction to gravity. The ball rolls
//! along gravity, so the in-plane pull is the negated reading `(-ax, -ay)`;
//! flipping y from "up" to "down" gives `(-ax, ay)` in the portrait screen
//! frame. A rotated screen then turns that vector by the orientation angle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Outcome of asking for motion-sensor access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionPermission {
    Granted,
    Denied,
    /// No sensor, or the platform refused to ask
    Unavailable,
}

impl MotionPermission {
    /// Parse the browser's permission state string
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "granted" => MotionPermission::Granted,
            "denied" => MotionPermission::Denied,
            _ => MotionPermission::Unavailable,
        }
    }
}

/// Active steering method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlMode {
    Tilt,
    Touch,
}

impl ControlMode {
    pub fn for_permission(permission: MotionPermission) -> Self {
        match permission {
            MotionPermission::Granted => ControlMode::Tilt,
            MotionPermission::Denied | MotionPermission::Unavailable => ControlMode::Touch,
        }
    }
}

/// Message for the UI when tilt is not available
pub fn fallback_notice(permission: MotionPermission) -> Option<&'static str> {
    match permission {
        MotionPermission::Granted => None,
        MotionPermission::Denied => {
            Some("Motion access was denied. Drag on the screen to steer the ball.")
        }
        MotionPermission::Unavailable => {
            Some("Motion sensors are unavailable. Drag on the screen to steer the ball.")
        }
    }
}

/// Screen rotation relative to the device's natural portrait orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScreenOrientation {
    #[default]
    Portrait,
    /// Rotated 90° counter-clockwise (device top edge on the left)
    Landscape90,
    PortraitFlipped,
    /// Rotated 90° clockwise (device top edge on the right)
    Landscape270,
}

impl ScreenOrientation {
    /// From `screen.orientation.angle`; snaps to the nearest quarter turn
    pub fn from_degrees(angle: i32) -> Self {
        match ((angle as f32 / 90.0).round() as i32).rem_euclid(4) {
            1 => ScreenOrientation::Landscape90,
            2 => ScreenOrientation::PortraitFlipped,
            3 => ScreenOrientation::Landscape270,
            _ => ScreenOrientation::Portrait,
        }
    }

    /// Map a vector from the device's portrait frame to the current screen frame
    pub fn to_screen(self, v: Vec2) -> Vec2 {
        match self {
            ScreenOrientation::Portrait => v,
            // Device right edge points up, device bottom points right
            ScreenOrientation::Landscape90 => Vec2::new(v.y, -v.x),
            ScreenOrientation::PortraitFlipped => -v,
            ScreenOrientation::Landscape270 => Vec2::new(-v.y, v.x),
        }
    }
}

/// Force from an acceleration-including-gravity reading (m/s²)
pub fn tilt_force(
    accel_x: f32,
    accel_y: f32,
    orientation: ScreenOrientation,
    sensitivity: f32,
) -> Vec2 {
    orientation.to_screen(Vec2::new(-accel_x, accel_y)) * sensitivity
}

/// Force from a touch drag delta (pixels)
pub fn touch_force(delta: Vec2, sensitivity: f32) -> Vec2 {
    delta * sensitivity
}

/// Arrow keys for desktop play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Left,
    Right,
    Up,
    Down,
}

impl ArrowKey {
    /// From a DOM `KeyboardEvent.key` value
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(ArrowKey::Left),
            "ArrowRight" => Some(ArrowKey::Right),
            "ArrowUp" => Some(ArrowKey::Up),
            "ArrowDown" => Some(ArrowKey::Down),
            _ => None,
        }
    }

    pub fn force(self, magnitude: f32) -> Vec2 {
        match self {
            ArrowKey::Left => Vec2::new(-magnitude, 0.0),
            ArrowKey::Right => Vec2::new(magnitude, 0.0),
            ArrowKey::Up => Vec2::new(0.0, -magnitude),
            ArrowKey::Down => Vec2::new(0.0, magnitude),
        }
    }
}
