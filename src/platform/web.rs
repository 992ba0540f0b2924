//! Browser binding
//!
//! The page owns the canvas, the event listeners and the animation frame
//! loop; it forwards raw readings here and draws from [`WebGame::snapshot_json`].

use glam::Vec2;
use wasm_bindgen::prelude::*;

use super::input::{ArrowKey, MotionPermission, ScreenOrientation};
use crate::audio::WebAudio;
use crate::session::Session;
use crate::settings::Settings;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) is harmless
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Tilt maze starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    session: Session,
    audio: WebAudio,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> WebGame {
        let settings = Settings::load();
        let session = Session::with_settings(settings, Vec2::new(width, height));
        WebGame {
            session,
            audio: WebAudio::new(),
        }
    }

    /// Result of `DeviceMotionEvent.requestPermission()`, or "unavailable".
    /// Returns a message to show when falling back to touch controls.
    pub fn set_motion_permission(&mut self, state: &str) -> Option<String> {
        self.audio.resume();
        self.session
            .set_motion_permission(MotionPermission::parse(state))
            .map(str::to_string)
    }

    /// `screen.orientation.angle`
    pub fn set_orientation(&mut self, angle: i32) {
        self.session
            .set_orientation(ScreenOrientation::from_degrees(angle));
    }

    /// `accelerationIncludingGravity` x and y
    pub fn device_motion(&mut self, accel_x: f32, accel_y: f32) {
        self.session.device_motion(accel_x, accel_y);
    }

    pub fn touch_move(&mut self, dx: f32, dy: f32) {
        self.session.touch_move(Vec2::new(dx, dy));
    }

    /// Returns true if the key was handled
    pub fn key_down(&mut self, key: &str) -> bool {
        match ArrowKey::parse(key) {
            Some(key) => {
                self.session.key_down(key);
                true
            }
            None => false,
        }
    }

    /// Advance by `dt` seconds and play any sounds; returns ticks run
    pub fn frame(&mut self, dt: f32) -> u32 {
        let ticks = self.session.frame(dt);
        for request in self.session.drain_cues() {
            self.audio.play(request);
        }
        ticks
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.session.resize(Vec2::new(width, height));
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.session.snapshot()).unwrap_or_else(|e| {
            log::warn!("Failed to serialize snapshot: {}", e);
            String::from("null")
        })
    }

    pub fn drain_events_json(&mut self) -> String {
        let events = self.session.drain_events();
        serde_json::to_string(&events).unwrap_or_else(|_| String::from("[]"))
    }

    /// Returns the new sound state
    pub fn toggle_sound(&mut self) -> bool {
        let enabled = self.session.toggle_sound();
        if enabled {
            self.audio.resume();
        }
        self.session.settings().save();
        enabled
    }

    pub fn level(&self) -> u32 {
        self.session.level()
    }
}
