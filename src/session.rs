//! Game session
//!
//! Wraps a [`SimulationState`] in the fixed-timestep loop every frontend
//! shares: input accumulation, the level-complete pause, audio cues and the
//! optional autopilot.

use glam::Vec2;

use crate::audio::{AudioMixer, PlayRequest};
use crate::consts::*;
use crate::platform::input::{
    ArrowKey, ControlMode, MotionPermission, ScreenOrientation, fallback_notice, tilt_force,
    touch_force,
};
use crate::settings::Settings;
use crate::sim::{Autopilot, GameEvent, GamePhase, SimulationState, Snapshot, TickInput, tick};
use crate::tuning::{LevelTable, Tuning};

pub struct Session {
    state: SimulationState,
    settings: Settings,
    mixer: AudioMixer,
    accumulator: f32,
    /// Force accumulated since the last tick
    pending_force: Vec2,
    /// Ticks left before the next level starts
    complete_delay: Option<u32>,
    control_mode: ControlMode,
    orientation: ScreenOrientation,
    autopilot: Option<Autopilot>,
    events: Vec<GameEvent>,
    cues: Vec<PlayRequest>,
}

impl Session {
    pub fn new(table: LevelTable, tuning: Tuning, settings: Settings, canvas: Vec2) -> Self {
        let state = SimulationState::new(table, tuning, canvas, settings.max_particles());
        let mixer = AudioMixer::new(settings.sound_enabled, settings.volume);
        log::info!(
            "Quality {}, up to {} particles",
            settings.quality.as_str(),
            settings.max_particles()
        );
        let mut session = Self {
            state,
            settings,
            mixer,
            accumulator: 0.0,
            pending_force: Vec2::ZERO,
            complete_delay: None,
            control_mode: ControlMode::Touch,
            orientation: ScreenOrientation::Portrait,
            autopilot: None,
            events: Vec::new(),
            cues: Vec::new(),
        };
        session.collect_events();
        session
    }

    /// Default level table and tuning
    pub fn with_settings(settings: Settings, canvas: Vec2) -> Self {
        Self::new(LevelTable::default(), Tuning::default(), settings, canvas)
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn control_mode(&self) -> ControlMode {
        self.control_mode
    }

    /// Record the motion permission result; returns a notice for the UI on fallback
    pub fn set_motion_permission(&mut self, permission: MotionPermission) -> Option<&'static str> {
        self.control_mode = ControlMode::for_permission(permission);
        log::info!("Motion permission {:?}, using {:?} controls", permission, self.control_mode);
        fallback_notice(permission)
    }

    pub fn set_orientation(&mut self, orientation: ScreenOrientation) {
        self.orientation = orientation;
    }

    pub fn add_force(&mut self, force: Vec2) {
        if self.state.phase == GamePhase::Playing {
            self.pending_force += force;
        }
    }

    /// Accelerometer reading; ignored unless tilt controls are active
    pub fn device_motion(&mut self, accel_x: f32, accel_y: f32) {
        if self.control_mode == ControlMode::Tilt {
            let force = tilt_force(
                accel_x,
                accel_y,
                self.orientation,
                self.settings.tilt_sensitivity,
            );
            self.add_force(force);
        }
    }

    pub fn touch_move(&mut self, delta: Vec2) {
        self.add_force(touch_force(delta, self.settings.touch_sensitivity));
    }

    pub fn key_down(&mut self, key: ArrowKey) {
        self.add_force(key.force(self.settings.keyboard_force));
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled.then(Autopilot::new);
    }

    pub fn autopilot_enabled(&self) -> bool {
        self.autopilot.is_some()
    }

    /// Flip sound on or off and remember the choice
    pub fn toggle_sound(&mut self) -> bool {
        let enabled = self.mixer.toggle();
        self.settings.sound_enabled = enabled;
        enabled
    }

    /// Canvas size changed: rebuild the current level
    pub fn resize(&mut self, canvas: Vec2) {
        self.state.resize(canvas);
        self.pending_force = Vec2::ZERO;
        self.complete_delay = None;
        self.collect_events();
    }

    /// Advance exactly one simulation tick
    pub fn step(&mut self) {
        match self.complete_delay {
            Some(remaining) => {
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    self.complete_delay = None;
                    self.state.advance_level();
                } else {
                    self.complete_delay = Some(remaining);
                    // Frozen, but effects keep animating
                    tick(&mut self.state, &TickInput::default());
                }
            }
            None => {
                let mut force = std::mem::take(&mut self.pending_force);
                if let Some(pilot) = &mut self.autopilot {
                    force += pilot.steer(&self.state.maze, &self.state.ball);
                }
                tick(&mut self.state, &TickInput::new(force));
            }
        }
        self.collect_events();
    }

    /// Run as many fixed ticks as `dt` seconds cover; returns the count
    pub fn frame(&mut self, dt: f32) -> u32 {
        let dt = dt.clamp(0.0, 0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    fn collect_events(&mut self) {
        let events = self.state.drain_events();
        for event in &events {
            match event {
                GameEvent::LevelComplete { .. } => {
                    self.complete_delay = Some(LEVEL_COMPLETE_DELAY_TICKS);
                    self.pending_force = Vec2::ZERO;
                }
                GameEvent::LevelStarted { .. } => {
                    if self.autopilot.is_some() {
                        self.autopilot = Some(Autopilot::new());
                    }
                }
                _ => {}
            }
        }
        self.cues.extend(self.mixer.mix(&events));
        self.events.extend(events);
    }

    /// Notifications since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Sounds to play since the last drain
    pub fn drain_cues(&mut self) -> Vec<PlayRequest> {
        std::mem::take(&mut self.cues)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }
}
