//! Sound cues
//!
//! The simulation only emits [`GameEvent`]s. [`AudioMixer`] turns them into
//! cues honoring the player's sound toggle and volume; on the web,
//! [`WebAudio`] synthesizes each cue with the Web Audio API.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// The three sounds the game makes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    /// Ball hit a wall or canvas edge
    Bounce,
    /// Hazard hit, teleport or slip zone
    Obstacle,
    LevelComplete,
}

impl SoundCue {
    /// Cue for an event, if it makes a sound
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Bounce { .. } => Some(SoundCue::Bounce),
            GameEvent::HazardHit { .. } | GameEvent::Teleported { .. } | GameEvent::SlipZone => {
                Some(SoundCue::Obstacle)
            }
            GameEvent::LevelComplete { .. } => Some(SoundCue::LevelComplete),
            GameEvent::LevelStarted { .. } => None,
        }
    }
}

/// A cue ready to play
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayRequest {
    pub cue: SoundCue,
    pub volume: f32,
}

/// Sound toggle and volume
#[derive(Debug, Clone, PartialEq)]
pub struct AudioMixer {
    enabled: bool,
    volume: f32,
}

impl Default for AudioMixer {
    fn default() -> Self {
        Self::new(true, 0.4)
    }
}

impl AudioMixer {
    pub fn new(enabled: bool, volume: f32) -> Self {
        Self {
            enabled,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    /// Flip the sound toggle; returns the new state
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        log::info!("Sound {}", if self.enabled { "on" } else { "off" });
        self.enabled
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Set volume (0.0 - 1.0)
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Cues to play for a batch of events
    pub fn mix(&self, events: &[GameEvent]) -> Vec<PlayRequest> {
        if !self.enabled || self.volume <= 0.0 {
            return Vec::new();
        }
        events
            .iter()
            .filter_map(SoundCue::for_event)
            .map(|cue| PlayRequest {
                cue,
                volume: self.volume,
            })
            .collect()
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{PlayRequest, SoundCue};

    /// Procedural Web Audio playback - no asset files
    pub struct WebAudio {
        ctx: Option<AudioContext>,
    }

    impl Default for WebAudio {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudio {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn play(&self, request: PlayRequest) {
            let Some(ctx) = &self.ctx else { return };
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let vol = request.volume;
            match request.cue {
                SoundCue::Bounce => Self::play_bounce(ctx, vol),
                SoundCue::Obstacle => Self::play_obstacle(ctx, vol),
                SoundCue::LevelComplete => Self::play_level_complete(ctx, vol),
            }
        }

        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Short wooden knock
        fn play_bounce(ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = Self::create_osc(ctx, 220.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.6, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(90.0, t + 0.08)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }

        /// Buzzy downward zap
        fn play_obstacle(ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = Self::create_osc(ctx, 500.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                .ok();
            osc.frequency().set_value_at_time(500.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(80.0, t + 0.25)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.3).ok();
        }

        /// Rising arpeggio
        fn play_level_complete(ctx: &AudioContext, vol: f32) {
            for (i, freq) in [400.0, 500.0, 600.0, 800.0].iter().enumerate() {
                let delay = i as f64 * 0.1;
                if let Some((osc, gain)) = Self::create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.5, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.5).ok();
                }
            }
        }
    }
}
