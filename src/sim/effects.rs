//! Decorative particles
//!
//! Explosions and teleport flashes. Nothing here feeds back into the ball or
//! the maze, so the effects use their own PRNG rather than the level's.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Spark color for explosions
pub const EXPLOSION_COLOR: u32 = 0xff_44_44;
/// Shockwave ring color
pub const SHOCKWAVE_COLOR: u32 = 0xff_ff_ff;
/// Teleport flash color
pub const TELEPORT_COLOR: u32 = 0x99_00_ff;

/// Sparks per explosion
const EXPLOSION_SPARKS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Drifts and shrinks; alpha follows remaining life
    Spark { life: f32 },
    /// Grows in place and fades out
    Ring { grow: f32, fade: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub alpha: f32,
    pub color: u32,
    pub kind: ParticleKind,
}

impl Particle {
    fn ring(pos: Vec2, alpha: f32, color: u32, grow: f32, fade: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: 10.0,
            alpha,
            color,
            kind: ParticleKind::Ring { grow, fade },
        }
    }

    /// Advance one tick; false once the particle is spent
    pub fn update(&mut self) -> bool {
        match &mut self.kind {
            ParticleKind::Spark { life } => {
                self.pos += self.vel;
                self.alpha = (*life / 30.0).min(1.0);
                *life -= 1.0;
                self.radius -= 0.05;
                *life > 0.0 && self.radius > 0.0
            }
            ParticleKind::Ring { grow, fade } => {
                self.radius += *grow;
                self.alpha -= *fade;
                self.alpha > 0.0
            }
        }
    }
}

/// Live particle list with a cap
#[derive(Debug, Clone)]
pub struct Effects {
    pub particles: Vec<Particle>,
    max_particles: usize,
    rng: Pcg32,
}

impl Effects {
    pub fn new(seed: u64, max_particles: usize) -> Self {
        Self {
            particles: Vec::new(),
            max_particles,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn set_max_particles(&mut self, max: usize) {
        self.max_particles = max;
        self.particles.truncate(max);
    }

    pub fn max_particles(&self) -> usize {
        self.max_particles
    }

    fn push(&mut self, particle: Particle) {
        if self.particles.len() < self.max_particles {
            self.particles.push(particle);
        }
    }

    /// Burst of sparks plus a shockwave ring
    pub fn explosion(&mut self, pos: Vec2) {
        for _ in 0..EXPLOSION_SPARKS {
            let angle = self.rng.random_range(0.0..TAU);
            let speed = self.rng.random_range(1.0..5.0);
            let radius = self.rng.random_range(2.0..10.0);
            let life = self.rng.random_range(20.0..50.0);
            self.push(Particle {
                pos,
                vel: Vec2::from_angle(angle) * speed,
                radius,
                alpha: 1.0,
                color: EXPLOSION_COLOR,
                kind: ParticleKind::Spark { life },
            });
        }
        self.push(Particle::ring(pos, 0.7, SHOCKWAVE_COLOR, 2.0, 0.05));
    }

    pub fn teleport_flash(&mut self, pos: Vec2) {
        self.push(Particle::ring(pos, 1.0, TELEPORT_COLOR, 1.4, 0.04));
    }

    pub fn update(&mut self) {
        self.particles.retain_mut(Particle::update);
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explosion_spawns_sparks_and_ring() {
        let mut effects = Effects::new(1, 256);
        effects.explosion(Vec2::new(50.0, 50.0));
        assert_eq!(effects.particles.len(), EXPLOSION_SPARKS + 1);
        let rings = effects
            .particles
            .iter()
            .filter(|p| matches!(p.kind, ParticleKind::Ring { .. }))
            .count();
        assert_eq!(rings, 1);
    }

    #[test]
    fn test_particle_cap() {
        let mut effects = Effects::new(1, 8);
        effects.explosion(Vec2::ZERO);
        assert_eq!(effects.particles.len(), 8);
        effects.set_max_particles(0);
        effects.teleport_flash(Vec2::ZERO);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_effects_expire() {
        let mut effects = Effects::new(7, 256);
        effects.explosion(Vec2::new(10.0, 10.0));
        effects.teleport_flash(Vec2::new(20.0, 20.0));
        // Longest-lived particle is a spark with life < 50
        for _ in 0..60 {
            effects.update();
        }
        assert!(effects.is_empty());
    }

    #[test]
    fn test_teleport_ring_grows_and_fades() {
        let mut effects = Effects::new(0, 16);
        effects.teleport_flash(Vec2::ZERO);
        effects.update();
        let ring = effects.particles[0];
        assert!((ring.radius - 11.4).abs() < 1e-5);
        assert!((ring.alpha - 0.96).abs() < 1e-5);
    }
}
