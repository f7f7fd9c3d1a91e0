//! CPU particle emitter driven by the audio spectrum.
//!
//! Particles spawn in a box around the emitter, drift outward and age out.
//! [`ParticleCue`] binds the emitter to whatever the camera follows.

use crate::constants::*;
use crate::controller::{positive, PositionSource, TrackingListener};
use crate::error::CoreError;
use crate::scene::ObjectId;
use crate::spectrum::emit_rate_for_spectrum;
use glam::Vec3;
use rand::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleConfig {
    pub capacity: usize,
    pub min_size: f32,
    pub max_size: f32,
    pub min_lifetime: f32,
    pub max_lifetime: f32,
    pub emit_box: f32,
    pub emit_power: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            capacity: PARTICLE_CAPACITY,
            min_size: PARTICLE_MIN_SIZE,
            max_size: PARTICLE_MAX_SIZE,
            min_lifetime: PARTICLE_MIN_LIFETIME,
            max_lifetime: PARTICLE_MAX_LIFETIME,
            emit_box: PARTICLE_EMIT_BOX,
            emit_power: PARTICLE_EMIT_POWER,
        }
    }
}

impl ParticleConfig {
    pub fn validate(&self) -> Result<(), CoreError> {
        positive("min_size", self.min_size)?;
        positive("max_size", self.max_size)?;
        positive("min_lifetime", self.min_lifetime)?;
        positive("max_lifetime", self.max_lifetime)?;
        ordered("max_size", self.min_size, self.max_size)?;
        ordered("max_lifetime", self.min_lifetime, self.max_lifetime)?;
        for (field, value) in [("emit_box", self.emit_box), ("emit_power", self.emit_power)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(CoreError::InvalidConfig {
                    field,
                    requirement: "finite and non-negative",
                    value,
                });
            }
        }
        Ok(())
    }
}

fn ordered(field: &'static str, min: f32, max: f32) -> Result<(), CoreError> {
    if min <= max {
        Ok(())
    } else {
        Err(CoreError::InvalidConfig {
            field,
            requirement: "at least the matching minimum",
            value: max,
        })
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub size: f32,
    pub age: f32,
    pub lifetime: f32,
}

impl Particle {
    /// Remaining life in [0, 1]; 1 when freshly spawned.
    pub fn life_fraction(&self) -> f32 {
        if !(self.lifetime > 0.0) {
            return 0.0;
        }
        (1.0 - self.age / self.lifetime).clamp(0.0, 1.0)
    }
}

pub struct ParticleSystem {
    config: ParticleConfig,
    particles: Vec<Particle>,
    emit_rate: f32,
    emit_accum: f32,
    running: bool,
    rng: StdRng,
}

impl ParticleSystem {
    pub fn new(config: ParticleConfig, seed: u64) -> Result<Self, CoreError> {
        config.validate()?;
        let particles = Vec::with_capacity(config.capacity);
        Ok(Self {
            config,
            particles,
            emit_rate: 0.0,
            emit_accum: 0.0,
            running: false,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stops emission; live particles keep aging until they expire.
    pub fn stop(&mut self) {
        self.running = false;
        self.emit_accum = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_emit_rate(&mut self, rate: f32) {
        self.emit_rate = if rate.is_finite() { rate.max(0.0) } else { 0.0 };
    }

    pub fn emit_rate(&self) -> f32 {
        self.emit_rate
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn update(&mut self, dt_sec: f32, emitter: Vec3) {
        let dt = dt_sec.max(0.0);
        self.particles.retain_mut(|p| {
            p.age += dt;
            p.position += p.velocity * dt;
            p.age < p.lifetime
        });

        if !self.running {
            return;
        }
        self.emit_accum += self.emit_rate * dt;
        let wanted = self.emit_accum.floor();
        self.emit_accum -= wanted;
        let room = self.config.capacity.saturating_sub(self.particles.len());
        let count = (wanted as usize).min(room);
        for _ in 0..count {
            let p = self.spawn(emitter);
            self.particles.push(p);
        }
    }

    fn spawn(&mut self, emitter: Vec3) -> Particle {
        let c = &self.config;
        let half = c.emit_box;
        let offset = Vec3::new(
            self.rng.gen_range(-half..=half),
            self.rng.gen_range(-half..=half),
            self.rng.gen_range(-half..=half),
        );
        let dir = offset.try_normalize().unwrap_or(Vec3::Y);
        Particle {
            position: emitter + offset,
            velocity: dir * c.emit_power,
            size: self.rng.gen_range(c.min_size..=c.max_size),
            age: 0.0,
            lifetime: self.rng.gen_range(c.min_lifetime..=c.max_lifetime),
        }
    }
}

/// Particle side of the tracking cue: emits around the followed object at a
/// rate set from the current audio spectrum.
pub struct ParticleCue {
    system: ParticleSystem,
    emitter: Option<ObjectId>,
    last_emitter_pos: Vec3,
}

impl ParticleCue {
    pub fn new(system: ParticleSystem) -> Self {
        Self {
            system,
            emitter: None,
            last_emitter_pos: Vec3::ZERO,
        }
    }

    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    pub fn emitter(&self) -> Option<ObjectId> {
        self.emitter
    }

    pub fn update(&mut self, dt_sec: f32, spectrum: &[u8], objects: &impl PositionSource) {
        if self.system.is_running() {
            self.system.set_emit_rate(emit_rate_for_spectrum(spectrum));
        }
        if let Some(pos) = self.emitter.and_then(|id| objects.position_of(id)) {
            self.last_emitter_pos = pos;
        }
        self.system.update(dt_sec, self.last_emitter_pos);
    }
}

impl TrackingListener for ParticleCue {
    fn on_tracking_started(&mut self, target: ObjectId) {
        self.emitter = Some(target);
        self.system.start();
    }

    fn on_tracking_stopped(&mut self) {
        self.system.stop();
    }
}
