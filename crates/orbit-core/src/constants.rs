use glam::Vec3;

// Shared scene/camera tuning constants used by the web frontend.

// Camera motion
pub const DEFAULT_DESIRED_DISTANCE: f32 = 5.0; // follow distance from the tracked object
pub const DEFAULT_MAX_SPEED: f32 = 0.2; // world units per frame
pub const ARRIVAL_EPSILON: f32 = 1e-3; // below this the camera snaps onto the home pose
pub const HOME_POSITION: [f32; 3] = [0.0, 5.0, -50.0];
pub const HOME_TARGET: [f32; 3] = [0.0, 0.0, 0.0];

// Projection
pub const CAMERA_FOVY_RADIANS: f32 = 0.8; // matches the flycam default
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Scene layout
pub const PLANET_DIAMETER: f32 = 4.0;
pub const MOON_DIAMETER: f32 = 1.0;
pub const MOON_ORBIT_RADIUS: f32 = 30.0;
pub const MOON_ORBIT_TILT: f32 = -0.2; // radians
pub const MOON_ORBIT_SPEED: f32 = 0.001; // radians per tick

pub const PLANET_COLOR: [f32; 3] = [0.45, 0.55, 0.75];
pub const MOON_COLOR: [f32; 3] = [0.8, 0.78, 0.72];

// Particles
pub const PARTICLE_CAPACITY: usize = 2000;
pub const PARTICLE_MIN_SIZE: f32 = 0.01;
pub const PARTICLE_MAX_SIZE: f32 = 0.1;
pub const PARTICLE_MIN_LIFETIME: f32 = 1.0; // seconds
pub const PARTICLE_MAX_LIFETIME: f32 = 1.5;
pub const PARTICLE_EMIT_BOX: f32 = 0.5; // half-extent around the emitter
pub const PARTICLE_EMIT_POWER: f32 = 1.0; // initial speed, units per second

// Spectrum -> emit rate logistic curve
pub const EMIT_RATE_MAX: f32 = 2000.0;
pub const EMIT_RATE_MIDPOINT: f32 = 61.0; // average byte magnitude at half rate

#[inline]
pub fn home_position() -> Vec3 {
    Vec3::from_array(HOME_POSITION)
}

#[inline]
pub fn home_target() -> Vec3 {
    Vec3::from_array(HOME_TARGET)
}
