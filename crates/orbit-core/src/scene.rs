//! Scene objects the camera can fly to.
//!
//! Objects are sphere-bounded: the renderer draws planets and moons as true
//! spheres and uses the same radius for picking any other object.

use crate::constants::*;
use crate::controller::PositionSource;
use crate::error::CoreError;
use glam::Vec3;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    Planet,
    Moon,
    Mesh,
}

/// Circular orbit around the world origin, tilted about the Z axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orbit {
    pub radius: f32,
    pub tilt: f32,
    /// Angular speed in radians per tick.
    pub speed: f32,
}

impl Default for Orbit {
    fn default() -> Self {
        Self {
            radius: MOON_ORBIT_RADIUS,
            tilt: MOON_ORBIT_TILT,
            speed: MOON_ORBIT_SPEED,
        }
    }
}

impl Orbit {
    pub fn position_at(&self, tick: u64) -> Vec3 {
        let angle = self.speed * tick as f32;
        Vec3::new(
            self.radius * angle.sin() * self.tilt.cos(),
            self.radius * angle.sin() * self.tilt.sin(),
            -self.radius * angle.cos(),
        )
    }
}

#[derive(Clone, Debug)]
pub struct SceneObject {
    pub id: ObjectId,
    pub name: String,
    pub kind: ObjectKind,
    pub position: Vec3,
    pub radius: f32,
    pub color: [f32; 3],
    pub orbit: Option<Orbit>,
    pub pickable: bool,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, kind: ObjectKind, position: Vec3, radius: f32) -> Self {
        Self {
            id: ObjectId(0),
            name: name.into(),
            kind,
            position,
            radius,
            color: [1.0, 1.0, 1.0],
            orbit: None,
            pickable: true,
        }
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn with_orbit(mut self, orbit: Orbit) -> Self {
        self.orbit = Some(orbit);
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    tick: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Planet at the origin with one moon on a tilted orbit.
    pub fn solar_system() -> Self {
        let mut scene = Self::new();
        scene.add_object(
            SceneObject::new("planet", ObjectKind::Planet, Vec3::ZERO, PLANET_DIAMETER * 0.5)
                .with_color(PLANET_COLOR),
        );
        let orbit = Orbit::default();
        scene.add_object(
            SceneObject::new("moon", ObjectKind::Moon, orbit.position_at(0), MOON_DIAMETER * 0.5)
                .with_color(MOON_COLOR)
                .with_orbit(orbit),
        );
        scene
    }

    /// Adds an object and assigns its id.
    pub fn add_object(&mut self, mut object: SceneObject) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        object.id = id;
        log::debug!("[scene] add {} {}", id, object.name);
        self.objects.push(object);
        id
    }

    pub fn object(&self, id: ObjectId) -> Result<&SceneObject, CoreError> {
        self.objects
            .get(id.0 as usize)
            .ok_or(CoreError::UnknownObject(id))
    }

    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.objects.iter().find(|o| o.name == name).map(|o| o.id)
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Moves every orbiting object forward one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        let tick = self.tick;
        for obj in &mut self.objects {
            if let Some(orbit) = obj.orbit {
                obj.position = orbit.position_at(tick);
            }
        }
    }

    /// Nearest pickable object hit by the ray, if any.
    pub fn pick(&self, ray_origin: Vec3, ray_dir: Vec3) -> Option<ObjectId> {
        let mut best = None::<(ObjectId, f32)>;
        for obj in self.objects.iter().filter(|o| o.pickable) {
            if let Some(t) = ray_sphere(ray_origin, ray_dir, obj.position, obj.radius) {
                match best {
                    Some((_, bt)) if t >= bt => {}
                    _ => best = Some((obj.id, t)),
                }
            }
        }
        best.map(|(id, _)| id)
    }
}

impl PositionSource for Scene {
    fn position_of(&self, id: ObjectId) -> Option<Vec3> {
        self.objects.get(id.0 as usize).map(|o| o.position)
    }
}

#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}
