//! Camera motion controller.
//!
//! A controller owns at most one per-frame update registration. While it is
//! registered the host calls [`CameraController::on_before_frame`] once per
//! rendered frame and the camera [`Pose`] is moved a bounded step toward the
//! active [`MotionGoal`]:
//!
//! - `FollowTarget` trails a moving object at a fixed distance and never
//!   finishes on its own.
//! - `ReturnHome` flies back to the configured home pose, snaps onto it once
//!   closer than the arrival epsilon and then deregisters.
//!
//! Registering a new goal always revokes the previous handle first, so two
//! updates can never write the pose in the same frame.

use crate::constants::*;
use crate::error::CoreError;
use crate::scene::ObjectId;
use crate::state::Pose;
use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;

/// Looks up the current world position of a scene object.
pub trait PositionSource {
    fn position_of(&self, id: ObjectId) -> Option<Vec3>;
}

/// Notified when the camera starts or stops following an object.
pub trait TrackingListener {
    fn on_tracking_started(&mut self, target: ObjectId);
    fn on_tracking_stopped(&mut self);
}

impl<T: TrackingListener> TrackingListener for Rc<RefCell<T>> {
    fn on_tracking_started(&mut self, target: ObjectId) {
        self.borrow_mut().on_tracking_started(target);
    }
    fn on_tracking_stopped(&mut self) {
        self.borrow_mut().on_tracking_stopped();
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ControllerConfig {
    pub desired_distance: f32,
    /// Maximum camera displacement per frame.
    pub max_speed: f32,
    pub home_position: Vec3,
    pub home_target: Vec3,
    pub arrival_epsilon: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            desired_distance: DEFAULT_DESIRED_DISTANCE,
            max_speed: DEFAULT_MAX_SPEED,
            home_position: home_position(),
            home_target: home_target(),
            arrival_epsilon: ARRIVAL_EPSILON,
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> Result<(), CoreError> {
        positive("max_speed", self.max_speed)?;
        positive("arrival_epsilon", self.arrival_epsilon)?;
        if !(self.desired_distance.is_finite() && self.desired_distance >= 0.0) {
            return Err(CoreError::InvalidConfig {
                field: "desired_distance",
                requirement: "finite and non-negative",
                value: self.desired_distance,
            });
        }
        for (field, v) in [
            ("home_position", self.home_position),
            ("home_target", self.home_target),
        ] {
            if !v.is_finite() {
                return Err(CoreError::InvalidConfig {
                    field,
                    requirement: "finite",
                    value: f32::NAN,
                });
            }
        }
        Ok(())
    }

    pub fn home_pose(&self) -> Pose {
        Pose::new(self.home_position, self.home_target)
    }
}

pub(crate) fn positive(field: &'static str, value: f32) -> Result<(), CoreError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CoreError::InvalidConfig {
            field,
            requirement: "finite and positive",
            value,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotionGoal {
    FollowTarget {
        target: ObjectId,
        desired_distance: f32,
        max_speed: f32,
    },
    ReturnHome {
        desired_position: Vec3,
        desired_target: Vec3,
        max_speed: f32,
    },
}

/// Token for the live per-frame registration. Not `Clone`: it can only be
/// revoked once, by value.
#[derive(Debug, PartialEq, Eq)]
pub struct UpdateHandle {
    id: u64,
}

impl UpdateHandle {
    pub fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControllerState {
    Idle,
    Tracking(MotionGoal),
}

/// What a single frame did to the pose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepOutcome {
    /// Nothing registered; the pose was not touched.
    Idle,
    /// The pose moved by the given distance.
    Moved(f32),
    /// Registered, but no positional step was needed or possible this frame.
    Holding,
    /// Reached home: pose snapped exactly and the update deregistered.
    Arrived,
}

#[derive(Debug)]
struct Registration {
    handle: UpdateHandle,
    goal: MotionGoal,
}

pub struct CameraController {
    config: ControllerConfig,
    active: Option<Registration>,
    next_handle: u64,
    listener: Option<Box<dyn TrackingListener>>,
}

impl CameraController {
    pub fn new(config: ControllerConfig) -> Result<Self, CoreError> {
        config.validate()?;
        Ok(Self {
            config,
            active: None,
            next_handle: 1,
            listener: None,
        })
    }

    pub fn set_listener(&mut self, listener: impl TrackingListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn state(&self) -> ControllerState {
        match &self.active {
            Some(reg) => ControllerState::Tracking(reg.goal),
            None => ControllerState::Idle,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.active.is_some()
    }

    /// Object currently being followed, if any.
    pub fn followed(&self) -> Option<ObjectId> {
        match self.active.as_ref().map(|r| r.goal) {
            Some(MotionGoal::FollowTarget { target, .. }) => Some(target),
            _ => None,
        }
    }

    pub fn handle(&self) -> Option<&UpdateHandle> {
        self.active.as_ref().map(|r| &r.handle)
    }

    /// Number of live per-frame registrations: always 0 or 1.
    pub fn registration_count(&self) -> usize {
        usize::from(self.active.is_some())
    }

    pub fn follow_target(&mut self, target: ObjectId) {
        self.register(MotionGoal::FollowTarget {
            target,
            desired_distance: self.config.desired_distance,
            max_speed: self.config.max_speed,
        });
        log::info!("[camera] follow {}", target);
        if let Some(l) = self.listener.as_mut() {
            l.on_tracking_started(target);
        }
    }

    pub fn return_home(&mut self) {
        let was_following = self.followed().is_some();
        self.register(MotionGoal::ReturnHome {
            desired_position: self.config.home_position,
            desired_target: self.config.home_target,
            max_speed: self.config.max_speed,
        });
        log::info!("[camera] return home");
        if was_following {
            if let Some(l) = self.listener.as_mut() {
                l.on_tracking_stopped();
            }
        }
    }

    /// Runs the registered update, if any, for one frame.
    pub fn on_before_frame(&mut self, pose: &mut Pose, objects: &impl PositionSource) -> StepOutcome {
        let Some(goal) = self.active.as_ref().map(|r| r.goal) else {
            return StepOutcome::Idle;
        };
        match goal {
            MotionGoal::FollowTarget {
                target,
                desired_distance,
                max_speed,
            } => {
                let Some(object_pos) = objects.position_of(target) else {
                    log::warn!("[camera] followed object {} is gone", target);
                    return StepOutcome::Holding;
                };
                follow_step(pose, object_pos, desired_distance, max_speed)
            }
            MotionGoal::ReturnHome {
                desired_position,
                desired_target,
                max_speed,
            } => {
                if pose.position.distance(desired_position) < self.config.arrival_epsilon {
                    pose.position = desired_position;
                    pose.target = desired_target;
                    self.unregister();
                    log::info!("[camera] arrived home");
                    return StepOutcome::Arrived;
                }
                match step_toward(pose, desired_position, desired_target, max_speed) {
                    Some(d) => StepOutcome::Moved(d),
                    None => StepOutcome::Holding,
                }
            }
        }
    }

    fn register(&mut self, goal: MotionGoal) {
        self.unregister();
        let handle = UpdateHandle {
            id: self.next_handle,
        };
        self.next_handle += 1;
        log::debug!("[camera] register update {}", handle.id);
        self.active = Some(Registration { handle, goal });
    }

    fn unregister(&mut self) {
        // Dropping the handle is the revocation
        if let Some(reg) = self.active.take() {
            log::debug!("[camera] revoke update {}", reg.handle.id);
        }
    }
}

/// Moves `pose` one bounded step toward the desired pose.
///
/// The position advances by `min(max_speed, distance)` and the target moves
/// the same fraction of its remaining distance, so both arrive together.
/// Returns the distance moved, or `None` when the position already coincides
/// with the goal (nothing is normalized in that case).
pub fn step_toward(
    pose: &mut Pose,
    desired_position: Vec3,
    desired_target: Vec3,
    max_speed: f32,
) -> Option<f32> {
    let offset = desired_position - pose.position;
    let current_distance = offset.length();
    if !(current_distance > 0.0) {
        return None;
    }
    let step = max_speed.min(current_distance);
    let direction = offset.try_normalize()?;
    pose.position += direction * step;

    let target_offset = desired_target - pose.target;
    if let Some(target_dir) = target_offset.try_normalize() {
        let ratio = step / current_distance;
        pose.target += target_dir * (ratio * target_offset.length());
    }
    Some(step)
}

/// Point `desired_distance` away from the object along the current
/// camera-to-object line. `None` when the camera sits on the object.
pub fn follow_position(camera: Vec3, object: Vec3, desired_distance: f32) -> Option<Vec3> {
    let away = (camera - object).try_normalize()?;
    Some(object + away * desired_distance)
}

fn follow_step(pose: &mut Pose, object_pos: Vec3, desired_distance: f32, max_speed: f32) -> StepOutcome {
    let Some(desired_position) = follow_position(pose.position, object_pos, desired_distance) else {
        return StepOutcome::Holding;
    };
    match step_toward(pose, desired_position, object_pos, max_speed) {
        Some(d) => StepOutcome::Moved(d),
        None => {
            // position already on the goal; lockstep means the target is too
            pose.target = object_pos;
            StepOutcome::Holding
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_toward_zero_offset_leaves_pose_alone() {
        let mut pose = Pose::new(Vec3::ONE, Vec3::ZERO);
        assert_eq!(step_toward(&mut pose, Vec3::ONE, Vec3::X, 0.2), None);
        assert_eq!(pose, Pose::new(Vec3::ONE, Vec3::ZERO));
        assert!(pose.position.is_finite() && pose.target.is_finite());
    }

    #[test]
    fn step_toward_does_not_overshoot_short_distance() {
        let mut pose = Pose::new(Vec3::ZERO, Vec3::ZERO);
        let moved = step_toward(&mut pose, Vec3::new(0.05, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), 0.2);
        assert!((moved.unwrap() - 0.05).abs() < 1e-6);
        assert!((pose.position.x - 0.05).abs() < 1e-6);
        // full remaining fraction -> target lands on its goal as well
        assert!(pose.target.distance(Vec3::Y) < 1e-6);
    }

    #[test]
    fn follow_position_on_object_is_none() {
        assert!(follow_position(Vec3::ONE, Vec3::ONE, 5.0).is_none());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = ControllerConfig {
            max_speed: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            CameraController::new(cfg),
            Err(CoreError::InvalidConfig { field: "max_speed", .. })
        ));
    }
}
