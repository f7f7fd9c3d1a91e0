// Host-side tests for the camera motion controller.

use glam::Vec3;
use orbit_core::*;
use std::cell::RefCell;
use std::rc::Rc;

fn controller() -> CameraController {
    CameraController::new(ControllerConfig::default()).unwrap()
}

fn scene_with_object_at(pos: Vec3) -> (Scene, ObjectId) {
    let mut scene = Scene::new();
    let id = scene.add_object(SceneObject::new("probe", ObjectKind::Mesh, pos, 0.5));
    (scene, id)
}

#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl TrackingListener for Recorder {
    fn on_tracking_started(&mut self, target: ObjectId) {
        self.events.push(format!("start {}", target.0));
    }
    fn on_tracking_stopped(&mut self) {
        self.events.push("stop".to_string());
    }
}

#[test]
fn first_follow_frame_moves_exactly_max_speed_toward_object() {
    let (scene, id) = scene_with_object_at(Vec3::new(10.0, 0.0, 0.0));
    let mut c = controller();
    let mut pose = Pose::home();
    let old = pose.position;
    let object = Vec3::new(10.0, 0.0, 0.0);
    let desired = object + (old - object).normalize() * 5.0;

    c.follow_target(id);
    let outcome = c.on_before_frame(&mut pose, &scene);

    assert!(matches!(outcome, StepOutcome::Moved(d) if (d - 0.2).abs() < 1e-6));
    let moved = pose.position - old;
    assert!((moved.length() - 0.2).abs() < 1e-5, "moved {}", moved.length());
    let along = (object - old).normalize();
    assert!(moved.normalize().distance(along) < 1e-4);
    let before = old.distance(desired);
    let after = pose.position.distance(desired);
    assert!((before - after - 0.2).abs() < 1e-4);
}

#[test]
fn every_frame_is_bounded_and_never_overshoots() {
    let mut scene = Scene::solar_system();
    let moon = scene.find("moon").unwrap();
    let mut c = controller();
    let mut pose = Pose::home();
    c.follow_target(moon);

    for frame in 0..600 {
        if frame == 400 {
            c.return_home();
        }
        scene.advance();
        let old = pose.position;
        let desired = match c.state() {
            ControllerState::Tracking(MotionGoal::FollowTarget { .. }) => {
                let obj = scene.position_of(moon).unwrap();
                follow_position(old, obj, 5.0).unwrap()
            }
            _ => c.config().home_position,
        };
        c.on_before_frame(&mut pose, &scene);
        let step = pose.position.distance(old);
        assert!(step <= 0.2 + 1e-5, "frame {frame}: step {step}");
        assert!(
            pose.position.distance(desired) <= old.distance(desired) + 1e-5,
            "frame {frame}: moved away from goal"
        );
        assert!(pose.position.is_finite() && pose.target.is_finite());
    }
}

#[test]
fn return_home_converges_position_and_target_in_lockstep() {
    let scene = Scene::new();
    let mut c = controller();
    let home = c.config().home_pose();
    let mut pose = Pose::new(Vec3::new(12.0, -3.0, 4.0), Vec3::new(-2.0, 7.0, 1.0));
    let ratio = pose.target.distance(home.target) / pose.position.distance(home.position);

    c.return_home();
    let mut frames = 0;
    loop {
        frames += 1;
        assert!(frames < 10_000, "never arrived");
        match c.on_before_frame(&mut pose, &scene) {
            StepOutcome::Moved(_) => {
                let pos_left = pose.position.distance(home.position);
                let tgt_left = pose.target.distance(home.target);
                assert!(
                    (tgt_left - ratio * pos_left).abs() < 1e-3,
                    "frame {frames}: target {tgt_left} vs position {pos_left}"
                );
            }
            StepOutcome::Arrived => break,
            other => panic!("unexpected outcome {other:?}"),
        }
    }
    assert_eq!(pose, home);
    assert_eq!(c.state(), ControllerState::Idle);
}

#[test]
fn near_home_snaps_exactly_and_deregisters() {
    let scene = Scene::new();
    let mut c = controller();
    let home = Pose::home();
    let mut pose = Pose::new(
        home.position + Vec3::new(0.0005, 0.0, 0.0),
        Vec3::new(0.0, 0.0001, 0.0),
    );

    c.return_home();
    assert_eq!(c.on_before_frame(&mut pose, &scene), StepOutcome::Arrived);
    assert_eq!(pose, home);
    assert_eq!(c.state(), ControllerState::Idle);
    assert!(c.handle().is_none());

    assert_eq!(c.on_before_frame(&mut pose, &scene), StepOutcome::Idle);
    assert_eq!(pose, home);
}

#[test]
fn follow_never_terminates_and_settles_at_desired_distance() {
    let object = Vec3::new(3.0, 1.0, -8.0);
    let (scene, id) = scene_with_object_at(object);
    let mut c = controller();
    let mut pose = Pose::home();
    c.follow_target(id);

    for _ in 0..2_000 {
        c.on_before_frame(&mut pose, &scene);
    }
    assert!(c.is_tracking());
    assert_eq!(c.followed(), Some(id));
    assert!((pose.position.distance(object) - 5.0).abs() < 1e-3);
    assert!(pose.target.distance(object) < 1e-3);
}

#[test]
fn at_most_one_registration_after_any_call_sequence() {
    let (scene, id) = scene_with_object_at(Vec3::X * 20.0);
    let mut c = controller();
    let mut pose = Pose::home();
    assert_eq!(c.registration_count(), 0);

    let mut last_handle = 0;
    for i in 0..10 {
        if i % 3 == 0 {
            c.return_home();
        } else {
            c.follow_target(id);
        }
        assert_eq!(c.registration_count(), 1);
        let h = c.handle().unwrap().id();
        assert!(h > last_handle, "each registration gets a fresh handle");
        last_handle = h;
        c.on_before_frame(&mut pose, &scene);
        assert!(c.registration_count() <= 1);
    }
}

#[test]
fn return_home_replaces_follow_goal() {
    let (_scene, id) = scene_with_object_at(Vec3::X * 20.0);
    let mut c = controller();
    c.follow_target(id);
    c.return_home();
    assert!(matches!(
        c.state(),
        ControllerState::Tracking(MotionGoal::ReturnHome { .. })
    ));
    assert_eq!(c.followed(), None);
}

#[test]
fn listener_hears_start_and_stop() {
    let (_scene, id) = scene_with_object_at(Vec3::X * 20.0);
    let rec = Rc::new(RefCell::new(Recorder::default()));
    let mut c = controller();
    c.set_listener(rec.clone());

    c.return_home(); // from idle: nothing to stop
    c.follow_target(id);
    c.return_home();
    c.return_home(); // already returning

    assert_eq!(rec.borrow().events, vec!["start 0".to_string(), "stop".to_string()]);
}

#[test]
fn missing_object_holds_pose() {
    let scene = Scene::new();
    let mut c = controller();
    let mut pose = Pose::home();
    c.follow_target(ObjectId(7));
    assert_eq!(c.on_before_frame(&mut pose, &scene), StepOutcome::Holding);
    assert_eq!(pose, Pose::home());
    assert!(c.is_tracking());
}

#[test]
fn camera_inside_object_does_not_produce_nan() {
    let home = Pose::home();
    let (scene, id) = scene_with_object_at(home.position);
    let mut c = controller();
    let mut pose = home;
    c.follow_target(id);
    assert_eq!(c.on_before_frame(&mut pose, &scene), StepOutcome::Holding);
    assert!(pose.position.is_finite() && pose.target.is_finite());
}

#[test]
fn invalid_configs_are_reported() {
    let bad = [
        ControllerConfig {
            max_speed: -1.0,
            ..Default::default()
        },
        ControllerConfig {
            arrival_epsilon: 0.0,
            ..Default::default()
        },
        ControllerConfig {
            desired_distance: f32::NAN,
            ..Default::default()
        },
        ControllerConfig {
            home_position: Vec3::new(f32::INFINITY, 0.0, 0.0),
            ..Default::default()
        },
    ];
    for cfg in bad {
        assert!(CameraController::new(cfg).is_err());
    }
}
