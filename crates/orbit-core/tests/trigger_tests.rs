// Host-side tests for hover highlighting and click-to-follow wiring.

use glam::Vec3;
use orbit_core::*;
use std::cell::RefCell;
use std::rc::Rc;

const GLOW: [f32; 3] = [0.2, 0.8, 1.0];

struct Rig {
    scene: Scene,
    planet: ObjectId,
    moon: ObjectId,
    controller: Rc<RefCell<CameraController>>,
    layer: Rc<RefCell<HighlightLayer>>,
    registry: TriggerRegistry,
}

fn rig() -> Rig {
    let scene = Scene::solar_system();
    let planet = scene.find("planet").unwrap();
    let moon = scene.find("moon").unwrap();
    let controller = Rc::new(RefCell::new(
        CameraController::new(ControllerConfig::default()).unwrap(),
    ));
    let layer = Rc::new(RefCell::new(HighlightLayer::new()));
    let mut registry = TriggerRegistry::new();
    for id in [planet, moon] {
        registry.register_hover_highlight(id, &layer, GLOW);
        registry.register_click_to_follow(id, &controller);
    }
    Rig {
        scene,
        planet,
        moon,
        controller,
        layer,
        registry,
    }
}

fn run_until_idle(rig: &mut Rig, pose: &mut Pose) -> usize {
    let mut frames = 0;
    while rig.controller.borrow().is_tracking() {
        frames += 1;
        assert!(frames < 10_000, "controller never went idle");
        rig.scene.advance();
        rig.controller.borrow_mut().on_before_frame(pose, &rig.scene);
    }
    frames
}

#[test]
fn hover_enter_and_leave_toggle_highlight() {
    let mut r = rig();
    r.registry.pointer_moved(Some(r.moon));
    assert_eq!(r.layer.borrow().color_of(r.moon), Some(GLOW));
    assert_eq!(r.registry.hovered(), Some(r.moon));

    r.registry.pointer_moved(Some(r.planet));
    assert!(!r.layer.borrow().contains(r.moon));
    assert!(r.layer.borrow().contains(r.planet));

    r.registry.pointer_left();
    assert!(r.layer.borrow().is_empty());
    assert_eq!(r.registry.hovered(), None);
}

#[test]
fn repeated_moves_over_same_object_do_not_refire() {
    let mut r = rig();
    for _ in 0..5 {
        r.registry.pointer_moved(Some(r.planet));
    }
    assert_eq!(r.layer.borrow().len(), 1);
}

#[test]
fn highlight_layer_add_and_remove_are_idempotent() {
    let mut layer = HighlightLayer::new();
    let id = ObjectId(3);
    layer.remove_object(id);
    assert!(layer.is_empty());
    layer.add_object(id, GLOW);
    layer.add_object(id, [1.0, 0.0, 0.0]);
    assert_eq!(layer.len(), 1);
    assert_eq!(layer.color_of(id), Some(GLOW));
    layer.remove_object(id);
    layer.remove_object(id);
    assert!(layer.is_empty());
}

#[test]
fn click_toggles_between_follow_and_return() {
    let mut r = rig();
    assert!(r.registry.pointer_clicked(Some(r.moon)));
    assert_eq!(r.controller.borrow().followed(), Some(r.moon));

    // a click on a different object still flips back
    assert!(r.registry.pointer_clicked(Some(r.planet)));
    assert!(matches!(
        r.controller.borrow().state(),
        ControllerState::Tracking(MotionGoal::ReturnHome { .. })
    ));

    // clicking while returning home restarts the return, it does not follow
    r.registry.pointer_clicked(Some(r.planet));
    assert_eq!(r.controller.borrow().followed(), None);
}

#[test]
fn click_on_empty_space_does_nothing() {
    let mut r = rig();
    assert!(!r.registry.pointer_clicked(None));
    assert!(!r.registry.pointer_clicked(Some(ObjectId(42))));
    assert!(!r.controller.borrow().is_tracking());
}

#[test]
fn two_clicks_return_camera_to_exact_home_pose() {
    let mut r = rig();
    let mut pose = Pose::home();
    let start = pose;

    r.registry.pointer_clicked(Some(r.moon));
    for _ in 0..250 {
        r.scene.advance();
        r.controller.borrow_mut().on_before_frame(&mut pose, &r.scene);
    }
    assert!(pose.position.distance(start.position) > 1.0);

    r.registry.pointer_clicked(Some(r.moon));
    let frames = run_until_idle(&mut r, &mut pose);
    assert!(frames > 1);
    assert_eq!(pose, start);
}

#[test]
fn bindings_are_recorded_per_object() {
    let r = rig();
    let objects: Vec<ObjectId> = r.registry.bindings().iter().map(|b| b.object).collect();
    assert_eq!(objects, vec![r.planet, r.moon]);
    assert!(r
        .registry
        .bindings()
        .iter()
        .all(|b| Rc::ptr_eq(&b.layer, &r.layer) && b.color == GLOW));
}

#[test]
fn capability_trait_works_with_custom_objects() {
    struct Probe {
        id: ObjectId,
        enter: Vec<Action>,
        leave: Vec<Action>,
        click: Vec<Action>,
    }
    impl PointerActions for Probe {
        fn object_id(&self) -> ObjectId {
            self.id
        }
        fn on_hover_enter(&mut self, action: Action) {
            self.enter.push(action);
        }
        fn on_hover_leave(&mut self, action: Action) {
            self.leave.push(action);
        }
        fn on_click(&mut self, action: Action) {
            self.click.push(action);
        }
    }

    let mut probe = Probe {
        id: ObjectId(9),
        enter: Vec::new(),
        leave: Vec::new(),
        click: Vec::new(),
    };
    let layer = Rc::new(RefCell::new(HighlightLayer::new()));
    let controller = Rc::new(RefCell::new(
        CameraController::new(ControllerConfig::default()).unwrap(),
    ));
    let binding = register_hover_highlight(&mut probe, &layer, GLOW);
    register_click_to_follow(&mut probe, &controller);
    assert_eq!(binding.object, ObjectId(9));

    probe.enter.iter_mut().for_each(|a| a());
    assert!(layer.borrow().contains(ObjectId(9)));
    probe.leave.iter_mut().for_each(|a| a());
    assert!(layer.borrow().is_empty());
    probe.click.iter_mut().for_each(|a| a());
    assert_eq!(controller.borrow().followed(), Some(ObjectId(9)));

    let mut pose = Pose::new(Vec3::new(0.0, 0.0, -20.0), Vec3::ZERO);
    let scene = Scene::new();
    // unknown to this scene: the controller holds instead of moving
    assert_eq!(
        controller.borrow_mut().on_before_frame(&mut pose, &scene),
        StepOutcome::Holding
    );
}

#[test]
fn hover_clears_when_moon_orbits_out_from_under_still_pointer() {
    let mut rig = rig();
    let origin = home_position();
    let toward_moon = (rig.scene.position_of(rig.moon).unwrap() - origin).normalize();

    let picked = rig.registry.hover_ray(&rig.scene, Some((origin, toward_moon)));
    assert_eq!(picked, Some(rig.moon));
    assert!(rig.layer.borrow().contains(rig.moon));

    for _ in 0..2000 {
        rig.scene.advance();
    }
    let picked = rig.registry.hover_ray(&rig.scene, Some((origin, toward_moon)));
    assert_eq!(picked, None);
    assert!(!rig.layer.borrow().contains(rig.moon));
    assert_eq!(rig.registry.hovered(), None);
}

#[test]
fn hover_ray_without_pointer_clears_hover() {
    let mut rig = rig();
    let origin = home_position();
    let dir = (Vec3::ZERO - origin).normalize();
    assert_eq!(rig.registry.hover_ray(&rig.scene, Some((origin, dir))), Some(rig.planet));
    assert!(rig.layer.borrow().contains(rig.planet));
    assert_eq!(rig.registry.hover_ray(&rig.scene, None), None);
    assert!(rig.layer.borrow().is_empty());
}
