//! Pointer triggers: hover highlighting and click-to-follow.
//!
//! Objects expose the [`PointerActions`] capability; the registry attaches
//! behavior through it without knowing how the object is drawn or picked.
//! [`TriggerRegistry`] keeps one [`ActionManager`] per object and turns raw
//! pick results from the frontend into enter/leave/click events.

use crate::controller::CameraController;
use crate::scene::{ObjectId, Scene};
use fnv::FnvHashMap;
use glam::Vec3;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;

pub type Action = Box<dyn FnMut()>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerTrigger {
    HoverEnter,
    HoverLeave,
    Click,
}

pub trait PointerActions {
    fn object_id(&self) -> ObjectId;
    fn on_hover_enter(&mut self, action: Action);
    fn on_hover_leave(&mut self, action: Action);
    fn on_click(&mut self, action: Action);
}

/// Actions registered against a single object.
pub struct ActionManager {
    object: ObjectId,
    actions: SmallVec<[(PointerTrigger, Action); 3]>,
}

impl ActionManager {
    pub fn new(object: ObjectId) -> Self {
        Self {
            object,
            actions: SmallVec::new(),
        }
    }

    /// Runs every action bound to `trigger`; returns how many ran.
    pub fn fire(&mut self, trigger: PointerTrigger) -> usize {
        let mut ran = 0;
        for (t, action) in self.actions.iter_mut() {
            if *t == trigger {
                action();
                ran += 1;
            }
        }
        ran
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl PointerActions for ActionManager {
    fn object_id(&self) -> ObjectId {
        self.object
    }
    fn on_hover_enter(&mut self, action: Action) {
        self.actions.push((PointerTrigger::HoverEnter, action));
    }
    fn on_hover_leave(&mut self, action: Action) {
        self.actions.push((PointerTrigger::HoverLeave, action));
    }
    fn on_click(&mut self, action: Action) {
        self.actions.push((PointerTrigger::Click, action));
    }
}

/// Objects currently drawn with a highlight glow, with their tint.
#[derive(Clone, Debug, Default)]
pub struct HighlightLayer {
    entries: SmallVec<[(ObjectId, [f32; 3]); 4]>,
}

impl HighlightLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// No-op if the object is already highlighted.
    pub fn add_object(&mut self, object: ObjectId, color: [f32; 3]) {
        if !self.contains(object) {
            self.entries.push((object, color));
        }
    }

    /// No-op if the object is not highlighted.
    pub fn remove_object(&mut self, object: ObjectId) {
        self.entries.retain(|(id, _)| *id != object);
    }

    pub fn contains(&self, object: ObjectId) -> bool {
        self.entries.iter().any(|(id, _)| *id == object)
    }

    pub fn color_of(&self, object: ObjectId) -> Option<[f32; 3]> {
        self.entries
            .iter()
            .find(|(id, _)| *id == object)
            .map(|(_, c)| *c)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Record of a hover highlight wired at scene-build time.
#[derive(Clone, Debug)]
pub struct TriggerBinding {
    pub object: ObjectId,
    pub layer: Rc<RefCell<HighlightLayer>>,
    pub color: [f32; 3],
}

pub fn register_hover_highlight(
    object: &mut impl PointerActions,
    layer: &Rc<RefCell<HighlightLayer>>,
    color: [f32; 3],
) -> TriggerBinding {
    let id = object.object_id();
    let enter_layer = layer.clone();
    object.on_hover_enter(Box::new(move || {
        enter_layer.borrow_mut().add_object(id, color);
    }));
    let leave_layer = layer.clone();
    object.on_hover_leave(Box::new(move || {
        leave_layer.borrow_mut().remove_object(id);
    }));
    TriggerBinding {
        object: id,
        layer: layer.clone(),
        color,
    }
}

/// Clicking toggles the controller: return home while it has an active
/// update, otherwise start following this object.
pub fn register_click_to_follow(
    object: &mut impl PointerActions,
    controller: &Rc<RefCell<CameraController>>,
) {
    let id = object.object_id();
    let controller = controller.clone();
    object.on_click(Box::new(move || {
        let mut c = controller.borrow_mut();
        if c.is_tracking() {
            c.return_home();
        } else {
            c.follow_target(id);
        }
    }));
}

#[derive(Default)]
pub struct TriggerRegistry {
    managers: FnvHashMap<ObjectId, ActionManager>,
    bindings: Vec<TriggerBinding>,
    hovered: Option<ObjectId>,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actions_mut(&mut self, object: ObjectId) -> &mut ActionManager {
        self.managers
            .entry(object)
            .or_insert_with(|| ActionManager::new(object))
    }

    pub fn register_hover_highlight(
        &mut self,
        object: ObjectId,
        layer: &Rc<RefCell<HighlightLayer>>,
        color: [f32; 3],
    ) {
        let binding = register_hover_highlight(self.actions_mut(object), layer, color);
        log::debug!("[trigger] hover highlight on {}", object);
        self.bindings.push(binding);
    }

    pub fn register_click_to_follow(
        &mut self,
        object: ObjectId,
        controller: &Rc<RefCell<CameraController>>,
    ) {
        register_click_to_follow(self.actions_mut(object), controller);
        log::debug!("[trigger] click to follow on {}", object);
    }

    pub fn bindings(&self) -> &[TriggerBinding] {
        &self.bindings
    }

    pub fn hovered(&self) -> Option<ObjectId> {
        self.hovered
    }

    /// Fires `trigger` on `object`; returns how many actions ran.
    pub fn dispatch(&mut self, object: ObjectId, trigger: PointerTrigger) -> usize {
        self.managers
            .get_mut(&object)
            .map(|m| m.fire(trigger))
            .unwrap_or(0)
    }

    /// Feed the object under the pointer after a move; emits leave on the
    /// previous object and enter on the new one when they differ.
    pub fn pointer_moved(&mut self, picked: Option<ObjectId>) {
        if picked == self.hovered {
            return;
        }
        if let Some(prev) = self.hovered.take() {
            self.dispatch(prev, PointerTrigger::HoverLeave);
        }
        if let Some(next) = picked {
            self.dispatch(next, PointerTrigger::HoverEnter);
        }
        self.hovered = picked;
    }

    /// Re-picks along a world-space ray against the scene as it is now and
    /// updates hover. Run once per frame so objects that move out from
    /// under a still pointer lose their highlight. `None` means no pointer.
    pub fn hover_ray(&mut self, scene: &Scene, ray: Option<(Vec3, Vec3)>) -> Option<ObjectId> {
        let picked = ray.and_then(|(origin, dir)| scene.pick(origin, dir));
        self.pointer_moved(picked);
        picked
    }

    pub fn pointer_left(&mut self) {
        self.pointer_moved(None);
    }

    /// Returns true when the click landed on an object with click actions.
    pub fn pointer_clicked(&mut self, picked: Option<ObjectId>) -> bool {
        match picked {
            Some(id) => {
                let ran = self.dispatch(id, PointerTrigger::Click);
                if ran > 0 {
                    log::info!("[trigger] click {}", id);
                }
                ran > 0
            }
            None => false,
        }
    }
}
