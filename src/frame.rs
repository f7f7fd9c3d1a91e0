use crate::audio::AudioCue;
use crate::camera;
use crate::core::{
    Camera, CameraController, ControllerState, HighlightLayer, MotionGoal, ObjectId, Scene,
    StepOutcome, TriggerRegistry,
};
use crate::dom;
use crate::overlay;
use crate::render;
use glam::Vec2;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// Longest step fed to the particle simulation after a stall (tab hidden etc.)
const MAX_FRAME_DT_SEC: f32 = 0.1;

/// What the hint overlay last showed, so the DOM is only touched on change.
#[derive(Clone, Copy, PartialEq, Eq)]
struct HintState {
    followed: Option<ObjectId>,
    returning: bool,
}

impl HintState {
    fn of(controller: &CameraController) -> Self {
        Self {
            followed: controller.followed(),
            returning: matches!(
                controller.state(),
                ControllerState::Tracking(MotionGoal::ReturnHome { .. })
            ),
        }
    }
}

pub struct FrameContext<'a> {
    pub scene: Rc<RefCell<Scene>>,
    pub camera: Rc<RefCell<Camera>>,
    pub controller: Rc<RefCell<CameraController>>,
    pub cue: Rc<RefCell<AudioCue>>,
    pub highlight: Rc<RefCell<HighlightLayer>>,
    pub registry: Rc<RefCell<TriggerRegistry>>,
    pub pointer_px: Rc<RefCell<Option<Vec2>>>,
    pub paused: Rc<RefCell<bool>>,

    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub gpu: Option<render::GpuState<'a>>,

    pub last_instant: Instant,
    hint: Option<HintState>,
}

impl<'a> FrameContext<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        scene: Rc<RefCell<Scene>>,
        camera: Rc<RefCell<Camera>>,
        controller: Rc<RefCell<CameraController>>,
        cue: Rc<RefCell<AudioCue>>,
        highlight: Rc<RefCell<HighlightLayer>>,
        registry: Rc<RefCell<TriggerRegistry>>,
        pointer_px: Rc<RefCell<Option<Vec2>>>,
        paused: Rc<RefCell<bool>>,
        canvas: web::HtmlCanvasElement,
        document: web::Document,
        gpu: Option<render::GpuState<'a>>,
    ) -> Self {
        Self {
            scene,
            camera,
            controller,
            cue,
            highlight,
            registry,
            pointer_px,
            paused,
            canvas,
            document,
            gpu,
            last_instant: Instant::now(),
            hint: None,
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_instant = now;

        if !*self.paused.borrow() {
            self.scene.borrow_mut().advance();
        }

        // Camera motion runs before the frame is drawn
        let outcome = {
            let scene = self.scene.borrow();
            let mut camera = self.camera.borrow_mut();
            self.controller
                .borrow_mut()
                .on_before_frame(&mut camera.pose, &*scene)
        };
        if outcome == StepOutcome::Arrived {
            log::debug!("[frame] camera settled at home");
        }

        self.cue.borrow_mut().tick(dt_sec, &*self.scene.borrow());
        self.refresh_hint();

        let w = self.canvas.width();
        let h = self.canvas.height();
        self.camera.borrow_mut().set_viewport(w, h);
        self.refresh_hover();

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(w, h);
            let scene = self.scene.borrow();
            let camera = self.camera.borrow();
            let highlight = self.highlight.borrow();
            let cue = self.cue.borrow();
            let inputs = render::FrameInputs {
                camera: &camera,
                scene: &scene,
                highlight: &highlight,
                particles: cue.particles(),
            };
            if let Err(e) = g.render(dt_sec, inputs) {
                log::error!("render error: {:?}", e);
            }
        }
    }

    // Objects and the camera move under a still pointer; re-pick each frame
    fn refresh_hover(&self) {
        let Some(px) = *self.pointer_px.borrow() else {
            return;
        };
        let ray = camera::screen_to_world_ray(&self.canvas, px, &self.camera.borrow());
        let picked = self
            .registry
            .borrow_mut()
            .hover_ray(&self.scene.borrow(), Some(ray));
        dom::set_canvas_cursor(&self.canvas, picked.is_some());
    }

    fn refresh_hint(&mut self) {
        let state = HintState::of(&self.controller.borrow());
        if self.hint == Some(state) {
            return;
        }
        self.hint = Some(state);
        let scene = self.scene.borrow();
        let name = state
            .followed
            .and_then(|id| scene.object(id).ok())
            .map(|o| o.name.as_str());
        overlay::update_hint(&self.document, name, state.returning);
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
