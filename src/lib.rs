#![cfg(target_arch = "wasm32")]
use crate::audio::AudioCue;
use crate::constants::*;
use crate::core::{
    Camera, CameraController, ControllerConfig, HighlightLayer, ObjectKind, Scene, TriggerRegistry,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod camera;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn wire_overlay_buttons(audio_ctx: &web::AudioContext) {
    if let Some(doc) = dom::window_document() {
        for id in [OVERLAY_OK_ID, OVERLAY_CLOSE_ID] {
            let audio = audio_ctx.clone();
            dom::add_click_listener(&doc, id, move || {
                // Browsers only allow audio after a user gesture
                _ = audio.resume();
                if let Some(d) = dom::window_document() {
                    overlay::hide(&d);
                }
            });
        }
    }
}

/// Hover highlight and click-to-follow on every planet and moon.
fn wire_triggers(
    scene: &Scene,
    registry: &mut TriggerRegistry,
    highlight: &Rc<RefCell<HighlightLayer>>,
    controller: &Rc<RefCell<CameraController>>,
) -> anyhow::Result<()> {
    for (name, color) in [("planet", PLANET_HIGHLIGHT), ("moon", MOON_HIGHLIGHT)] {
        let id = scene
            .find(name)
            .ok_or_else(|| anyhow::anyhow!("scene has no object named {:?}", name))?;
        let obj = scene.object(id)?;
        if !matches!(obj.kind, ObjectKind::Planet | ObjectKind::Moon) {
            log::warn!("[init] {} is not a celestial body; skipping triggers", obj.name);
            continue;
        }
        registry.register_hover_highlight(id, highlight, color);
        registry.register_click_to_follow(id, controller);
    }
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("orbit-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let audio_ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let cue = Rc::new(RefCell::new(AudioCue::new(audio_ctx.clone(), TRACK_URL)?));

    let scene = Rc::new(RefCell::new(Scene::solar_system()));
    let camera = Rc::new(RefCell::new(Camera::default()));
    let mut controller = CameraController::new(ControllerConfig::default())
        .map_err(|e| anyhow::anyhow!("camera controller: {}", e))?;
    controller.set_listener(cue.clone());
    let controller = Rc::new(RefCell::new(controller));
    let paused = Rc::new(RefCell::new(false));

    let highlight = Rc::new(RefCell::new(HighlightLayer::new()));
    let registry = Rc::new(RefCell::new(TriggerRegistry::new()));
    wire_triggers(
        &scene.borrow(),
        &mut registry.borrow_mut(),
        &highlight,
        &controller,
    )?;
    log::info!(
        "[init] {} objects, {} hover bindings",
        scene.borrow().objects().len(),
        registry.borrow().bindings().len()
    );

    wire_overlay_buttons(&audio_ctx);
    overlay::update_hint(&document, None, false);
    events::wire_global_keydown(controller.clone(), paused.clone(), document.clone());
    let pointer_px = Rc::new(RefCell::new(None));
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        scene: scene.clone(),
        camera: camera.clone(),
        registry: registry.clone(),
        pointer_px: pointer_px.clone(),
    });

    let gpu = frame::init_gpu(&canvas).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
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
    )));
    frame::start_loop(frame_ctx);

    Ok(())
}
