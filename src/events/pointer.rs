use crate::camera;
use crate::core::{Camera, Scene, TriggerRegistry};
use crate::dom;
use crate::input;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub scene: Rc<RefCell<Scene>>,
    pub camera: Rc<RefCell<Camera>>,
    pub registry: Rc<RefCell<TriggerRegistry>>,
    /// Last pointer position in canvas pixels; `None` while outside.
    pub pointer_px: Rc<RefCell<Option<Vec2>>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerleave(&w);
    wire_pointerup(&w);
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_px(&ev, &w.canvas);
        *w.pointer_px.borrow_mut() = Some(pos);
        let ray = camera::screen_to_world_ray(&w.canvas, pos, &w.camera.borrow());
        let picked = w
            .registry
            .borrow_mut()
            .hover_ray(&w.scene.borrow(), Some(ray));
        dom::set_canvas_cursor(&w.canvas, picked.is_some());
    }) as Box<dyn FnMut(_)>);

    _ = canvas_for_listener
        .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerleave(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        *w.pointer_px.borrow_mut() = None;
        w.registry.borrow_mut().pointer_left();
        dom::set_canvas_cursor(&w.canvas, false);
    }) as Box<dyn FnMut(_)>);

    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_px(&ev, &w.canvas);
        let picked = camera::pick_at(&w.canvas, pos, &w.camera.borrow(), &w.scene.borrow());
        if w.registry.borrow_mut().pointer_clicked(picked) {
            ev.prevent_default();
        }
    }) as Box<dyn FnMut(_)>);

    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    closure.forget();
}
