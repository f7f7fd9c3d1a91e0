use crate::core::CameraController;
use crate::input::{key_command, KeyCommand};
use crate::overlay;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    controller: &Rc<RefCell<CameraController>>,
    paused: &Rc<RefCell<bool>>,
    document: &web::Document,
) {
    let Some(cmd) = key_command(&ev.key()) else {
        return;
    };
    match cmd {
        KeyCommand::ToggleOverlay => {
            overlay::toggle(document);
        }
        KeyCommand::ReturnHome => {
            let mut c = controller.borrow_mut();
            // only meaningful while the camera is away from home
            if c.is_tracking() {
                c.return_home();
            }
        }
        KeyCommand::TogglePause => {
            let mut p = paused.borrow_mut();
            *p = !*p;
            log::info!("[keys] orbit paused={}", *p);
        }
    }
    ev.prevent_default();
}

pub fn wire_global_keydown(
    controller: Rc<RefCell<CameraController>>,
    paused: Rc<RefCell<bool>>,
    document: web::Document,
) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &controller, &paused, &document);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
