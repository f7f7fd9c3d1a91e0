use crate::constants::{HINT_OVERLAY_ID, START_OVERLAY_ID};
use web_sys as web;

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(START_OVERLAY_ID) {
        _ = el.class_list().remove_1("hidden");
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(START_OVERLAY_ID) {
        _ = el.class_list().add_1("hidden");
        // fallback
        _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    if let Some(el) = document.get_element_by_id(START_OVERLAY_ID) {
        if el.class_list().contains("hidden") {
            return true;
        }
        return el
            .get_attribute("style")
            .map(|s| s.contains("display:none"))
            .unwrap_or(false);
    }
    false
}

#[inline]
pub fn toggle(document: &web::Document) {
    if is_hidden(document) {
        show(document);
    } else {
        hide(document);
    }
}

/// Status line text for the hint overlay.
pub fn hint_text(followed: Option<&str>, returning: bool) -> String {
    match (followed, returning) {
        (Some(name), _) => format!("Following {} • click again to return", name),
        (None, true) => "Returning home…".to_string(),
        (None, false) => "Click the planet or moon to follow it".to_string(),
    }
}

/// Update the hint overlay with the camera's tracking state
pub fn update_hint(document: &web::Document, followed: Option<&str>, returning: bool) {
    if let Some(el) = document.get_element_by_id(HINT_OVERLAY_ID) {
        let hint_html = format!(
            "<div style='color: #cfe7ff; font: 13px system-ui; background: rgba(10, 14, 24, 0.8); padding: 8px 12px; border-radius: 6px; border: 1px solid rgba(80, 110, 150, 0.35);'>{}</div>",
            hint_text(followed, returning)
        );
        el.set_inner_html(&hint_html);
    }
}
