use glam::Vec2;
use web_sys as web;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    ToggleOverlay,
    ReturnHome,
    TogglePause,
}

#[inline]
pub fn key_command(key: &str) -> Option<KeyCommand> {
    match key {
        "h" | "H" => Some(KeyCommand::ToggleOverlay),
        "Escape" | "Home" => Some(KeyCommand::ReturnHome),
        " " => Some(KeyCommand::TogglePause),
        _ => None,
    }
}

// ---------------- Pointer helpers ----------------
#[inline]
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let sx = (x_css / rect.width() as f32) * canvas.width() as f32;
    let sy = (y_css / rect.height() as f32) * canvas.height() as f32;
    Vec2::new(sx, sy)
}

/// Backing-store pixel coordinates to normalized device coordinates
/// (x right, y up, both in [-1, 1]).
#[inline]
pub fn canvas_px_to_ndc(px: Vec2, width: u32, height: u32) -> Vec2 {
    let w = width.max(1) as f32;
    let h = height.max(1) as f32;
    Vec2::new((2.0 * px.x / w) - 1.0, 1.0 - (2.0 * px.y / h))
}
