use crate::core::{Camera, ObjectId, Scene};
use crate::input::canvas_px_to_ndc;
use glam::{Vec2, Vec3};
use web_sys as web;

#[inline]
/// Compute a world-space ray from screen-space canvas coordinates.
///
/// - `canvas`: target canvas to derive dimensions/aspect
/// - `px`: pixel coordinates in the canvas' backing store space
/// - `camera`: the live camera; its aspect is taken from the canvas
///
/// Returns `(ray_origin, ray_direction)` in world space.
pub fn screen_to_world_ray(canvas: &web::HtmlCanvasElement, px: Vec2, camera: &Camera) -> (Vec3, Vec3) {
    let mut cam = camera.clone();
    cam.set_viewport(canvas.width(), canvas.height());
    let ndc = canvas_px_to_ndc(px, canvas.width(), canvas.height());
    cam.ray_from_ndc(ndc.x, ndc.y)
}

/// Object under the given canvas pixel, if any.
pub fn pick_at(canvas: &web::HtmlCanvasElement, px: Vec2, camera: &Camera, scene: &Scene) -> Option<ObjectId> {
    let (ro, rd) = screen_to_world_ray(canvas, px, camera);
    scene.pick(ro, rd)
}
