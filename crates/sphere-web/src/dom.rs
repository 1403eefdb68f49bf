use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Size the canvas to the window: CSS size in logical pixels, backing store
/// in device pixels, and a context transform so drawing stays logical.
pub fn sync_canvas_backing_size(
    canvas: &web::HtmlCanvasElement,
    ctx: &web::CanvasRenderingContext2d,
) {
    let Some(w) = web::window() else {
        return;
    };
    let dpr = w.device_pixel_ratio();
    let css = window_inner_size(&w).unwrap_or_else(|| {
        Vec2::new(canvas.client_width() as f32, canvas.client_height() as f32)
    });
    let style = canvas.style();
    let _ = style.set_property("width", &format!("{}px", css.x));
    let _ = style.set_property("height", &format!("{}px", css.y));
    canvas.set_width(((css.x as f64 * dpr).floor() as u32).max(1));
    canvas.set_height(((css.y as f64 * dpr).floor() as u32).max(1));
    let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
    let _ = ctx.scale(dpr, dpr);
    log::debug!("[dom] canvas css={}x{} dpr={:.2}", css.x, css.y, dpr);
}

fn window_inner_size(w: &web::Window) -> Option<Vec2> {
    let width = w.inner_width().ok()?.as_f64()?;
    let height = w.inner_height().ok()?.as_f64()?;
    (width > 0.0 && height > 0.0).then(|| Vec2::new(width as f32, height as f32))
}

/// Pointer position relative to the canvas in logical pixels.
#[inline]
pub fn pointer_canvas_css(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    )
}
