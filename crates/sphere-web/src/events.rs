use crate::dom;
use crate::frame::{FrameContext, FrameLoop};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys as web;

fn listen<E: FromWasmAbi + 'static>(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Translate canvas pointer events into pointer model requests. Handlers only
/// set targets; the frame step derives everything else.
pub fn wire_pointer_handlers(canvas: &web::HtmlCanvasElement, ctx: &Rc<RefCell<FrameContext>>) {
    let target: &web::EventTarget = canvas.as_ref();

    {
        let ctx = ctx.clone();
        let canvas = canvas.clone();
        listen(target, "pointerdown", move |ev: web::PointerEvent| {
            let pos = dom::pointer_canvas_css(&ev, &canvas);
            ctx.borrow_mut().engine.pointer_mut().press(pos);
            if let Err(e) = canvas.set_pointer_capture(ev.pointer_id()) {
                log::debug!("[pointer] capture unavailable: {:?}", e);
            }
        });
    }
    {
        let ctx = ctx.clone();
        let canvas = canvas.clone();
        listen(target, "pointermove", move |ev: web::PointerEvent| {
            let pos = dom::pointer_canvas_css(&ev, &canvas);
            ctx.borrow_mut().engine.pointer_mut().move_to(pos);
        });
    }
    for name in ["pointerup", "pointercancel"] {
        let ctx = ctx.clone();
        let canvas = canvas.clone();
        listen(target, name, move |ev: web::PointerEvent| {
            ctx.borrow_mut().engine.pointer_mut().release();
            let _ = canvas.release_pointer_capture(ev.pointer_id());
        });
    }
    {
        let ctx = ctx.clone();
        listen(target, "pointerleave", move |_: web::PointerEvent| {
            ctx.borrow_mut().engine.pointer_mut().leave();
        });
    }
}

/// Resize the backing store and redraw in place.
pub fn wire_resize(ctx: &Rc<RefCell<FrameContext>>) {
    let Some(window) = web::window() else {
        return;
    };
    let ctx = ctx.clone();
    listen(window.as_ref(), "resize", move |_: web::Event| {
        let mut c = ctx.borrow_mut();
        dom::sync_canvas_backing_size(c.surface.canvas(), c.surface.context());
        c.redraw();
    });
}

/// Stop drawing and suspend audio while hidden; pick both back up when shown.
pub fn wire_visibility(
    document: &web::Document,
    ctx: &Rc<RefCell<FrameContext>>,
    frame_loop: &FrameLoop,
) {
    let ctx = ctx.clone();
    let frame_loop = frame_loop.clone();
    let doc = document.clone();
    listen(document.as_ref(), "visibilitychange", move |_: web::Event| {
        let c = ctx.borrow();
        if doc.hidden() {
            frame_loop.stop();
            if let Some(mic) = &c.mic {
                mic.suspend();
            }
            log::debug!("[visibility] hidden; loop stopped");
        } else {
            if let Some(mic) = &c.mic {
                mic.resume();
            }
            drop(c);
            frame_loop.start();
            log::debug!("[visibility] visible; loop running");
        }
    });
}
