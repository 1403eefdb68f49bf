#![cfg(target_arch = "wasm32")]
use sphere_core::{AudioStatus, SphereConfig, SphereEngine};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod canvas;
mod dom;
mod events;
mod frame;
mod overlay;

use audio::{MicError, MicInput};
use canvas::CanvasSurface;
use frame::{FrameContext, FrameLoop};

const CANVAS_ID: &str = "sphereCanvas";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("sphere-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let ctx2d: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    dom::sync_canvas_backing_size(&canvas, &ctx2d);

    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let engine = SphereEngine::new(SphereConfig::default().with_seed(seed))?;
    let frame_ctx = Rc::new(RefCell::new(FrameContext::new(
        engine,
        CanvasSurface::new(canvas.clone(), ctx2d),
    )));
    frame_ctx.borrow_mut().redraw();

    overlay::show(&document);
    overlay::set_status(&document, AudioStatus::Idle);
    overlay::set_buttons_disabled(&document, false);

    events::wire_pointer_handlers(&canvas, &frame_ctx);
    events::wire_resize(&frame_ctx);

    let frame_loop = FrameLoop::new(frame_ctx.clone());
    events::wire_visibility(&document, &frame_ctx, &frame_loop);
    wire_mic_buttons(&document, &frame_ctx);

    frame_loop.start();
    Ok(())
}

fn wire_mic_buttons(document: &web::Document, frame_ctx: &Rc<RefCell<FrameContext>>) {
    {
        let ctx = frame_ctx.clone();
        let doc = document.clone();
        dom::add_click_listener(document, overlay::ENABLE_BUTTON_ID, move || {
            let ctx = ctx.clone();
            let doc = doc.clone();
            overlay::set_buttons_disabled(&doc, true);
            set_audio_status(&ctx, &doc, AudioStatus::Connecting);
            spawn_local(async move {
                match MicInput::start().await {
                    Ok(mic) => {
                        ctx.borrow_mut().attach_mic(mic);
                        overlay::set_status(&doc, AudioStatus::Active);
                        overlay::hide(&doc);
                    }
                    Err(e) => {
                        log::error!("[mic] {}", e);
                        let status = match e {
                            MicError::Unsupported => AudioStatus::Unsupported,
                            _ => AudioStatus::Denied,
                        };
                        ctx.borrow_mut().release_mic();
                        set_audio_status(&ctx, &doc, status);
                        overlay::set_buttons_disabled(&doc, false);
                    }
                }
            });
        });
    }
    {
        let ctx = frame_ctx.clone();
        let doc = document.clone();
        dom::add_click_listener(document, overlay::DECLINE_BUTTON_ID, move || {
            {
                let mut c = ctx.borrow_mut();
                c.release_mic();
                c.redraw();
            }
            set_audio_status(&ctx, &doc, AudioStatus::Declined);
            overlay::hide(&doc);
        });
    }
}

fn set_audio_status(ctx: &Rc<RefCell<FrameContext>>, document: &web::Document, status: AudioStatus) {
    ctx.borrow_mut().engine.set_audio_status(status);
    overlay::set_status(document, status);
}
