use crate::audio::MicInput;
use crate::canvas::CanvasSurface;
use instant::Instant;
use sphere_core::{AudioStatus, SphereEngine};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// Gaps longer than this are logged; the step itself stays fixed.
const LONG_FRAME_GAP: Duration = Duration::from_millis(250);

pub struct FrameContext {
    pub engine: SphereEngine,
    pub surface: CanvasSurface,
    pub mic: Option<MicInput>,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn new(engine: SphereEngine, surface: CanvasSurface) -> Self {
        Self {
            engine,
            surface,
            mic: None,
            last_instant: Instant::now(),
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let gap = now - self.last_instant;
        self.last_instant = now;
        if gap > LONG_FRAME_GAP {
            log::debug!("[frame] resumed after {:.0} ms", gap.as_secs_f32() * 1000.0);
        }

        let audio = self.mic.as_mut().map(MicInput::refresh);
        self.engine.advance_frame(audio, &mut self.surface);
    }

    /// Redraw without stepping, e.g. after a resize. Reuses the mic's last
    /// snapshot so spikes hold while the window is dragged.
    pub fn redraw(&mut self) {
        let audio = self.mic.as_ref().map(MicInput::frame);
        self.engine.render(audio, &mut self.surface);
    }

    pub fn attach_mic(&mut self, mic: MicInput) {
        self.release_mic();
        self.mic = Some(mic);
        self.engine.reset_audio();
        self.engine.set_audio_status(AudioStatus::Active);
    }

    /// Stop capture and fall back to silence. Safe to call repeatedly.
    pub fn release_mic(&mut self) {
        if let Some(mic) = self.mic.take() {
            mic.close();
        }
        self.engine.reset_audio();
    }
}

type TickClosure = Closure<dyn FnMut()>;

/// `requestAnimationFrame` driver that can be stopped and restarted.
#[derive(Clone)]
pub struct FrameLoop {
    tick: Rc<RefCell<Option<TickClosure>>>,
    handle: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn new(frame_ctx: Rc<RefCell<FrameContext>>) -> Self {
        let tick: Rc<RefCell<Option<TickClosure>>> = Rc::new(RefCell::new(None));
        let handle = Rc::new(Cell::new(None));
        let tick_next = tick.clone();
        let handle_next = handle.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            handle_next.set(None);
            frame_ctx.borrow_mut().frame();
            handle_next.set(request_frame(&tick_next));
        }) as Box<dyn FnMut()>));
        Self { tick, handle }
    }

    pub fn is_running(&self) -> bool {
        self.handle.get().is_some()
    }

    pub fn start(&self) {
        if self.is_running() {
            return;
        }
        self.handle.set(request_frame(&self.tick));
    }

    pub fn stop(&self) {
        if let Some(id) = self.handle.take() {
            if let Some(w) = web::window() {
                let _ = w.cancel_animation_frame(id);
            }
        }
    }
}

fn request_frame(tick: &Rc<RefCell<Option<TickClosure>>>) -> Option<i32> {
    let w = web::window()?;
    let tick = tick.borrow();
    let cb = tick.as_ref()?;
    w.request_animation_frame(cb.as_ref().unchecked_ref()).ok()
}
