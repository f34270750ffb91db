pub mod canvas;
pub mod events;
pub mod frames;
pub mod runner;

pub use canvas::CanvasSurface;
pub use frames::AnimationFrames;
pub use runner::DustRunner;

use std::cell::RefCell;

use dust_engine::{DustConfig, DustError, InputMode, Surface};
use wasm_bindgen::prelude::*;

type WebRunner = DustRunner<CanvasSurface, AnimationFrames>;

thread_local! {
    static RUNNER: RefCell<Option<WebRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the page's runner. Returns `None` before `dust_start`.
pub(crate) fn with_runner<R>(f: impl FnOnce(&mut WebRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

/// Start the particle field on `<canvas id=canvas_id>`, sized to the viewport.
///
/// Failures are logged to the console and leave nothing scheduled.
#[wasm_bindgen]
pub fn dust_start(canvas_id: &str) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    // Listeners and the frame callback are bound to the first canvas; later
    // calls only restart the loop.
    if let Some(state) = with_runner(|r| r.init()) {
        log::info!("dust: restarted ({:?})", state);
        return;
    }
    if let Err(e) = start(canvas_id) {
        log::error!("dust: {}", e);
    }
}

fn start(canvas_id: &str) -> Result<(), DustError> {
    let window = web_sys::window().ok_or(DustError::SurfaceUnavailable)?;
    let document = window.document().ok_or(DustError::SurfaceUnavailable)?;
    let mut surface = CanvasSurface::from_document(&document, canvas_id)?;

    let (width, height) = events::viewport_size(&window);
    surface.set_size(width, height);

    let mode = if events::touch_capable(&window) {
        InputMode::Touch
    } else {
        InputMode::Pointer
    };
    let config = DustConfig::default().with_input_mode(mode);

    if let Err(e) = events::attach(&window, surface.canvas()) {
        log::warn!("dust: input listeners not attached: {:?}", e);
    }

    let frames = AnimationFrames::new(window);
    frames.set_callback(Closure::wrap(Box::new(|| {
        with_runner(|r| r.frame());
    }) as Box<dyn FnMut()>));

    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
    let runner = DustRunner::new(config, seed, surface, frames);
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });

    with_runner(|r| r.init());
    log::info!("dust: started on #{} ({:?})", canvas_id, mode);
    Ok(())
}

/// Stop scheduling frames. The last drawn frame stays on the canvas.
#[wasm_bindgen]
pub fn dust_stop() {
    with_runner(|r| r.stop());
}

/// Live particle count, or 0 before `dust_start`.
#[wasm_bindgen]
pub fn dust_particle_count() -> u32 {
    with_runner(|r| r.particle_count()).unwrap_or(0)
}
