use std::cell::RefCell;
use std::rc::Rc;

use dust_engine::FrameRequester;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `FrameRequester` backed by `window.requestAnimationFrame`.
///
/// The callback lives in a shared slot so the same closure can be handed to
/// the browser on every frame.
pub struct AnimationFrames {
    window: Window,
    callback: FrameCallback,
}

impl AnimationFrames {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            callback: Rc::new(RefCell::new(None)),
        }
    }

    /// Install the closure invoked on each animation frame.
    pub fn set_callback(&self, callback: Closure<dyn FnMut()>) {
        *self.callback.borrow_mut() = Some(callback);
    }
}

impl FrameRequester for AnimationFrames {
    fn request_frame(&mut self) -> bool {
        let slot = self.callback.borrow();
        let Some(callback) = slot.as_ref() else {
            log::warn!("no frame callback installed");
            return false;
        };
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(_) => true,
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {:?}", e);
                false
            }
        }
    }
}
