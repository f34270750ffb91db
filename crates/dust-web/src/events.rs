//! DOM listeners that translate browser events into `InputEvent`s.
//!
//! Every listener lives for the rest of the page, so closures are leaked
//! with `forget()` once attached.

use dust_engine::InputEvent;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, EventTarget, HtmlCanvasElement, MouseEvent, TouchEvent, Window};

use crate::with_runner;

fn push(event: InputEvent) {
    with_runner(|r| r.push_input(event));
}

fn listen<E>(
    target: &EventTarget,
    kind: &str,
    passive: bool,
    handler: impl FnMut(E) + 'static,
) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        kind,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    closure.forget();
    Ok(())
}

/// Viewport size in CSS pixels; zero if the browser reports nothing usable.
pub fn viewport_size(window: &Window) -> (u32, u32) {
    let dim = |v: Result<JsValue, JsValue>| {
        v.ok()
            .and_then(|v| v.as_f64())
            .filter(|d| d.is_finite() && *d > 0.0)
            .map_or(0, |d| d as u32)
    };
    (dim(window.inner_width()), dim(window.inner_height()))
}

/// Whether the browser exposes touch events.
pub fn touch_capable(window: &Window) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str("ontouchstart")).unwrap_or(false)
}

/// Attach resize, mouse and touch listeners.
pub fn attach(window: &Window, canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let win = window.clone();
    listen(window, "resize", true, move |_: web_sys::Event| {
        let (width, height) = viewport_size(&win);
        push(InputEvent::Resize { width, height });
    })?;

    listen(canvas, "mousemove", true, |ev: MouseEvent| {
        push(InputEvent::PointerMove {
            x: ev.client_x() as f32,
            y: ev.client_y() as f32,
        });
    })?;
    listen(canvas, "mouseleave", true, |_: MouseEvent| {
        push(InputEvent::PointerLeave);
    })?;

    listen(canvas, "touchstart", true, |_: TouchEvent| {
        push(InputEvent::TouchStart);
    })?;
    // Non-passive so the page does not scroll while dragging over the canvas.
    listen(canvas, "touchmove", false, |ev: TouchEvent| {
        let Some(touch) = ev.touches().get(0) else {
            return;
        };
        let event = InputEvent::TouchMove {
            x: touch.client_x() as f32,
            y: touch.client_y() as f32,
        };
        if event.suppresses_default() {
            ev.prevent_default();
        }
        push(event);
    })?;
    listen(canvas, "touchend", true, |_: TouchEvent| {
        push(InputEvent::TouchEnd);
    })?;

    Ok(())
}
