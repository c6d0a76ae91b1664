//! Platform abstraction layer
//!
//! Frame scheduling: `requestAnimationFrame` when the browser has it, else a
//! timer that fires no faster than every 16ms and hands the callback the
//! timestamp it was aimed at.

use crate::consts::FALLBACK_FRAME_MS;

/// Timer-based stand-in for requestAnimationFrame
#[derive(Debug, Clone, Default)]
pub struct FallbackTimer {
    last_time: f64,
}

impl FallbackTimer {
    /// Returns (delay before firing, timestamp to pass to the callback), both ms
    pub fn schedule(&mut self, now: f64) -> (f64, f64) {
        let delay = (FALLBACK_FRAME_MS - (now - self.last_time)).max(0.0);
        self.last_time = now + delay;
        (delay, now + delay)
    }
}

#[cfg(target_arch = "wasm32")]
pub mod web {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    use super::FallbackTimer;

    thread_local! {
        static FALLBACK: RefCell<FallbackTimer> = RefCell::new(FallbackTimer::default());
    }

    /// Run `callback` on the next frame with a millisecond timestamp
    pub fn request_frame(callback: Closure<dyn FnMut(f64)>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, frame loop stopped");
            return;
        };
        let func: &js_sys::Function = callback.as_ref().unchecked_ref();

        if window.request_animation_frame(func).is_err() {
            let (delay, timestamp) =
                FALLBACK.with(|t| t.borrow_mut().schedule(js_sys::Date::now()));
            let scheduled = window.set_timeout_with_callback_and_timeout_and_arguments_1(
                func,
                delay as i32,
                &JsValue::from_f64(timestamp),
            );
            if scheduled.is_err() {
                log::error!("Neither requestAnimationFrame nor setTimeout available");
                return;
            }
        }

        callback.forget();
    }
}
