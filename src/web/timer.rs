// Fire-and-forget timers for sequencing CSS transitions

use crate::util::js_error_message;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

/// Delay between placing an element and giving it its target style, so the browser
/// sees two distinct states and animates between them.
pub const SETTLE_MS: i32 = 10;
/// Length of the start transition; afterwards the end transition is restored.
pub const TRANSITION_MS: i32 = 200;

/// Run `f` once after `ms` milliseconds. Not cancelable.
pub fn after(ms: i32, f: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        log::warn!("no window; dropping timer callback");
        return;
    };
    let cb = Closure::once_into_js(f);
    if let Err(e) =
        window.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms)
    {
        log::warn!("setTimeout failed: {}", js_error_message(&e));
    }
}
