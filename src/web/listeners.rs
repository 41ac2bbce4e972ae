//! Event listener bookkeeping.
//!
//! Every listener is registered through [`Listeners::listen`] and removed by the same
//! function reference it was added with, so a session never leaks handlers.

use crate::error::ViewerError;
use crate::util::js_error_message;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget};

struct Binding {
    target: EventTarget,
    name: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

#[derive(Default)]
pub struct Listeners {
    bound: Vec<Binding>,
    detached: bool,
}

impl Listeners {
    /// Add `handler` for `name` events on `target`. Events that are not an `E` are
    /// logged and skipped.
    pub fn listen<E>(
        &mut self,
        target: &EventTarget,
        name: &'static str,
        mut handler: impl FnMut(E) + 'static,
    ) -> Result<(), ViewerError>
    where
        E: JsCast + 'static,
    {
        let callback = Closure::wrap(Box::new(move |e: Event| match e.dyn_into::<E>() {
            Ok(e) => handler(e),
            Err(_) => log::warn!("unexpected event type for '{}' listener", name),
        }) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref())?;
        self.bound.push(Binding {
            target: target.clone(),
            name,
            callback,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    /// Remove all listeners from their targets. The closures stay alive until `self`
    /// is dropped, since one of them may be the handler currently running.
    pub fn detach(&mut self) {
        if self.detached {
            return;
        }
        for b in &self.bound {
            if let Err(e) = b
                .target
                .remove_event_listener_with_callback(b.name, b.callback.as_ref().unchecked_ref())
            {
                log::warn!("failed to remove '{}' listener: {}", b.name, js_error_message(&e));
            }
        }
        self.detached = true;
        log::debug!("detached {} listeners", self.bound.len());
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        self.detach();
    }
}
