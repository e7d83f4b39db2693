//! Console diagnostics: uncaught script errors and page-load timing.
//!
//! Neither channel recovers or notifies the user; both exist so production
//! issues show up in the browser console.

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{ErrorEvent, Window};

/// `loadEventEnd` is recorded only after every load handler has returned, so a
/// zero or negative delta means the timing is not available yet.
fn load_delta(navigation_start: f64, load_event_end: f64) -> Option<f64> {
    let elapsed = load_event_end - navigation_start;
    (elapsed > 0.0).then_some(elapsed)
}

fn log_load_time(window: &Window) {
    if let Some(performance) = window.performance() {
        let timing = performance.timing();
        if let Some(elapsed) = load_delta(timing.navigation_start(), timing.load_event_end()) {
            log::info!("page loaded in {elapsed:.0}ms");
        }
    }
}

pub struct Diagnostics {
    window: Window,
    on_error: Closure<dyn FnMut(ErrorEvent)>,
    on_load: Option<Closure<dyn FnMut()>>,
}

impl Diagnostics {
    pub fn attach(window: &Window) -> Option<Self> {
        let on_error = Closure::wrap(Box::new(move |event: ErrorEvent| {
            log::error!("uncaught script error: {}", event.message());
        }) as Box<dyn FnMut(ErrorEvent)>);
        window
            .add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())
            .ok()?;

        let already_loaded = window
            .document()
            .map_or(false, |doc| doc.ready_state() == "complete");
        let on_load = if already_loaded {
            log_load_time(window);
            None
        } else {
            let on_load = {
                let window = window.clone();
                Closure::wrap(Box::new(move || {
                    // Reading synchronously here would still see a zero
                    // loadEventEnd; defer one tick past the load handlers.
                    let window = window.clone();
                    Timeout::new(0, move || log_load_time(&window)).forget();
                }) as Box<dyn FnMut()>)
            };
            window
                .add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())
                .ok()?;
            Some(on_load)
        };

        Some(Self {
            window: window.clone(),
            on_error,
            on_load,
        })
    }
}

impl Drop for Diagnostics {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("error", self.on_error.as_ref().unchecked_ref());
        if let Some(on_load) = &self.on_load {
            let _ = self
                .window
                .remove_event_listener_with_callback("load", on_load.as_ref().unchecked_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_delta_is_unavailable_while_load_is_still_dispatching() {
        // During load dispatch the end timestamp is still zero.
        assert_eq!(load_delta(1_000.0, 0.0), None);
    }

    #[test]
    fn load_delta_is_the_positive_elapsed_time() {
        assert_eq!(load_delta(1_000.0, 2_500.0), Some(1_500.0));
        assert_eq!(load_delta(1_000.0, 1_000.0), None);
    }
}
