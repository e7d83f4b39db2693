//! Viewport-entry animation trigger.
//!
//! Content blocks are tagged `animate-element` at attach time and observed with
//! a 10% visibility threshold and a 50px bottom-margin contraction. Entering the
//! viewport adds a permanent `animate-in` marker; the stylesheet owns the actual
//! animation. The transition is one-way and the element set is static, so the
//! observer keeps running until the controller is torn down.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::config;

/// Flips the pending marker pair to its triggered state. Idempotent.
pub fn mark_revealed(element: &Element) {
    let _ = element.class_list().add_1("animate-in");
}

pub struct RevealObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl RevealObserver {
    pub fn attach(document: &Document) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(
            move |entries: Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if entry.is_intersecting() {
                        mark_revealed(&entry.target());
                    }
                }
            },
        )
            as Box<dyn FnMut(Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(config::REVEAL_THRESHOLD));
        options.set_root_margin(config::REVEAL_ROOT_MARGIN);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        let nodes = document.query_selector_all(config::ANIMATED_SELECTOR)?;
        for index in 0..nodes.length() {
            if let Some(element) = nodes.get(index).and_then(|node| node.dyn_into::<Element>().ok())
            {
                let _ = element.class_list().add_1("animate-element");
                observer.observe(&element);
            }
        }

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
