//! Lazy image loading.
//!
//! Images carrying a `data-src` attribute are observed with default options.
//! First intersection promotes the pending source into the live `src`, drops the
//! pending attribute and the `lazy` marker, and unobserves the image — a strict
//! one-shot `pending → triggered` transition per element.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry};

use crate::config;

/// Promotes an image's pending source into its live `src` attribute.
///
/// Returns `false` when there is nothing pending, which makes a second
/// invocation on the same element a no-op.
pub fn apply_pending_source(element: &Element) -> bool {
    let Some(pending) = element.get_attribute("data-src") else {
        return false;
    };
    if element.set_attribute("src", &pending).is_err() {
        return false;
    }
    let _ = element.remove_attribute("data-src");
    let _ = element.class_list().remove_1("lazy");
    true
}

pub struct LazyImages {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl LazyImages {
    pub fn attach(document: &Document) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if entry.is_intersecting() {
                        let target = entry.target();
                        apply_pending_source(&target);
                        observer.unobserve(&target);
                    }
                }
            },
        )
            as Box<dyn FnMut(Array, IntersectionObserver)>);

        let observer = IntersectionObserver::new(callback.as_ref().unchecked_ref())?;

        let nodes = document.query_selector_all(config::LAZY_IMAGE_SELECTOR)?;
        for index in 0..nodes.length() {
            if let Some(image) = nodes.get(index).and_then(|node| node.dyn_into::<Element>().ok()) {
                observer.observe(&image);
            }
        }

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for LazyImages {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
