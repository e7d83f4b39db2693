//! Form submission interception.
//!
//! Every form present at attach time has its default submission cancelled.
//! Validation and delivery are not wired yet; a diagnostic line is logged so
//! submissions are visible in the console.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event};

pub struct FormGuard {
    forms: Vec<Element>,
    on_submit: Closure<dyn FnMut(Event)>,
}

impl FormGuard {
    pub fn attach(document: &Document) -> Option<Self> {
        let on_submit = Closure::wrap(Box::new(move |event: Event| {
            event.prevent_default();
            log::info!("form submission intercepted");
        }) as Box<dyn FnMut(Event)>);

        let mut forms = Vec::new();
        if let Ok(nodes) = document.query_selector_all("form") {
            for index in 0..nodes.length() {
                if let Some(form) = nodes.get(index).and_then(|node| node.dyn_into::<Element>().ok())
                {
                    let _ = form
                        .add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref());
                    forms.push(form);
                }
            }
        }
        if forms.is_empty() {
            return None;
        }
        Some(Self { forms, on_submit })
    }
}

impl Drop for FormGuard {
    fn drop(&mut self) {
        for form in &self.forms {
            let _ = form.remove_event_listener_with_callback(
                "submit",
                self.on_submit.as_ref().unchecked_ref(),
            );
        }
    }
}
