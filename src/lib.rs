//! Client-side interactivity for the Outeaux Gestiones marketing site, compiled
//! to WebAssembly. A single [`PageController`] is attached at page load and owns
//! every DOM listener and observer; `teardownInteractions` detaches it again.

use std::cell::RefCell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, JsValue};

pub mod config;
pub mod controller;
pub mod diagnostics;
pub mod forms;
pub mod lazy;
pub mod nav;
pub mod reveal;
pub mod scroll;
pub mod whatsapp;

pub use controller::PageController;

thread_local! {
    static CONTROLLER: RefCell<Option<PageController>> = const { RefCell::new(None) };
}

fn attach_controller() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let controller = PageController::attach(&window, &document);
    CONTROLLER.with(|slot| *slot.borrow_mut() = Some(controller));
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(config::log_level()).expect("error initializing log");
    log::info!("starting page interactions");

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window available"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document available"))?;

    if document.ready_state() == "loading" {
        let on_ready = Closure::once(attach_controller);
        document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
        // DOMContentLoaded fires once per page load.
        on_ready.forget();
    } else {
        attach_controller();
    }
    Ok(())
}

/// Detaches the page-load controller and removes all of its listeners.
#[wasm_bindgen(js_name = teardownInteractions)]
pub fn teardown_interactions() {
    CONTROLLER.with(|slot| {
        if let Some(controller) = slot.borrow_mut().take() {
            controller.detach();
        }
    });
}
