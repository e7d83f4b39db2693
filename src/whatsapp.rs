//! Outbound WhatsApp deep links.
//!
//! Builds `https://wa.me/<phone>?text=<encoded>` links to the fixed contact
//! line and opens them in a new browsing context. The four service wrappers
//! keep their original JS names so inline handlers on the page keep working;
//! elements carrying a `data-whatsapp` attribute are wired by the controller.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event};

use crate::config;

/// Builds the deep link. An empty message falls back to the default prompt;
/// anything else is percent-encoded verbatim.
pub fn build_link(message: &str) -> String {
    let message = if message.is_empty() {
        config::WHATSAPP_DEFAULT_MESSAGE
    } else {
        message
    };
    format!(
        "https://wa.me/{}?text={}",
        config::WHATSAPP_PHONE,
        urlencoding::encode(message)
    )
}

/// Maps a `data-whatsapp` service tag to its pre-filled prompt.
pub fn service_message(tag: &str) -> Option<&'static str> {
    match tag {
        "patentes" => Some(config::MSG_PATENTES),
        "iniciacion" => Some(config::MSG_INICIACION),
        "creacion" => Some(config::MSG_CREACION),
        "domicilio" => Some(config::MSG_DOMICILIO),
        _ => None,
    }
}

/// Opens the deep link in a new browsing context. Pop-up blocking is not
/// detectable through this API and is not reported; outright failures are
/// logged.
#[wasm_bindgen(js_name = openWhatsApp)]
pub fn open_whatsapp(message: Option<String>) {
    let url = build_link(message.as_deref().unwrap_or(""));
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.open_with_url_and_target(&url, "_blank") {
            log::warn!("failed to open WhatsApp link: {err:?}");
        }
    }
}

#[wasm_bindgen(js_name = contactForPatentes)]
pub fn contact_for_patentes() {
    open_whatsapp(Some(config::MSG_PATENTES.to_string()));
}

#[wasm_bindgen(js_name = contactForIniciacion)]
pub fn contact_for_iniciacion() {
    open_whatsapp(Some(config::MSG_INICIACION.to_string()));
}

#[wasm_bindgen(js_name = contactForCreacion)]
pub fn contact_for_creacion() {
    open_whatsapp(Some(config::MSG_CREACION.to_string()));
}

#[wasm_bindgen(js_name = contactForDomicilio)]
pub fn contact_for_domicilio() {
    open_whatsapp(Some(config::MSG_DOMICILIO.to_string()));
}

/// Click wiring for `[data-whatsapp]` elements. An unknown or empty tag opens
/// the default prompt.
pub struct WhatsAppLinks {
    buttons: Vec<Element>,
    on_click: Closure<dyn FnMut(Event)>,
}

impl WhatsAppLinks {
    pub fn attach(document: &Document) -> Option<Self> {
        let on_click = Closure::wrap(Box::new(move |event: Event| {
            let tag = event
                .current_target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|el| el.get_attribute("data-whatsapp"));
            let message = tag.as_deref().and_then(service_message).unwrap_or("");
            open_whatsapp(Some(message.to_string()));
        }) as Box<dyn FnMut(Event)>);

        let mut buttons = Vec::new();
        if let Ok(nodes) = document.query_selector_all(config::WHATSAPP_BUTTON_SELECTOR) {
            for index in 0..nodes.length() {
                if let Some(button) =
                    nodes.get(index).and_then(|node| node.dyn_into::<Element>().ok())
                {
                    let _ = button
                        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
                    buttons.push(button);
                }
            }
        }
        if buttons.is_empty() {
            return None;
        }
        Some(Self { buttons, on_click })
    }
}

impl Drop for WhatsAppLinks {
    fn drop(&mut self) {
        for button in &self.buttons {
            let _ = button
                .remove_event_listener_with_callback("click", self.on_click.as_ref().unchecked_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_uses_default_prompt() {
        let link = build_link("");
        assert!(link.starts_with("https://wa.me/56932296287?text="));
        assert!(link.contains("Hola%2C%20quiero%20informaci%C3%B3n%20sobre%20sus%20servicios"));
    }

    #[test]
    fn custom_message_is_encoded_verbatim() {
        let link = build_link("Hola, quiero crear una empresa");
        assert_eq!(
            link,
            "https://wa.me/56932296287?text=Hola%2C%20quiero%20crear%20una%20empresa"
        );
        assert!(!link.contains("informaci"));
    }

    #[test]
    fn service_tags_resolve_to_their_prompts() {
        assert_eq!(service_message("patentes"), Some(crate::config::MSG_PATENTES));
        assert_eq!(service_message("iniciacion"), Some(crate::config::MSG_INICIACION));
        assert_eq!(service_message("creacion"), Some(crate::config::MSG_CREACION));
        assert_eq!(service_message("domicilio"), Some(crate::config::MSG_DOMICILIO));
        assert_eq!(service_message("otro"), None);
    }
}
