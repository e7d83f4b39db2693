//! Fixed configuration for the Outeaux Gestiones site: selectors the controller
//! binds to, scroll thresholds, and the WhatsApp contact values. None of this is
//! user input.

use log::Level;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

// DOM contract: the markup the controller expects to find.
pub const HEADER_SELECTOR: &str = ".header";
pub const NAV_TOGGLE_ID: &str = "nav-toggle";
pub const NAV_MENU_ID: &str = "nav-menu";
pub const NAV_LINK_SELECTOR: &str = ".nav-link";
pub const NAV_MENU_LINK_SELECTOR: &str = ".nav-menu .nav-link";
pub const ANCHOR_LINK_SELECTOR: &str = "a[href^=\"#\"]";
pub const SECTION_SELECTOR: &str = "section[id]";
pub const SCROLL_UP_ID: &str = "scrollUpBtn";
pub const LAZY_IMAGE_SELECTOR: &str = "img[data-src]";
pub const WHATSAPP_BUTTON_SELECTOR: &str = "[data-whatsapp]";
pub const ANIMATED_SELECTOR: &str =
    ".feature-card, .service-card, .value-card, .testimonial-card, .hero-content, .about-text";
pub const FOCUSABLE_SELECTOR: &str = "a[href], button, textarea, input[type=\"text\"], \
     input[type=\"radio\"], input[type=\"checkbox\"], select";

// Scroll behavior thresholds, in CSS pixels.
pub const TINT_THRESHOLD: f64 = 100.0;
pub const HIDE_THRESHOLD: f64 = 200.0;
pub const SCROLL_UP_THRESHOLD: f64 = 300.0;
pub const ANCHOR_MARGIN: f64 = 20.0;
pub const ACTIVE_LEAD: f64 = 50.0;
pub const RESIZE_DEBOUNCE_MS: u32 = 150;

// Viewport-entry animation observer.
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

// WhatsApp contact line and the pre-filled prompts per service.
pub const WHATSAPP_PHONE: &str = "56932296287";
pub const WHATSAPP_DEFAULT_MESSAGE: &str = "Hola, quiero información sobre sus servicios";
pub const MSG_PATENTES: &str = "Hola, quiero tramitar una patente comercial";
pub const MSG_INICIACION: &str = "Hola, quiero asesoría en iniciación de actividades";
pub const MSG_CREACION: &str = "Hola, quiero crear una empresa";
pub const MSG_DOMICILIO: &str = "Hola, quiero hacer un cambio de domicilio comercial";
