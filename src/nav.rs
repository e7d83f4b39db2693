//! Mobile navigation: burger toggle, close-on-link-click, Escape dismissal and
//! the Tab focus trap for the menu panel.
//!
//! Open state lives in the DOM itself (the `active` marker on the menu), so every
//! handler reads and writes the same source of truth. Opening the menu always
//! clears `header-hidden`: the menu anchors to the header, so the two markers are
//! mutually exclusive.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent};

use crate::config;

/// Whether the navigation menu currently holds the open marker.
pub fn is_open(menu: &Element) -> bool {
    menu.class_list().contains("active")
}

/// Flips the tri-element open state: toggle control, menu panel and the body
/// scroll-lock marker move together, synchronously.
pub fn set_open(document: &Document, toggle: &Element, menu: &Element, open: bool) {
    let _ = toggle.class_list().toggle_with_force("active", open);
    let _ = menu.class_list().toggle_with_force("active", open);
    if let Some(body) = document.body() {
        let _ = body.class_list().toggle_with_force("mobile-menu-open", open);
    }
    if open {
        if let Some(header) = document.query_selector(config::HEADER_SELECTOR).ok().flatten() {
            let _ = header.class_list().remove_1("header-hidden");
        }
    }
}

/// Keeps Tab cycling inside the menu panel while it is open. The focusable list
/// is queried per keystroke so links added or removed after attach are honored.
fn trap_focus(document: &Document, menu: &Element, event: &KeyboardEvent) {
    if event.key() != "Tab" || !is_open(menu) {
        return;
    }
    let Ok(focusables) = menu.query_selector_all(config::FOCUSABLE_SELECTOR) else {
        return;
    };
    if focusables.length() == 0 {
        return;
    }
    let first = focusables
        .get(0)
        .and_then(|node| node.dyn_into::<HtmlElement>().ok());
    let last = focusables
        .get(focusables.length() - 1)
        .and_then(|node| node.dyn_into::<HtmlElement>().ok());
    let (Some(first), Some(last)) = (first, last) else {
        return;
    };
    let active = document.active_element();
    if event.shift_key() {
        if active.as_ref().map_or(false, |el| el.is_same_node(Some(first.as_ref()))) {
            let _ = last.focus();
            event.prevent_default();
        }
    } else if active.as_ref().map_or(false, |el| el.is_same_node(Some(last.as_ref()))) {
        let _ = first.focus();
        event.prevent_default();
    }
}

/// Owns the navigation listeners; dropping it detaches all of them.
pub struct MobileNav {
    document: Document,
    toggle: Element,
    menu: Element,
    links: Vec<Element>,
    on_toggle: Closure<dyn FnMut(Event)>,
    on_link: Closure<dyn FnMut(Event)>,
    on_keydown: Closure<dyn FnMut(KeyboardEvent)>,
    on_trap: Closure<dyn FnMut(KeyboardEvent)>,
}

impl MobileNav {
    /// Wires the navigation handlers. Returns `None` when the toggle or the menu
    /// is missing from the page, in which case navigation stays inert.
    pub fn attach(document: &Document) -> Option<Self> {
        let toggle: Element = document.get_element_by_id(config::NAV_TOGGLE_ID)?;
        let menu: Element = document.get_element_by_id(config::NAV_MENU_ID)?;

        let on_toggle = {
            let document = document.clone();
            let toggle = toggle.clone();
            let menu = menu.clone();
            Closure::wrap(Box::new(move |_: Event| {
                let open = !is_open(&menu);
                set_open(&document, &toggle, &menu, open);
            }) as Box<dyn FnMut(Event)>)
        };

        // Any link inside the menu closes it, idempotently.
        let on_link = {
            let document = document.clone();
            let toggle = toggle.clone();
            let menu = menu.clone();
            Closure::wrap(Box::new(move |_: Event| {
                set_open(&document, &toggle, &menu, false);
            }) as Box<dyn FnMut(Event)>)
        };

        let on_keydown = {
            let document = document.clone();
            let toggle = toggle.clone();
            let menu = menu.clone();
            Closure::wrap(Box::new(move |event: KeyboardEvent| {
                if event.key() == "Escape" && is_open(&menu) {
                    set_open(&document, &toggle, &menu, false);
                }
            }) as Box<dyn FnMut(KeyboardEvent)>)
        };

        let on_trap = {
            let document = document.clone();
            let menu = menu.clone();
            Closure::wrap(Box::new(move |event: KeyboardEvent| {
                trap_focus(&document, &menu, &event);
            }) as Box<dyn FnMut(KeyboardEvent)>)
        };

        let mut links = Vec::new();
        if let Ok(nodes) = document.query_selector_all(config::NAV_MENU_LINK_SELECTOR) {
            for index in 0..nodes.length() {
                if let Some(link) = nodes.get(index).and_then(|node| node.dyn_into::<Element>().ok()) {
                    links.push(link);
                }
            }
        }

        // Listeners are registered through the constructed struct: a failed
        // registration bails out through Drop, which detaches whatever was
        // already added (removal of a never-added listener is a no-op).
        let nav = Self {
            document: document.clone(),
            toggle,
            menu,
            links,
            on_toggle,
            on_link,
            on_keydown,
            on_trap,
        };
        nav.toggle
            .add_event_listener_with_callback("click", nav.on_toggle.as_ref().unchecked_ref())
            .ok()?;
        for link in &nav.links {
            let _ =
                link.add_event_listener_with_callback("click", nav.on_link.as_ref().unchecked_ref());
        }
        nav.document
            .add_event_listener_with_callback("keydown", nav.on_keydown.as_ref().unchecked_ref())
            .ok()?;
        nav.menu
            .add_event_listener_with_callback("keydown", nav.on_trap.as_ref().unchecked_ref())
            .ok()?;

        Some(nav)
    }
}

impl Drop for MobileNav {
    fn drop(&mut self) {
        let _ = self
            .toggle
            .remove_event_listener_with_callback("click", self.on_toggle.as_ref().unchecked_ref());
        for link in &self.links {
            let _ = link
                .remove_event_listener_with_callback("click", self.on_link.as_ref().unchecked_ref());
        }
        let _ = self
            .document
            .remove_event_listener_with_callback("keydown", self.on_keydown.as_ref().unchecked_ref());
        let _ = self
            .menu
            .remove_event_listener_with_callback("keydown", self.on_trap.as_ref().unchecked_ref());
    }
}
