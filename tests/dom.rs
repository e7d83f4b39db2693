//! Browser-side behavior tests for the page interaction controller, run with
//! `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

use outeaux_frontend::{forms, lazy, nav, reveal, scroll};
use web_sys::{Document, Element, Event, EventInit, KeyboardEvent, KeyboardEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn set_page(html: &str) {
    document().body().unwrap().set_inner_html(html);
}

fn by_id(id: &str) -> Element {
    document().get_element_by_id(id).unwrap()
}

fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

fn click(element: &Element) -> bool {
    let init = EventInit::new();
    init.set_cancelable(true);
    init.set_bubbles(true);
    let event = Event::new_with_event_init_dict("click", &init).unwrap();
    element.dispatch_event(&event).unwrap()
}

fn keydown(target: &web_sys::EventTarget, key: &str, shift: bool) -> bool {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    init.set_shift_key(shift);
    init.set_cancelable(true);
    init.set_bubbles(true);
    let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    target.dispatch_event(&event).unwrap()
}

const NAV_PAGE: &str = r##"
    <header class="header">
        <button id="nav-toggle"></button>
        <nav id="nav-menu" class="nav-menu">
            <a href="#inicio" class="nav-link">Inicio</a>
            <a href="#servicios" class="nav-link">Servicios</a>
        </nav>
    </header>
"##;

#[wasm_bindgen_test]
fn toggling_navigation_twice_restores_closed_markers() {
    set_page(NAV_PAGE);
    let doc = document();
    let _nav = nav::MobileNav::attach(&doc).unwrap();
    let toggle = by_id("nav-toggle");
    let menu = by_id("nav-menu");
    let body: Element = doc.body().unwrap().into();

    click(&toggle);
    assert!(has_class(&toggle, "active"));
    assert!(has_class(&menu, "active"));
    assert!(has_class(&body, "mobile-menu-open"));

    click(&toggle);
    assert!(!has_class(&toggle, "active"));
    assert!(!has_class(&menu, "active"));
    assert!(!has_class(&body, "mobile-menu-open"));
}

#[wasm_bindgen_test]
fn opening_navigation_clears_hidden_header() {
    set_page(NAV_PAGE);
    let doc = document();
    let _nav = nav::MobileNav::attach(&doc).unwrap();
    let header = doc.query_selector(".header").unwrap().unwrap();
    header.class_list().add_1("header-hidden").unwrap();

    click(&by_id("nav-toggle"));
    assert!(!has_class(&header, "header-hidden"));
}

#[wasm_bindgen_test]
fn menu_link_click_closes_navigation() {
    set_page(NAV_PAGE);
    let doc = document();
    let _nav = nav::MobileNav::attach(&doc).unwrap();
    click(&by_id("nav-toggle"));
    assert!(has_class(&by_id("nav-menu"), "active"));

    let link = doc.query_selector(".nav-menu .nav-link").unwrap().unwrap();
    click(&link);
    assert!(!has_class(&by_id("nav-menu"), "active"));
    // Idempotent: a second click keeps everything closed.
    click(&link);
    assert!(!has_class(&by_id("nav-toggle"), "active"));
}

#[wasm_bindgen_test]
fn escape_closes_open_navigation_and_is_noop_when_closed() {
    set_page(NAV_PAGE);
    let doc = document();
    let _nav = nav::MobileNav::attach(&doc).unwrap();
    let toggle = by_id("nav-toggle");
    let menu = by_id("nav-menu");

    // Closed: Escape changes nothing.
    keydown(&doc, "Escape", false);
    assert!(!has_class(&toggle, "active"));
    assert!(!has_class(&menu, "active"));

    click(&toggle);
    keydown(&doc, "Escape", false);
    assert!(!has_class(&toggle, "active"));
    assert!(!has_class(&menu, "active"));
    let body: Element = doc.body().unwrap().into();
    assert!(!has_class(&body, "mobile-menu-open"));
}

#[wasm_bindgen_test]
fn focus_trap_is_inert_while_menu_is_closed() {
    set_page(NAV_PAGE);
    let doc = document();
    let _nav = nav::MobileNav::attach(&doc).unwrap();
    let menu = by_id("nav-menu");

    // Menu closed: Tab at the boundary must not be intercepted.
    let not_prevented = keydown(&menu, "Tab", false);
    assert!(not_prevented);
}

#[wasm_bindgen_test]
fn focus_trap_wraps_from_last_to_first_while_open() {
    set_page(NAV_PAGE);
    let doc = document();
    let _nav = nav::MobileNav::attach(&doc).unwrap();
    click(&by_id("nav-toggle"));

    let links = doc.query_selector_all(".nav-menu .nav-link").unwrap();
    let last: web_sys::HtmlElement = links
        .get(links.length() - 1)
        .unwrap()
        .dyn_into()
        .unwrap();
    last.focus().unwrap();

    let menu = by_id("nav-menu");
    let not_prevented = keydown(&menu, "Tab", false);
    assert!(!not_prevented);
}

const SCROLL_PAGE: &str = r##"
    <header class="header">
        <nav id="nav-menu" class="nav-menu">
            <a href="#inicio" class="nav-link">Inicio</a>
            <a href="#servicios" class="nav-link">Servicios</a>
        </nav>
    </header>
    <section id="inicio" style="height: 400px;"></section>
    <section id="servicios" style="height: 600px;"></section>
    <a id="scrollUpBtn" href="#"></a>
"##;

#[wasm_bindgen_test]
fn scroll_pipeline_tints_and_hides_header_by_offset() {
    set_page(SCROLL_PAGE);
    let doc = document();
    let header = doc.query_selector(".header").unwrap().unwrap();
    let mut tracker = scroll::ScrollTracker::default();

    scroll::effects_tick(&doc, 0.0, &mut tracker);
    assert!(!has_class(&header, "scrolled"));
    assert!(!has_class(&header, "header-hidden"));

    scroll::effects_tick(&doc, 50.0, &mut tracker);
    assert!(!has_class(&header, "header-hidden"));

    scroll::effects_tick(&doc, 250.0, &mut tracker);
    assert!(has_class(&header, "scrolled"));
    assert!(has_class(&header, "header-hidden"));

    scroll::effects_tick(&doc, 180.0, &mut tracker);
    assert!(!has_class(&header, "header-hidden"));
}

#[wasm_bindgen_test]
fn open_menu_forces_header_visible_during_ticks() {
    set_page(SCROLL_PAGE);
    let doc = document();
    let header = doc.query_selector(".header").unwrap().unwrap();
    let mut tracker = scroll::ScrollTracker::default();

    scroll::effects_tick(&doc, 250.0, &mut tracker);
    assert!(has_class(&header, "header-hidden"));

    by_id("nav-menu").class_list().add_1("active").unwrap();
    scroll::effects_tick(&doc, 400.0, &mut tracker);
    assert!(!has_class(&header, "header-hidden"));
}

#[wasm_bindgen_test]
fn at_most_one_navigation_link_is_active_per_tick() {
    set_page(SCROLL_PAGE);
    let doc = document();
    let mut tracker = scroll::ScrollTracker::default();

    for offset in [0.0, 120.0, 450.0, 900.0] {
        scroll::effects_tick(&doc, offset, &mut tracker);
        let active = doc.query_selector_all(".nav-link.active").unwrap();
        assert!(active.length() <= 1, "offset {offset} marked {} links", active.length());
    }
}

#[wasm_bindgen_test]
fn scroll_up_button_shows_above_threshold_only() {
    set_page(SCROLL_PAGE);
    let doc = document();
    let button = by_id("scrollUpBtn");
    let mut tracker = scroll::ScrollTracker::default();

    scroll::effects_tick(&doc, 350.0, &mut tracker);
    assert!(has_class(&button, "show"));

    scroll::effects_tick(&doc, 300.0, &mut tracker);
    assert!(!has_class(&button, "show"));
}

/// Resolves on the next animation frame.
async fn next_frame() {
    let window = web_sys::window().unwrap();
    let promise = web_sys::js_sys::Promise::new(&mut |resolve, _reject| {
        window
            .request_animation_frame(&resolve)
            .unwrap();
    });
    wasm_bindgen_futures::JsFuture::from(promise).await.unwrap();
}

#[wasm_bindgen_test]
async fn detaching_with_a_frame_pending_cancels_it() {
    set_page(SCROLL_PAGE);
    let window = web_sys::window().unwrap();
    let doc = document();
    let effects = scroll::ScrollEffects::attach(&window, &doc).unwrap();

    // Queue a frame through the scroll listener, then tear down before it
    // fires. The queued frame must be cancelled with the listeners.
    window.dispatch_event(&Event::new("scroll").unwrap()).unwrap();
    drop(effects);

    next_frame().await;
    next_frame().await;

    // The pipeline itself still works after teardown.
    let header = doc.query_selector(".header").unwrap().unwrap();
    let mut tracker = scroll::ScrollTracker::default();
    scroll::effects_tick(&doc, 250.0, &mut tracker);
    assert!(has_class(&header, "scrolled"));
}

#[wasm_bindgen_test]
fn mobile_nav_detaches_cleanly() {
    set_page(NAV_PAGE);
    let doc = document();
    let nav = nav::MobileNav::attach(&doc).unwrap();
    drop(nav);

    click(&by_id("nav-toggle"));
    assert!(!has_class(&by_id("nav-menu"), "active"));
    keydown(&doc, "Escape", false);
    assert!(!has_class(&by_id("nav-toggle"), "active"));
}

#[wasm_bindgen_test]
fn smooth_scroll_prevents_default_only_for_resolvable_fragments() {
    set_page(
        r##"
        <header class="header"></header>
        <a id="good" href="#inicio"></a>
        <a id="bad" href="#desconocido"></a>
        <section id="inicio"></section>
        "##,
    );
    let window = web_sys::window().unwrap();
    let doc = document();
    let _smooth = scroll::SmoothScroll::attach(&window, &doc).unwrap();

    assert!(!click(&by_id("good")), "resolvable fragment should be intercepted");
    assert!(click(&by_id("bad")), "unresolvable fragment should fall through");
}

#[wasm_bindgen_test]
fn smooth_scroll_detaches_with_its_guard() {
    set_page(
        r##"
        <a id="good" href="#inicio"></a>
        <section id="inicio"></section>
        "##,
    );
    let window = web_sys::window().unwrap();
    let doc = document();
    let smooth = scroll::SmoothScroll::attach(&window, &doc).unwrap();
    drop(smooth);
    assert!(click(&by_id("good")), "no interception after teardown");
}

#[wasm_bindgen_test]
fn lazy_promotion_is_one_shot() {
    set_page(r##"<img id="foto" data-src="equipo.jpg" class="lazy">"##);
    let image = by_id("foto");

    assert!(lazy::apply_pending_source(&image));
    assert_eq!(image.get_attribute("src").as_deref(), Some("equipo.jpg"));
    assert!(image.get_attribute("data-src").is_none());
    assert!(!has_class(&image, "lazy"));

    // Nothing pending anymore: the second pass is a no-op.
    assert!(!lazy::apply_pending_source(&image));
    assert_eq!(image.get_attribute("src").as_deref(), Some("equipo.jpg"));
}

#[wasm_bindgen_test]
fn reveal_attach_tags_targets_and_marks_revealed() {
    set_page(r##"<div id="card" class="service-card"></div>"##);
    let doc = document();
    let _reveal = reveal::RevealObserver::attach(&doc).unwrap();
    let card = by_id("card");
    assert!(has_class(&card, "animate-element"));

    reveal::mark_revealed(&card);
    assert!(has_class(&card, "animate-in"));
    // One-way: marking again keeps both markers in place.
    reveal::mark_revealed(&card);
    assert!(has_class(&card, "animate-element"));
    assert!(has_class(&card, "animate-in"));
}

#[wasm_bindgen_test]
fn form_submission_default_is_cancelled() {
    set_page(r##"<form id="contacto"><input type="text"></form>"##);
    let doc = document();
    let _guard = forms::FormGuard::attach(&doc).unwrap();

    let init = EventInit::new();
    init.set_cancelable(true);
    let event = Event::new_with_event_init_dict("submit", &init).unwrap();
    let not_prevented = by_id("contacto").dispatch_event(&event).unwrap();
    assert!(!not_prevented);
}
