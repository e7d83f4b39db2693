//! Scroll-driven behavior: smooth anchor navigation, the per-frame scroll
//! pipeline (header tint, hide/show, active-link tracking, scroll-up button
//! visibility) and the floating scroll-to-top control.
//!
//! Raw `scroll` events only mark a frame dirty; the DOM work runs at most once
//! per animation frame. `resize` re-runs the pipeline after a short debounce
//! because header height feeds the anchor and active-link math.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::config;
use crate::nav;

/// Tracks the previous scroll offset to derive scroll direction.
///
/// The header hides only while moving down past the hide threshold; any upward
/// movement shows it again.
#[derive(Debug, Default)]
pub struct ScrollTracker {
    last_offset: f64,
}

impl ScrollTracker {
    /// Feeds one scroll offset through the tracker and reports whether the
    /// header should be hidden after this tick. The stored offset is floored at
    /// zero so rubber-band scrolling on mobile does not register as an up-move.
    pub fn update(&mut self, offset: f64) -> bool {
        let hidden = offset > self.last_offset && offset > config::HIDE_THRESHOLD;
        self.last_offset = offset.max(0.0);
        hidden
    }
}

/// One section's vertical span, pre-adjusted for header height and the
/// active-link lead.
pub struct SectionSpan {
    pub id: String,
    pub start: f64,
    pub height: f64,
}

/// Picks the section whose span contains `offset`. When spans overlap the last
/// match in document order wins, keeping the scan a single overwrite loop.
pub fn active_section(spans: &[SectionSpan], offset: f64) -> Option<&str> {
    let mut current = None;
    for span in spans {
        if offset >= span.start && offset < span.start + span.height {
            current = Some(span.id.as_str());
        }
    }
    current
}

/// Requests an animated scroll to the given document offset.
pub fn smooth_scroll_to(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

fn header_height(header: &Element) -> i32 {
    header.dyn_ref::<HtmlElement>().map_or(0, |el| el.offset_height())
}

/// Recomputes the exclusive `active` marker across navigation links from the
/// current scroll offset.
fn update_active_link(document: &Document, header: &Element, offset: f64) {
    let height = header_height(header);
    let mut spans = Vec::new();
    if let Ok(sections) = document.query_selector_all(config::SECTION_SELECTOR) {
        for index in 0..sections.length() {
            let Some(section) = sections
                .get(index)
                .and_then(|node| node.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            let Some(id) = section.get_attribute("id") else {
                continue;
            };
            spans.push(SectionSpan {
                id,
                start: f64::from(section.offset_top() - height) - config::ACTIVE_LEAD,
                height: f64::from(section.offset_height()),
            });
        }
    }
    let target = active_section(&spans, offset).map(|id| format!("#{id}"));
    if let Ok(links) = document.query_selector_all(config::NAV_LINK_SELECTOR) {
        for index in 0..links.length() {
            let Some(link) = links.get(index).and_then(|node| node.dyn_into::<Element>().ok())
            else {
                continue;
            };
            let is_active = match (&target, link.get_attribute("href")) {
                (Some(fragment), Some(href)) => href == *fragment,
                _ => false,
            };
            let _ = link.class_list().toggle_with_force("active", is_active);
        }
    }
}

fn update_scroll_up(document: &Document, offset: f64) {
    if let Some(button) = document.get_element_by_id(config::SCROLL_UP_ID) {
        let _ = button
            .class_list()
            .toggle_with_force("show", offset > config::SCROLL_UP_THRESHOLD);
    }
}

/// One pass of the scroll pipeline at the given offset.
///
/// While the menu is open the header is forced visible and the hide/show and
/// active-link work is skipped entirely; the tracker keeps its previous offset
/// so closing the menu resumes direction detection where it left off.
pub fn effects_tick(document: &Document, offset: f64, tracker: &mut ScrollTracker) {
    if let Some(header) = document.query_selector(config::HEADER_SELECTOR).ok().flatten() {
        let _ = header
            .class_list()
            .toggle_with_force("scrolled", offset > config::TINT_THRESHOLD);
        let menu_open = document
            .get_element_by_id(config::NAV_MENU_ID)
            .map_or(false, |menu| nav::is_open(&menu));
        if menu_open {
            let _ = header.class_list().remove_1("header-hidden");
        } else {
            let hidden = tracker.update(offset);
            let _ = header.class_list().toggle_with_force("header-hidden", hidden);
            update_active_link(document, &header, offset);
        }
    }
    update_scroll_up(document, offset);
}

/// Frame-coalesced scroll and resize wiring.
pub struct ScrollEffects {
    window: Window,
    // Handle of the queued animation frame, if any; teardown must cancel it
    // before the tick closure is destroyed.
    raf_id: Rc<Cell<Option<i32>>>,
    on_scroll: Closure<dyn FnMut()>,
    on_resize: Closure<dyn FnMut()>,
    // Held so pending animation-frame callbacks stay valid for our lifetime.
    _tick: Rc<Closure<dyn FnMut(f64)>>,
}

impl ScrollEffects {
    pub fn attach(window: &Window, document: &Document) -> Option<Self> {
        let tracker = Rc::new(RefCell::new(ScrollTracker::default()));

        let run_tick: Rc<dyn Fn()> = {
            let window = window.clone();
            let document = document.clone();
            let tracker = tracker.clone();
            Rc::new(move || {
                let offset = window.scroll_y().unwrap_or(0.0);
                effects_tick(&document, offset, &mut tracker.borrow_mut());
            })
        };

        let scheduled = Rc::new(Cell::new(false));
        let raf_id = Rc::new(Cell::new(None));
        let tick = Rc::new({
            let scheduled = scheduled.clone();
            let raf_id = raf_id.clone();
            let run_tick = run_tick.clone();
            Closure::wrap(Box::new(move |_timestamp: f64| {
                raf_id.set(None);
                scheduled.set(false);
                run_tick();
            }) as Box<dyn FnMut(f64)>)
        });

        let on_scroll = {
            let window = window.clone();
            let scheduled = scheduled.clone();
            let raf_id = raf_id.clone();
            let tick = tick.clone();
            Closure::wrap(Box::new(move || {
                if !scheduled.replace(true) {
                    match window.request_animation_frame((*tick).as_ref().unchecked_ref()) {
                        Ok(id) => raf_id.set(Some(id)),
                        Err(_) => scheduled.set(false),
                    }
                }
            }) as Box<dyn FnMut()>)
        };

        let on_resize = {
            let run_tick = run_tick.clone();
            let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
            Closure::wrap(Box::new(move || {
                let run_tick = run_tick.clone();
                // Replacing the slot drops (and thereby cancels) the previous timer.
                *pending.borrow_mut() = Some(Timeout::new(config::RESIZE_DEBOUNCE_MS, move || {
                    run_tick();
                }));
            }) as Box<dyn FnMut()>)
        };

        // Listeners are registered through the constructed struct so a failed
        // registration unwinds through Drop, which removes whatever did attach.
        let effects = Self {
            window: window.clone(),
            raf_id,
            on_scroll,
            on_resize,
            _tick: tick,
        };
        effects
            .window
            .add_event_listener_with_callback("scroll", effects.on_scroll.as_ref().unchecked_ref())
            .ok()?;
        effects
            .window
            .add_event_listener_with_callback("resize", effects.on_resize.as_ref().unchecked_ref())
            .ok()?;

        // Evaluate once at attach time so markers match the initial offset.
        run_tick();

        Some(effects)
    }
}

impl Drop for ScrollEffects {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("scroll", self.on_scroll.as_ref().unchecked_ref());
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref());
        // A frame queued by the scroll listener would otherwise fire into the
        // destroyed tick closure.
        if let Some(id) = self.raf_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
    }
}

/// Intercepts same-page anchor clicks and replaces the default jump with an
/// animated scroll that lands just below the header.
pub struct SmoothScroll {
    links: Vec<Element>,
    on_click: Closure<dyn FnMut(Event)>,
}

impl SmoothScroll {
    pub fn attach(window: &Window, document: &Document) -> Option<Self> {
        let on_click = {
            let window = window.clone();
            let document = document.clone();
            Closure::wrap(Box::new(move |event: Event| {
                let Some(link) = event
                    .current_target()
                    .and_then(|target| target.dyn_into::<Element>().ok())
                else {
                    return;
                };
                let Some(href) = link.get_attribute("href") else {
                    return;
                };
                let Some(fragment) = href.strip_prefix('#') else {
                    return;
                };
                if fragment.is_empty() {
                    return;
                }
                // An unresolvable fragment falls through to default navigation.
                let Some(target) = document
                    .get_element_by_id(fragment)
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                else {
                    return;
                };
                event.prevent_default();
                let height = document
                    .query_selector(config::HEADER_SELECTOR)
                    .ok()
                    .flatten()
                    .map_or(0, |header| header_height(&header));
                let top = f64::from(target.offset_top() - height) - config::ANCHOR_MARGIN;
                smooth_scroll_to(&window, top);
            }) as Box<dyn FnMut(Event)>)
        };

        let mut links = Vec::new();
        if let Ok(nodes) = document.query_selector_all(config::ANCHOR_LINK_SELECTOR) {
            for index in 0..nodes.length() {
                if let Some(link) = nodes.get(index).and_then(|node| node.dyn_into::<Element>().ok())
                {
                    let _ = link
                        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
                    links.push(link);
                }
            }
        }
        if links.is_empty() {
            return None;
        }
        Some(Self { links, on_click })
    }
}

impl Drop for SmoothScroll {
    fn drop(&mut self) {
        for link in &self.links {
            let _ = link
                .remove_event_listener_with_callback("click", self.on_click.as_ref().unchecked_ref());
        }
    }
}

/// The floating scroll-to-top button. Its visibility marker is maintained by
/// the scroll pipeline; this only owns the click handler.
pub struct ScrollToTop {
    button: Element,
    on_click: Closure<dyn FnMut(Event)>,
}

impl ScrollToTop {
    pub fn attach(window: &Window, document: &Document) -> Option<Self> {
        let button = document.get_element_by_id(config::SCROLL_UP_ID)?;
        let on_click = {
            let window = window.clone();
            Closure::wrap(Box::new(move |event: Event| {
                event.prevent_default();
                smooth_scroll_to(&window, 0.0);
            }) as Box<dyn FnMut(Event)>)
        };
        button
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .ok()?;
        Some(Self { button, on_click })
    }
}

impl Drop for ScrollToTop {
    fn drop(&mut self) {
        let _ = self
            .button
            .remove_event_listener_with_callback("click", self.on_click.as_ref().unchecked_ref());
    }
}
