//! The page interaction controller.
//!
//! One `PageController` is constructed per page load. It owns every listener and
//! observer the site wires up; dropping it detaches all of them, which is what
//! lets tests attach and tear down independent instances against fixture DOM.

use web_sys::{Document, Window};

use crate::diagnostics::Diagnostics;
use crate::forms::FormGuard;
use crate::lazy::LazyImages;
use crate::nav::MobileNav;
use crate::reveal::RevealObserver;
use crate::scroll::{ScrollEffects, ScrollToTop, SmoothScroll};
use crate::whatsapp::WhatsAppLinks;

// Fields are held for their Drop impls; each one detaches its own listeners.
pub struct PageController {
    _nav: Option<MobileNav>,
    _smooth: Option<SmoothScroll>,
    _effects: Option<ScrollEffects>,
    _to_top: Option<ScrollToTop>,
    _reveal: Option<RevealObserver>,
    _lazy: Option<LazyImages>,
    _forms: Option<FormGuard>,
    _whatsapp: Option<WhatsAppLinks>,
    _diagnostics: Option<Diagnostics>,
}

impl PageController {
    /// Attaches every subsystem. Each one degrades independently when its
    /// expected markup is absent, so a partial page still gets the rest.
    pub fn attach(window: &Window, document: &Document) -> Self {
        let nav = MobileNav::attach(document);
        if nav.is_none() {
            log::debug!("navigation toggle or menu missing; mobile nav inactive");
        }
        let smooth = SmoothScroll::attach(window, document);
        let effects = ScrollEffects::attach(window, document);
        let to_top = ScrollToTop::attach(window, document);
        if to_top.is_none() {
            log::debug!("scroll-up button missing; scroll-to-top inactive");
        }
        let reveal = match RevealObserver::attach(document) {
            Ok(reveal) => Some(reveal),
            Err(err) => {
                log::warn!("reveal observer unavailable: {err:?}");
                None
            }
        };
        let lazy = match LazyImages::attach(document) {
            Ok(lazy) => Some(lazy),
            Err(err) => {
                log::warn!("lazy image observer unavailable: {err:?}");
                None
            }
        };
        let forms = FormGuard::attach(document);
        let whatsapp = WhatsAppLinks::attach(document);
        let diagnostics = Diagnostics::attach(window);

        log::debug!("page interaction controller attached");
        Self {
            _nav: nav,
            _smooth: smooth,
            _effects: effects,
            _to_top: to_top,
            _reveal: reveal,
            _lazy: lazy,
            _forms: forms,
            _whatsapp: whatsapp,
            _diagnostics: diagnostics,
        }
    }

    /// Detaches every listener and observer.
    pub fn detach(self) {
        drop(self);
        log::debug!("page interaction controller detached");
    }
}
