use log::{error, info};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AddEventListenerOptions, Document, ErrorEvent, Window};

use crate::behavior::{anchors, engagement, forms, header, interactions, lazy, reveal, support};
use crate::config::BehaviorConfig;
use crate::session::PageSession;
use crate::tracking::{self, AnalyticsEvent, Reporter};

/// Detaches whatever a controller attached. Running it is optional; listeners
/// die with the document anyway.
pub type Cleanup = Box<dyn FnOnce()>;

pub fn noop_cleanup() -> Cleanup {
    Box::new(|| {})
}

/// Holds a cleanup produced after attach returns (the deferred-init path),
/// so the closure handed to the page can still detach it later.
type CleanupSlot = Rc<RefCell<Option<Cleanup>>>;

fn drain(slot: &CleanupSlot) {
    if let Some(cleanup) = slot.borrow_mut().take() {
        cleanup();
    }
}

/// The selector set one page variant hands to the shared behavior layer.
/// Control logic is identical across pages; only the targets differ.
#[derive(Clone, PartialEq, Debug)]
pub struct PageProfile {
    pub header_id: &'static str,
    pub reveal_selector: &'static str,
    /// When set, revealing a container also staggers these nested elements.
    pub child_selector: Option<&'static str>,
    pub symbol_selector: &'static str,
    /// When set, the counter pulse watches this section.
    pub counter_section: Option<&'static str>,
    pub counter_item: &'static str,
}

impl PageProfile {
    pub fn home() -> Self {
        Self {
            header_id: "header",
            reveal_selector: ".service-card, .testimonial-card, .process-step, .faq-item, .stat-item",
            child_selector: None,
            symbol_selector: ".hero-symbol",
            counter_section: None,
            counter_item: ".stat-number",
        }
    }

    pub fn method() -> Self {
        Self {
            header_id: "header",
            reveal_selector: ".service-card, .process-step, .faq-item, .stat-item",
            child_selector: Some(".stagger-item"),
            symbol_selector: ".hero-symbol",
            counter_section: Some(".stats-section"),
            counter_item: ".stat-number",
        }
    }
}

/// Everything a controller needs, owned for the lifetime of one page visit.
pub struct PageContext {
    pub window: Window,
    pub document: Document,
    pub config: BehaviorConfig,
    pub profile: PageProfile,
    pub session: PageSession,
    pub reporter: Rc<dyn Reporter>,
    pub reduced_motion: bool,
}

/// Attach the behavior layer for one page. The returned closure detaches it,
/// shaped to drop straight into a use_effect destructor.
pub fn attach(profile: PageProfile) -> Cleanup {
    let Some(window) = web_sys::window() else {
        error!("no window object, page behavior not attached");
        return noop_cleanup();
    };
    let Some(document) = window.document() else {
        error!("no document, page behavior not attached");
        return noop_cleanup();
    };

    let config = BehaviorConfig::default();
    let reporter = tracking::detect(&config);
    let reduced_motion = support::prefers_reduced_motion(&window);
    let ctx = Rc::new(PageContext {
        window,
        document,
        config,
        profile,
        session: PageSession::new(),
        reporter,
        reduced_motion,
    });

    if ctx.document.ready_state() == "loading" {
        // Still waiting for the document. Controllers attach from a one-shot
        // continuation; their cleanup lands in a slot the returned closure
        // drains, so a deferred page detaches like any other.
        let slot: CleanupSlot = Rc::new(RefCell::new(None));
        let once = Closure::once({
            let slot = slot.clone();
            let init_ctx = ctx.clone();
            move || {
                *slot.borrow_mut() = Some(init_page(&init_ctx));
            }
        });
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        if ctx
            .document
            .add_event_listener_with_callback_and_add_event_listener_options(
                "DOMContentLoaded",
                once.as_ref().unchecked_ref(),
                &options,
            )
            .is_err()
        {
            error!("could not defer init to DOMContentLoaded");
        }
        once.forget();
        Box::new(move || drain(&slot))
    } else {
        init_page(&ctx)
    }
}

/// Run every controller in a fixed order behind one failure boundary. The
/// first error aborts the rest, gets reported and logged; the page itself
/// stays alive either way.
fn init_page(ctx: &Rc<PageContext>) -> Cleanup {
    let mut cleanups: Vec<Cleanup> = Vec::new();

    match run_controllers(ctx, &mut cleanups) {
        Ok(()) => {
            let path = ctx.window.location().pathname().unwrap_or_default();
            info!("page behavior initialized for {path}");
            ctx.reporter
                .report(&AnalyticsEvent::new("Page", "Loaded").with_label(path));
        }
        Err(err) => {
            let message = describe(&err);
            error!("page behavior init failed: {message}");
            ctx.reporter
                .report(&AnalyticsEvent::new("Error", "Init Failed").with_label(message));
        }
    }

    Box::new(move || {
        for cleanup in cleanups {
            cleanup();
        }
    })
}

fn run_controllers(ctx: &Rc<PageContext>, cleanups: &mut Vec<Cleanup>) -> Result<(), JsValue> {
    cleanups.push(header::init(ctx)?);
    cleanups.push(anchors::init(ctx)?);
    cleanups.push(reveal::init(ctx)?);
    cleanups.push(interactions::init(ctx)?);
    cleanups.push(engagement::init(ctx)?);
    cleanups.push(forms::init(ctx)?);
    cleanups.push(lazy::init(ctx)?);
    cleanups.push(install_error_hook(ctx)?);
    Ok(())
}

/// Uncaught exceptions after init: log with position, report, keep going.
fn install_error_hook(ctx: &Rc<PageContext>) -> Result<Cleanup, JsValue> {
    let hook = Closure::<dyn FnMut(ErrorEvent)>::new({
        let ctx = ctx.clone();
        move |event: ErrorEvent| {
            error!(
                "uncaught error: {} ({}:{}:{})",
                event.message(),
                event.filename(),
                event.lineno(),
                event.colno()
            );
            ctx.reporter.report(
                &AnalyticsEvent::new("Error", "JavaScript Error").with_label(event.message()),
            );
        }
    });
    ctx.window
        .add_event_listener_with_callback("error", hook.as_ref().unchecked_ref())?;

    let window = ctx.window.clone();
    Ok(Box::new(move || {
        let _ = window.remove_event_listener_with_callback("error", hook.as_ref().unchecked_ref());
    }))
}

pub fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

#[cfg(test)]
mod tests {
    use super::{drain, Cleanup, CleanupSlot};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn deferred_cleanup_runs_once_when_drained() {
        // Init finishes after attach has already returned; the stashed
        // cleanup must still run when the page detaches, and only once.
        let ran = Rc::new(Cell::new(0));
        let slot: CleanupSlot = Rc::new(RefCell::new(None));
        *slot.borrow_mut() = Some(Box::new({
            let ran = ran.clone();
            move || ran.set(ran.get() + 1)
        }) as Cleanup);

        drain(&slot);
        assert_eq!(ran.get(), 1);
        drain(&slot);
        assert_eq!(ran.get(), 1);
    }

    #[test]
    fn draining_before_init_completes_is_a_no_op() {
        let slot: CleanupSlot = Rc::new(RefCell::new(None));
        drain(&slot);
        assert!(slot.borrow().is_none());
    }
}
