use log::info;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Element;

use super::boot::{noop_cleanup, Cleanup, PageContext};
use super::support;

const SCROLLED_CLASS: &str = "scrolled";

fn past_threshold(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

fn apply_state(header: &Element, scroll_y: f64, threshold: f64) {
    let classes = header.class_list();
    if past_threshold(scroll_y, threshold) {
        let _ = classes.add_1(SCROLLED_CLASS);
    } else {
        let _ = classes.remove_1(SCROLLED_CLASS);
    }
}

/// At most one scheduled animation frame at a time. The stored id doubles as
/// the in-flight guard and as the handle teardown needs to revoke a frame
/// that has not run yet, so the callback can never fire after its closure is
/// dropped.
struct FrameSlot(Cell<Option<i32>>);

impl FrameSlot {
    fn new() -> Self {
        Self(Cell::new(None))
    }

    fn is_pending(&self) -> bool {
        self.0.get().is_some()
    }

    fn store(&self, id: i32) {
        self.0.set(Some(id));
    }

    /// The frame ran; allow the next scroll burst to schedule again.
    fn complete(&self) {
        self.0.set(None);
    }

    /// Claim the pending frame for cancellation, if any.
    fn take(&self) -> Option<i32> {
        self.0.take()
    }
}

/// Toggles the header's "scrolled" state past a pixel threshold. Scroll
/// events only schedule work; the class swap happens at most once per frame.
pub fn init(ctx: &Rc<PageContext>) -> Result<Cleanup, JsValue> {
    let Some(header) = ctx.document.get_element_by_id(ctx.profile.header_id) else {
        return Ok(noop_cleanup());
    };
    let threshold = ctx.config.header_threshold_px;
    let window = ctx.window.clone();

    let slot = Rc::new(FrameSlot::new());
    let frame = Rc::new(Closure::<dyn FnMut()>::new({
        let header = header.clone();
        let window = window.clone();
        let slot = slot.clone();
        move || {
            apply_state(&header, window.scroll_y().unwrap_or(0.0), threshold);
            slot.complete();
        }
    }));
    let on_scroll = Closure::<dyn FnMut()>::new({
        let window = window.clone();
        let slot = slot.clone();
        let frame = frame.clone();
        move || {
            if !slot.is_pending() {
                if let Ok(id) =
                    window.request_animation_frame(frame.as_ref().as_ref().unchecked_ref())
                {
                    slot.store(id);
                }
            }
        }
    });
    window.add_event_listener_with_callback_and_add_event_listener_options(
        "scroll",
        on_scroll.as_ref().unchecked_ref(),
        &support::passive_options(),
    )?;

    // A page can load already scrolled (anchor navigation); set the state now.
    apply_state(&header, window.scroll_y().unwrap_or(0.0), threshold);

    info!("header scroll effect attached");
    Ok(Box::new(move || {
        let _ = window
            .remove_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
        // Revoke a frame still queued at teardown before its closure goes away.
        if let Some(id) = slot.take() {
            let _ = window.cancel_animation_frame(id);
        }
        drop(frame);
    }))
}

#[cfg(test)]
mod tests {
    use super::{past_threshold, FrameSlot};

    #[test]
    fn threshold_is_exclusive() {
        assert!(!past_threshold(0.0, 100.0));
        assert!(!past_threshold(100.0, 100.0));
        assert!(past_threshold(150.0, 100.0));
    }

    #[test]
    fn state_follows_scroll_both_ways() {
        // Marker present above threshold, removed once back below.
        assert!(past_threshold(150.0, 100.0));
        assert!(!past_threshold(40.0, 100.0));
    }

    #[test]
    fn one_frame_pending_per_scroll_burst() {
        let slot = FrameSlot::new();
        assert!(!slot.is_pending());
        slot.store(7);
        assert!(slot.is_pending());
        slot.complete();
        assert!(!slot.is_pending());
    }

    #[test]
    fn teardown_claims_a_still_queued_frame_exactly_once() {
        // A scroll schedules a frame; the page unmounts before it runs. The
        // slot must hand the id to teardown so the frame can be canceled
        // instead of firing into a dropped callback.
        let slot = FrameSlot::new();
        slot.store(42);
        assert_eq!(slot.take(), Some(42));
        assert_eq!(slot.take(), None);
        assert!(!slot.is_pending());
    }
}
