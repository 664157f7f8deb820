use gloo_timers::callback::Timeout;
use log::info;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::boot::{noop_cleanup, Cleanup, PageContext};
use super::support;

const PENDING_CLASS: &str = "fade-in";
const REVEALED_CLASS: &str = "visible";

/// Map a batch of observer entries (intersecting or not) to reveal delays.
/// Only intersecting entries count toward the cascade index.
fn batch_delays(intersecting: &[bool], step_ms: u32) -> Vec<Option<u32>> {
    let mut index: u32 = 0;
    intersecting
        .iter()
        .map(|&hit| {
            hit.then(|| {
                let delay = index * step_ms;
                index += 1;
                delay
            })
        })
        .collect()
}

fn mark_pending(element: &Element) {
    let classes = element.class_list();
    if !classes.contains(PENDING_CLASS) {
        let _ = classes.add_1(PENDING_CLASS);
    }
}

fn reveal_now(element: &Element) {
    let _ = element.class_list().add_1(REVEALED_CLASS);
}

fn children_of(ctx: &PageContext, container: &Element) -> Vec<Element> {
    ctx.profile
        .child_selector
        .and_then(|selector| container.query_selector_all(selector).ok())
        .map(support::collect)
        .unwrap_or_default()
}

/// Cascade the container's nested elements, independent of the observer that
/// revealed the container itself.
fn schedule_children(ctx: &PageContext, container: &Element) {
    for (index, child) in children_of(ctx, container).into_iter().enumerate() {
        mark_pending(&child);
        let delay = index as u32 * ctx.config.stagger_ms;
        Timeout::new(delay, move || reveal_now(&child)).forget();
    }
}

/// One-way pending → revealed per element: first intersection schedules the
/// reveal and detaches the observer from that element, so leaving and
/// re-entering the viewport can never re-trigger it.
pub fn init(ctx: &Rc<PageContext>) -> Result<Cleanup, JsValue> {
    let candidates = support::query_all(&ctx.document, ctx.profile.reveal_selector)?;
    if candidates.is_empty() {
        return Ok(noop_cleanup());
    }

    for element in &candidates {
        mark_pending(element);
    }

    if ctx.reduced_motion {
        for element in &candidates {
            reveal_now(element);
            for child in children_of(ctx, element) {
                mark_pending(&child);
                reveal_now(&child);
            }
        }
        info!("reveal animations disabled (prefers-reduced-motion)");
        return Ok(noop_cleanup());
    }

    let options = IntersectionObserverInit::new();
    // Fire a little before the element fully enters the view.
    options.set_root_margin(&format!("0px 0px -{}px 0px", ctx.config.reveal_offset_px));
    options.set_threshold(&JsValue::from_f64(ctx.config.reveal_threshold));

    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new({
        let ctx = ctx.clone();
        move |entries: Array, observer: IntersectionObserver| {
            let entries: Vec<IntersectionObserverEntry> = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .collect();
            let hits: Vec<bool> = entries.iter().map(|e| e.is_intersecting()).collect();

            for (entry, delay) in entries.iter().zip(batch_delays(&hits, ctx.config.stagger_ms)) {
                let Some(delay) = delay else { continue };
                let target = entry.target();
                observer.unobserve(&target);

                let ctx = ctx.clone();
                Timeout::new(delay, move || {
                    reveal_now(&target);
                    schedule_children(&ctx, &target);
                })
                .forget();
            }
        }
    });

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for element in &candidates {
        observer.observe(element);
    }
    info!("reveal animator observing {} elements", candidates.len());

    Ok(Box::new(move || {
        observer.disconnect();
        drop(callback);
    }))
}

#[cfg(test)]
mod tests {
    use super::batch_delays;

    #[test]
    fn cascade_counts_only_intersecting_entries() {
        assert_eq!(
            batch_delays(&[true, false, true, true], 100),
            vec![Some(0), None, Some(100), Some(200)]
        );
    }

    #[test]
    fn empty_batch_yields_nothing() {
        assert_eq!(batch_delays(&[], 100), Vec::<Option<u32>>::new());
        assert_eq!(batch_delays(&[false, false], 100), vec![None, None]);
    }

    #[test]
    fn first_intersecting_entry_reveals_immediately() {
        assert_eq!(batch_delays(&[false, true], 100), vec![None, Some(0)]);
    }
}
