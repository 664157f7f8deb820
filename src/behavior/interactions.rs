use gloo_timers::callback::Timeout;
use log::{debug, info};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, Window,
};

use super::boot::{Cleanup, PageContext};
use super::support;
use crate::tracking::AnalyticsEvent;

const KONAMI: [&str; 10] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "b",
    "a",
];

/// One key of progress through the sequence; any miss starts over.
fn advance_konami(progress: usize, key: &str) -> usize {
    if KONAMI.get(progress) == Some(&key) {
        progress + 1
    } else {
        0
    }
}

fn section_in_view(window: &Window, section: &Element) -> bool {
    let rect = section.get_bounding_client_rect();
    let viewport = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    rect.top() < viewport && rect.bottom() > 0.0
}

type HoverPair = (Element, Closure<dyn FnMut()>, Closure<dyn FnMut()>);

/// Hover on the decorative hero symbols: pause their drift animation and
/// enlarge/fade them; leaving restores the stylesheet defaults.
fn attach_symbols(ctx: &Rc<PageContext>) -> Result<Vec<HoverPair>, JsValue> {
    let mut pairs = Vec::new();
    for symbol in support::query_all(&ctx.document, ctx.profile.symbol_selector)? {
        let Ok(symbol) = symbol.dyn_into::<HtmlElement>() else {
            continue;
        };
        let on_enter = Closure::<dyn FnMut()>::new({
            let symbol = symbol.clone();
            move || {
                let style = symbol.style();
                let _ = style.set_property("animation-play-state", "paused");
                let _ = style.set_property("transform", "scale(1.2)");
                let _ = style.set_property("opacity", "0.3");
            }
        });
        let on_leave = Closure::<dyn FnMut()>::new({
            let symbol = symbol.clone();
            move || {
                let style = symbol.style();
                let _ = style.set_property("animation-play-state", "running");
                let _ = style.remove_property("transform");
                let _ = style.remove_property("opacity");
            }
        });
        symbol.add_event_listener_with_callback("mouseenter", on_enter.as_ref().unchecked_ref())?;
        symbol.add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref())?;
        pairs.push((symbol.into(), on_enter, on_leave));
    }
    Ok(pairs)
}

/// Scale each numbered element up briefly, 200 ms apart, reverting after
/// 300 ms. Guarded by the session's one-way flag: once per session, ever.
fn pulse_counters(ctx: &Rc<PageContext>) {
    let Some(section_selector) = ctx.profile.counter_section else {
        return;
    };
    let Ok(Some(section)) = ctx.document.query_selector(section_selector) else {
        return;
    };
    if !section_in_view(&ctx.window, &section) {
        return;
    }
    if !ctx.session.claim_counter_pulse() {
        return;
    }

    let counters = section
        .query_selector_all(ctx.profile.counter_item)
        .map(support::collect)
        .unwrap_or_default();
    for (index, counter) in counters.into_iter().enumerate() {
        let Ok(counter) = counter.dyn_into::<HtmlElement>() else {
            continue;
        };
        let revert_ms = ctx.config.pulse_revert_ms;
        Timeout::new(index as u32 * ctx.config.pulse_stagger_ms, move || {
            let style = counter.style();
            let _ = style.set_property("transition", "transform 0.3s ease");
            let _ = style.set_property("transform", "scale(1.15)");
            Timeout::new(revert_ms, move || {
                let _ = counter.style().remove_property("transform");
            })
            .forget();
        })
        .forget();
    }
    debug!("counter pulse fired");
}

/// One-shot opening animation on the hero graphic, triggered at half
/// visibility and detached immediately after.
fn attach_path_animation(
    ctx: &Rc<PageContext>,
) -> Result<Option<(IntersectionObserver, Closure<dyn FnMut(Array, IntersectionObserver)>)>, JsValue>
{
    let Ok(Some(path)) = ctx.document.query_selector(".path-opening") else {
        return Ok(None);
    };
    let Ok(path) = path.dyn_into::<HtmlElement>() else {
        return Ok(None);
    };
    let Ok(Some(trigger)) = ctx.document.query_selector(".blocked-path") else {
        return Ok(None);
    };

    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let _ = path
                        .style()
                        .set_property("animation", "path-opening 3s ease-out forwards");
                    observer.unobserve(&entry.target());
                }
            }
        },
    );
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(0.5));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    observer.observe(&trigger);
    Ok(Some((observer, callback)))
}

fn attach_konami(ctx: &Rc<PageContext>) -> Result<Closure<dyn FnMut(KeyboardEvent)>, JsValue> {
    let progress = std::cell::Cell::new(0usize);
    let on_key = Closure::<dyn FnMut(KeyboardEvent)>::new({
        let ctx = ctx.clone();
        move |event: KeyboardEvent| {
            let next = advance_konami(progress.get(), &event.key());
            progress.set(next);
            if next == KONAMI.len() {
                progress.set(0);
                if let Some(body) = ctx.document.body() {
                    let _ = body
                        .style()
                        .set_property("animation", "rainbow 5s linear infinite");
                }
                info!("easter egg activated");
                ctx.reporter.report(
                    &AnalyticsEvent::new("Easter Egg", "Konami Code").with_label("Activated"),
                );
            }
        }
    });
    ctx.document
        .add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())?;
    Ok(on_key)
}

pub fn init(ctx: &Rc<PageContext>) -> Result<Cleanup, JsValue> {
    let hover_pairs = if ctx.reduced_motion {
        Vec::new()
    } else {
        attach_symbols(ctx)?
    };
    let path = if ctx.reduced_motion {
        None
    } else {
        attach_path_animation(ctx)?
    };

    // Counter pulse: checked on every scroll and once right now, so a page
    // that opens on the section still pulses.
    let on_scroll = if ctx.profile.counter_section.is_some() {
        let handler = Closure::<dyn FnMut()>::new({
            let ctx = ctx.clone();
            move || pulse_counters(&ctx)
        });
        ctx.window
            .add_event_listener_with_callback_and_add_event_listener_options(
                "scroll",
                handler.as_ref().unchecked_ref(),
                &support::passive_options(),
            )?;
        pulse_counters(ctx);
        Some(handler)
    } else {
        None
    };

    let konami = attach_konami(ctx)?;

    info!(
        "micro-interactions attached ({} symbols)",
        hover_pairs.len()
    );
    let window = ctx.window.clone();
    let document = ctx.document.clone();
    Ok(Box::new(move || {
        for (symbol, on_enter, on_leave) in hover_pairs {
            let _ = symbol.remove_event_listener_with_callback(
                "mouseenter",
                on_enter.as_ref().unchecked_ref(),
            );
            let _ = symbol.remove_event_listener_with_callback(
                "mouseleave",
                on_leave.as_ref().unchecked_ref(),
            );
        }
        if let Some((observer, callback)) = path {
            observer.disconnect();
            drop(callback);
        }
        if let Some(handler) = on_scroll {
            let _ = window
                .remove_event_listener_with_callback("scroll", handler.as_ref().unchecked_ref());
        }
        let _ = document
            .remove_event_listener_with_callback("keydown", konami.as_ref().unchecked_ref());
    }))
}

#[cfg(test)]
mod tests {
    use super::{advance_konami, KONAMI};

    #[test]
    fn full_sequence_completes() {
        let mut progress = 0;
        for key in KONAMI {
            progress = advance_konami(progress, key);
        }
        assert_eq!(progress, KONAMI.len());
    }

    #[test]
    fn any_miss_resets_progress() {
        let mut progress = 0;
        progress = advance_konami(progress, "ArrowUp");
        progress = advance_konami(progress, "ArrowUp");
        assert_eq!(progress, 2);
        progress = advance_konami(progress, "x");
        assert_eq!(progress, 0);
    }
}
