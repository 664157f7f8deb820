use log::{debug, info};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{HtmlImageElement, IntersectionObserver, IntersectionObserverEntry};

use super::boot::{noop_cleanup, Cleanup, PageContext};
use super::support;

/// Images published with `data-src` instead of `src` load on first approach
/// to the viewport, then drop out of the observer.
pub fn init(ctx: &Rc<PageContext>) -> Result<Cleanup, JsValue> {
    let images = support::query_all(&ctx.document, "img[data-src]")?;
    if images.is_empty() {
        return Ok(noop_cleanup());
    }

    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                observer.unobserve(&target);
                let Some(image) = target.dyn_ref::<HtmlImageElement>() else {
                    continue;
                };
                if let Some(source) = image.get_attribute("data-src") {
                    image.set_src(&source);
                    let _ = image.remove_attribute("data-src");
                    debug!("lazy loaded {source}");
                }
            }
        },
    );
    let observer = IntersectionObserver::new(callback.as_ref().unchecked_ref())?;
    for image in &images {
        observer.observe(image);
    }

    info!("lazy loading {} images", images.len());
    Ok(Box::new(move || {
        observer.disconnect();
        drop(callback);
    }))
}
