/// Knobs for the page behavior layer, resolved once when a page attaches.
#[derive(Clone, PartialEq, Debug)]
pub struct BehaviorConfig {
    /// Per-item delay of the cascade reveal, in ms.
    pub stagger_ms: u32,
    /// Duration of the reveal transition, fed into the injected style block.
    pub animation_ms: u32,
    /// Elements start revealing this many px before fully entering the view.
    pub reveal_offset_px: u32,
    /// Fraction of an element that must be visible to count as intersecting.
    pub reveal_threshold: f64,
    /// Scroll offset past which the header gets its "scrolled" state.
    pub header_threshold_px: f64,
    /// Extra gap kept between the header and an anchor-scroll target.
    pub anchor_margin_px: f64,
    /// Debounce window for the scroll-depth tracker.
    pub depth_debounce_ms: u32,
    /// Per-item delay of the counter pulse.
    pub pulse_stagger_ms: u32,
    /// How long a pulsed counter stays scaled up.
    pub pulse_revert_ms: u32,
    pub tracking_enabled: bool,
    /// Analytics measurement id; the loader snippet in the host page owns it,
    /// kept here so a build can be checked against the property it targets.
    pub measurement_id: &'static str,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            stagger_ms: 100,
            animation_ms: 800,
            reveal_offset_px: 100,
            reveal_threshold: 0.1,
            header_threshold_px: 50.0,
            anchor_margin_px: 20.0,
            depth_debounce_ms: 500,
            pulse_stagger_ms: 200,
            pulse_revert_ms: 300,
            tracking_enabled: tracking_default(),
            measurement_id: "G-XXXXXXXXXX",
        }
    }
}

// Keep development sessions out of the analytics property.
#[cfg(debug_assertions)]
fn tracking_default() -> bool {
    false
}

#[cfg(not(debug_assertions))]
fn tracking_default() -> bool {
    true
}
