use std::cell::{Cell, RefCell};

/// Scroll-depth milestones, in the order they are allowed to fire.
pub const DEPTH_MILESTONES: [u8; 4] = [25, 50, 75, 90];

/// High-water mark over scroll depth plus the ladder of milestone reports.
///
/// Depth only ever moves up within a session, and each milestone fires once.
/// A single movement that jumps past several thresholds yields every
/// newly-crossed one, in ascending order, so 75% can never be reported while
/// 50% is still pending.
#[derive(Default)]
pub struct ScrollDepthTracker {
    high_water: u8,
    next_milestone: usize,
}

impl ScrollDepthTracker {
    /// Feed a freshly measured depth percentage; returns the milestones that
    /// became due, lowest first.
    pub fn advance(&mut self, percent: u8) -> Vec<u8> {
        if percent <= self.high_water {
            return Vec::new();
        }
        self.high_water = percent;

        let mut due = Vec::new();
        while self.next_milestone < DEPTH_MILESTONES.len()
            && DEPTH_MILESTONES[self.next_milestone] <= percent
        {
            due.push(DEPTH_MILESTONES[self.next_milestone]);
            self.next_milestone += 1;
        }
        due
    }

    pub fn high_water(&self) -> u8 {
        self.high_water
    }
}

/// Seconds spent on the page, advanced by a 10 s interval; reports are due at
/// every 30 s multiple.
pub struct TimeOnPage {
    seconds: u32,
    tick_step: u32,
    report_every: u32,
}

impl Default for TimeOnPage {
    fn default() -> Self {
        Self {
            seconds: 0,
            tick_step: 10,
            report_every: 30,
        }
    }
}

impl TimeOnPage {
    /// Advance by one interval tick; `Some(total)` when a report is due.
    pub fn tick(&mut self) -> Option<u32> {
        self.seconds += self.tick_step;
        (self.seconds % self.report_every == 0).then(|| self.seconds)
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }
}

/// All mutable state of one page session, created at attach and dropped with
/// the document. Each field is written by exactly one controller.
#[derive(Default)]
pub struct PageSession {
    pub depth: RefCell<ScrollDepthTracker>,
    pub time: RefCell<TimeOnPage>,
    /// One-way flag for the counter pulse; set on first fire, never cleared.
    counters_pulsed: Cell<bool>,
}

impl PageSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the one-shot counter pulse. True exactly once per session.
    pub fn claim_counter_pulse(&self) -> bool {
        !self.counters_pulsed.replace(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_milestones_fire_once_in_ascending_order() {
        let mut tracker = ScrollDepthTracker::default();
        assert_eq!(tracker.advance(10), Vec::<u8>::new());
        assert_eq!(tracker.advance(30), vec![25]);
        // Re-crossing the same region reports nothing.
        assert_eq!(tracker.advance(30), Vec::<u8>::new());
        assert_eq!(tracker.advance(55), vec![50]);
        assert_eq!(tracker.advance(100), vec![75, 90]);
        assert_eq!(tracker.advance(100), Vec::<u8>::new());
    }

    #[test]
    fn depth_jump_does_not_skip_intermediate_milestones() {
        let mut tracker = ScrollDepthTracker::default();
        assert_eq!(tracker.advance(92), vec![25, 50, 75, 90]);
        assert_eq!(tracker.high_water(), 92);
    }

    #[test]
    fn depth_never_regresses() {
        let mut tracker = ScrollDepthTracker::default();
        assert_eq!(tracker.advance(60), vec![25, 50]);
        assert_eq!(tracker.advance(40), Vec::<u8>::new());
        assert_eq!(tracker.high_water(), 60);
    }

    #[test]
    fn time_reports_only_at_thirty_second_multiples() {
        let mut time = TimeOnPage::default();
        let mut reported = Vec::new();
        for _ in 0..12 {
            if let Some(t) = time.tick() {
                reported.push(t);
            }
        }
        assert_eq!(reported, vec![30, 60, 90, 120]);
        assert_eq!(time.seconds(), 120);
    }

    #[test]
    fn counter_pulse_claims_exactly_once() {
        let session = PageSession::new();
        assert!(session.claim_counter_pulse());
        assert!(!session.claim_counter_pulse());
        assert!(!session.claim_counter_pulse());
    }
}
