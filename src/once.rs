/// Idempotence guard shared by every one-shot animation group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OneShot {
    fired: bool,
}

impl OneShot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` exactly once.
    pub fn fire(&mut self) -> bool {
        !std::mem::replace(&mut self.fired, true)
    }

    #[cfg(test)]
    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

/// Visibility samples this close below the threshold still count as a crossing.
const RATIO_TOLERANCE: f64 = 0.01;

/// Fires the first time a target's visible share reaches `threshold`.
#[derive(Clone, Debug)]
pub struct ViewportTrigger {
    threshold: f64,
    guard: OneShot,
}

impl ViewportTrigger {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            guard: OneShot::new(),
        }
    }

    /// Feeds one visibility sample. Returns `true` on the first crossing only.
    pub fn observe(&mut self, intersecting: bool, visible_ratio: f64) -> bool {
        if !intersecting || visible_ratio + RATIO_TOLERANCE < self.threshold {
            return false;
        }

        self.guard.fire()
    }

    #[cfg(test)]
    pub fn has_fired(&self) -> bool {
        self.guard.has_fired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_fires_once() {
        let mut guard = OneShot::new();
        assert!(guard.fire());
        assert!(!guard.fire());
        assert!(guard.has_fired());
    }

    #[test]
    fn trigger_ignores_samples_below_threshold() {
        let mut trigger = ViewportTrigger::new(0.5);
        assert!(!trigger.observe(true, 0.3));
        assert!(!trigger.observe(false, 0.9));
        assert!(!trigger.has_fired());
    }

    #[test]
    fn zero_threshold_fires_on_any_intersection() {
        let mut trigger = ViewportTrigger::new(0.0);
        assert!(trigger.observe(true, 0.0));
    }

    #[test]
    fn trigger_does_not_refire_on_repeated_crossings() {
        let mut trigger = ViewportTrigger::new(0.5);
        assert!(trigger.observe(true, 0.5));
        assert!(!trigger.observe(false, 0.0));
        assert!(!trigger.observe(true, 1.0));
        assert!(trigger.has_fired());
    }
}
