//! Rate limiters for high-frequency browser events.
//!
//! Both limiters are clock-agnostic: callers pass timestamps (throttle) or
//! arm their own timers (debounce), so the admission rules stay testable
//! without a browser.

/// Leading-edge throttle: the first call runs, every call inside the
/// following window is dropped.
#[derive(Clone, Debug)]
pub struct Throttle {
    window_ms: f64,
    blocked_until: Option<f64>,
}

impl Throttle {
    pub fn new(window_ms: u32) -> Self {
        Self {
            window_ms: f64::from(window_ms),
            blocked_until: None,
        }
    }

    pub fn admit(&mut self, now_ms: f64) -> bool {
        match self.blocked_until {
            Some(until) if now_ms < until => false,
            _ => {
                self.blocked_until = Some(now_ms + self.window_ms);
                true
            }
        }
    }
}

/// What a debounced call asks of its caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebounceCall {
    /// Run the wrapped function right away (leading edge).
    pub invoke_now: bool,
    /// Timer generation to arm; pass it back to [`Debounce::elapse`].
    pub generation: u64,
    pub wait_ms: u32,
}

/// Delays invocation until `wait_ms` of quiet. With `immediate`, the call
/// that starts a quiet period runs at once and the trailing edge is skipped.
#[derive(Clone, Debug)]
pub struct Debounce {
    wait_ms: u32,
    immediate: bool,
    pending: bool,
    generation: u64,
}

impl Debounce {
    pub fn new(wait_ms: u32, immediate: bool) -> Self {
        Self {
            wait_ms,
            immediate,
            pending: false,
            generation: 0,
        }
    }

    pub fn call(&mut self) -> DebounceCall {
        let invoke_now = self.immediate && !self.pending;
        self.pending = true;
        self.generation += 1;

        DebounceCall {
            invoke_now,
            generation: self.generation,
            wait_ms: self.wait_ms,
        }
    }

    /// A timer armed for `generation` fired. Returns whether the wrapped
    /// function runs now. Superseded timers are ignored.
    pub fn elapse(&mut self, generation: u64) -> bool {
        if !self.pending || generation != self.generation {
            return false;
        }

        self.pending = false;
        !self.immediate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttle_admits_once_per_window() {
        let mut throttle = Throttle::new(100);
        let admitted = (0..10)
            .map(|step| throttle.admit(f64::from(step) * 5.0))
            .filter(|admitted| *admitted)
            .count();

        assert_eq!(admitted, 1);
    }

    #[test]
    fn throttle_reopens_after_window() {
        let mut throttle = Throttle::new(100);
        assert!(throttle.admit(0.0));
        assert!(!throttle.admit(99.9));
        assert!(throttle.admit(100.0));
        assert!(!throttle.admit(150.0));
    }

    #[test]
    fn trailing_debounce_runs_only_for_last_timer() {
        let mut debounce = Debounce::new(200, false);
        let first = debounce.call();
        let second = debounce.call();

        assert!(!first.invoke_now);
        assert!(!second.invoke_now);
        assert!(!debounce.elapse(first.generation));
        assert!(debounce.elapse(second.generation));
        assert!(!debounce.elapse(second.generation));
    }

    #[test]
    fn immediate_debounce_runs_on_leading_edge_only() {
        let mut debounce = Debounce::new(1_000, true);
        let first = debounce.call();
        let second = debounce.call();

        assert!(first.invoke_now);
        assert!(!second.invoke_now);
        assert!(!debounce.elapse(second.generation));

        let after_quiet = debounce.call();
        assert!(after_quiet.invoke_now);
    }
}
