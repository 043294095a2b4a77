use crate::config::Config;

/// Targets that read as a percentage once the ramp completes.
const PERCENT_TARGETS: &[u32] = &[95];

pub fn unit_suffix(target: u32) -> Option<&'static str> {
    PERCENT_TARGETS.contains(&target).then_some("%")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterFrame {
    pub display: String,
    pub done: bool,
}

/// Linear ramp from zero to `target`, one step per tick.
#[derive(Clone, Debug)]
pub struct CounterRamp {
    target: u32,
    steps: f64,
    ticks: u32,
    suffix: Option<&'static str>,
    done: bool,
}

impl CounterRamp {
    pub fn new(target: u32, duration_ms: u32, step_ms: u32) -> Self {
        let steps = (f64::from(duration_ms) / f64::from(step_ms.max(1))).max(1.0);

        Self {
            target,
            steps,
            ticks: 0,
            suffix: None,
            done: false,
        }
    }

    pub fn from_config(target: u32, config: &Config) -> Self {
        Self::new(target, config.counter_duration, config.counter_step)
    }

    /// Suffix appended to the final frame only.
    pub fn with_suffix(mut self, suffix: Option<&'static str>) -> Self {
        self.suffix = suffix;
        self
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn tick(&mut self) -> CounterFrame {
        if !self.done {
            self.ticks += 1;
        }

        let current = f64::from(self.target) * f64::from(self.ticks) / self.steps;
        if current >= f64::from(self.target) {
            self.done = true;
        }

        let display = if self.done {
            format!("{}{}", self.target, self.suffix.unwrap_or_default())
        } else {
            (current.floor() as u32).min(self.target).to_string()
        };

        CounterFrame {
            display,
            done: self.done,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(mut ramp: CounterRamp) -> Vec<CounterFrame> {
        let mut frames = Vec::new();
        while !ramp.is_done() {
            frames.push(ramp.tick());
            assert!(frames.len() < 10_000, "ramp never completed");
        }
        frames
    }

    #[test]
    fn percent_target_ends_with_suffix() {
        let frames = run_to_end(CounterRamp::new(95, 2_000, 16).with_suffix(unit_suffix(95)));
        assert_eq!(frames.last().map(|frame| frame.display.as_str()), Some("95%"));
        assert_eq!(frames.len(), 125);
    }

    #[test]
    fn ramp_never_exceeds_target_and_never_decreases() {
        let frames = run_to_end(CounterRamp::new(95, 2_000, 16));
        let mut previous = 0u32;

        for frame in &frames {
            let value: u32 = frame.display.parse().expect("plain integer display");
            assert!(value <= 95);
            assert!(value >= previous);
            previous = value;
        }

        assert_eq!(previous, 95);
    }

    #[test]
    fn zero_target_completes_on_first_tick() {
        let frames = run_to_end(CounterRamp::new(0, 2_000, 16));
        assert_eq!(frames, vec![CounterFrame { display: "0".into(), done: true }]);
    }

    #[test]
    fn only_known_targets_get_a_suffix() {
        assert_eq!(unit_suffix(95), Some("%"));
        assert_eq!(unit_suffix(50), None);
    }

    #[test]
    fn ticking_after_completion_is_stable() {
        let mut ramp = CounterRamp::new(3, 32, 16);
        let _ = ramp.tick();
        let last = ramp.tick();
        assert!(last.done);
        assert_eq!(ramp.tick(), last);
    }
}
