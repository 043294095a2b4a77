use crate::config::Config;

/// Delays between typing steps, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypingTimings {
    pub type_ms: u32,
    pub delete_ms: u32,
    pub pause_ms: u32,
    pub restart_ms: u32,
}

impl TypingTimings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            type_ms: config.typing_speed,
            delete_ms: config.typing_delete_speed,
            pause_ms: config.typing_pause_delay,
            restart_ms: config.typing_restart_delay,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TypingState {
    pub phrase: usize,
    pub chars: usize,
    pub deleting: bool,
}

/// Text to display now and how long to wait before the next step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypingFrame {
    pub text: String,
    pub delay_ms: u32,
}

/// Type/pause/delete loop over a fixed phrase list. Never terminates.
#[derive(Clone, Debug)]
pub struct Typewriter {
    phrases: Vec<String>,
    timings: TypingTimings,
    state: TypingState,
}

impl Typewriter {
    /// `None` for an empty phrase list: there is nothing to animate.
    pub fn new<I, S>(phrases: I, timings: TypingTimings) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases: Vec<String> = phrases.into_iter().map(Into::into).collect();
        if phrases.is_empty() {
            return None;
        }

        Some(Self {
            phrases,
            timings,
            state: TypingState::default(),
        })
    }

    #[cfg(test)]
    pub fn state(&self) -> TypingState {
        self.state
    }

    pub fn next_frame(&mut self) -> TypingFrame {
        let phrase = &self.phrases[self.state.phrase];
        let len = phrase.chars().count();

        if self.state.deleting {
            self.state.chars = self.state.chars.saturating_sub(1);
        } else {
            self.state.chars = (self.state.chars + 1).min(len);
        }

        let text: String = phrase.chars().take(self.state.chars).collect();
        let mut delay_ms = if self.state.deleting {
            self.timings.delete_ms
        } else {
            self.timings.type_ms
        };

        if !self.state.deleting && self.state.chars == len {
            delay_ms = self.timings.pause_ms;
            self.state.deleting = true;
        } else if self.state.deleting && self.state.chars == 0 {
            self.state.deleting = false;
            self.state.phrase = (self.state.phrase + 1) % self.phrases.len();
            delay_ms = self.timings.restart_ms;
        }

        TypingFrame { text, delay_ms }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timings() -> TypingTimings {
        TypingTimings {
            type_ms: 100,
            delete_ms: 50,
            pause_ms: 2_000,
            restart_ms: 500,
        }
    }

    #[test]
    fn empty_phrase_list_never_starts() {
        assert!(Typewriter::new(Vec::<String>::new(), timings()).is_none());
    }

    #[test]
    fn types_pauses_then_deletes() {
        let mut writer = Typewriter::new(["Hola"], timings()).expect("non-empty");
        let frames: Vec<TypingFrame> = (0..9).map(|_| writer.next_frame()).collect();

        assert_eq!(frames[0], TypingFrame { text: "H".into(), delay_ms: 100 });
        assert_eq!(frames[3], TypingFrame { text: "Hola".into(), delay_ms: 2_000 });
        assert_eq!(frames[4], TypingFrame { text: "Hol".into(), delay_ms: 50 });
        assert_eq!(frames[7], TypingFrame { text: String::new(), delay_ms: 500 });
        assert_eq!(frames[8], TypingFrame { text: "H".into(), delay_ms: 100 });
    }

    #[test]
    fn visits_phrases_in_order_and_wraps() {
        let mut writer = Typewriter::new(["ab", "c", "Informático"], timings()).expect("non-empty");
        let mut completed = Vec::new();

        for _ in 0..200 {
            let frame = writer.next_frame();
            if frame.delay_ms == 2_000 {
                completed.push(frame.text);
            }
        }

        assert!(completed.len() > 4);
        for (index, text) in completed.iter().enumerate() {
            let expected = ["ab", "c", "Informático"][index % 3];
            assert_eq!(text, expected);
        }
    }

    #[test]
    fn empty_phrase_inside_list_does_not_stall() {
        let mut writer = Typewriter::new(["", "x"], timings()).expect("non-empty");
        let _ = writer.next_frame();
        let _ = writer.next_frame();
        assert_eq!(writer.state().phrase, 1);
    }
}
