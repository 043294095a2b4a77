//! Cosmetic transforms: parallax, hover lifts, press feedback, glow and
//! staggered delays.

const PARALLAX_RATE: f64 = -0.5;

pub const CARD_HOVER_TRANSFORM: &str = "translateY(-10px) scale(1.02)";
pub const CARD_REST_TRANSFORM: &str = "translateY(0) scale(1)";

pub const TECH_ITEM_HOVER_TRANSFORM: &str = "translateX(10px)";
pub const TECH_ITEM_REST_TRANSFORM: &str = "translateX(0)";

pub const PRESS_TRANSFORM: &str = "scale(0.95)";
pub const SETTLED_TRANSFORM: &str = "translateY(-3px)";
pub const PRESS_SETTLE_MS: u32 = 150;

pub const GLOW_SHADOW: &str = "0 0 30px rgba(59, 130, 246, 0.6)";
pub const GLOW_HOLD_MS: u32 = 1_000;
pub const GLOW_STAGGER_MS: u32 = 500;

pub const SKILL_BAR_STAGGER_MS: u32 = 200;
pub const AI_STAT_START_DELAY_MS: u32 = 200;

pub const FOCUS_OUTLINE: &str = "2px solid #3b82f6";
pub const FOCUS_OUTLINE_OFFSET: &str = "2px";
pub const FOCUSABLE_SELECTOR: &str =
    "a[href], button, textarea, input[type=\"text\"], input[type=\"radio\"], input[type=\"checkbox\"], select";

const SKIP_LINK_BASE_STYLE: &str = "position: absolute; left: 6px; background: #000; color: #fff; \
padding: 8px; text-decoration: none; border-radius: 4px; z-index: 10000; transition: top 0.3s;";
const SKIP_LINK_HIDDEN_TOP: &str = "-40px";
const SKIP_LINK_FOCUSED_TOP: &str = "6px";

pub const WILL_CHANGE_RELEASE_MS: u32 = 3_000;
pub const PRELOADER_FADE_MS: u32 = 500;

const SHAPE_MAX_DELAY_MS: f64 = 2_000.0;
const SHAPE_MIN_DURATION_MS: f64 = 4_000.0;
const SHAPE_DURATION_SPREAD_MS: f64 = 4_000.0;

pub fn parallax_offset(scroll_y: f64) -> f64 {
    scroll_y * PARALLAX_RATE
}

pub fn translate_y(px: f64) -> String {
    format!("translateY({px}px)")
}

pub fn card_transform(hovered: bool) -> &'static str {
    if hovered {
        CARD_HOVER_TRANSFORM
    } else {
        CARD_REST_TRANSFORM
    }
}

pub fn tech_item_transform(hovered: bool) -> &'static str {
    if hovered {
        TECH_ITEM_HOVER_TRANSFORM
    } else {
        TECH_ITEM_REST_TRANSFORM
    }
}

/// Start offset for the `index`-th element of a staggered group.
pub fn stagger_delay(index: usize, step_ms: u32) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX).saturating_mul(step_ms)
}

/// CSS animation delay for the `index`-th AI card.
pub fn card_animation_delay(index: usize) -> String {
    format!("{:.1}s", index as f64 * 0.2)
}

pub fn skill_width(percent: u8, revealed: bool) -> String {
    let width = if revealed { percent.min(100) } else { 0 };
    format!("width: {width}%;")
}

/// Out of view above the page until focused, then slid down to 6px.
pub fn skip_link_style(focused: bool) -> String {
    let top = if focused {
        SKIP_LINK_FOCUSED_TOP
    } else {
        SKIP_LINK_HIDDEN_TOP
    };
    format!("{SKIP_LINK_BASE_STYLE} top: {top};")
}

/// Randomized float timing for one decorative shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeTiming {
    pub delay_ms: f64,
    pub duration_ms: f64,
}

impl ShapeTiming {
    /// `delay_sample` and `duration_sample` are uniform in `0.0..1.0`.
    pub fn from_samples(delay_sample: f64, duration_sample: f64) -> Self {
        Self {
            delay_ms: delay_sample.clamp(0.0, 1.0) * SHAPE_MAX_DELAY_MS,
            duration_ms: SHAPE_MIN_DURATION_MS + duration_sample.clamp(0.0, 1.0) * SHAPE_DURATION_SPREAD_MS,
        }
    }

    pub fn style(self) -> String {
        format!(
            "animation-delay: {}ms; animation-duration: {}ms;",
            self.delay_ms, self.duration_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallax_moves_at_half_speed_upwards() {
        assert_eq!(parallax_offset(400.0), -200.0);
        assert_eq!(translate_y(parallax_offset(400.0)), "translateY(-200px)");
    }

    #[test]
    fn shape_timing_stays_in_range() {
        let low = ShapeTiming::from_samples(0.0, 0.0);
        let high = ShapeTiming::from_samples(0.999, 0.999);

        assert_eq!(low, ShapeTiming { delay_ms: 0.0, duration_ms: 4_000.0 });
        assert!(high.delay_ms < 2_000.0);
        assert!(high.duration_ms < 8_000.0);
    }

    #[test]
    fn staggered_delays_grow_by_step() {
        let delays: Vec<u32> = (0..4).map(|index| stagger_delay(index, SKILL_BAR_STAGGER_MS)).collect();
        assert_eq!(delays, vec![0, 200, 400, 600]);
        assert_eq!(card_animation_delay(3), "0.6s");
    }

    #[test]
    fn skill_width_is_zero_until_revealed() {
        assert_eq!(skill_width(90, false), "width: 0%;");
        assert_eq!(skill_width(90, true), "width: 90%;");
        assert_eq!(skill_width(140, true), "width: 100%;");
    }

    #[test]
    fn skip_link_is_positioned_and_only_its_top_moves() {
        let hidden = skip_link_style(false);
        let focused = skip_link_style(true);

        assert!(hidden.starts_with("position: absolute;"));
        assert!(hidden.ends_with("top: -40px;"));
        assert!(focused.ends_with("top: 6px;"));
        assert_eq!(
            hidden.trim_end_matches("top: -40px;"),
            focused.trim_end_matches("top: 6px;")
        );
    }

    #[test]
    fn hover_transforms_toggle() {
        assert_eq!(card_transform(true), CARD_HOVER_TRANSFORM);
        assert_eq!(card_transform(false), CARD_REST_TRANSFORM);
        assert_eq!(tech_item_transform(true), "translateX(10px)");
    }
}
