/// Scroll depth past which the navbar switches to its compact style.
pub const NAVBAR_SCROLLED_AFTER_PX: f64 = 50.0;
/// Scroll depth past which the back-to-top button shows.
pub const SCROLL_TOP_VISIBLE_AFTER_PX: f64 = 300.0;
/// Extra vertical slack when deciding whether a reveal target is on screen.
pub const REVEAL_MARGIN_PX: f64 = 100.0;

pub fn navbar_scrolled(scroll_y: f64) -> bool {
    scroll_y > NAVBAR_SCROLLED_AFTER_PX
}

pub fn scroll_top_visible(scroll_y: f64) -> bool {
    scroll_y > SCROLL_TOP_VISIBLE_AFTER_PX
}

/// Quadratic ease-in-out: `t` elapsed, `b` start, `c` change, `d` duration.
pub fn ease_in_out_quad(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let mut t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * t * t + b;
    }
    t -= 1.0;
    -c / 2.0 * (t * (t - 2.0) - 1.0) + b
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollFrame {
    pub y: f64,
    pub finished: bool,
}

/// Eased scroll from the current offset to a target, sampled per frame.
#[derive(Clone, Debug)]
pub struct SmoothScroll {
    from: f64,
    distance: f64,
    duration_ms: f64,
    started_at: Option<f64>,
}

impl SmoothScroll {
    pub fn new(from: f64, to: f64, duration_ms: u32) -> Self {
        Self {
            from,
            distance: to - from,
            duration_ms: f64::from(duration_ms.max(1)),
            started_at: None,
        }
    }

    /// The first sample fixes the start time.
    pub fn frame(&mut self, now_ms: f64) -> ScrollFrame {
        let started_at = *self.started_at.get_or_insert(now_ms);
        let elapsed = (now_ms - started_at).clamp(0.0, self.duration_ms);

        ScrollFrame {
            y: ease_in_out_quad(elapsed, self.from, self.distance, self.duration_ms),
            finished: elapsed >= self.duration_ms,
        }
    }
}

/// Where an anchor should land: its top minus the fixed header height.
pub fn anchor_scroll_target(element_top: f64, header_offset: u32) -> f64 {
    element_top - f64::from(header_offset)
}

/// `href="#about"` → `about`. Non-fragment links are not intercepted.
pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionSpan {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// Section whose span, shifted up by `bias`, contains `scroll_y`. On
/// overlap the later section in document order wins.
pub fn locate_section(spans: &[SectionSpan], scroll_y: f64, bias: u32) -> Option<&str> {
    spans
        .iter()
        .rev()
        .find(|span| {
            let top = span.top - f64::from(bias);
            scroll_y >= top && scroll_y < top + span.height
        })
        .map(|span| span.id.as_str())
}

/// The one section currently considered active.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionCursor {
    current: Option<String>,
}

impl SectionCursor {
    pub fn new(initial: Option<&str>) -> Self {
        Self {
            current: initial.map(ToString::to_string),
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Moves the cursor; returns `true` when the active section changed.
    pub fn advance(&mut self, found: Option<&str>) -> bool {
        if self.current.as_deref() == found {
            return false;
        }
        self.current = found.map(ToString::to_string);
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Neighbor of `current` in `order`. From an unknown section, `Next`
/// lands on the first entry and `Previous` goes nowhere.
pub fn neighbor_section<'a>(order: &[&'a str], current: Option<&str>, direction: Direction) -> Option<&'a str> {
    let position = current.and_then(|id| order.iter().position(|candidate| *candidate == id));

    match (direction, position) {
        (Direction::Next, None) => order.first().copied(),
        (Direction::Next, Some(index)) => order.get(index + 1).copied(),
        (Direction::Previous, Some(index)) if index > 0 => order.get(index - 1).copied(),
        (Direction::Previous, _) => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewRect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

/// Whole rect inside the viewport, allowing `margin` of vertical slack.
pub fn in_viewport(rect: ViewRect, viewport_width: f64, viewport_height: f64, margin: f64) -> bool {
    rect.top >= -margin
        && rect.left >= 0.0
        && rect.bottom <= viewport_height + margin
        && rect.right <= viewport_width
}

/// Any overlap with the viewport, edges included.
pub fn intersects_viewport(rect: ViewRect, viewport_height: f64) -> bool {
    rect.top <= viewport_height && rect.bottom >= 0.0
}

/// Visible share in `0.0..=1.0`: the larger of the part of the rect on
/// screen and the part of the screen the rect covers, so targets taller
/// than the viewport can still reach high thresholds.
pub fn visible_ratio(rect: ViewRect, viewport_height: f64) -> f64 {
    let height = rect.bottom - rect.top;
    if height <= 0.0 || viewport_height <= 0.0 {
        return 0.0;
    }

    let visible = (rect.bottom.min(viewport_height) - rect.top.max(0.0)).max(0.0);
    (visible / height).max(visible / viewport_height).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans() -> Vec<SectionSpan> {
        [("home", 0.0, 700.0), ("about", 700.0, 900.0), ("skills", 1600.0, 600.0)]
            .into_iter()
            .map(|(id, top, height)| SectionSpan {
                id: id.to_string(),
                top,
                height,
            })
            .collect()
    }

    #[test]
    fn ease_hits_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_quad(0.0, 100.0, 400.0, 800.0), 100.0);
        assert_eq!(ease_in_out_quad(400.0, 100.0, 400.0, 800.0), 300.0);
        assert_eq!(ease_in_out_quad(800.0, 100.0, 400.0, 800.0), 500.0);
    }

    #[test]
    fn smooth_scroll_lands_exactly_on_target() {
        let mut scroll = SmoothScroll::new(0.0, 1_000.0, 800);
        assert_eq!(scroll.frame(5_000.0), ScrollFrame { y: 0.0, finished: false });

        let late = scroll.frame(5_000.0 + 2_000.0);
        assert_eq!(late, ScrollFrame { y: 1_000.0, finished: true });
    }

    #[test]
    fn section_lookup_applies_header_bias() {
        let spans = spans();
        assert_eq!(locate_section(&spans, 0.0, 100), Some("home"));
        assert_eq!(locate_section(&spans, 599.0, 100), Some("home"));
        assert_eq!(locate_section(&spans, 600.0, 100), Some("about"));
        assert_eq!(locate_section(&spans, 2_000.0, 100), Some("skills"));
        assert_eq!(locate_section(&spans, 2_150.0, 100), None);
    }

    #[test]
    fn every_offset_maps_to_at_most_one_section() {
        let spans = spans();
        for offset in (0..2_200).step_by(25) {
            let offset = f64::from(offset);
            let matches = spans
                .iter()
                .filter(|span| offset >= span.top - 100.0 && offset < span.top - 100.0 + span.height)
                .count();
            assert!(matches <= 1);
            assert_eq!(locate_section(&spans, offset, 100).is_some(), matches == 1);
        }
    }

    #[test]
    fn cursor_reports_changes_only() {
        let mut cursor = SectionCursor::new(Some("home"));
        assert!(!cursor.advance(Some("home")));
        assert!(cursor.advance(Some("about")));
        assert!(cursor.advance(None));
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn keyboard_neighbors_stop_at_the_ends() {
        let order = ["home", "about", "contact"];
        assert_eq!(neighbor_section(&order, Some("home"), Direction::Next), Some("about"));
        assert_eq!(neighbor_section(&order, Some("contact"), Direction::Next), None);
        assert_eq!(neighbor_section(&order, Some("home"), Direction::Previous), None);
        assert_eq!(neighbor_section(&order, Some("contact"), Direction::Previous), Some("about"));
        assert_eq!(neighbor_section(&order, None, Direction::Next), Some("home"));
        assert_eq!(neighbor_section(&order, None, Direction::Previous), None);
    }

    #[test]
    fn fragment_links_resolve_to_ids() {
        assert_eq!(fragment_target("#contact"), Some("contact"));
        assert_eq!(fragment_target("#"), None);
        assert_eq!(fragment_target("https://example.com"), None);
    }

    #[test]
    fn viewport_checks_respect_margin() {
        let rect = ViewRect { top: -80.0, left: 0.0, bottom: 400.0, right: 300.0 };
        assert!(in_viewport(rect, 1_280.0, 720.0, 100.0));
        assert!(!in_viewport(rect, 1_280.0, 720.0, 0.0));
    }

    #[test]
    fn visible_ratio_clips_to_viewport() {
        let rect = ViewRect { top: 520.0, left: 0.0, bottom: 920.0, right: 300.0 };
        assert_eq!(visible_ratio(rect, 720.0), 0.5);
        let below = ViewRect { top: 800.0, left: 0.0, bottom: 900.0, right: 300.0 };
        assert_eq!(visible_ratio(below, 720.0), 0.0);
        assert!(!intersects_viewport(below, 720.0));
    }

    #[test]
    fn tall_targets_count_viewport_coverage() {
        let tall = ViewRect { top: -100.0, left: 0.0, bottom: 1_400.0, right: 300.0 };
        assert_eq!(visible_ratio(tall, 700.0), 1.0);
        assert!(intersects_viewport(tall, 700.0));
    }

    #[test]
    fn navbar_and_back_to_top_thresholds() {
        assert!(!navbar_scrolled(50.0));
        assert!(navbar_scrolled(51.0));
        assert!(!scroll_top_visible(300.0));
        assert!(scroll_top_visible(301.0));
    }
}
