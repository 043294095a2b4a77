/// Toast severity. Unknown names fall back to `Info`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    #[default]
    Info,
}

impl Severity {
    pub fn parse(value: &str) -> Self {
        match value {
            "success" => Self::Success,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Success => "#10b981",
            Self::Error => "#ef4444",
            Self::Info => "#3b82f6",
        }
    }

    pub fn class_name(self) -> String {
        format!("notification notification-{}", self.as_str())
    }
}

pub const OFFSCREEN_TRANSFORM: &str = "translateX(100%)";
pub const ONSCREEN_TRANSFORM: &str = "translateX(0)";

/// Milliseconds after insertion at which each step happens.
pub const SLIDE_IN_AT_MS: u32 = 100;
pub const SLIDE_OUT_AT_MS: u32 = 4_000;
pub const REMOVE_AFTER_SLIDE_OUT_MS: u32 = 300;

/// Inline style for a freshly inserted, still off-screen toast.
pub fn toast_style(severity: Severity) -> String {
    [
        ("position", "fixed"),
        ("top", "20px"),
        ("right", "20px"),
        ("padding", "1rem 1.5rem"),
        ("border-radius", "8px"),
        ("color", "white"),
        ("font-weight", "600"),
        ("z-index", "10000"),
        ("transform", OFFSCREEN_TRANSFORM),
        ("transition", "transform 0.3s ease-in-out"),
        ("max-width", "300px"),
        ("word-wrap", "break-word"),
        ("background-color", severity.color()),
    ]
    .iter()
    .map(|(property, value)| format!("{property}: {value};"))
    .collect::<Vec<_>>()
    .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities_map_to_fixed_colors() {
        assert_eq!(Severity::parse("success").color(), "#10b981");
        assert_eq!(Severity::parse("error").color(), "#ef4444");
        assert_eq!(Severity::parse("warning"), Severity::Info);
        assert_eq!(Severity::default().color(), "#3b82f6");
    }

    #[test]
    fn toast_starts_off_screen_with_severity_background() {
        let style = toast_style(Severity::Error);
        assert!(style.contains("transform: translateX(100%);"));
        assert!(style.ends_with("background-color: #ef4444;"));
        assert_eq!(Severity::Error.class_name(), "notification notification-error");
    }
}
