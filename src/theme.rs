pub const DARK_MODE_KEY: &str = "darkMode";
pub const DARK_MODE_CLASS: &str = "dark-mode";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Only the exact string `"true"` selects dark mode.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("true") => Self::Dark,
            _ => Self::Light,
        }
    }

    pub fn stored_value(self) -> &'static str {
        match self {
            Self::Light => "false",
            Self::Dark => "true",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Light => "Activar modo oscuro",
            Self::Dark => "Activar modo claro",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "◐",
            Self::Dark => "◑",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_literal_true_means_dark() {
        assert_eq!(Theme::from_stored(Some("true")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("TRUE")), Theme::Light);
        assert_eq!(Theme::from_stored(Some("1")), Theme::Light);
        assert_eq!(Theme::from_stored(None), Theme::Light);
    }

    #[test]
    fn toggling_round_trips_through_storage_encoding() {
        let next = Theme::Light.toggled();
        assert!(next.is_dark());
        assert_eq!(Theme::from_stored(Some(next.stored_value())), Theme::Dark);
        assert_eq!(Theme::from_stored(Some(next.toggled().stored_value())), Theme::Light);
    }
}
