use std::time::Duration;

/// Pause between a selection and the move to the next question.
pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_millis(500);

/// Header and background colour requested from the host at startup.
pub const DEFAULT_THEME_COLOR: &str = "#030712";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostTheme {
    pub header_color: String,
    pub background_color: String,
}

impl Default for HostTheme {
    fn default() -> Self {
        Self {
            header_color: DEFAULT_THEME_COLOR.to_string(),
            background_color: DEFAULT_THEME_COLOR.to_string(),
        }
    }
}

/// Runtime knobs for a survey session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveySettings {
    advance_delay: Option<Duration>,
    theme: HostTheme,
}

impl SurveySettings {
    #[must_use]
    pub fn with_advance_delay(mut self, delay: Duration) -> Self {
        self.advance_delay = Some(delay);
        self
    }

    #[must_use]
    pub fn advance_delay(&self) -> Duration {
        self.advance_delay.unwrap_or(DEFAULT_ADVANCE_DELAY)
    }

    #[must_use]
    pub fn theme(&self) -> &HostTheme {
        &self.theme
    }
}
