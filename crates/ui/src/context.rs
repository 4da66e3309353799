use std::sync::Arc;

use survey_core::{HostBridge, SurveySettings};

/// Where the survey payload is read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FragmentSource {
    /// Provided by the launcher (flag or environment).
    Fixed(String),
    /// `window.location.hash` of the web view.
    Location,
}

/// How the host bridge is chosen at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostMode {
    /// Use the messaging-app bridge when the page exposes one.
    Detect,
    /// Never look for a host; results go to the log.
    Standalone,
}

pub trait UiApp: Send + Sync {
    fn fragment_source(&self) -> FragmentSource;
    fn host_mode(&self) -> HostMode;
    fn settings(&self) -> SurveySettings;

    /// Bridge to use instead of detecting one.
    fn bridge(&self) -> Option<Arc<dyn HostBridge>> {
        None
    }
}

#[derive(Clone)]
pub struct AppContext {
    fragment_source: FragmentSource,
    host_mode: HostMode,
    settings: SurveySettings,
    bridge: Option<Arc<dyn HostBridge>>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            fragment_source: app.fragment_source(),
            host_mode: app.host_mode(),
            settings: app.settings(),
            bridge: app.bridge(),
        }
    }

    #[must_use]
    pub fn fragment_source(&self) -> FragmentSource {
        self.fragment_source.clone()
    }

    #[must_use]
    pub fn host_mode(&self) -> HostMode {
        self.host_mode
    }

    #[must_use]
    pub fn settings(&self) -> SurveySettings {
        self.settings.clone()
    }

    #[must_use]
    pub fn bridge(&self) -> Option<Arc<dyn HostBridge>> {
        self.bridge.clone()
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
