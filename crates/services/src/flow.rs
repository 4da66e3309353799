use std::sync::Arc;
use std::time::Duration;

use survey_core::{
    Advance, HostBridge, Session, SelectError, SurveyOrigin, SurveySettings, Transcript,
    decode_fragment,
};

use crate::error::FlowError;

/// Result of committing a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    Next { step: usize },
    /// `delivered` is true when a host received the transcript.
    Completed { transcript: Transcript, delivered: bool },
}

/// Runs one survey session against a host bridge.
///
/// A selection is accepted with [`SurveyFlow::select`] and committed with
/// [`SurveyFlow::advance`] once the advance delay has passed. UIs drive the
/// two halves themselves so the pending option stays visible in between;
/// [`SurveyFlow::answer`] does both with a timer.
pub struct SurveyFlow {
    session: Session,
    origin: SurveyOrigin,
    bridge: Arc<dyn HostBridge>,
    settings: SurveySettings,
}

impl SurveyFlow {
    /// Initializes the host and loads the questions from `fragment`.
    ///
    /// Never fails: unreadable payloads become the error question.
    #[must_use]
    pub fn start(fragment: &str, bridge: Arc<dyn HostBridge>, settings: SurveySettings) -> Self {
        bridge.expand();
        bridge.ready();
        bridge.set_colors(settings.theme());

        let loaded = decode_fragment(fragment);
        tracing::info!(
            origin = ?loaded.origin,
            questions = loaded.questions.len(),
            embedded = bridge.is_embedded(),
            "survey started"
        );

        Self {
            session: Session::new(loaded.questions),
            origin: loaded.origin,
            bridge,
            settings,
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn origin(&self) -> SurveyOrigin {
        self.origin
    }

    #[must_use]
    pub fn is_embedded(&self) -> bool {
        self.bridge.is_embedded()
    }

    #[must_use]
    pub fn advance_delay(&self) -> Duration {
        self.settings.advance_delay()
    }

    /// Accepts `option` for the current step and returns how long to wait
    /// before calling [`SurveyFlow::advance`].
    ///
    /// # Errors
    ///
    /// Returns `SelectError` when a selection is already pending or the
    /// survey is complete; nothing changes in that case.
    pub fn select(&mut self, option: impl Into<String>) -> Result<Duration, SelectError> {
        match self.session.select_option(option) {
            Ok(()) => Ok(self.settings.advance_delay()),
            Err(error) => {
                tracing::debug!(%error, "selection ignored");
                Err(error)
            }
        }
    }

    /// Commits the pending selection. On the last step the transcript is
    /// sent to the host, which is then asked to close.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::Advance` when nothing is pending or the survey is
    /// already complete, and `FlowError::Bridge` when the transcript could not
    /// be handed over; the session is complete either way.
    pub fn advance(&mut self) -> Result<FlowOutcome, FlowError> {
        let transcript = match self.session.advance()? {
            Advance::Next { step } => return Ok(FlowOutcome::Next { step }),
            Advance::Completed(transcript) => transcript,
        };

        if let Err(error) = self.bridge.send_result(&transcript) {
            tracing::error!(%error, "failed to deliver survey transcript");
            return Err(error.into());
        }
        self.bridge.close();

        let delivered = self.bridge.is_embedded();
        tracing::info!(entries = transcript.len(), delivered, "survey completed");
        Ok(FlowOutcome::Completed {
            transcript,
            delivered,
        })
    }

    /// Selects `option`, waits out the advance delay, then advances.
    ///
    /// # Errors
    ///
    /// Returns `FlowError` from either half.
    pub async fn answer(&mut self, option: impl Into<String>) -> Result<FlowOutcome, FlowError> {
        let delay = self.select(option)?;
        tokio::time::sleep(delay).await;
        self.advance()
    }
}
