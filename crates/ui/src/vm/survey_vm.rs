use std::sync::Arc;
use std::time::Duration;

use services::{FlowError, FlowOutcome, SurveyFlow};
use survey_core::{HostBridge, SurveyOrigin, SurveySettings, Transcript};

use crate::views::ViewError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurveyPhase {
    /// Waiting for a choice on the current question.
    Asking,
    /// A choice is shown as selected until the delayed advance.
    Confirming,
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurveyOutcome {
    Continue,
    Completed { delivered: bool },
}

/// One rendered answer button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub label: String,
    pub selected: bool,
    pub disabled: bool,
}

pub struct SurveyVm {
    flow: SurveyFlow,
}

impl SurveyVm {
    #[must_use]
    pub fn new(flow: SurveyFlow) -> Self {
        Self { flow }
    }

    #[must_use]
    pub fn phase(&self) -> SurveyPhase {
        let session = self.flow.session();
        if session.is_complete() {
            SurveyPhase::Completed
        } else if session.pending().is_some() {
            SurveyPhase::Confirming
        } else {
            SurveyPhase::Asking
        }
    }

    #[must_use]
    pub fn origin(&self) -> SurveyOrigin {
        self.flow.origin()
    }

    #[must_use]
    pub fn is_embedded(&self) -> bool {
        self.flow.is_embedded()
    }

    /// Index of the question on screen; keys the question transition.
    #[must_use]
    pub fn step(&self) -> Option<usize> {
        self.flow.session().current_step()
    }

    #[must_use]
    pub fn question_text(&self) -> Option<&str> {
        self.flow.session().current_question().map(|q| q.text())
    }

    #[must_use]
    pub fn accepts_free_text(&self) -> bool {
        self.flow
            .session()
            .current_question()
            .is_some_and(|q| q.accepts_free_text())
    }

    #[must_use]
    pub fn options(&self) -> Vec<OptionVm> {
        let session = self.flow.session();
        let Some(question) = session.current_question() else {
            return Vec::new();
        };
        let pending = session.pending();
        question
            .display_options()
            .into_iter()
            .map(|label| OptionVm {
                label: label.to_string(),
                selected: pending == Some(label),
                disabled: pending.is_some(),
            })
            .collect()
    }

    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        self.flow.session().progress().percent()
    }

    #[must_use]
    pub fn transcript(&self) -> Option<Transcript> {
        self.flow.session().transcript()
    }

    /// Records a choice. Returns the delay before [`SurveyVm::advance`], or
    /// `None` when the choice was ignored.
    pub fn select(&mut self, option: String) -> Option<Duration> {
        self.flow.select(option).ok()
    }

    /// # Errors
    ///
    /// Returns `ViewError::Delivery` when the transcript could not be handed
    /// to the host, and `ViewError::Unknown` when the step cannot be committed.
    pub fn advance(&mut self) -> Result<SurveyOutcome, ViewError> {
        match self.flow.advance() {
            Ok(FlowOutcome::Next { .. }) => Ok(SurveyOutcome::Continue),
            Ok(FlowOutcome::Completed { delivered, .. }) => {
                Ok(SurveyOutcome::Completed { delivered })
            }
            Err(FlowError::Bridge(error)) => {
                tracing::warn!(%error, "survey finished without delivery");
                Err(ViewError::Delivery)
            }
            Err(_) => Err(ViewError::Unknown),
        }
    }
}

#[must_use]
pub fn start_survey(
    fragment: &str,
    bridge: Arc<dyn HostBridge>,
    settings: SurveySettings,
) -> SurveyVm {
    SurveyVm::new(SurveyFlow::start(fragment, bridge, settings))
}
