//! Shared error types for the services crate.

use thiserror::Error;

use survey_core::{AdvanceError, BridgeError, SelectError};

/// Errors emitted by `SurveyFlow`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlowError {
    #[error(transparent)]
    Select(#[from] SelectError),
    #[error(transparent)]
    Advance(#[from] AdvanceError),
    #[error(transparent)]
    Bridge(#[from] BridgeError),
}
