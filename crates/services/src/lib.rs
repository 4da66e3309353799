#![forbid(unsafe_code)]

pub mod error;
pub mod flow;

pub use error::FlowError;
pub use flow::{FlowOutcome, SurveyFlow};
