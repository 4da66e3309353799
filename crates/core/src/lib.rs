#![forbid(unsafe_code)]

pub mod bridge;
pub mod error;
pub mod model;
pub mod payload;
pub mod settings;

pub use bridge::{BridgeCall, BridgeError, HostBridge, LogBridge, RecordingBridge};
pub use error::PayloadError;
pub use model::{
    Advance, AdvanceError, AnswerRecord, Progress, Question, QuestionError, QuestionKind,
    QuestionSet, QuestionSetError, SelectError, Session, SurveyState, Transcript,
};
pub use payload::{
    LoadedSurvey, SurveyOrigin, decode_fragment, demo_questions, encode_fragment,
    error_questions, fragment_of, parse_fragment, survey_link,
};
pub use settings::{HostTheme, SurveySettings};
