mod question;
mod session;
mod transcript;

pub use question::{
    DEFAULT_VARIANTS, Question, QuestionError, QuestionKind, QuestionSet, QuestionSetError,
};
pub use session::{Advance, AdvanceError, Progress, SelectError, Session, SurveyState};
pub use transcript::{AnswerRecord, Transcript};
