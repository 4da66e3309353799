use thiserror::Error;

use crate::model::{Question, QuestionSet, Transcript};

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Why a selection was not accepted. The session is left untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SelectError {
    #[error("a selection is already pending for step {step}")]
    Pending { step: usize },
    #[error("survey already completed")]
    Completed,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AdvanceError {
    #[error("no selection pending for step {step}")]
    NothingPending { step: usize },
    #[error("survey already completed")]
    Completed,
}

//
// ─── STATE ────────────────────────────────────────────────────────────────────
//

/// Where the session stands.
///
/// `pending` holds the option chosen for `step` until the delayed advance
/// commits it; while it is set, new selections are refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurveyState {
    Active { step: usize, pending: Option<String> },
    Completed,
}

/// Outcome of committing a pending selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Next { step: usize },
    Completed(Transcript),
}

/// Progress through the question list, 1-based for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub position: usize,
    pub total: usize,
}

impl Progress {
    /// Share of questions reached, rounded half up to a whole percent.
    #[must_use]
    pub fn percent(self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let position = self.position.min(self.total);
        let rounded = (position * 200 + self.total) / (self.total * 2);
        u8::try_from(rounded).unwrap_or(100)
    }
}

//
// ─── SESSION ──────────────────────────────────────────────────────────────────
//

/// Linear survey over a fixed question set.
///
/// Starts at step 0. Each step takes one `select_option` followed by one
/// `advance`; the last advance yields the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    questions: QuestionSet,
    answers: Vec<String>,
    state: SurveyState,
}

impl Session {
    #[must_use]
    pub fn new(questions: QuestionSet) -> Self {
        let capacity = questions.len();
        Self {
            questions,
            answers: Vec::with_capacity(capacity),
            state: SurveyState::Active {
                step: 0,
                pending: None,
            },
        }
    }

    /// Answers committed so far, indexed like the questions.
    #[must_use]
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.state, SurveyState::Completed)
    }

    #[must_use]
    pub fn current_step(&self) -> Option<usize> {
        match self.state {
            SurveyState::Active { step, .. } => Some(step),
            SurveyState::Completed => None,
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current_step().and_then(|step| self.questions.get(step))
    }

    #[must_use]
    pub fn pending(&self) -> Option<&str> {
        match &self.state {
            SurveyState::Active { pending, .. } => pending.as_deref(),
            SurveyState::Completed => None,
        }
    }

    /// The full transcript once the survey is complete.
    #[must_use]
    pub fn transcript(&self) -> Option<Transcript> {
        self.is_complete()
            .then(|| Transcript::pair(&self.questions, &self.answers))
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        let total = self.total();
        let position = self.current_step().map_or(total, |step| step + 1);
        Progress { position, total }
    }

    /// Marks `option` as the answer for the current step.
    ///
    /// # Errors
    ///
    /// Returns `SelectError::Pending` while an earlier selection awaits its
    /// advance, and `SelectError::Completed` once the survey is done.
    pub fn select_option(&mut self, option: impl Into<String>) -> Result<(), SelectError> {
        match &mut self.state {
            SurveyState::Completed => Err(SelectError::Completed),
            SurveyState::Active {
                step,
                pending: Some(_),
            } => Err(SelectError::Pending { step: *step }),
            SurveyState::Active { pending, .. } => {
                *pending = Some(option.into());
                Ok(())
            }
        }
    }

    /// Commits the pending selection and moves to the next step, or completes.
    ///
    /// # Errors
    ///
    /// Returns `AdvanceError::NothingPending` when no option was selected and
    /// `AdvanceError::Completed` after completion, so the transcript is only
    /// ever produced once.
    pub fn advance(&mut self) -> Result<Advance, AdvanceError> {
        let SurveyState::Active { step, pending } = &mut self.state else {
            return Err(AdvanceError::Completed);
        };
        let step = *step;
        let Some(answer) = pending.take() else {
            return Err(AdvanceError::NothingPending { step });
        };
        self.answers.push(answer);

        let next = step + 1;
        if next >= self.questions.len() {
            self.state = SurveyState::Completed;
            return Ok(Advance::Completed(Transcript::pair(
                &self.questions,
                &self.answers,
            )));
        }

        self.state = SurveyState::Active {
            step: next,
            pending: None,
        };
        Ok(Advance::Next { step: next })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerRecord, QuestionKind};

    fn three_questions() -> QuestionSet {
        QuestionSet::new(
            ["Q1", "Q2", "Q3"]
                .into_iter()
                .map(|text| Question::new(text, QuestionKind::MultipleChoice).unwrap())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn starts_active_at_first_step() {
        let session = Session::new(three_questions());
        assert_eq!(session.current_step(), Some(0));
        assert_eq!(session.current_question().map(Question::text), Some("Q1"));
        assert!(session.pending().is_none());
        assert!(session.answers().is_empty());
        assert!(session.transcript().is_none());
    }

    #[test]
    fn second_selection_while_pending_is_refused() {
        let mut session = Session::new(three_questions());
        session.select_option("Yes").unwrap();

        let before = session.clone();
        assert_eq!(
            session.select_option("No"),
            Err(SelectError::Pending { step: 0 })
        );
        assert_eq!(session, before);
        assert_eq!(session.pending(), Some("Yes"));
    }

    #[test]
    fn advance_without_selection_fails() {
        let mut session = Session::new(three_questions());
        assert_eq!(
            session.advance(),
            Err(AdvanceError::NothingPending { step: 0 })
        );
        assert_eq!(session.current_step(), Some(0));
    }

    #[test]
    fn advance_commits_answer_and_clears_pending() {
        let mut session = Session::new(three_questions());
        session.select_option("Yes").unwrap();
        assert_eq!(session.advance(), Ok(Advance::Next { step: 1 }));
        assert_eq!(session.answers(), ["Yes".to_string()]);
        assert!(session.pending().is_none());
        session.select_option("No").unwrap();
    }

    #[test]
    fn completes_after_one_selection_per_question() {
        let mut session = Session::new(three_questions());
        let mut transcript = None;
        for (index, answer) in ["a", "b", "c"].into_iter().enumerate() {
            assert!(transcript.is_none(), "completed early at {index}");
            session.select_option(answer).unwrap();
            if let Advance::Completed(t) = session.advance().unwrap() {
                transcript = Some(t);
            }
        }

        let transcript = transcript.expect("transcript after last step");
        assert_eq!(
            transcript.records(),
            [
                AnswerRecord { question: "Q1".into(), answer: "a".into() },
                AnswerRecord { question: "Q2".into(), answer: "b".into() },
                AnswerRecord { question: "Q3".into(), answer: "c".into() },
            ]
        );
        assert!(session.is_complete());
    }

    #[test]
    fn completed_session_is_terminal() {
        let questions =
            QuestionSet::new(vec![Question::new("Only", QuestionKind::OpenText).unwrap()])
                .unwrap();
        let mut session = Session::new(questions);
        session.select_option("free text").unwrap();
        assert!(matches!(session.advance(), Ok(Advance::Completed(_))));

        assert_eq!(session.select_option("again"), Err(SelectError::Completed));
        assert_eq!(session.advance(), Err(AdvanceError::Completed));
        assert_eq!(session.answers(), ["free text".to_string()]);
        assert!(session.current_question().is_none());
        assert_eq!(session.transcript().map(|t| t.len()), Some(1));
    }

    #[test]
    fn progress_rounds_like_the_display() {
        let mut session = Session::new(three_questions());
        assert_eq!(session.progress().percent(), 33);
        session.select_option("x").unwrap();
        session.advance().unwrap();
        assert_eq!(session.progress().percent(), 67);

        let eighth = Progress { position: 1, total: 8 };
        assert_eq!(eighth.percent(), 13);
    }
}
