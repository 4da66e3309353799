use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options shown when a question carries no variants of its own.
pub const DEFAULT_VARIANTS: [&str; 2] = ["Yes", "No"];

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text must not be empty")]
    EmptyText,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionSetError {
    #[error("question set must contain at least one question")]
    Empty,
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// How a question expects to be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    OpenText,
}

/// A single survey question as carried in the payload.
///
/// The wire shape is `{"question_text": .., "type": .., "variants": [..]}`;
/// `variants` may be omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionRecord", into = "QuestionRecord")]
pub struct Question {
    text: String,
    kind: QuestionKind,
    variants: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize)]
struct QuestionRecord {
    question_text: String,
    #[serde(rename = "type")]
    kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    variants: Option<Vec<String>>,
}

impl TryFrom<QuestionRecord> for Question {
    type Error = QuestionError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        let question = Self::new(record.question_text, record.kind)?;
        Ok(match record.variants {
            Some(variants) => question.with_variants(variants),
            None => question,
        })
    }
}

impl From<Question> for QuestionRecord {
    fn from(question: Question) -> Self {
        Self {
            question_text: question.text,
            kind: question.kind,
            variants: question.variants,
        }
    }
}

impl Question {
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyText` when `text` is blank.
    pub fn new(text: impl Into<String>, kind: QuestionKind) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        Ok(Self {
            text,
            kind,
            variants: None,
        })
    }

    #[must_use]
    pub fn with_variants<I, S>(mut self, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variants = Some(variants.into_iter().map(Into::into).collect());
        self
    }

    /// Builds one of the built-in questions. Text must be non-blank.
    pub(crate) fn preset(text: &str, variants: &[&str]) -> Self {
        Self {
            text: text.to_string(),
            kind: QuestionKind::MultipleChoice,
            variants: Some(variants.iter().map(|v| (*v).to_string()).collect()),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    /// The variants exactly as they arrived, if any.
    #[must_use]
    pub fn variants(&self) -> Option<&[String]> {
        self.variants.as_deref()
    }

    /// Options to render for this question.
    ///
    /// Falls back to [`DEFAULT_VARIANTS`] when `variants` is missing or empty,
    /// without touching the stored question.
    #[must_use]
    pub fn display_options(&self) -> Vec<&str> {
        match self.variants.as_deref() {
            Some(variants) if !variants.is_empty() => {
                variants.iter().map(String::as_str).collect()
            }
            _ => DEFAULT_VARIANTS.to_vec(),
        }
    }

    #[must_use]
    pub fn accepts_free_text(&self) -> bool {
        self.kind == QuestionKind::OpenText
    }
}

//
// ─── QUESTION SET ─────────────────────────────────────────────────────────────
//

/// Ordered, non-empty list of questions for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Question>", into = "Vec<Question>")]
pub struct QuestionSet(Vec<Question>);

impl QuestionSet {
    /// # Errors
    ///
    /// Returns `QuestionSetError::Empty` for an empty list.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionSetError> {
        if questions.is_empty() {
            return Err(QuestionSetError::Empty);
        }
        Ok(Self(questions))
    }

    pub(crate) fn presets(questions: Vec<Question>) -> Self {
        debug_assert!(!questions.is_empty());
        Self(questions)
    }

    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.0.iter()
    }
}

impl TryFrom<Vec<Question>> for QuestionSet {
    type Error = QuestionSetError;

    fn try_from(questions: Vec<Question>) -> Result<Self, Self::Error> {
        Self::new(questions)
    }
}

impl From<QuestionSet> for Vec<Question> {
    fn from(set: QuestionSet) -> Self {
        set.0
    }
}

impl<'a> IntoIterator for &'a QuestionSet {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_text() {
        assert_eq!(
            Question::new("   ", QuestionKind::OpenText),
            Err(QuestionError::EmptyText)
        );
    }

    #[test]
    fn display_options_default_when_variants_missing_or_empty() {
        let missing = Question::new("Q", QuestionKind::MultipleChoice).unwrap();
        assert_eq!(missing.display_options(), vec!["Yes", "No"]);

        let empty = missing.clone().with_variants(Vec::<String>::new());
        assert_eq!(empty.display_options(), vec!["Yes", "No"]);
        assert_eq!(empty.variants(), Some(&[][..]));

        let open = Question::new("Q", QuestionKind::OpenText).unwrap();
        assert_eq!(open.display_options(), vec!["Yes", "No"]);
        assert!(open.variants().is_none());
    }

    #[test]
    fn deserializes_wire_shape() {
        let json = r#"{"question_text":"Q1","type":"multiple_choice","variants":["A","B"],"extra":1}"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.text(), "Q1");
        assert_eq!(question.kind(), QuestionKind::MultipleChoice);
        assert_eq!(question.display_options(), vec!["A", "B"]);
    }

    #[test]
    fn serializes_without_absent_variants() {
        let question = Question::new("Q1", QuestionKind::OpenText).unwrap();
        let json = serde_json::to_string(&question).unwrap();
        assert_eq!(json, r#"{"question_text":"Q1","type":"open_text"}"#);
    }

    #[test]
    fn blank_text_fails_deserialization() {
        let json = r#"{"question_text":"","type":"open_text"}"#;
        assert!(serde_json::from_str::<Question>(json).is_err());
    }

    #[test]
    fn unknown_kind_fails_deserialization() {
        let json = r#"{"question_text":"Q","type":"slider"}"#;
        assert!(serde_json::from_str::<Question>(json).is_err());
    }

    #[test]
    fn question_set_requires_a_question() {
        assert_eq!(QuestionSet::new(Vec::new()), Err(QuestionSetError::Empty));
        assert!(serde_json::from_str::<QuestionSet>("[]").is_err());
    }
}
