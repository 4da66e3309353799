use serde::{Deserialize, Serialize};

use crate::model::QuestionSet;

/// One answered question, as delivered to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question: String,
    pub answer: String,
}

/// Ordered question/answer pairs produced when a session completes.
///
/// Serializes to the JSON array handed to the host's `sendData`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript(Vec<AnswerRecord>);

impl Transcript {
    /// Pairs each question with the answer recorded at the same index.
    pub(crate) fn pair(questions: &QuestionSet, answers: &[String]) -> Self {
        Self(
            questions
                .iter()
                .zip(answers)
                .map(|(question, answer)| AnswerRecord {
                    question: question.text().to_string(),
                    answer: answer.clone(),
                })
                .collect(),
        )
    }

    #[must_use]
    pub fn records(&self) -> &[AnswerRecord] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// # Errors
    ///
    /// Returns the serializer error; not expected for plain strings.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<Vec<AnswerRecord>> for Transcript {
    fn from(records: Vec<AnswerRecord>) -> Self {
        Self(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_question_answer_array() {
        let transcript = Transcript::from(vec![AnswerRecord {
            question: "Q1".into(),
            answer: "A".into(),
        }]);
        assert_eq!(
            transcript.to_json().unwrap(),
            r#"[{"question":"Q1","answer":"A"}]"#
        );
    }

    #[test]
    fn parses_host_payload() {
        let transcript: Transcript = serde_json::from_str(
            r#"[{"question":"Q1","answer":"A"},{"question":"Q2","answer":"B"}]"#,
        )
        .unwrap();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.records()[1].answer, "B");
    }
}
