//! Survey payloads carried in the URL fragment.
//!
//! Two encodings are accepted after `#`:
//! - `d=<base64url>`: UTF-8 JSON, base64 with the URL-safe alphabet
//!   (padding optional);
//! - anything else: percent-encoded JSON.
//!
//! Anything from the first `?` or `&` onward is ignored.

use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE};
use base64::engine::DecodePaddingMode;
use url::Url;

use crate::error::PayloadError;
use crate::model::{Question, QuestionSet};

const BASE64_PREFIX: &str = "d=";

/// Standard alphabet that tolerates missing padding and stray trailing bits,
/// matching what browsers accept.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Where the questions of a session came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurveyOrigin {
    /// No fragment: built-in demo questions.
    Demo,
    /// Decoded from the fragment.
    Payload,
    /// Fragment was malformed: the single error question.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSurvey {
    pub origin: SurveyOrigin,
    pub questions: QuestionSet,
}

/// Decodes a fragment into a question set, never failing.
///
/// An empty fragment yields [`demo_questions`]; a malformed one yields
/// [`error_questions`] and logs the reason.
#[must_use]
pub fn decode_fragment(fragment: &str) -> LoadedSurvey {
    match parse_fragment(fragment) {
        Ok(Some(questions)) => LoadedSurvey {
            origin: SurveyOrigin::Payload,
            questions,
        },
        Ok(None) => LoadedSurvey {
            origin: SurveyOrigin::Demo,
            questions: demo_questions(),
        },
        Err(error) => {
            tracing::warn!(%error, "survey payload rejected; showing error question");
            LoadedSurvey {
                origin: SurveyOrigin::Fallback,
                questions: error_questions(),
            }
        }
    }
}

/// Strict decoder behind [`decode_fragment`].
///
/// Returns `Ok(None)` for an empty fragment. A single leading `#` is ignored.
///
/// # Errors
///
/// Returns `PayloadError` for bad base64, bad percent escapes, invalid UTF-8,
/// invalid JSON, an empty list, or a question with blank text.
pub fn parse_fragment(fragment: &str) -> Result<Option<QuestionSet>, PayloadError> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    if fragment.is_empty() {
        return Ok(None);
    }

    let payload = fragment.split(['?', '&']).next().unwrap_or_default();
    let source = match payload.strip_prefix(BASE64_PREFIX) {
        Some(encoded) => decode_base64(encoded)?,
        None => percent_decode(payload)?,
    };
    if source.trim().is_empty() {
        return Err(PayloadError::EmptySource);
    }

    let questions: Vec<Question> = serde_json::from_str(&source)?;
    Ok(Some(QuestionSet::new(questions)?))
}

fn decode_base64(encoded: &str) -> Result<String, PayloadError> {
    let normalized = encoded.replace('-', "+").replace('_', "/");
    let bytes = LENIENT_BASE64.decode(normalized)?;
    Ok(String::from_utf8(bytes)?)
}

/// Percent-decodes `input`, rejecting escapes that are not `%` + two hex digits.
/// `+` stays `+`.
fn percent_decode(input: &str) -> Result<String, PayloadError> {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut index = 0;
    while index < bytes.len() {
        if bytes[index] != b'%' {
            decoded.push(bytes[index]);
            index += 1;
            continue;
        }
        let high = bytes.get(index + 1).copied().and_then(hex_value);
        let low = bytes.get(index + 2).copied().and_then(hex_value);
        let (Some(high), Some(low)) = (high, low) else {
            return Err(PayloadError::PercentEscape { position: index });
        };
        decoded.push((high << 4) | low);
        index += 3;
    }
    Ok(String::from_utf8(decoded)?)
}

fn hex_value(byte: u8) -> Option<u8> {
    char::from(byte)
        .to_digit(16)
        .and_then(|digit| u8::try_from(digit).ok())
}

/// Encodes questions as a `d=` fragment (URL-safe base64 of compact JSON).
///
/// # Errors
///
/// Returns `PayloadError::Json` if serialization fails.
pub fn encode_fragment(questions: &QuestionSet) -> Result<String, PayloadError> {
    let json = serde_json::to_vec(questions)?;
    Ok(format!("{BASE64_PREFIX}{}", URL_SAFE.encode(json)))
}

/// Builds the link that opens the survey for `questions`.
///
/// Any fragment already on `base_url` is replaced.
///
/// # Errors
///
/// Returns `PayloadError::Url` when `base_url` does not parse.
pub fn survey_link(base_url: &str, questions: &QuestionSet) -> Result<String, PayloadError> {
    let mut url = Url::parse(base_url)?;
    url.set_fragment(Some(&encode_fragment(questions)?));
    Ok(url.into())
}

/// Extracts the fragment of a full URL, empty when there is none.
///
/// # Errors
///
/// Returns `PayloadError::Url` when `url` does not parse.
pub fn fragment_of(url: &str) -> Result<String, PayloadError> {
    let url = Url::parse(url)?;
    Ok(url.fragment().unwrap_or_default().to_string())
}

/// Questions shown when the page is opened without a payload.
#[must_use]
pub fn demo_questions() -> QuestionSet {
    QuestionSet::presets(vec![
        Question::preset(
            "Какой стиль интерфейса вам нравится?",
            &["Минимализм", "Глассморфизм", "Нео-брутализм", "Киберпанк"],
        ),
        Question::preset(
            "Как часто вы используете Telegram Apps?",
            &["Ежедневно", "Иногда", "Редко", "Впервые вижу"],
        ),
    ])
}

/// Single acknowledgement question shown when the payload is unreadable.
#[must_use]
pub fn error_questions() -> QuestionSet {
    QuestionSet::presets(vec![Question::preset(
        "Ошибка загрузки данных",
        &["Перезагрузить"],
    )])
}
