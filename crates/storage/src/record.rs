use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Field name holding the difficulty of a stored question.
pub(crate) const DIFFICULTY_FIELD: &str = "difficulty";

// ── Difficulty ───────────────────────────────────────────────────────────────

/// Difficulty level of a multiple-choice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Returned when a string does not name one of the three difficulty levels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid difficulty '{0}': allowed values are easy, medium, hard")]
pub struct InvalidDifficulty(pub String);

impl Difficulty {
    /// All levels, in ascending order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive, surrounding whitespace ignored.
impl FromStr for Difficulty {
    type Err = InvalidDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(InvalidDifficulty(s.to_string())),
        }
    }
}

impl TryFrom<String> for Difficulty {
    type Error = InvalidDifficulty;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ── Status ───────────────────────────────────────────────────────────────────

/// Review status of a stored question.
///
/// Freshly generated questions are `Pending` and are never served to quiz
/// takers. Promotion out of `Pending` happens outside this service, so any
/// status string written by that process is preserved verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionStatus {
    #[default]
    Pending,
    Approved,
    Other(String),
}

impl QuestionStatus {
    pub const PENDING: &'static str = "pending";
    pub const APPROVED: &'static str = "approved";

    pub fn as_str(&self) -> &str {
        match self {
            QuestionStatus::Pending => Self::PENDING,
            QuestionStatus::Approved => Self::APPROVED,
            QuestionStatus::Other(s) => s,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, QuestionStatus::Pending)
    }
}

impl From<String> for QuestionStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            Self::PENDING => QuestionStatus::Pending,
            Self::APPROVED => QuestionStatus::Approved,
            _ => QuestionStatus::Other(value),
        }
    }
}

impl From<QuestionStatus> for String {
    fn from(value: QuestionStatus) -> Self {
        match value {
            QuestionStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for QuestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Question ─────────────────────────────────────────────────────────────────

/// A multiple-choice quiz question as stored and served.
///
/// The fields the service relies on are typed; anything else the AI model
/// emits (explanations, tags, ids assigned by the database) is kept in
/// `extra` and round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    #[serde(alias = "correctAnswer", alias = "answer")]
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub status: QuestionStatus,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Question {
    /// Create a pending question with no extra fields.
    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
        difficulty: Option<Difficulty>,
    ) -> Self {
        Self {
            question: question.into(),
            options,
            correct_answer: correct_answer.into(),
            difficulty,
            status: QuestionStatus::Pending,
            extra: serde_json::Map::new(),
        }
    }

    /// Builder-style status override.
    pub fn with_status(mut self, status: QuestionStatus) -> Self {
        self.status = status;
        self
    }
}

// ── Filter ───────────────────────────────────────────────────────────────────

/// Field-equality constraints applied when sampling questions.
///
/// Every entry must match exactly. The constraints are always combined with
/// the non-pending condition; a `status` entry narrows the result further
/// but can never bring pending questions back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionFilter {
    fields: BTreeMap<String, serde_json::Value>,
}

impl QuestionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field == value`.
    pub fn with_field(mut self, field: impl Into<String>, value: serde_json::Value) -> Self {
        self.fields.insert(field.into(), value);
        self
    }

    /// Require the given difficulty.
    pub fn with_difficulty(self, difficulty: Difficulty) -> Self {
        self.with_field(DIFFICULTY_FIELD, serde_json::json!(difficulty.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// True when `question` is non-pending and satisfies every constraint.
    pub fn matches(&self, question: &Question) -> bool {
        if question.status.is_pending() {
            return false;
        }
        if self.is_empty() {
            return true;
        }
        let doc = match serde_json::to_value(question) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => return false,
        };
        self.fields
            .iter()
            .all(|(field, expected)| doc.get(field) == Some(expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approved(difficulty: Option<Difficulty>) -> Question {
        Question::new(
            "What does HTTP stand for?",
            vec!["HyperText Transfer Protocol".into(), "High Transfer".into()],
            "HyperText Transfer Protocol",
            difficulty,
        )
        .with_status(QuestionStatus::Approved)
    }

    #[test]
    fn difficulty_parse_is_case_insensitive_and_trimmed() {
        assert_eq!(" Hard ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!("EASY".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn question_accepts_camel_case_answer_and_keeps_extras() {
        let json = serde_json::json!({
            "question": "2 + 2?",
            "options": ["3", "4"],
            "correctAnswer": "4",
            "difficulty": "Easy",
            "explanation": "basic arithmetic"
        });
        let q: Question = serde_json::from_value(json).unwrap();
        assert_eq!(q.correct_answer, "4");
        assert_eq!(q.difficulty, Some(Difficulty::Easy));
        assert_eq!(q.status, QuestionStatus::Pending);
        assert_eq!(q.extra["explanation"], "basic arithmetic");
    }

    #[test]
    fn unknown_status_round_trips_verbatim() {
        let q = approved(None).with_status(QuestionStatus::from("published".to_string()));
        let value = serde_json::to_value(&q).unwrap();
        assert_eq!(value["status"], "published");
        let back: Question = serde_json::from_value(value).unwrap();
        assert_eq!(back.status, QuestionStatus::Other("published".into()));
    }

    #[test]
    fn filter_never_matches_pending() {
        let pending = approved(Some(Difficulty::Easy)).with_status(QuestionStatus::Pending);
        let filter = QuestionFilter::new().with_field("status", serde_json::json!("pending"));
        assert!(!filter.matches(&pending));
        assert!(!QuestionFilter::new().matches(&pending));
    }

    #[test]
    fn filter_matches_difficulty() {
        let filter = QuestionFilter::new().with_difficulty(Difficulty::Medium);
        assert!(filter.matches(&approved(Some(Difficulty::Medium))));
        assert!(!filter.matches(&approved(Some(Difficulty::Hard))));
        assert!(!filter.matches(&approved(None)));
    }
}
