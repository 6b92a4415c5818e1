//! Extraction of a question record from a model's free-text reply.
//!
//! The reply is scanned for the first `{` and the last `}`; everything
//! between them (inclusive) is parsed as JSON. This tolerates markdown
//! fences and commentary around a single object. It does not try to repair
//! replies that hold several objects or stray braces in the trailing text.

use quizgen_storage::Question;

/// Error type for reply parsing.
#[derive(Debug, thiserror::Error)]
pub enum ResponseParseError {
    /// The reply has no `{` ... `}` span.
    #[error("no JSON object found in AI response")]
    NoJsonObject,
    /// The span is not valid JSON or does not describe a question.
    #[error("invalid question JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Return the slice from the first `{` to the last `}`, inclusive.
pub fn extract_json_object(text: &str) -> Result<&str, ResponseParseError> {
    let start = text.find('{').ok_or(ResponseParseError::NoJsonObject)?;
    let end = text.rfind('}').ok_or(ResponseParseError::NoJsonObject)?;
    if end < start {
        return Err(ResponseParseError::NoJsonObject);
    }
    Ok(&text[start..=end])
}

/// Parse the embedded JSON object of `text` into a [`Question`].
pub fn parse_question(text: &str) -> Result<Question, ResponseParseError> {
    let json = extract_json_object(text)?;
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizgen_storage::Difficulty;

    #[test]
    fn parses_fenced_reply_with_commentary() {
        let reply = "Sure! Here is your question:\n```json\n{\n  \"question\": \"What is 2+2?\",\n  \"options\": [\"3\", \"4\", \"5\", \"22\"],\n  \"correct_answer\": \"4\",\n  \"difficulty\": \"easy\"\n}\n```\nGood luck!";
        let q = parse_question(reply).unwrap();
        assert_eq!(q.question, "What is 2+2?");
        assert_eq!(q.options.len(), 4);
        assert_eq!(q.correct_answer, "4");
        assert_eq!(q.difficulty, Some(Difficulty::Easy));
    }

    #[test]
    fn nested_objects_are_kept_whole() {
        let reply = r#"{"question":"q","options":["a","b"],"correct_answer":"a","meta":{"source":"ai"}}"#;
        let q = parse_question(reply).unwrap();
        assert_eq!(q.extra["meta"]["source"], "ai");
    }

    #[test]
    fn no_braces_is_an_error() {
        assert!(matches!(
            parse_question("I cannot help with that."),
            Err(ResponseParseError::NoJsonObject)
        ));
    }

    #[test]
    fn closing_brace_before_opening_is_an_error() {
        assert!(matches!(
            extract_json_object("} nothing here {"),
            Err(ResponseParseError::NoJsonObject)
        ));
    }

    #[test]
    fn trailing_broken_object_uses_literal_first_last_rule() {
        let reply = "noise {\"a\":1} trailing {broken";
        // The last `}` closes the first object, so the span is just that object.
        assert_eq!(extract_json_object(reply).unwrap(), "{\"a\":1}");
        // It is valid JSON but not a question.
        assert!(matches!(
            parse_question(reply),
            Err(ResponseParseError::InvalidJson(_))
        ));
    }

    #[test]
    fn two_objects_produce_invalid_span() {
        let reply = r#"{"question":"a"} and {"question":"b"}"#;
        assert!(matches!(
            parse_question(reply),
            Err(ResponseParseError::InvalidJson(_))
        ));
    }

    #[test]
    fn invalid_difficulty_is_a_parse_error() {
        let reply = r#"{"question":"q","options":["a"],"correct_answer":"a","difficulty":"brutal"}"#;
        assert!(parse_question(reply).is_err());
    }
}
