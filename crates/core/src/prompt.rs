//! Prompt construction for question generation.
//!
//! The prompt asks for exactly one multiple-choice question as a bare JSON
//! object whose keys match the stored `Question` record.

/// Build the instruction text sent to the model for one question on `topic`.
///
/// Total and deterministic: the same topic always yields the same prompt.
pub fn build_prompt(topic: &str) -> String {
    format!(
        "You are a quiz author. Write ONE multiple-choice question about the topic below.\n\
         \n\
         ## Topic\n\
         {topic}\n\
         \n\
         ## Rules\n\
         - Provide exactly 4 answer options.\n\
         - Exactly one option is correct, and `correct_answer` must repeat it verbatim.\n\
         - `difficulty` must be one of: easy, medium, hard.\n\
         - Keep the question under 300 characters.\n\
         \n\
         Return your response as JSON with this exact schema:\n\
         {{\n\
           \"question\": \"the question text\",\n\
           \"options\": [\"option 1\", \"option 2\", \"option 3\", \"option 4\"],\n\
           \"correct_answer\": \"the correct option\",\n\
           \"difficulty\": \"easy|medium|hard\"\n\
         }}\n\
         Respond only with the JSON object.",
        topic = topic.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_contains_topic_and_schema() {
        let prompt = build_prompt("Rust ownership");
        assert!(prompt.contains("Rust ownership"));
        assert!(prompt.contains("\"correct_answer\""));
        assert!(prompt.contains("\"options\""));
        assert!(prompt.contains("easy|medium|hard"));
    }

    #[test]
    fn prompt_is_deterministic() {
        assert_eq!(build_prompt("SQL joins"), build_prompt("SQL joins"));
    }

    #[test]
    fn prompt_accepts_any_input() {
        let prompt = build_prompt("");
        assert!(prompt.contains("## Topic"));
        let braces = build_prompt("{weird} \"topic\"");
        assert!(braces.contains("{weird} \"topic\""));
    }
}
