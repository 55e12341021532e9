//! Prompt template and reply parsing for flashcard generation.

use flashdeck_core::generation::{usable_cards, GeneratedCard};
use serde::Deserialize;

use crate::error::CompletionError;

/// Fixed system instruction sent with every generation request.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that generates flashcards \
from the provided text. Respond with a JSON object containing a single key \"flashcards\", \
which is an array of objects. Each object should have \"front\" and \"back\" keys. \
The front should be a question, and the back should be the answer.";

/// Expected shape of the model's JSON reply.
#[derive(Debug, Deserialize)]
struct GenerationReply {
    flashcards: Vec<GeneratedCard>,
}

/// Build the user message asking for `count` cards from `source_text`.
pub fn user_message(source_text: &str, count: i32) -> String {
    format!("Generate {count} flashcards from the following text: {source_text}")
}

/// Parse the raw completion content into usable cards.
///
/// Fails with [`CompletionError::InvalidResponse`] when the content is
/// missing, blank, not JSON of the expected shape, or yields no card with
/// both sides filled in.
pub fn parse_reply(content: Option<&str>) -> Result<Vec<GeneratedCard>, CompletionError> {
    let content = content
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| CompletionError::InvalidResponse("empty response content".into()))?;

    let reply: GenerationReply = serde_json::from_str(strip_code_fence(content))
        .map_err(|e| CompletionError::InvalidResponse(format!("malformed JSON: {e}")))?;

    let proposed = reply.flashcards.len();
    let cards = usable_cards(reply.flashcards);
    if cards.is_empty() {
        return Err(CompletionError::InvalidResponse(format!(
            "no usable flashcards among {proposed} proposed"
        )));
    }
    if cards.len() < proposed {
        tracing::warn!(
            proposed,
            usable = cards.len(),
            "Discarded generated flashcards with an empty side",
        );
    }
    Ok(cards)
}

/// Remove a surrounding Markdown code fence, if the model added one.
fn strip_code_fence(content: &str) -> &str {
    let Some(rest) = content.strip_prefix("```") else {
        return content;
    };
    // Skip an optional language tag on the opening fence line.
    let body = rest.split_once('\n').map_or(rest, |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn user_message_embeds_count_and_text() {
        let msg = user_message("Mitochondria make ATP.", 3);
        assert_eq!(
            msg,
            "Generate 3 flashcards from the following text: Mitochondria make ATP."
        );
    }

    #[test]
    fn parses_well_formed_reply() {
        let content = r#"{"flashcards":[{"front":"Q1","back":"A1"},{"front":"Q2","back":"A2"}]}"#;
        let cards = parse_reply(Some(content)).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].front, "Q1");
        assert_eq!(cards[1].back, "A2");
    }

    #[test]
    fn missing_or_blank_content_is_invalid() {
        assert_matches!(parse_reply(None), Err(CompletionError::InvalidResponse(_)));
        assert_matches!(parse_reply(Some("  ")), Err(CompletionError::InvalidResponse(_)));
    }

    #[test]
    fn non_json_content_is_invalid() {
        assert_matches!(
            parse_reply(Some("Here are your flashcards!")),
            Err(CompletionError::InvalidResponse(_))
        );
    }

    #[test]
    fn wrong_shape_is_invalid() {
        assert_matches!(
            parse_reply(Some(r#"{"cards":[{"front":"Q","back":"A"}]}"#)),
            Err(CompletionError::InvalidResponse(_))
        );
        assert_matches!(
            parse_reply(Some(r#"{"flashcards":[{"front":"Q"}]}"#)),
            Err(CompletionError::InvalidResponse(_))
        );
    }

    #[test]
    fn all_blank_cards_is_invalid() {
        assert_matches!(
            parse_reply(Some(r#"{"flashcards":[{"front":"","back":"A"}]}"#)),
            Err(CompletionError::InvalidResponse(_))
        );
        assert_matches!(
            parse_reply(Some(r#"{"flashcards":[]}"#)),
            Err(CompletionError::InvalidResponse(_))
        );
    }

    #[test]
    fn code_fenced_json_is_accepted() {
        let content = "```json\n{\"flashcards\":[{\"front\":\"Q\",\"back\":\"A\"}]}\n```";
        let cards = parse_reply(Some(content)).unwrap();
        assert_eq!(cards.len(), 1);
    }
}
