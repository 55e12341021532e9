//! Client for the external text-completion service that drafts flashcards.
//!
//! - [`client`] -- the [`CompletionClient`] trait and its HTTP implementation.
//! - [`prompt`] -- the fixed prompt template and reply parsing.
//! - [`config`] -- endpoint, key, model and timeout settings.

pub mod client;
pub mod config;
pub mod error;
pub mod prompt;

pub use client::{CompletionClient, HttpCompletionClient};
pub use config::LlmConfig;
pub use error::CompletionError;

use flashdeck_core::generation::GeneratedCard;

/// Ask the completion service for `count` cards drawn from `source_text`.
///
/// A single attempt is made; an unusable reply is returned as
/// [`CompletionError::InvalidResponse`] and never retried.
pub async fn generate_cards(
    client: &dyn CompletionClient,
    source_text: &str,
    count: i32,
) -> Result<Vec<GeneratedCard>, CompletionError> {
    let user_message = prompt::user_message(source_text, count);
    let content = client
        .complete_json(prompt::SYSTEM_PROMPT, &user_message)
        .await?;
    prompt::parse_reply(content.as_deref())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use super::*;

    /// Returns a canned reply and records the prompts it was given.
    struct CannedClient {
        reply: Option<String>,
        seen: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl CompletionClient for CannedClient {
        fn model(&self) -> &str {
            "canned"
        }

        async fn complete_json(
            &self,
            system_prompt: &str,
            user_message: &str,
        ) -> Result<Option<String>, CompletionError> {
            self.seen
                .lock()
                .unwrap()
                .push((system_prompt.to_string(), user_message.to_string()));
            Ok(self.reply.clone())
        }
    }

    #[tokio::test]
    async fn generate_cards_sends_fixed_prompt() {
        let client = CannedClient {
            reply: Some(r#"{"flashcards":[{"front":"Q","back":"A"}]}"#.to_string()),
            seen: Mutex::new(vec![]),
        };

        let cards = generate_cards(&client, "Some text", 1).await.unwrap();
        assert_eq!(cards.len(), 1);

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, prompt::SYSTEM_PROMPT);
        assert!(seen[0].1.starts_with("Generate 1 flashcards"));
    }

    #[tokio::test]
    async fn generate_cards_rejects_empty_reply() {
        let client = CannedClient {
            reply: None,
            seen: Mutex::new(vec![]),
        };
        assert_matches!(
            generate_cards(&client, "Some text", 1).await,
            Err(CompletionError::InvalidResponse(_))
        );
    }
}
