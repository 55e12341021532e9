/// Default OpenAI-compatible endpoint.
const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
/// Default model identifier, also recorded on every generation row.
const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Default HTTP timeout for a single completion call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for the completion service.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API (without `/chat/completions`).
    pub base_url: String,
    /// Bearer token sent with every request.
    pub api_key: String,
    /// Model identifier passed in the request body.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var            | Required | Default                         |
    /// |--------------------|----------|---------------------------------|
    /// | `LLM_API_KEY`      | **yes**  | --                              |
    /// | `LLM_API_BASE_URL` | no       | `https://openrouter.ai/api/v1`  |
    /// | `LLM_MODEL`        | no       | `gpt-4o-mini`                   |
    /// | `LLM_TIMEOUT_SECS` | no       | `60`                            |
    ///
    /// # Panics
    ///
    /// Panics if `LLM_API_KEY` is missing or empty, or if the timeout does
    /// not parse.
    pub fn from_env() -> Self {
        let api_key =
            std::env::var("LLM_API_KEY").expect("LLM_API_KEY must be set in the environment");
        assert!(!api_key.is_empty(), "LLM_API_KEY must not be empty");

        let base_url = std::env::var("LLM_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.into())
            .trim_end_matches('/')
            .to_string();

        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let timeout_secs: u64 = std::env::var("LLM_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("LLM_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            api_key,
            model,
            timeout_secs,
        }
    }
}
