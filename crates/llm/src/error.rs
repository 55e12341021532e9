/// Errors from the completion service layer.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Completion API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The service answered, but the content is not a usable flashcard list.
    #[error("Invalid AI response: {0}")]
    InvalidResponse(String),
}
