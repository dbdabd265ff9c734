//! External game-generation collaborator.
//!
//! The lifecycle layer talks to the model through the [`GameGenerator`]
//! trait; [`anthropic::AnthropicGenerator`] is the production
//! implementation. Generator output is raw model text -- extracting and
//! validating the HTML document from it belongs to the domain layer, not
//! here.

pub mod anthropic;
pub mod prompt;

use async_trait::async_trait;

/// Produces a complete HTML5 game document from a natural-language prompt.
///
/// `baseline_html` is "what exists now": the content of the version being
/// iterated on, or the placeholder document for a fresh game. `owner_key`
/// lets the prompt reference the owner's uploaded images.
#[async_trait]
pub trait GameGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        baseline_html: &str,
        owner_key: &str,
    ) -> Result<String, GeneratorError>;
}

/// Errors from the generation backend.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("request to generation backend failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("generation backend error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The backend responded successfully but with no usable content.
    #[error("generation backend returned no content")]
    Empty,
}
