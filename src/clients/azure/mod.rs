use std::fmt;

use crate::errors::CommandError;
use crate::models::{chat_request::ChatRequest, chat_response::ChatResponse};

pub mod chat_completions;
pub mod client;

pub use client::{AzureOpenAIClient, ClientOptions};

/// Static API key sent in the `api-key` header.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyCredential(String);

impl KeyCredential {
    pub fn new(key: impl Into<String>) -> Self {
        KeyCredential(key.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for KeyCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyCredential(********)")
    }
}

pub trait ChatCompletionClient {
    /// Issue one chat completion call against `deployment`.
    async fn get_chat_completions(
        &self,
        deployment: &str,
        chat_request: &ChatRequest,
    ) -> Result<ChatResponse, CommandError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = KeyCredential::new("super-secret");
        assert_eq!(format!("{:?}", credential), "KeyCredential(********)");
        assert_eq!(credential.secret(), "super-secret");
    }
}
