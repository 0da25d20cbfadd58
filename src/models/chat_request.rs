use serde::{Deserialize, Serialize};

use super::Message;

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Body of an Azure OpenAI chat completions call. The deployment is part of
/// the request URL, so it is not serialized here.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
}

impl ChatRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        ChatRequest { messages }
    }

    /// The fixed system prompt followed by a single user turn.
    pub fn for_user_message(message: &str) -> Self {
        ChatRequest::new(vec![Message::system(SYSTEM_PROMPT), Message::user(message)])
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn test_for_user_message_shape() {
        let chat_request = ChatRequest::for_user_message("What is the capital of France?");

        assert_eq!(chat_request.messages.len(), 2);
        assert_eq!(chat_request.messages[0].role, Role::System);
        assert_eq!(chat_request.messages[0].content, SYSTEM_PROMPT);
        assert_eq!(chat_request.messages[1].role, Role::User);
        assert_eq!(chat_request.messages[1].content, "What is the capital of France?");
    }

    #[test]
    fn test_serializes_to_wire_format() {
        let chat_request = ChatRequest::for_user_message("hi");
        let value: serde_json::Value =
            serde_json::from_str(&chat_request.to_json().unwrap()).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "messages": [
                    {"role": "system", "content": "You are a helpful assistant."},
                    {"role": "user", "content": "hi"}
                ]
            })
        );
    }

    #[test]
    fn test_repeated_builds_are_identical() {
        let first = ChatRequest::for_user_message("Hello, how are you?");
        let second = ChatRequest::for_user_message("Hello, how are you?");
        assert_eq!(first, second);
    }
}
