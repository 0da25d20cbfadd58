use http::header;
use tracing::{debug, error};
use uuid::Uuid;

use super::{AzureOpenAIClient, ChatCompletionClient};
use crate::errors::CommandError;
use crate::models::{chat_request::ChatRequest, chat_response::ChatResponse, ErrorResponse};

const API_KEY_HEADER: &str = "api-key";
const CLIENT_REQUEST_ID_HEADER: &str = "x-ms-client-request-id";

impl ChatCompletionClient for AzureOpenAIClient {
    async fn get_chat_completions(
        &self,
        deployment: &str,
        chat_request: &ChatRequest,
    ) -> Result<ChatResponse, CommandError> {
        let url = self.chat_completions_url(deployment)?;
        let body = chat_request.to_json().map_err(CommandError::Encode)?;
        let request_id = Uuid::new_v4().to_string();

        debug!(
            "Sending request to Azure OpenAI: {} ({})\nbody:\n{}",
            url, request_id, body
        );

        let response = self
            .http
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .header(API_KEY_HEADER, self.credential.secret())
            .header(CLIENT_REQUEST_ID_HEADER, request_id.as_str())
            .body(body)
            .send()
            .await
            .map_err(CommandError::Transport)?;

        let status = response.status();
        let response_text = response.text().await.map_err(CommandError::Transport)?;

        if !status.is_success() {
            let (code, message) = match ErrorResponse::from_json(&response_text) {
                Ok(e) => (e.error.code, e.error.message),
                Err(_) => (None, response_text),
            };
            return Err(CommandError::Service {
                status: status.as_u16(),
                code,
                message,
            });
        }

        ChatResponse::from_json(&response_text).map_err(|e| {
            error!(
                "Error parsing response JSON: {}\nRaw response: {}",
                e, response_text
            );
            CommandError::Decode(e)
        })
    }
}
