use url::Url;

use super::KeyCredential;
use crate::errors::CommandError;
use crate::repos::config::DEFAULT_API_VERSION;

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub api_version: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions {
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

/// Client for an Azure OpenAI resource, authenticated with a static key.
#[derive(Debug)]
pub struct AzureOpenAIClient {
    pub(super) http: reqwest::Client,
    pub(super) endpoint: Url,
    pub(super) credential: KeyCredential,
    pub(super) api_version: String,
}

impl AzureOpenAIClient {
    pub fn new(
        endpoint: &str,
        credential: KeyCredential,
        options: ClientOptions,
    ) -> Result<Self, CommandError> {
        let endpoint = parse_endpoint(endpoint)?;
        let http = reqwest::Client::builder()
            .build()
            .map_err(CommandError::ClientBuild)?;

        Ok(AzureOpenAIClient {
            http,
            endpoint,
            credential,
            api_version: options.api_version,
        })
    }

    /// `{endpoint}/openai/deployments/{deployment}/chat/completions?api-version=...`
    pub fn chat_completions_url(&self, deployment: &str) -> Result<Url, CommandError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| CommandError::InvalidEndpoint {
                endpoint: self.endpoint.to_string(),
                reason: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(["openai", "deployments", deployment, "chat", "completions"]);
        url.query_pairs_mut()
            .append_pair("api-version", &self.api_version);
        Ok(url)
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, CommandError> {
    let invalid = |reason: String| CommandError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };

    let trimmed = endpoint.trim();
    if trimmed.is_empty() {
        return Err(invalid("endpoint is empty".to_string()));
    }

    let url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(invalid(format!("unsupported scheme '{}'", scheme))),
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn client(endpoint: &str) -> Result<AzureOpenAIClient, CommandError> {
        AzureOpenAIClient::new(
            endpoint,
            KeyCredential::new("test-key"),
            ClientOptions::default(),
        )
    }

    #[test]
    fn test_empty_endpoint_fails() {
        let err = client("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Client);
        assert!(err.to_string().contains("endpoint is empty"));
    }

    #[test]
    fn test_malformed_endpoint_fails() {
        assert!(matches!(
            client("not a url"),
            Err(CommandError::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            client("ftp://example.com"),
            Err(CommandError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn test_chat_completions_url() {
        let client = client("https://example.openai.azure.com").unwrap();
        let url = client.chat_completions_url("gpt-4o").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version=2024-06-01"
        );
    }

    #[test]
    fn test_chat_completions_url_keeps_base_path() {
        let client = client("https://gateway.example.com/azure/").unwrap();
        let url = client.chat_completions_url("my deployment").unwrap();
        assert_eq!(
            url.as_str(),
            "https://gateway.example.com/azure/openai/deployments/my%20deployment/chat/completions?api-version=2024-06-01"
        );
    }

    #[test]
    fn test_api_version_option() {
        let client = AzureOpenAIClient::new(
            "https://example.openai.azure.com/",
            KeyCredential::new("k"),
            ClientOptions {
                api_version: "2024-10-21".to_string(),
            },
        )
        .unwrap();
        let url = client.chat_completions_url("gpt-4o").unwrap();
        assert_eq!(url.query(), Some("api-version=2024-10-21"));
    }
}
