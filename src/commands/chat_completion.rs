use std::io::{self, Write};

use tracing::{debug, error};

use crate::args::ChatCompletionSubCommand;
use crate::clients::azure::{AzureOpenAIClient, ChatCompletionClient, ClientOptions, KeyCredential};
use crate::errors::CommandError;
use crate::models::{chat_request::ChatRequest, chat_response::ChatResponse};
use crate::repos::config::{get_config, AoaiConfig, DEFAULT_API_VERSION, DEFAULT_DEPLOYMENT};

pub const DEFAULT_MESSAGE: &str = "Hello, how are you?";

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandConfig {
    pub model_deployment_id: String,
    pub endpoint: String,
    pub api_key: KeyCredential,
    pub message: String,
    pub api_version: String,
}

impl CommandConfig {
    /// Flags (and their environment variables) win over the config file,
    /// which wins over built-in defaults.
    pub fn resolve(cmd: &ChatCompletionSubCommand, file: &AoaiConfig) -> Self {
        fn pick(flag: &Option<String>, file: &Option<String>, default: &str) -> String {
            flag.as_ref()
                .or(file.as_ref())
                .cloned()
                .unwrap_or_else(|| default.to_string())
        }

        CommandConfig {
            model_deployment_id: pick(&cmd.model_deployment_id, &file.deployment, DEFAULT_DEPLOYMENT),
            endpoint: pick(&cmd.azure_openai_endpoint, &file.endpoint, ""),
            api_key: KeyCredential::new(pick(&cmd.azure_openai_key, &file.key, "")),
            message: cmd
                .message
                .clone()
                .unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
            api_version: pick(&cmd.api_version, &file.api_version, DEFAULT_API_VERSION),
        }
    }

    pub fn validate(&self) -> Result<(), CommandError> {
        if self.endpoint.trim().is_empty() {
            return Err(CommandError::MissingFlag("azureOpenAIEndpoint"));
        }
        if self.api_key.secret().trim().is_empty() {
            return Err(CommandError::MissingFlag("azureOpenAIKey"));
        }
        if self.model_deployment_id.trim().is_empty() {
            return Err(CommandError::MissingFlag("modelDeploymentID"));
        }
        Ok(())
    }
}

impl AzureOpenAIClient {
    pub fn from_config(config: &CommandConfig) -> Result<Self, CommandError> {
        AzureOpenAIClient::new(
            &config.endpoint,
            config.api_key.clone(),
            ClientOptions {
                api_version: config.api_version.clone(),
            },
        )
    }
}

/// Print every choice in the order received. Returns whether any choice was
/// seen; the confirmation line is only written in that case.
pub fn write_choices<W: Write>(out: &mut W, response: &ChatResponse) -> io::Result<bool> {
    let mut got_reply = false;

    for choice in &response.choices {
        got_reply = true;

        if let Some(filters) = &choice.content_filter_results {
            writeln!(out, "Content filter results")?;

            if let Some(err) = &filters.error {
                writeln!(out, "  Error:{}", err)?;
            }

            for (label, result) in filters.categories() {
                match result {
                    Some(result) => writeln!(out, "  {}: {}", label, result)?,
                    None => writeln!(out, "  {}: sev: n/a, filtered: n/a", label)?,
                }
            }
        }

        if let Some(content) = choice.content() {
            writeln!(out, "Content[{}]: {}", choice.index, content)?;
        }

        if let Some(finish_reason) = &choice.finish_reason {
            writeln!(out, "Finish reason[{}]: {}", choice.index, finish_reason)?;
        }
    }

    if got_reply {
        writeln!(out, "Received chat completions reply")?;
    }
    Ok(got_reply)
}

/// Validate, connect, make exactly one call and report. `connect` is only
/// invoked once the configuration is valid.
pub async fn execute<C, F, W>(
    config: &CommandConfig,
    connect: F,
    out: &mut W,
) -> Result<bool, CommandError>
where
    C: ChatCompletionClient,
    F: FnOnce(&CommandConfig) -> Result<C, CommandError>,
    W: Write,
{
    config.validate()?;
    let client = connect(config)?;

    let chat_request = ChatRequest::for_user_message(&config.message);
    debug!(
        "Requesting chat completion from deployment {}",
        config.model_deployment_id
    );

    let response = client
        .get_chat_completions(&config.model_deployment_id, &chat_request)
        .await?;

    debug!(
        "Received response {} (created {}) from model {}",
        response.id.as_deref().unwrap_or("<none>"),
        response
            .created
            .map(|c| c.to_string())
            .unwrap_or_else(|| "<none>".to_string()),
        response.model.as_deref().unwrap_or("<none>")
    );
    if let Some(usage) = &response.usage {
        debug!(
            "Token usage: prompt={}, completion={}, total={}",
            usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
        );
    }

    Ok(write_choices(out, &response)?)
}

/// Run once and log a failure, tagged with its kind. A successful call adds
/// nothing beyond the report, even when no choices came back.
pub async fn run_with<C, F, W>(config: &CommandConfig, connect: F, out: &mut W)
where
    C: ChatCompletionClient,
    F: FnOnce(&CommandConfig) -> Result<C, CommandError>,
    W: Write,
{
    if let Err(e) = execute(config, connect, out).await {
        error!("{:?} error: {}", e.kind(), e);
    }
}

pub async fn run(cmd: &ChatCompletionSubCommand) {
    let config = CommandConfig::resolve(cmd, get_config());
    let mut stderr = io::stderr();
    run_with(&config, AzureOpenAIClient::from_config, &mut stderr).await;
}
