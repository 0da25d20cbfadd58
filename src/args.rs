use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "aoai",
    author,
    version,
    about = "Talk to Azure OpenAI Service deployments from the command line",
    long_about = r###"
aoai sends requests to an Azure OpenAI Service resource and prints what comes back.

Endpoint, key, deployment and API version can be passed as flags, read from the
AZURE_OPENAI_* environment variables, or stored once with `aoai config --set`.
"###
)]
pub struct Args {
    #[command(subcommand)]
    pub subcmd: Option<SubCommands>,
}

#[derive(Subcommand, Debug)]
pub enum SubCommands {
    /// Send one chat completion request and print the reply to stderr
    #[command(name = "chatcompletion", visible_alias = "chat-completion")]
    ChatCompletion(ChatCompletionSubCommand),
    /// Set or get default configuration values in aoai.toml
    Config(ConfigSubCommand),
}

#[derive(Parser, Debug, Default, Clone)]
#[command(
    about = "A command for Azure OpenAI Service Chat Completion",
    long_about = "ref. https://learn.microsoft.com/azure/ai-services/openai/chatgpt-quickstart"
)]
pub struct ChatCompletionSubCommand {
    /// Model Deployment ID [default: gpt-4o]
    #[arg(short = 'd', long = "modelDeploymentID")]
    pub model_deployment_id: Option<String>,

    /// Azure OpenAI Endpoint
    #[arg(short = 'e', long = "azureOpenAIEndpoint", env = "AZURE_OPENAI_ENDPOINT")]
    pub azure_openai_endpoint: Option<String>,

    /// Azure OpenAI Key
    #[arg(
        short = 'k',
        long = "azureOpenAIKey",
        env = "AZURE_OPENAI_KEY",
        hide_env_values = true
    )]
    pub azure_openai_key: Option<String>,

    /// Message [default: "Hello, how are you?"]
    #[arg(short = 'm', long = "message")]
    pub message: Option<String>,

    /// Azure OpenAI REST API version [default: 2024-06-01]
    #[arg(long = "apiVersion", env = "AZURE_OPENAI_API_VERSION")]
    pub api_version: Option<String>,
}

#[derive(Parser, Debug)]
#[command(about = "Set or get configuration values", long_about = None)]
pub struct ConfigSubCommand {
    /// Set a configuration value. Use the format key=value.
    /// `aoai config --set deployment=gpt-4o-mini`
    #[arg(short, long, conflicts_with = "get")]
    pub set: Option<String>,

    /// Get your current configuration value.
    /// `aoai config --get endpoint`
    #[arg(short, long)]
    pub get: Option<String>,
}
