pub mod chat_completion;
pub mod config;
