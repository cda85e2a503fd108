// Infrastructure layer - External dependencies and adapters
pub mod chat_models;
pub mod config;
pub mod csv_usage_source;
pub mod http_response;
pub mod openai_client;
