use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub data: DataSettings,
    pub advice: AdviceSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind_addr: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataSettings {
    pub usage_csv: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AdviceSettings {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    /// Retries after a transient failure. Values above 1 are clamped.
    pub max_retries: u32,
    /// Environment variable holding the API key.
    pub api_key_env: String,
}

impl AdviceSettings {
    /// The key is read once here. A missing key only fails on first use.
    pub fn api_key_from_env(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

fn builder() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(config::Config::builder()
        .set_default("server.bind_addr", "0.0.0.0:8080")?
        .set_default("data.usage_csv", "faucet_usage_data.csv")?
        .set_default("advice.base_url", "https://api.openai.com/v1")?
        .set_default("advice.model", "gpt-3.5-turbo")?
        .set_default("advice.timeout_secs", 60)?
        .set_default("advice.max_retries", 1)?
        .set_default("advice.api_key_env", "OPENAI_API_KEY")?)
}

/// Defaults, then `config/aquasense.*` if present, then `AQUASENSE__*` env vars.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = builder()?
        .add_source(config::File::with_name("config/aquasense").required(false))
        .add_source(config::Environment::with_prefix("AQUASENSE").separator("__"))
        .build()
        .context("building configuration")?;

    settings
        .try_deserialize()
        .context("deserializing configuration")
}
