use crate::llm::{LlmSettings, Provider};
use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::env;

/// Default location of the publication list from the NASA Space Biology program.
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/jgalazka/SB_publications/main/SB_publication_PMC.csv";

/// Backend address used when the embedded catalogue is off and none is configured.
pub const DEFAULT_EXTERNAL_BACKEND_URL: &str = "http://localhost:5001";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Base URL of the publication backend
    #[arg(long, env = "BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Serve the embedded catalogue API under /api
    #[arg(long, env = "CATALOG_ENABLED")]
    pub catalog_enabled: Option<bool>,

    /// Chat orchestration mode: "backend" or "direct"
    #[arg(long, env = "CHAT_MODE")]
    pub chat_mode: Option<ChatMode>,

    /// Disable timeout middleware
    #[arg(long, env = "TIMEOUT_DISABLED")]
    pub timeout_disabled: Option<bool>,
}

/// Who orchestrates retrieval and generation for chat queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    /// The backend's `/api/chat` does both.
    #[default]
    Backend,
    /// The dashboard retrieves publications and calls the model itself.
    Direct,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub catalog: CatalogConfig,
    pub chat: ChatConfig,
    pub llm: LlmConfig,
    pub quota: QuotaConfig,
    pub resilience: ResilienceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    pub enabled: bool,
    pub csv_path: String,
    #[serde(default)]
    pub topics_path: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatConfig {
    pub mode: ChatMode,
    pub result_limit: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    pub temperature: f64,
    pub max_tokens: u32,
    #[serde(default)]
    pub deployment_name: Option<String>,
    #[serde(default)]
    pub api_version: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct QuotaConfig {
    pub requests_per_minute: u32,
    pub requests_per_day: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResilienceConfig {
    pub timeout_disabled: bool,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder();

        // 1. Defaults
        builder = builder
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("catalog.enabled", true)?
            .set_default("catalog.csv_path", "data/SB_publication_PMC.csv")?
            .set_default("catalog.source_url", DEFAULT_SOURCE_URL)?
            .set_default("chat.mode", "backend")?
            .set_default("chat.result_limit", 10)?
            .set_default("llm.base_url", "https://api.openai.com")?
            .set_default("llm.model", "gpt-4o-mini")?
            .set_default("llm.temperature", 0.7)?
            .set_default("llm.max_tokens", 500)?
            .set_default("quota.requests_per_minute", 15)?
            .set_default("quota.requests_per_day", 1500)?
            .set_default("resilience.timeout_disabled", false)?
            .set_default("resilience.request_timeout_secs", 30)?;

        // 2. Config file: explicit path, else ./config.yaml when present
        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path)),
            None => builder.add_source(File::with_name("config").required(false)),
        };

        // 3. Environment variables prefixed with BIOCOSMOS_, e.g. BIOCOSMOS_SERVER__PORT=8000
        builder = builder.add_source(
            Environment::with_prefix("BIOCOSMOS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // 4. Unprefixed credential, the name the LLM tooling conventionally uses
        if let Ok(key) = env::var("LLM_API_KEY") {
            if !key.trim().is_empty() {
                builder = builder.set_override("llm.api_key", key)?;
            }
        }

        // 5. CLI flags (clap also resolves their plain env vars)
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(url) = cli.backend_url {
            builder = builder.set_override("backend.base_url", url)?;
        }
        if let Some(enabled) = cli.catalog_enabled {
            builder = builder.set_override("catalog.enabled", enabled)?;
        }
        if let Some(mode) = cli.chat_mode {
            let mode = match mode {
                ChatMode::Backend => "backend",
                ChatMode::Direct => "direct",
            };
            builder = builder.set_override("chat.mode", mode)?;
        }
        if let Some(td) = cli.timeout_disabled {
            builder = builder.set_override("resilience.timeout_disabled", td)?;
        }

        let cfg = builder.build()?;
        if cfg.get_string("backend.base_url").is_ok() {
            return cfg.try_deserialize();
        }

        // Unset backend: the embedded catalogue on our own port, else the standalone API
        let base_url = if cfg.get_bool("catalog.enabled")? {
            format!("http://127.0.0.1:{}", cfg.get_int("server.port")?)
        } else {
            DEFAULT_EXTERNAL_BACKEND_URL.to_string()
        };
        Config::builder()
            .add_source(cfg)
            .set_override("backend.base_url", base_url)?
            .build()?
            .try_deserialize()
    }

    /// Settings for the chat-completions client.
    #[must_use]
    pub fn llm_settings(&self) -> LlmSettings {
        let mut provider = Provider::detect_from_url(&self.llm.base_url);

        if let Provider::AzureOpenAI { .. } = &provider {
            provider = Provider::AzureOpenAI {
                deployment_name: self
                    .llm
                    .deployment_name
                    .clone()
                    .unwrap_or_else(|| self.llm.model.clone()),
                api_version: self
                    .llm
                    .api_version
                    .clone()
                    .unwrap_or_else(|| "2024-08-01-preview".to_string()),
            };
        }

        LlmSettings {
            base_url: self.llm.base_url.clone(),
            api_key: self.llm.api_key.clone().filter(|k| !k.trim().is_empty()),
            model: self.llm.model.clone(),
            provider,
            temperature: self.llm.temperature,
            max_tokens: self.llm.max_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_settings_azure_deployment() {
        let mut cfg = AppConfig::load_from_args(["biocosmos-explorer"]).unwrap();
        cfg.llm.base_url = "https://res.openai.azure.com".to_string();
        cfg.llm.deployment_name = Some("prod-mini".to_string());

        let settings = cfg.llm_settings();
        assert_eq!(
            settings.provider,
            Provider::AzureOpenAI {
                deployment_name: "prod-mini".to_string(),
                api_version: "2024-08-01-preview".to_string(),
            }
        );
    }

    #[test]
    fn test_backend_url_follows_listen_port() {
        let cfg = AppConfig::load_from_args(["biocosmos-explorer", "--port", "8080"]).unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.backend.base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_backend_url_without_catalog() {
        let cfg = AppConfig::load_from_args([
            "biocosmos-explorer",
            "--port",
            "8080",
            "--catalog-enabled",
            "false",
        ])
        .unwrap();
        assert_eq!(cfg.backend.base_url, DEFAULT_EXTERNAL_BACKEND_URL);
    }

    #[test]
    fn test_explicit_backend_url_wins() {
        let cfg = AppConfig::load_from_args([
            "biocosmos-explorer",
            "--port",
            "8080",
            "--backend-url",
            "http://api.internal:9000",
        ])
        .unwrap();
        assert_eq!(cfg.backend.base_url, "http://api.internal:9000");
    }

    #[test]
    fn test_blank_api_key_is_none() {
        let mut cfg = AppConfig::load_from_args(["biocosmos-explorer"]).unwrap();
        cfg.llm.api_key = Some("  ".to_string());
        assert!(cfg.llm_settings().api_key.is_none());
    }
}
