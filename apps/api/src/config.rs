use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a sensible local-development default.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Gutendex book catalog, with a trailing slash.
    pub gutendex_url: String,
    /// Base URL of the Ollama server hosting the generation model.
    pub ollama_host: String,
    /// Model name passed on every generation call.
    pub llm_model: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gutendex_url: env_or("GUTENDEX_URL", "https://gutendex.com/books/"),
            ollama_host: env_or("OLLAMA_HOST", "http://localhost:11434"),
            llm_model: env_or("LLM_MODEL", "llama2"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
