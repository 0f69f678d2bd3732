//! Runtime configuration
//!
//! Every setting is a CLI flag with an environment variable fallback. The API
//! key is the only required one; startup fails before binding the socket
//! when it is missing.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_VISION_MODEL: &str = "llava-v1.5-7b-4096-preview";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Parser, Debug, Clone)]
#[command(name = "groq-web-chat")]
#[command(about = "Web chat that streams Groq completions to the browser")]
pub struct Args {
    /// Groq API key
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = "GROQ_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Model used by the image analysis form
    #[arg(long, env = "GROQ_VISION_MODEL", default_value = DEFAULT_VISION_MODEL)]
    pub vision_model: String,

    /// Address to listen on
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GROQ_API_KEY is not set")]
    MissingApiKey,

    #[error("Invalid base URL (expected http:// or https://): {0}")]
    InvalidBaseUrl(String),
}

/// Validated configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub base_url: String,
    pub vision_model: String,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let api_key = args
            .api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let base_url = args.base_url.trim().to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(base_url));
        }

        Ok(Self {
            api_key,
            base_url,
            vision_model: args.vision_model,
            bind_addr: SocketAddr::new(args.host, args.port),
        })
    }
}
