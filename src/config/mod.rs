pub mod toml_config;

use crate::config::toml_config::TomlConfig;
use crate::utils::error::{GatewayError, Result};
use crate::utils::validation::{
    validate_email, validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use clap::Parser;

pub const DEFAULT_NOTIFY_FROM: &str = "no-reply@example.com";
pub const DEFAULT_NOTIFY_TO: &str = "leads@example.com";

#[derive(Debug, Clone, Parser)]
#[command(name = "forms-gateway")]
#[command(about = "HTTP gateway for marketing-site form submissions")]
pub struct Args {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    /// Directory for the JSON-Lines document store
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Keep submissions in memory instead of on disk
    #[arg(long)]
    pub in_memory: bool,

    /// HTTP mail API endpoint; notifications are dropped when unset
    #[arg(long)]
    pub mail_endpoint: Option<String>,

    #[arg(long, env = "MAIL_API_KEY", hide_env_values = true)]
    pub mail_api_key: Option<String>,

    #[arg(long)]
    pub notify_from: Option<String>,

    /// Internal address receiving one email per submission
    #[arg(long)]
    pub notify_to: Option<String>,

    /// Allowed CORS origin; any origin is allowed when unset
    #[arg(long)]
    pub allowed_origin: Option<String>,

    #[arg(long)]
    pub rate_limit_max_requests: Option<u32>,

    #[arg(long)]
    pub rate_limit_window_secs: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit JSON logs
    #[arg(long)]
    pub json_logs: bool,
}

/// Fully resolved runtime configuration: defaults, then the TOML file, then
/// CLI flags, in increasing precedence.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: String,
    pub in_memory: bool,
    pub mail_endpoint: Option<String>,
    pub mail_api_key: Option<String>,
    pub notify_from: String,
    pub notify_to: String,
    pub allowed_origin: Option<String>,
    pub rate_limit_max_requests: u32,
    pub rate_limit_window_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            data_dir: "./data".to_string(),
            in_memory: false,
            mail_endpoint: None,
            mail_api_key: None,
            notify_from: DEFAULT_NOTIFY_FROM.to_string(),
            notify_to: DEFAULT_NOTIFY_TO.to_string(),
            allowed_origin: None,
            rate_limit_max_requests: 20,
            rate_limit_window_secs: 60,
        }
    }
}

impl AppConfig {
    pub fn resolve(args: &Args) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = &args.config {
            config.apply_file(&TomlConfig::from_file(path)?);
        }
        config.apply_args(args);

        Ok(config)
    }

    fn apply_file(&mut self, file: &TomlConfig) {
        if let Some(server) = &file.server {
            if let Some(host) = &server.host {
                self.host = host.clone();
            }
            if let Some(port) = server.port {
                self.port = port;
            }
            if server.allowed_origin.is_some() {
                self.allowed_origin = server.allowed_origin.clone();
            }
        }
        if let Some(storage) = &file.storage {
            if let Some(data_dir) = &storage.data_dir {
                self.data_dir = data_dir.clone();
            }
            if let Some(in_memory) = storage.in_memory {
                self.in_memory = in_memory;
            }
        }
        if let Some(mail) = &file.mail {
            if mail.endpoint.is_some() {
                self.mail_endpoint = mail.endpoint.clone();
            }
            if mail.api_key.is_some() {
                self.mail_api_key = mail.api_key.clone();
            }
            if let Some(from) = &mail.from {
                self.notify_from = from.clone();
            }
            if let Some(notify_to) = &mail.notify_to {
                self.notify_to = notify_to.clone();
            }
        }
        if let Some(rate_limit) = &file.rate_limit {
            if let Some(max_requests) = rate_limit.max_requests {
                self.rate_limit_max_requests = max_requests;
            }
            if let Some(window_secs) = rate_limit.window_secs {
                self.rate_limit_window_secs = window_secs;
            }
        }
    }

    fn apply_args(&mut self, args: &Args) {
        if let Some(host) = &args.host {
            self.host = host.clone();
        }
        if let Some(port) = args.port {
            self.port = port;
        }
        if let Some(data_dir) = &args.data_dir {
            self.data_dir = data_dir.clone();
        }
        if args.in_memory {
            self.in_memory = true;
        }
        if args.mail_endpoint.is_some() {
            self.mail_endpoint = args.mail_endpoint.clone();
        }
        if args.mail_api_key.is_some() {
            self.mail_api_key = args.mail_api_key.clone();
        }
        if let Some(notify_from) = &args.notify_from {
            self.notify_from = notify_from.clone();
        }
        if let Some(notify_to) = &args.notify_to {
            self.notify_to = notify_to.clone();
        }
        if args.allowed_origin.is_some() {
            self.allowed_origin = args.allowed_origin.clone();
        }
        if let Some(max_requests) = args.rate_limit_max_requests {
            self.rate_limit_max_requests = max_requests;
        }
        if let Some(window_secs) = args.rate_limit_window_secs {
            self.rate_limit_window_secs = window_secs;
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("host", &self.host)?;
        if !self.in_memory {
            validate_non_empty_string("storage.data_dir", &self.data_dir)?;
        }
        if let Some(endpoint) = &self.mail_endpoint {
            validate_url("mail.endpoint", endpoint)?;
        }
        if self.mail_api_key.is_some() && self.mail_endpoint.is_none() {
            return Err(GatewayError::MissingConfig {
                field: "mail.endpoint".to_string(),
            });
        }
        validate_email("mail.from", &self.notify_from)?;
        validate_email("mail.notify_to", &self.notify_to)?;
        validate_positive_number(
            "rate_limit.max_requests",
            self.rate_limit_max_requests,
            1,
        )?;
        validate_positive_number("rate_limit.window_secs", self.rate_limit_window_secs, 1)?;
        Ok(())
    }
}
