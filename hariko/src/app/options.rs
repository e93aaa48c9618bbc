//! Application configuration options

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use discord_webhook::DEFAULT_API_BASE;
use secrecy::SecretString;

use crate::deploy::helm::HelmOptions;
use crate::errors::RelayError;
use crate::filter::EventFilter;
use crate::logs::{LogLevel, LogOptions};
use crate::models::deployment::DeploymentRequest;
use crate::notify::discord::DiscordWebhook;

/// Command line, each flag also readable from a `HARIKO_*` variable
#[derive(Debug, Parser)]
#[command(
    name = "hariko",
    version,
    about = "CD bot for 0key.dev",
    long_about = "Hariko watches the GitHub repository and automatically deploys the application to the server."
)]
pub struct Cli {
    /// Discord webhook ID & token, as <id>/<token>
    #[arg(
        short = 'w',
        long,
        env = "HARIKO_DISCORD_WEBHOOK_ID_TOKEN",
        hide_env_values = true
    )]
    pub discord_webhook_id_token: Option<String>,

    /// Discord API base URL
    #[arg(long, env = "HARIKO_DISCORD_API_BASE", default_value = DEFAULT_API_BASE)]
    pub discord_api_base: String,

    /// Job name
    #[arg(short = 'j', long, env = "HARIKO_GITHUB_JOB_NAME")]
    pub github_job_name: String,

    /// Repository
    #[arg(short = 'g', long, env = "HARIKO_GITHUB_REPOSITORY")]
    pub github_repository: String,

    /// GitHub webhook secret
    #[arg(
        short = 's',
        long,
        env = "HARIKO_GITHUB_WEBHOOK_SECRET",
        hide_env_values = true
    )]
    pub github_webhook_secret: String,

    /// Namespace
    #[arg(short = 'n', long, env = "HARIKO_NAMESPACE")]
    pub namespace: Option<String>,

    /// Package name
    #[arg(short = 'p', long, env = "HARIKO_PACKAGE_NAME")]
    pub package_name: String,

    /// Repository name
    #[arg(short = 'r', long, env = "HARIKO_REPOSITORY_NAME")]
    pub repository_name: String,

    /// Repository URL
    #[arg(short = 'u', long, env = "HARIKO_REPOSITORY_URL")]
    pub repository_url: String,

    /// Release name, defaults to the repository name
    #[arg(long, env = "HARIKO_RELEASE_NAME")]
    pub release_name: Option<String>,

    /// Helm executable
    #[arg(long, env = "HARIKO_HELM_BINARY", default_value = "helm")]
    pub helm_binary: String,

    /// Host to bind to
    #[arg(long, env = "HARIKO_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "HARIKO_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "HARIKO_LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Log as JSON
    #[arg(long, env = "HARIKO_LOG_JSON")]
    pub log_json: bool,

    /// Also write daily-rotated log files to this directory
    #[arg(long, env = "HARIKO_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            log_level: self.log_level.clone(),
            json_format: self.log_json,
            log_dir: self.log_dir.clone(),
            ..Default::default()
        }
    }

    /// Validate the command line into application options
    pub fn into_app_options(self) -> Result<AppOptions, RelayError> {
        if self.github_webhook_secret.is_empty() {
            return Err(RelayError::ConfigError(
                "GitHub webhook secret must not be empty".to_string(),
            ));
        }

        let discord = match self.discord_webhook_id_token.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(DiscordOptions {
                webhook: value.parse()?,
                api_base: self.discord_api_base.clone(),
            }),
        };

        let release_name = self
            .release_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.repository_name.clone());

        Ok(AppOptions {
            server: ServerOptions {
                host: self.host,
                port: self.port,
            },
            filter: EventFilter::new(self.github_repository, self.github_job_name),
            request: DeploymentRequest {
                package_name: self.package_name,
                source_name: self.repository_name,
                source_url: self.repository_url,
            },
            helm: HelmOptions {
                binary: self.helm_binary,
                release_name,
                namespace: self.namespace.filter(|ns| !ns.is_empty()),
            },
            discord,
            webhook_secret: SecretString::from(self.github_webhook_secret),
            lifecycle: LifecycleOptions::default(),
        })
    }
}

/// Main application options
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Server configuration
    pub server: ServerOptions,

    /// Job that triggers deployments
    pub filter: EventFilter,

    /// Package to deploy
    pub request: DeploymentRequest,

    /// Helm engine configuration
    pub helm: HelmOptions,

    /// Discord sink, notifications are off when unset
    pub discord: Option<DiscordOptions>,

    /// Shared secret of the GitHub webhook
    pub webhook_secret: SecretString,

    /// Lifecycle configuration
    pub lifecycle: LifecycleOptions,
}

/// Discord notification options
#[derive(Debug, Clone)]
pub struct DiscordOptions {
    pub webhook: DiscordWebhook,
    pub api_base: String,
}

/// Lifecycle options
#[derive(Debug, Clone)]
pub struct LifecycleOptions {
    /// Maximum delay for graceful shutdown
    pub max_shutdown_delay: Duration,
}

impl Default for LifecycleOptions {
    fn default() -> Self {
        Self {
            max_shutdown_delay: Duration::from_secs(30),
        }
    }
}

/// HTTP server options
#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,
}
