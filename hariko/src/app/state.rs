//! Application state management

use std::sync::Arc;

use tracing::info;

use crate::app::options::AppOptions;
use crate::deploy::helm::HelmCli;
use crate::deploy::{Deployer, EngineDeployer};
use crate::errors::RelayError;
use crate::notify::discord::DiscordNotifier;
use crate::notify::{Notifier, NullNotifier};
use crate::orchestrator::Orchestrator;
use crate::server::state::ServerState;

/// Main application state
pub struct AppState {
    /// Orchestrator shared by all requests
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    /// Initialize application state
    pub fn init(options: &AppOptions) -> Result<Self, RelayError> {
        info!("Initializing application state...");

        let notifier: Arc<dyn Notifier> = match &options.discord {
            Some(discord) => {
                info!("Discord notifications enabled (webhook {})", discord.webhook.id);
                Arc::new(DiscordNotifier::new(
                    &discord.api_base,
                    discord.webhook.clone(),
                )?)
            }
            None => {
                info!("Discord notifications disabled");
                Arc::new(NullNotifier)
            }
        };

        let deployer: Arc<dyn Deployer> =
            Arc::new(EngineDeployer::new(HelmCli::new(options.helm.clone())));

        let orchestrator = Arc::new(Orchestrator::new(
            options.filter.clone(),
            options.request.clone(),
            notifier,
            deployer,
        ));

        Ok(Self { orchestrator })
    }

    /// State handed to the HTTP server
    pub fn server_state(&self, options: &AppOptions) -> ServerState {
        ServerState::new(self.orchestrator.clone(), options.webhook_secret.clone())
    }
}
