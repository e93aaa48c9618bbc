//! Deployment step sequencing
//!
//! A deployment runs three steps against a [`PackageEngine`]: register the
//! package source, refresh its index, then upgrade-or-install the package.
//! The first failing step ends the sequence.

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::errors::RelayError;
use crate::models::deployment::{CapturedLog, DeploymentOutcome, DeploymentRequest, Release};

/// External engine performing the individual deployment steps.
///
/// Each step appends whatever diagnostic output it produced to `log`, also
/// when it fails.
#[async_trait]
pub trait PackageEngine: Send + Sync {
    /// Register or refresh the named package source at `url`
    async fn add_source(&self, name: &str, url: &str, log: &mut CapturedLog)
        -> Result<(), RelayError>;

    /// Refresh the local index of the named package source
    async fn refresh_index(&self, name: &str, log: &mut CapturedLog) -> Result<(), RelayError>;

    /// Upgrade the release to the latest package, installing it when absent
    async fn upgrade_install(
        &self,
        source_name: &str,
        package_name: &str,
        log: &mut CapturedLog,
    ) -> Result<Release, RelayError>;
}

/// Something that can carry out a deployment request
#[async_trait]
pub trait Deployer: Send + Sync {
    async fn deploy(&self, request: &DeploymentRequest) -> DeploymentOutcome;
}

/// Run the deployment steps for `request` against `engine`
pub async fn deploy<E: PackageEngine + ?Sized>(
    engine: &E,
    request: &DeploymentRequest,
) -> DeploymentOutcome {
    let mut log = CapturedLog::new();
    match run_steps(engine, request, &mut log).await {
        Ok(release) => {
            info!(
                "Deployed {} to {} (revision {})",
                release.name, release.namespace, release.revision
            );
            DeploymentOutcome::Succeeded { release, log }
        }
        Err(e) => {
            error!("Deployment of {} failed: {}", request.package_name, e);
            DeploymentOutcome::Failed {
                error: e.to_string(),
                log,
            }
        }
    }
}

async fn run_steps<E: PackageEngine + ?Sized>(
    engine: &E,
    request: &DeploymentRequest,
    log: &mut CapturedLog,
) -> Result<Release, RelayError> {
    debug!(
        "Adding package source {} ({})",
        request.source_name, request.source_url
    );
    engine
        .add_source(&request.source_name, &request.source_url, log)
        .await?;

    debug!("Refreshing index of {}", request.source_name);
    engine.refresh_index(&request.source_name, log).await?;

    debug!(
        "Upgrading {}/{}",
        request.source_name, request.package_name
    );
    engine
        .upgrade_install(&request.source_name, &request.package_name, log)
        .await
}

/// [`Deployer`] backed by a [`PackageEngine`]
pub struct EngineDeployer<E> {
    engine: E,
}

impl<E: PackageEngine> EngineDeployer<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}

#[async_trait]
impl<E: PackageEngine> Deployer for EngineDeployer<E> {
    async fn deploy(&self, request: &DeploymentRequest) -> DeploymentOutcome {
        deploy(&self.engine, request).await
    }
}
