//! Helm package engine
//!
//! Drives the `helm` executable. The process is expected to run inside the
//! target cluster or with a kubeconfig that selects it.

use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::deploy::engine::PackageEngine;
use crate::errors::RelayError;
use crate::models::deployment::{CapturedLog, Release};

/// Helm engine options
#[derive(Debug, Clone)]
pub struct HelmOptions {
    /// Path or name of the helm executable
    pub binary: String,

    /// Release to upgrade
    pub release_name: String,

    /// Target namespace, Helm's current namespace when unset
    pub namespace: Option<String>,
}

/// Release as printed by `helm upgrade --output json`
#[derive(Debug, Deserialize)]
struct HelmRelease {
    name: String,
    namespace: String,
    version: u64,
}

impl From<HelmRelease> for Release {
    fn from(release: HelmRelease) -> Self {
        Self {
            name: release.name,
            namespace: release.namespace,
            revision: release.version,
        }
    }
}

/// [`PackageEngine`] backed by the helm CLI
pub struct HelmCli {
    options: HelmOptions,
}

impl HelmCli {
    pub fn new(options: HelmOptions) -> Self {
        Self { options }
    }

    /// Run helm and return its stdout.
    ///
    /// stderr always goes to `log`; stdout too unless `keep_stdout` is set,
    /// in which case the caller consumes it.
    async fn run(
        &self,
        args: &[String],
        keep_stdout: bool,
        log: &mut CapturedLog,
    ) -> Result<Vec<u8>, RelayError> {
        let step = step_name(args);
        debug!("Running {} {}", self.options.binary, args.join(" "));

        let output = Command::new(&self.options.binary)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                RelayError::DeployError(format!(
                    "Failed to run {} {}: {}",
                    self.options.binary, step, e
                ))
            })?;

        if !keep_stdout {
            log.append(&String::from_utf8_lossy(&output.stdout));
        }
        log.append(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(RelayError::DeployError(format!(
                "helm {} exited with {}",
                step, output.status
            )));
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl PackageEngine for HelmCli {
    async fn add_source(
        &self,
        name: &str,
        url: &str,
        log: &mut CapturedLog,
    ) -> Result<(), RelayError> {
        self.run(&repo_add_args(name, url), false, log).await?;
        Ok(())
    }

    async fn refresh_index(&self, name: &str, log: &mut CapturedLog) -> Result<(), RelayError> {
        self.run(&repo_update_args(name), false, log).await?;
        Ok(())
    }

    async fn upgrade_install(
        &self,
        source_name: &str,
        package_name: &str,
        log: &mut CapturedLog,
    ) -> Result<Release, RelayError> {
        let args = upgrade_args(
            &self.options.release_name,
            &format!("{}/{}", source_name, package_name),
            self.options.namespace.as_deref(),
        );
        let stdout = self.run(&args, true, log).await?;
        parse_release(&stdout)
    }
}

/// `helm repo add`, replacing an existing entry of the same name
pub fn repo_add_args(name: &str, url: &str) -> Vec<String> {
    to_args(&["repo", "add", "--force-update", name, url])
}

/// `helm repo update` restricted to one repository
pub fn repo_update_args(name: &str) -> Vec<String> {
    to_args(&["repo", "update", name])
}

/// `helm upgrade --install` printing the resulting release as JSON
pub fn upgrade_args(release: &str, chart: &str, namespace: Option<&str>) -> Vec<String> {
    let mut args = to_args(&["upgrade", "--install", release, chart]);
    if let Some(namespace) = namespace {
        args.extend(to_args(&["--namespace", namespace]));
    }
    args.extend(to_args(&["--output", "json", "--debug"]));
    args
}

/// Parse the release printed by `helm upgrade --output json`
pub fn parse_release(stdout: &[u8]) -> Result<Release, RelayError> {
    let release: HelmRelease = serde_json::from_slice(stdout).map_err(|e| {
        RelayError::DeployError(format!("Unable to parse helm release output: {}", e))
    })?;
    Ok(release.into())
}

fn step_name(args: &[String]) -> String {
    match args {
        [group, command, ..] if group == "repo" => format!("repo {}", command),
        [command, ..] => command.clone(),
        [] => String::new(),
    }
}

fn to_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_args() {
        assert_eq!(
            repo_add_args("charts", "https://charts.example.com"),
            vec!["repo", "add", "--force-update", "charts", "https://charts.example.com"]
        );
        assert_eq!(repo_update_args("charts"), vec!["repo", "update", "charts"]);
    }

    #[test]
    fn test_upgrade_args_with_namespace() {
        assert_eq!(
            upgrade_args("charts", "charts/app", Some("apps")),
            vec![
                "upgrade", "--install", "charts", "charts/app", "--namespace", "apps", "--output",
                "json", "--debug"
            ]
        );
    }

    #[test]
    fn test_upgrade_args_without_namespace() {
        let args = upgrade_args("charts", "charts/app", None);
        assert!(!args.iter().any(|a| a == "--namespace"));
    }

    #[test]
    fn test_parse_release() {
        let stdout = br#"{
            "name": "charts",
            "info": { "status": "deployed", "notes": "" },
            "manifest": "---\n",
            "version": 4,
            "namespace": "apps"
        }"#;

        let release = parse_release(stdout).unwrap();
        assert_eq!(
            release,
            Release {
                name: "charts".to_string(),
                namespace: "apps".to_string(),
                revision: 4,
            }
        );
    }

    #[test]
    fn test_parse_release_rejects_garbage() {
        assert!(matches!(
            parse_release(b"Release \"charts\" has been upgraded."),
            Err(RelayError::DeployError(_))
        ));
    }

    #[test]
    fn test_step_name() {
        assert_eq!(step_name(&repo_update_args("charts")), "repo update");
        assert_eq!(step_name(&upgrade_args("a", "b/c", None)), "upgrade");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_missing_binary_is_step_failure() {
        let helm = HelmCli::new(HelmOptions {
            binary: "/nonexistent/helm".to_string(),
            release_name: "charts".to_string(),
            namespace: None,
        });
        let mut log = CapturedLog::new();

        let err = helm
            .add_source("charts", "https://charts.example.com", &mut log)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to run /nonexistent/helm repo add"));
        assert!(log.is_empty());
    }
}
