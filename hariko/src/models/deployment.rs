//! Deployment models

/// The package to deploy and where to fetch it from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    /// Chart name inside the package source
    pub package_name: String,

    /// Local name the package source is registered under
    pub source_name: String,

    /// URL of the package source
    pub source_url: String,
}

/// A release as reported by the upgrade engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub name: String,
    pub namespace: String,
    pub revision: u64,
}

/// Diagnostic output accumulated across deployment steps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedLog {
    buf: String,
}

impl CapturedLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append output, terminating it with a newline
    pub fn append(&mut self, output: &str) {
        if output.is_empty() {
            return;
        }
        self.buf.push_str(output);
        if !output.ends_with('\n') {
            self.buf.push('\n');
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

/// Result of one deployment attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentOutcome {
    Succeeded { release: Release, log: CapturedLog },
    Failed { error: String, log: CapturedLog },
}

impl DeploymentOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DeploymentOutcome::Succeeded { .. })
    }

    pub fn log(&self) -> &CapturedLog {
        match self {
            DeploymentOutcome::Succeeded { log, .. } => log,
            DeploymentOutcome::Failed { log, .. } => log,
        }
    }
}
