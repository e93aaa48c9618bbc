//! Hariko Library
//!
//! Receives GitHub `workflow_job` deliveries, upgrades a Helm release when the
//! configured job succeeds, and reports progress to a Discord channel.

pub mod app;
pub mod deploy;
pub mod errors;
pub mod filter;
pub mod github;
pub mod http;
pub mod logs;
pub mod models;
pub mod notify;
pub mod orchestrator;
pub mod server;
pub mod utils;
