//! Deployment module

pub mod engine;
pub mod fsm;
pub mod helm;

pub use engine::{deploy, Deployer, EngineDeployer, PackageEngine};
