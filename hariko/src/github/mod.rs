//! GitHub webhook receiver

pub mod signature;
pub mod webhook;
