//! Discord webhook models

pub mod models;

/// Maximum length of an embed description accepted by Discord
pub const EMBED_DESCRIPTION_LIMIT: usize = 4096;

/// Default Discord API base URL
pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";
