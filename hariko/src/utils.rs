//! Utility functions

use serde::{Deserialize, Serialize};

/// Version information for hariko
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    pub git_hash: String,
    pub build_time: String,
}

/// Get version information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: option_env!("GIT_HASH").unwrap_or("unknown").to_string(),
        build_time: option_env!("BUILD_TIME").unwrap_or("unknown").to_string(),
    }
}

/// Generate a random UUID v4
pub fn generate_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Keep at most `max_chars` characters from the end of `text`.
///
/// When anything is cut, the result starts with `…` and the total length,
/// marker included, stays within `max_chars`.
pub fn truncate_head(text: &str, max_chars: usize) -> String {
    let len = text.chars().count();
    if len <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }

    let keep = max_chars - 1;
    let tail: String = text.chars().skip(len - keep).collect();
    format!("…{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        let version = version_info();
        assert_eq!(version.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_truncate_head_short_text_untouched() {
        assert_eq!(truncate_head("abc", 3), "abc");
        assert_eq!(truncate_head("", 0), "");
    }

    #[test]
    fn test_truncate_head_keeps_tail() {
        let truncated = truncate_head("0123456789", 5);
        assert_eq!(truncated, "…6789");
        assert_eq!(truncated.chars().count(), 5);
    }

    #[test]
    fn test_truncate_head_counts_chars() {
        assert_eq!(truncate_head("ééééé", 3), "…éé");
    }
}
