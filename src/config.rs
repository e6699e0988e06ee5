//! Startup configuration, read once from the environment and passed to handlers.

use std::path::PathBuf;

pub const BIND_VAR: &str = "TUITION_BIND";
pub const DATA_MOUNT_VAR: &str = "TUITION_DATA_MOUNT";
pub const STATIC_DIR_VAR: &str = "TUITION_STATIC_DIR";
pub const SYNC_TOKEN_VAR: &str = "TUITION_SYNC_TOKEN";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub data_dir: PathBuf,
    pub static_dir: PathBuf,
    /// Shared secret for the sync webhook. `None` disables syncing.
    pub sync_token: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("data_dir", &self.data_dir)
            .field("static_dir", &self.static_dir)
            .field("sync_token", &self.sync_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            sync_token: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();
        AppConfig {
            bind_addr: get(BIND_VAR).unwrap_or(defaults.bind_addr),
            data_dir: get(DATA_MOUNT_VAR).map(PathBuf::from).unwrap_or(defaults.data_dir),
            static_dir: get(STATIC_DIR_VAR).map(PathBuf::from).unwrap_or(defaults.static_dir),
            sync_token: get(SYNC_TOKEN_VAR),
        }
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_sync_token(mut self, token: impl Into<String>) -> Self {
        self.sync_token = Some(token.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert!(config.sync_token.is_none());
    }

    #[test]
    fn mount_path_overrides_data_dir() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (DATA_MOUNT_VAR, "/mnt/volume"),
            (SYNC_TOKEN_VAR, " s3cret "),
            (BIND_VAR, ""),
        ]);
        let config = AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.data_dir, PathBuf::from("/mnt/volume"));
        assert_eq!(config.sync_token.as_deref(), Some("s3cret"));
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
    }

    #[test]
    fn debug_output_hides_token() {
        let config = AppConfig::default().with_sync_token("hunter2");
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
