//! Database connection configuration.

use serde::{Deserialize, Serialize};

fn default_url() -> String {
    "pravartak.db".to_string()
}

const fn default_busy_timeout_ms() -> u64 {
    5000
}

/// Where the relational store lives and how to reach it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Local file path, `:memory:`, or a remote `libsql://` / `https://` URL.
    ///
    /// SQLAlchemy-style `sqlite:///path` values are accepted and stripped.
    #[serde(default = "default_url")]
    pub url: String,

    /// Auth token for remote databases.
    #[serde(default)]
    pub auth_token: String,

    /// How long a connection waits on a locked database before failing.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            auth_token: String::new(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl DatabaseConfig {
    /// Whether the URL points at a remote libSQL server.
    pub fn is_remote(&self) -> bool {
        ["libsql://", "http://", "https://"]
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
    }

    /// Local path with any `sqlite:` / `file:` scheme removed.
    pub fn local_path(&self) -> &str {
        ["sqlite:///", "sqlite://", "file:"]
            .iter()
            .find_map(|prefix| self.url.strip_prefix(prefix))
            .unwrap_or(&self.url)
    }
}
