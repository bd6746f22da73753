use std::path::PathBuf;

use serde::Deserialize;

/// Which catalog backend to open.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Mysql,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default = "DatabaseSettings::default_url")]
    pub url: String,
    #[serde(default = "DatabaseSettings::default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "DatabaseSettings::default_table_prefix")]
    pub table_prefix: String,
    /// JSON fixture loaded by the memory backend
    #[serde(default)]
    pub fixture_path: Option<PathBuf>,
}

impl DatabaseSettings {
    fn default_url() -> String {
        "mysql://root@127.0.0.1:3306/wordpress".to_string()
    }

    fn default_max_connections() -> u32 {
        5
    }

    fn default_table_prefix() -> String {
        "wp_".to_string()
    }

    /// Settings for the memory backend reading `path`.
    pub fn memory(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: Backend::Memory,
            fixture_path: Some(path.into()),
            ..Self::default()
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            url: Self::default_url(),
            max_connections: Self::default_max_connections(),
            table_prefix: Self::default_table_prefix(),
            fixture_path: None,
        }
    }
}
