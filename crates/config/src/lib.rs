use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "tecchat.toml",
    "config/tecchat.toml",
    "crates/config/tecchat.toml",
    "../tecchat.toml",
    "../config/tecchat.toml",
    "../crates/config/tecchat.toml",
];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub push: PushConfig,
    pub cleanup: CleanupConfig,
}

/// Identity of the document store this backend reads chat records from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub project_id: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            project_id: "tecchat".to_string(),
        }
    }
}

/// Push delivery provider identity plus the Android delivery hints that
/// accompany every multicast.
///
/// ```
/// use tecchat_config::PushConfig;
///
/// let push = PushConfig::default();
/// assert_eq!(push.channel_id, "tecchat_messages_channel");
/// assert!(push.credentials_path.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushConfig {
    #[serde(default)]
    pub credentials_path: Option<String>,
    #[serde(default = "PushConfig::default_channel_id")]
    pub channel_id: String,
}

impl PushConfig {
    fn default_channel_id() -> String {
        "tecchat_messages_channel".to_string()
    }
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            credentials_path: None,
            channel_id: Self::default_channel_id(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupConfig {
    /// Upper bound on tokens per array-membership query against the store.
    /// Invalid-token batches larger than this are chunked by the cleanup
    /// service before querying.
    #[serde(default = "CleanupConfig::default_query_chunk")]
    pub query_chunk: usize,
}

impl CleanupConfig {
    const fn default_query_chunk() -> usize {
        10
    }
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            query_chunk: Self::default_query_chunk(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use tecchat_config::load;
///
/// std::env::remove_var("TECCHAT_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.store.project_id.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let chunk = i64::try_from(defaults.cleanup.query_chunk).unwrap_or(i64::MAX);

    let mut builder = config::Config::builder();
    builder = builder
        .set_default("store.project_id", defaults.store.project_id.clone())
        .unwrap()
        .set_default("push.channel_id", defaults.push.channel_id.clone())
        .unwrap()
        .set_default("cleanup.query_chunk", chunk)
        .unwrap();

    let environment_overrides = config::Environment::with_prefix("TECCHAT").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("TECCHAT_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via TECCHAT_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    debug!(?config, "loaded notification backend configuration");
    Ok(config)
}
