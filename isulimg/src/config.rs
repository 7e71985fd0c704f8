//! iSulad daemon configuration.
//!
//! Only the fields the image module and the rootfs driver care about are
//! read from daemon.json; everything else in the file is ignored.

use std::fs;
use std::path::Path;

use isulimg_shared::constants::{daemon, drivers};
use isulimg_shared::errors::{IsulimgError, IsulimgResult};
use serde::{Deserialize, Serialize};

/// daemon.json larger than this is refused
const MAX_CONFIG_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Subset of the iSulad daemon config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    pub graph: String,

    pub state: String,

    #[serde(rename = "default-runtime")]
    pub runtime: String,

    #[serde(rename = "log-level")]
    pub log_level: String,

    #[serde(rename = "log-driver")]
    pub log_driver: String,

    #[serde(rename = "storage-driver")]
    pub storage_driver: String,

    #[serde(rename = "storage-opts")]
    pub storage_opts: Vec<String>,

    #[serde(rename = "image-layer-check")]
    pub image_layer_check: bool,
}

impl DaemonConfig {
    /// Load daemon.json from `path`.
    ///
    /// The path must be a regular file no larger than 10 MiB.
    pub fn load(path: &Path) -> IsulimgResult<Self> {
        check_file_valid(path)?;

        let content = fs::read_to_string(path).map_err(|e| {
            IsulimgError::Config(format!("read daemon config {} failed: {}", path.display(), e))
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Failed to parse daemon config");
            IsulimgError::Config(format!(
                "unmarshal daemon config {} failed: {}",
                path.display(),
                e
            ))
        })?;

        tracing::debug!(?config, "Loaded iSulad daemon config");

        Ok(config)
    }

    /// Fill empty graph, state, runtime and storage driver with iSulad's defaults.
    pub fn with_defaults(mut self) -> Self {
        fn or_default(value: &mut String, default: &str) {
            if value.is_empty() {
                *value = default.to_string();
            }
        }

        or_default(&mut self.graph, daemon::GRAPH_PATH);
        or_default(&mut self.state, daemon::STATE_PATH);
        or_default(&mut self.runtime, daemon::RUNTIME);
        or_default(&mut self.storage_driver, daemon::STORAGE_DRIVER);
        self
    }

    /// Check runtime and storage driver are ones this layer supports.
    pub fn validate(&self) -> IsulimgResult<()> {
        if self.runtime != daemon::RUNTIME {
            return Err(IsulimgError::Config(format!(
                "not support runtime: {}",
                self.runtime
            )));
        }

        match self.storage_driver.as_str() {
            drivers::OVERLAY2 | drivers::DEVICEMAPPER => Ok(()),
            other => Err(IsulimgError::Config(format!(
                "not support storage driver: {}",
                other
            ))),
        }
    }
}

fn check_file_valid(path: &Path) -> IsulimgResult<()> {
    let metadata = fs::metadata(path).map_err(|e| {
        IsulimgError::Config(format!("stat daemon config {} failed: {}", path.display(), e))
    })?;

    if metadata.is_dir() {
        return Err(IsulimgError::Config(format!(
            "{} should not be a directory",
            path.display()
        )));
    }

    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        return Err(IsulimgError::Config(format!(
            "size of {} is larger than 10M",
            path.display()
        )));
    }

    Ok(())
}
