//! Request records handed to the image module

use isulimg_shared::errors::{IsulimgError, IsulimgResult};
use serde::{Deserialize, Serialize};

/// Configuration for one image module initialization call.
///
/// Serializes to the daemon.json keys libisula_libutils parses, so the native
/// backend can hand it across the FFI boundary as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Root directory of image and container storage
    pub graph: String,

    /// Runtime state directory
    pub state: String,

    /// Storage driver name (e.g. "overlay2")
    #[serde(rename = "storage-driver")]
    pub storage_driver: String,

    /// Driver options, in the order the driver applies them.
    /// Absent entries are kept so the count seen by the module is unchanged.
    /// The native backend cannot pass them through and refuses such configs.
    #[serde(rename = "storage-opts")]
    pub storage_opts: Vec<Option<String>>,

    /// Verify image layers while initializing
    #[serde(rename = "image-layer-check")]
    pub image_layer_check: bool,
}

impl ModuleConfig {
    /// Build a configuration from caller-supplied primitives.
    ///
    /// Graph, state and driver are required. Every string is copied, so the
    /// record shares nothing with the caller's buffers. `check` is true only
    /// when it equals 1.
    pub fn from_raw(
        graph: Option<&str>,
        state: Option<&str>,
        driver: Option<&str>,
        opts: &[Option<&str>],
        check: i32,
    ) -> IsulimgResult<Self> {
        let (Some(graph), Some(state), Some(driver)) = (graph, state, driver) else {
            return Err(IsulimgError::InvalidArgument(format!(
                "graph, state and storage driver are required (graph: {}, state: {}, driver: {})",
                graph.is_some(),
                state.is_some(),
                driver.is_some()
            )));
        };

        Ok(Self {
            graph: graph.to_owned(),
            state: state.to_owned(),
            storage_driver: driver.to_owned(),
            storage_opts: opts.iter().map(|opt| opt.map(str::to_owned)).collect(),
            image_layer_check: check == 1,
        })
    }
}

/// One-shot request for preparing a container rootfs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareRequest {
    pub image_type: String,
    pub container_id: String,
    pub image_name: String,
}

impl PrepareRequest {
    /// Build a request, or None if any of the three strings is absent.
    pub fn from_raw(
        image_type: Option<&str>,
        container_id: Option<&str>,
        image_name: Option<&str>,
    ) -> Option<Self> {
        Some(Self {
            image_type: image_type?.to_owned(),
            container_id: container_id?.to_owned(),
            image_name: image_name?.to_owned(),
        })
    }
}

/// Operations on an already prepared container rootfs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootfsOperation {
    Remove,
    Mount,
    Umount,
}

impl std::fmt::Display for RootfsOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RootfsOperation::Remove => "remove",
            RootfsOperation::Mount => "mount",
            RootfsOperation::Umount => "umount",
        };
        f.write_str(name)
    }
}
