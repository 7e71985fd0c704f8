//! Image module abstraction.
//!
//! The iSulad image module owns image storage, layer management and rootfs
//! assembly. This layer only marshals arguments into request records and
//! forwards them through the [`ImageModule`] trait, so the real library can be
//! swapped for a stub in tests.
//!
//! ## Module Structure
//!
//! - `config` - `ModuleConfig`, `PrepareRequest` and `RootfsOperation` records
//! - `ops` - Builders that validate inputs, build a record and make one call
//! - `native` - `NativeImageModule`, backed by libisulad-img-sys (feature `native`)

mod config;
mod ops;

#[cfg(feature = "native")]
pub mod native;

use isulimg_shared::errors::IsulimgResult;
use std::sync::Arc;

pub use config::{ModuleConfig, PrepareRequest, RootfsOperation};
pub use ops::{init_image_module, prepare_rootfs, switch_operation};

#[cfg(feature = "native")]
pub use native::NativeImageModule;

/// Entry points of the image module.
///
/// Statuses are passed through unchanged: 0 is success, anything else is a
/// failure code defined by the implementation.
pub trait ImageModule: Send + Sync + std::fmt::Debug {
    /// Initialize the module with storage paths, driver and options.
    fn module_init(&self, config: &ModuleConfig) -> i32;

    /// Prepare a container rootfs, returning its path or the failure status.
    fn prepare_container_rootfs(&self, request: &PrepareRequest) -> Result<String, i32>;

    fn remove_container_rootfs(&self, image_type: &str, container_id: &str) -> i32;

    fn mount_container_rootfs(
        &self,
        image_type: &str,
        image_name: &str,
        container_id: &str,
    ) -> i32;

    fn umount_container_rootfs(
        &self,
        image_type: &str,
        image_name: &str,
        container_id: &str,
    ) -> i32;

    /// Get a human-readable name for this module.
    fn name(&self) -> &'static str;
}

/// Factory for the image module this build can talk to.
pub struct ImageModuleFactory;

impl ImageModuleFactory {
    /// Create the image module backend.
    ///
    /// Returns the libisulad_img backend when built with the `native`
    /// feature, and `Unsupported` otherwise.
    pub fn create() -> IsulimgResult<Arc<dyn ImageModule>> {
        #[cfg(feature = "native")]
        {
            tracing::info!("Using native libisulad_img image module");
            Ok(Arc::new(NativeImageModule::new()))
        }

        #[cfg(not(feature = "native"))]
        {
            Err(isulimg_shared::IsulimgError::Unsupported(
                "isulimg was built without the `native` feature, libisulad_img is not linked"
                    .to_string(),
            ))
        }
    }
}
