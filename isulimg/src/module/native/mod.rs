//! libisulad_img backend
//!
//! Forwards every [`ImageModule`] call to the iSulad image module through
//! libisulad-img-sys. The library keeps global state of its own; this type
//! holds none.

mod ffi;

use crate::module::{ImageModule, ModuleConfig, PrepareRequest};

/// Image module backed by the installed libisulad_img.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeImageModule;

impl NativeImageModule {
    pub fn new() -> Self {
        Self
    }
}

impl ImageModule for NativeImageModule {
    fn module_init(&self, config: &ModuleConfig) -> i32 {
        ffi::module_init(config)
    }

    fn prepare_container_rootfs(&self, request: &PrepareRequest) -> Result<String, i32> {
        ffi::prepare_container_rootfs(request)
    }

    fn remove_container_rootfs(&self, image_type: &str, container_id: &str) -> i32 {
        ffi::remove_container_rootfs(image_type, container_id)
    }

    fn mount_container_rootfs(
        &self,
        image_type: &str,
        image_name: &str,
        container_id: &str,
    ) -> i32 {
        ffi::toggle_container_rootfs(true, image_type, image_name, container_id)
    }

    fn umount_container_rootfs(
        &self,
        image_type: &str,
        image_name: &str,
        container_id: &str,
    ) -> i32 {
        ffi::toggle_container_rootfs(false, image_type, image_name, container_id)
    }

    fn name(&self) -> &'static str {
        "libisulad_img"
    }
}
