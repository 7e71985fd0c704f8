//! Forwarding calls into the image module.
//!
//! Each builder validates its inputs, builds a request record, makes exactly
//! one call and drops the record before returning. Statuses and absent
//! results are passed up unchanged.

use isulimg_shared::constants::{image, status};

use super::ImageModule;
use super::config::{ModuleConfig, PrepareRequest, RootfsOperation};

/// Initialize the image module from caller-supplied primitives.
///
/// # Arguments
/// * `graph`, `state`, `driver` - Required; if any is absent no call is made
/// * `opts` - Driver options, copied in order, absent entries kept
/// * `check` - Layer check flag, true only when 1
///
/// # Returns
/// The module's status, or [`status::INVALID_ARGUMENT`] if a required
/// argument is absent
pub fn init_image_module(
    module: &dyn ImageModule,
    graph: Option<&str>,
    state: Option<&str>,
    driver: Option<&str>,
    opts: &[Option<&str>],
    check: i32,
) -> i32 {
    let config = match ModuleConfig::from_raw(graph, state, driver, opts, check) {
        Ok(config) => config,
        Err(e) => {
            tracing::debug!(error = %e, "Not initializing image module");
            return status::INVALID_ARGUMENT;
        }
    };

    tracing::trace!(
        module = module.name(),
        driver = %config.storage_driver,
        opts = config.storage_opts.len(),
        layer_check = config.image_layer_check,
        "Calling image module init"
    );

    module.module_init(&config)
}

/// Prepare a container rootfs.
///
/// # Returns
/// The rootfs path on success; None if any input is absent (no call is made)
/// or the module reports a non-zero status
pub fn prepare_rootfs(
    module: &dyn ImageModule,
    image_type: Option<&str>,
    container_id: Option<&str>,
    image_name: Option<&str>,
) -> Option<String> {
    let request = PrepareRequest::from_raw(image_type, container_id, image_name)?;

    tracing::trace!(
        module = module.name(),
        container_id = %request.container_id,
        image = %request.image_name,
        "Calling image module prepare rootfs"
    );

    match module.prepare_container_rootfs(&request) {
        Ok(rootfs) => Some(rootfs),
        Err(ret) => {
            tracing::trace!(ret, container_id = %request.container_id, "Prepare rootfs failed");
            None
        }
    }
}

/// Run a remove, mount or umount operation on an OCI container rootfs.
///
/// `image_name` is ignored by `Remove`.
pub fn switch_operation(
    module: &dyn ImageModule,
    op: RootfsOperation,
    container_id: &str,
    image_name: &str,
) -> i32 {
    tracing::trace!(
        module = module.name(),
        %op,
        container_id,
        "Calling image module rootfs operation"
    );

    match op {
        RootfsOperation::Remove => module.remove_container_rootfs(image::TYPE_OCI, container_id),
        RootfsOperation::Mount => {
            module.mount_container_rootfs(image::TYPE_OCI, image_name, container_id)
        }
        RootfsOperation::Umount => {
            module.umount_container_rootfs(image::TYPE_OCI, image_name, container_id)
        }
    }
}
