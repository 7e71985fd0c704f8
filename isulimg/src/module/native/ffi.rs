//! Calls into libisulad_img.
//!
//! Strings are copied into `CString`s owned by guards that live for one call.
//! Memory the library hands back is copied and freed before returning. No
//! `unsafe` block exists outside this file.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr::{self, NonNull};

use isulimg_shared::constants::status;
use isulimg_shared::errors::{IsulimgError, IsulimgResult};
use libisulad_img_sys::{
    free_isulad_daemon_configs, im_mount_container_rootfs, im_prepare_container_rootfs,
    im_prepare_request, im_remove_container_rootfs, im_umount_container_rootfs,
    image_module_init, isulad_daemon_configs, isulad_daemon_configs_parse_data, parser_context,
    parser_error,
};

use crate::module::{ModuleConfig, PrepareRequest};

/// Copy a malloc'd C string byte for byte and free it.
///
/// Returns None for NULL.
///
/// # Safety
/// `raw` must be NULL or a NUL-terminated string allocated with malloc that
/// nothing else frees.
unsafe fn take_c_bytes(raw: *mut c_char) -> Option<Vec<u8>> {
    if raw.is_null() {
        return None;
    }

    let value = unsafe { CStr::from_ptr(raw) }.to_bytes().to_vec();

    // Allocated by the C side with malloc
    unsafe { libc::free(raw.cast()) };

    Some(value)
}

/// Turn the status and out slot of `im_prepare_container_rootfs` into a result.
///
/// The slot is freed on every path. A zero status without a path fails with
/// that status; a path that is not UTF-8 fails with `INVALID_ARGUMENT`
/// rather than being altered.
///
/// # Safety
/// Same contract as [`take_c_bytes`] for `out`.
unsafe fn rootfs_from_out_slot(ret: i32, out: *mut c_char) -> Result<String, i32> {
    let rootfs = unsafe { take_c_bytes(out) };

    if ret != status::SUCCESS {
        return Err(ret);
    }

    let Some(bytes) = rootfs else {
        tracing::warn!("im_prepare_container_rootfs succeeded without a rootfs path");
        return Err(ret);
    };

    String::from_utf8(bytes).map_err(|e| {
        tracing::error!(
            path = ?e.as_bytes(),
            "im_prepare_container_rootfs returned a rootfs path that is not UTF-8"
        );
        status::INVALID_ARGUMENT
    })
}

/// Daemon config owned by libisula_libutils, freed on drop.
struct DaemonConfigs {
    ptr: NonNull<isulad_daemon_configs>,
}

impl DaemonConfigs {
    /// Parse a daemon.json document with the library's own parser.
    fn parse(json: &CStr) -> IsulimgResult<Self> {
        let ctx = parser_context {
            options: 0,
            errfile: ptr::null_mut(),
        };
        let mut err: parser_error = ptr::null_mut();

        let raw = unsafe { isulad_daemon_configs_parse_data(json.as_ptr(), &ctx, &mut err) };
        let message =
            unsafe { take_c_bytes(err) }.map(|m| String::from_utf8_lossy(&m).into_owned());

        match NonNull::new(raw) {
            Some(ptr) => Ok(Self { ptr }),
            None => Err(IsulimgError::Config(format!(
                "libisula_libutils rejected daemon config: {}",
                message.unwrap_or_else(|| "unknown error".to_string())
            ))),
        }
    }

    fn as_ptr(&self) -> *const isulad_daemon_configs {
        self.ptr.as_ptr()
    }
}

impl Drop for DaemonConfigs {
    fn drop(&mut self) {
        unsafe { free_isulad_daemon_configs(self.ptr.as_ptr()) };
    }
}

/// C view of a [`PrepareRequest`]. The strings live as long as this value.
struct CPrepareRequest {
    image_type: CString,
    container_id: CString,
    image_name: CString,
}

impl CPrepareRequest {
    fn new(request: &PrepareRequest) -> IsulimgResult<Self> {
        Ok(Self {
            image_type: to_c_string("image type", &request.image_type)?,
            container_id: to_c_string("container id", &request.container_id)?,
            image_name: to_c_string("image name", &request.image_name)?,
        })
    }

    /// Borrowing view; the library reads the strings and never frees them.
    fn as_raw(&self) -> im_prepare_request {
        im_prepare_request {
            image_name: self.image_name.as_ptr().cast_mut(),
            container_id: self.container_id.as_ptr().cast_mut(),
            rootfs: ptr::null_mut(),
            image_type: self.image_type.as_ptr().cast_mut(),
            mount_label: ptr::null_mut(),
            storage_opt: ptr::null_mut(),
        }
    }
}

fn to_c_string(what: &str, value: &str) -> IsulimgResult<CString> {
    CString::new(value)
        .map_err(|e| IsulimgError::InvalidArgument(format!("invalid {}: {}", what, e)))
}

/// Render a module config as the daemon.json document libisula_libutils parses.
///
/// The library's string-array parser turns a JSON null into an empty string,
/// so a config with an absent storage option is refused instead of being
/// handed over altered.
fn daemon_config_json(config: &ModuleConfig) -> IsulimgResult<CString> {
    if let Some(index) = config.storage_opts.iter().position(Option::is_none) {
        return Err(IsulimgError::InvalidArgument(format!(
            "storage option {} is absent, libisulad_img cannot receive it",
            index
        )));
    }

    let json = serde_json::to_string(config)?;
    to_c_string("daemon config", &json)
}

/// Initialize the image module.
///
/// The config crosses the boundary as daemon.json and is parsed by the
/// library into its own struct, which is freed once the call returns.
pub fn module_init(config: &ModuleConfig) -> i32 {
    let configs = match daemon_config_json(config).and_then(|json| DaemonConfigs::parse(&json)) {
        Ok(configs) => configs,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build image module config");
            return status::INVALID_ARGUMENT;
        }
    };

    let ret = unsafe { image_module_init(configs.as_ptr()) };

    tracing::debug!(ret, "image_module_init returned");

    ret
}

/// Prepare a container rootfs.
///
/// # Returns
/// The rootfs path, or the status reported by the library. A zero status
/// without a path is a failure carrying that status.
pub fn prepare_container_rootfs(request: &PrepareRequest) -> Result<String, i32> {
    let c_request = match CPrepareRequest::new(request) {
        Ok(c_request) => c_request,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build prepare request");
            return Err(status::INVALID_ARGUMENT);
        }
    };
    let raw = c_request.as_raw();

    let mut real_rootfs: *mut c_char = ptr::null_mut();
    let ret = unsafe { im_prepare_container_rootfs(&raw, &mut real_rootfs) };

    // The library may fill the slot before failing
    let result = unsafe { rootfs_from_out_slot(ret, real_rootfs) };
    if let Err(ret) = result {
        tracing::debug!(ret, container_id = %request.container_id, "Prepare rootfs failed");
    }
    result
}

pub fn remove_container_rootfs(image_type: &str, container_id: &str) -> i32 {
    let args = to_c_string("image type", image_type)
        .and_then(|t| Ok((t, to_c_string("container id", container_id)?)));

    match args {
        Ok((c_type, c_id)) => unsafe { im_remove_container_rootfs(c_type.as_ptr(), c_id.as_ptr()) },
        Err(e) => {
            tracing::error!(error = %e, "Failed to build remove rootfs arguments");
            status::INVALID_ARGUMENT
        }
    }
}

/// Mount (`mount == true`) or unmount a container rootfs.
pub fn toggle_container_rootfs(
    mount: bool,
    image_type: &str,
    image_name: &str,
    container_id: &str,
) -> i32 {
    let args = (|| {
        Ok::<_, IsulimgError>((
            to_c_string("image type", image_type)?,
            to_c_string("image name", image_name)?,
            to_c_string("container id", container_id)?,
        ))
    })();

    let (c_type, c_name, c_id) = match args {
        Ok(args) => args,
        Err(e) => {
            tracing::error!(error = %e, mount, "Failed to build rootfs mount arguments");
            return status::INVALID_ARGUMENT;
        }
    };

    if mount {
        unsafe { im_mount_container_rootfs(c_type.as_ptr(), c_name.as_ptr(), c_id.as_ptr()) }
    } else {
        unsafe { im_umount_container_rootfs(c_type.as_ptr(), c_name.as_ptr(), c_id.as_ptr()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn malloc_c_string(bytes: &[u8]) -> *mut c_char {
        let owned = CString::new(bytes).unwrap();
        unsafe { libc::strdup(owned.as_ptr()) }
    }

    #[test]
    fn test_take_c_bytes_null() {
        assert_eq!(unsafe { take_c_bytes(ptr::null_mut()) }, None);
    }

    #[test]
    fn test_take_c_bytes_keeps_non_utf8_bytes() {
        let raw = malloc_c_string(b"/var/lib/isulad/\xff\xfe/merged");
        assert_eq!(
            unsafe { take_c_bytes(raw) }.as_deref(),
            Some(&b"/var/lib/isulad/\xff\xfe/merged"[..])
        );
    }

    #[test]
    fn test_out_slot_success() {
        let raw = malloc_c_string(b"/var/lib/isulad/overlay/c1/merged");
        assert_eq!(
            unsafe { rootfs_from_out_slot(status::SUCCESS, raw) },
            Ok("/var/lib/isulad/overlay/c1/merged".to_string())
        );
    }

    #[test]
    fn test_out_slot_failure_with_filled_slot() {
        let raw = malloc_c_string(b"/var/lib/isulad/overlay/c1/merged");
        assert_eq!(unsafe { rootfs_from_out_slot(5, raw) }, Err(5));
    }

    #[test]
    fn test_out_slot_failure_with_null_slot() {
        assert_eq!(unsafe { rootfs_from_out_slot(-3, ptr::null_mut()) }, Err(-3));
    }

    #[test]
    fn test_out_slot_success_without_path_fails() {
        assert_eq!(
            unsafe { rootfs_from_out_slot(status::SUCCESS, ptr::null_mut()) },
            Err(status::SUCCESS)
        );
    }

    #[test]
    fn test_out_slot_non_utf8_path_is_not_altered() {
        let raw = malloc_c_string(b"/var/lib/isulad/\xff\xfe/merged");
        assert_eq!(
            unsafe { rootfs_from_out_slot(status::SUCCESS, raw) },
            Err(status::INVALID_ARGUMENT)
        );
    }

    #[test]
    fn test_daemon_config_json_keeps_option_order() {
        let config = ModuleConfig::from_raw(
            Some("/var/lib/isulad"),
            Some("/var/run/isulad"),
            Some("overlay2"),
            &[Some("overlay2.size=10G"), Some("overlay2.override_kernel_check=true")],
            1,
        )
        .unwrap();

        let json = daemon_config_json(&config).unwrap();
        let value: serde_json::Value = serde_json::from_slice(json.as_bytes()).unwrap();
        assert_eq!(
            value["storage-opts"],
            serde_json::json!(["overlay2.size=10G", "overlay2.override_kernel_check=true"])
        );
        assert_eq!(value["image-layer-check"], serde_json::json!(true));
    }

    #[test]
    fn test_absent_storage_opt_is_invalid_argument() {
        let config = ModuleConfig::from_raw(
            Some("/var/lib/isulad"),
            Some("/var/run/isulad"),
            Some("overlay2"),
            &[Some("overlay2.size=10G"), None],
            0,
        )
        .unwrap();

        let err = daemon_config_json(&config).unwrap_err();
        assert!(err.to_string().contains("storage option 1 is absent"));
        assert_eq!(module_init(&config), status::INVALID_ARGUMENT);
    }

    #[test]
    fn test_c_request_points_at_owned_strings() {
        let request = PrepareRequest::from_raw(Some("oci"), Some("c1"), Some("busybox")).unwrap();
        let c_request = CPrepareRequest::new(&request).unwrap();
        let raw = c_request.as_raw();

        assert_eq!(unsafe { CStr::from_ptr(raw.image_type) }, c"oci");
        assert_eq!(unsafe { CStr::from_ptr(raw.container_id) }, c"c1");
        assert_eq!(unsafe { CStr::from_ptr(raw.image_name) }, c"busybox");
        assert!(raw.rootfs.is_null());
        assert!(raw.storage_opt.is_null());
    }

    #[test]
    fn test_interior_nul_is_invalid_argument() {
        let request = PrepareRequest::from_raw(Some("oci"), Some("c\01"), Some("busybox")).unwrap();
        assert_eq!(prepare_container_rootfs(&request), Err(status::INVALID_ARGUMENT));
    }

    #[test]
    #[ignore] // Requires libisulad_img and a writable iSulad graph
    fn test_ffi_module_init() {
        let config = ModuleConfig::from_raw(
            Some("/var/lib/isulad"),
            Some("/var/run/isulad"),
            Some("overlay2"),
            &[],
            0,
        )
        .unwrap();
        assert_eq!(module_init(&config), status::SUCCESS);
    }
}
