//! Low-level FFI bindings to libisulad_img
//!
//! This crate provides raw, unsafe bindings to the iSulad image module and
//! the libisula_libutils parser it consumes its daemon config through.
//! For a safe, idiomatic Rust API, use the higher-level wrapper in the
//! isulimg crate.

#![allow(non_camel_case_types)]

use std::os::raw::{c_char, c_int, c_uint, c_void};

/// Daemon configuration generated by libisula_libutils from daemon.json.
///
/// Opaque on the Rust side: it is only ever created by
/// [`isulad_daemon_configs_parse_data`] and released by
/// [`free_isulad_daemon_configs`].
#[repr(C)]
pub struct isulad_daemon_configs {
    _private: [u8; 0],
}

/// Parser options handed to the generated JSON parsers.
#[repr(C)]
pub struct parser_context {
    pub options: c_uint,
    pub errfile: *mut libc::FILE,
}

/// Error string allocated by the parser with malloc; release with `libc::free`.
pub type parser_error = *mut c_char;

/// Request accepted by `im_prepare_container_rootfs`.
///
/// Fields the layer does not set stay NULL.
#[repr(C)]
pub struct im_prepare_request {
    pub image_name: *mut c_char,
    pub container_id: *mut c_char,
    pub rootfs: *mut c_char,
    pub image_type: *mut c_char,
    pub mount_label: *mut c_char,
    pub storage_opt: *mut c_void,
}

extern "C" {
    /// Parse a daemon.json document into a daemon config
    ///
    /// # Returns
    /// Pointer to the config (free with `free_isulad_daemon_configs`), or NULL
    /// with `err` set to a malloc'd message
    pub fn isulad_daemon_configs_parse_data(
        jsondata: *const c_char,
        ctx: *const parser_context,
        err: *mut parser_error,
    ) -> *mut isulad_daemon_configs;

    /// Free a daemon config returned by `isulad_daemon_configs_parse_data`
    pub fn free_isulad_daemon_configs(ptr: *mut isulad_daemon_configs);

    /// Initialize the image module with graph, state, driver and options
    ///
    /// # Returns
    /// 0 on success, non-zero on error
    pub fn image_module_init(args: *const isulad_daemon_configs) -> c_int;

    /// Prepare the rootfs of a container
    ///
    /// # Arguments
    /// * `request` - Image type, container id and image name
    /// * `real_rootfs` - Out slot, set to a malloc'd path on success
    ///
    /// # Returns
    /// 0 on success, non-zero on error
    pub fn im_prepare_container_rootfs(
        request: *const im_prepare_request,
        real_rootfs: *mut *mut c_char,
    ) -> c_int;

    /// Remove the rootfs of a container
    pub fn im_remove_container_rootfs(
        image_type: *const c_char,
        container_id: *const c_char,
    ) -> c_int;

    /// Mount the rootfs of a container
    pub fn im_mount_container_rootfs(
        image_type: *const c_char,
        image_name: *const c_char,
        container_id: *const c_char,
    ) -> c_int;

    /// Unmount the rootfs of a container
    pub fn im_umount_container_rootfs(
        image_type: *const c_char,
        image_name: *const c_char,
        container_id: *const c_char,
    ) -> c_int;
}
