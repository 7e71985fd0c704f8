//! isulimg - safe marshalling layer over the iSulad image module
//!
//! Converts plain arguments into the request records libisulad_img consumes,
//! makes a single call and hands the status or rootfs path back. Image
//! storage, layers and rootfs assembly all stay inside the image module.
//!
//! - [`module`] - `ImageModule` trait, request records, forwarding builders
//! - [`config`] - iSulad daemon.json loading and validation
//! - [`rootfs`] - `RootfsDriver` facade with error context and logging
//! - [`util`] - tracing setup

pub mod config;
pub mod module;
pub mod rootfs;
pub mod util;

pub use config::DaemonConfig;
pub use isulimg_shared::constants;
pub use isulimg_shared::errors::{IsulimgError, IsulimgResult};
pub use module::{
    ImageModule, ImageModuleFactory, ModuleConfig, PrepareRequest, RootfsOperation,
    init_image_module, prepare_rootfs, switch_operation,
};
pub use rootfs::RootfsDriver;
