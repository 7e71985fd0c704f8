//! RootfsDriver - container rootfs lifecycle on top of an initialized image module

use std::path::PathBuf;
use std::sync::Arc;

use isulimg_shared::constants::image::TYPE_OCI;
use isulimg_shared::constants::status;
use isulimg_shared::errors::{IsulimgError, IsulimgResult};

use crate::config::DaemonConfig;
use crate::module::{self, ImageModule, ImageModuleFactory, RootfsOperation};

/// Container rootfs operations backed by an initialized image module.
///
/// Construction runs the module initialization once; every method after
/// that is a single forwarding call with its status turned into a
/// `IsulimgResult`.
///
/// ## Example
///
/// ```no_run
/// use isulimg::config::DaemonConfig;
/// use isulimg::module::ImageModuleFactory;
/// use isulimg::rootfs::RootfsDriver;
///
/// let config = DaemonConfig::load("/etc/isulad/daemon.json".as_ref())?;
/// let driver = RootfsDriver::init(config, ImageModuleFactory::create()?)?;
///
/// let rootfs = driver.generate_rootfs("4f1c2a", "busybox:latest")?;
/// println!("rootfs at {}", rootfs.display());
/// # Ok::<(), isulimg::IsulimgError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RootfsDriver {
    module: Arc<dyn ImageModule>,
    config: DaemonConfig,
}

impl RootfsDriver {
    /// Initialize the image module from a daemon config.
    ///
    /// Empty fields get iSulad's defaults, then the runtime and storage
    /// driver are validated before the module is touched.
    pub fn init(config: DaemonConfig, module: Arc<dyn ImageModule>) -> IsulimgResult<Self> {
        let config = Self::checked_config(config)?;
        Self::init_module(config, module)
    }

    /// Like [`RootfsDriver::init`], with the module from [`ImageModuleFactory`].
    ///
    /// The config is checked first, so a bad daemon.json is reported even
    /// when no image module backend is built in.
    pub fn init_from_factory(config: DaemonConfig) -> IsulimgResult<Self> {
        let config = Self::checked_config(config)?;
        Self::init_module(config, ImageModuleFactory::create()?)
    }

    fn checked_config(config: DaemonConfig) -> IsulimgResult<DaemonConfig> {
        let config = config.with_defaults();

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, ?config, "Daemon config is invalid");
            return Err(e);
        }

        Ok(config)
    }

    fn init_module(config: DaemonConfig, module: Arc<dyn ImageModule>) -> IsulimgResult<Self> {
        let opts: Vec<Option<&str>> = config
            .storage_opts
            .iter()
            .map(|opt| Some(opt.as_str()))
            .collect();
        let ret = module::init_image_module(
            module.as_ref(),
            Some(config.graph.as_str()),
            Some(config.state.as_str()),
            Some(config.storage_driver.as_str()),
            &opts,
            i32::from(config.image_layer_check),
        );

        if ret != status::SUCCESS {
            tracing::error!(ret, module = module.name(), "Image module init failed");
            return Err(IsulimgError::Engine(format!(
                "init libisulad_img get ret code: {}",
                ret
            )));
        }

        tracing::info!(
            module = module.name(),
            graph = %config.graph,
            driver = %config.storage_driver,
            "Initialized image module"
        );

        Ok(Self { module, config })
    }

    /// The daemon config the module was initialized with, defaults applied.
    pub fn config(&self) -> &DaemonConfig {
        &self.config
    }

    /// Prepare the rootfs of container `id` from `image`.
    pub fn generate_rootfs(&self, id: &str, image: &str) -> IsulimgResult<PathBuf> {
        let rootfs = module::prepare_rootfs(
            self.module.as_ref(),
            Some(TYPE_OCI),
            Some(id),
            Some(image),
        )
        .filter(|path| !path.is_empty())
        .ok_or_else(|| {
            IsulimgError::Storage(format!(
                "image module returned no rootfs for container {}",
                id
            ))
        })?;

        tracing::debug!(container_id = id, rootfs = %rootfs, "Prepared container rootfs");

        Ok(PathBuf::from(rootfs))
    }

    /// Remove the rootfs of container `id`. Failures are logged, not returned.
    pub fn cleanup_rootfs(&self, id: &str) {
        let ret = module::switch_operation(self.module.as_ref(), RootfsOperation::Remove, id, "");
        if ret != status::SUCCESS {
            tracing::warn!(container_id = id, ret, "Remove container rootfs failed");
        } else {
            tracing::info!(container_id = id, "Removed container rootfs");
        }
    }

    pub fn mount_rootfs(&self, id: &str, image: &str) -> IsulimgResult<()> {
        self.run(RootfsOperation::Mount, id, image)
    }

    pub fn umount_rootfs(&self, id: &str, image: &str) -> IsulimgResult<()> {
        self.run(RootfsOperation::Umount, id, image)
    }

    fn run(&self, op: RootfsOperation, id: &str, image: &str) -> IsulimgResult<()> {
        let ret = module::switch_operation(self.module.as_ref(), op, id, image);
        if ret != status::SUCCESS {
            return Err(IsulimgError::Storage(format!(
                "{} container {}'s rootfs get ret code: {}",
                op, id, ret
            )));
        }
        Ok(())
    }
}
