//! CLI definition and argument parsing for isulimg-cli.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use isulimg::{DaemonConfig, RootfsDriver};

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "isulimg",
    author,
    version,
    about = "Prepare and manage container rootfs through the iSulad image module"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prepare the rootfs of a container and print its path
    Prepare(crate::commands::prepare::PrepareArgs),

    /// Mount the rootfs of a container
    Mount(crate::commands::mount::MountArgs),

    /// Unmount the rootfs of a container
    Umount(crate::commands::mount::MountArgs),

    /// Remove the rootfs of one or more containers
    #[command(visible_alias = "remove")]
    Rm(crate::commands::rm::RmArgs),
}

// ============================================================================
// GLOBAL FLAGS
// ============================================================================

#[derive(Args, Debug, Clone)]
pub struct GlobalFlags {
    /// iSulad daemon configuration file
    #[arg(
        long,
        global = true,
        env = "ISULAD_CONFIG_FILE",
        default_value = isulimg::constants::daemon::CONFIG_FILE
    )]
    pub isulad_config_file: PathBuf,

    /// Logging level: debug, info, warn, error
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

impl GlobalFlags {
    /// Load the daemon config and initialize the image module from it.
    pub fn create_driver(&self) -> anyhow::Result<RootfsDriver> {
        let config = DaemonConfig::load(&self.isulad_config_file)?;
        RootfsDriver::init_from_factory(config).map_err(Into::into)
    }
}
