#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;
use std::time::Duration;

/// Command for the isulimg binary pointed at `config_file`.
pub fn isulimg(config_file: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_isulimg"));
    cmd.timeout(Duration::from_secs(30));
    cmd.env_remove("RUST_LOG");
    cmd.arg("--isulad-config-file").arg(config_file);
    cmd
}

pub const OVERLAY2_CONFIG: &str = r#"{
    "graph": "/var/lib/isulad",
    "state": "/var/run/isulad",
    "default-runtime": "lcr",
    "storage-driver": "overlay2",
    "storage-opts": ["overlay2.override_kernel_check=true"]
}"#;
