//! Test helpers for isulimg.
//!
//! [`StubImageModule`] stands in for libisulad_img: it returns scripted
//! statuses and records an owned copy of every request it receives, so tests
//! can count calls and inspect exactly what crossed the boundary.

use std::path::PathBuf;

use isulimg::{ImageModule, ModuleConfig, PrepareRequest};
use parking_lot::Mutex;
use tempfile::TempDir;

/// A rootfs operation as the stub saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedOperation {
    pub op: &'static str,
    pub image_type: String,
    pub image_name: Option<String>,
    pub container_id: String,
}

#[derive(Debug)]
enum PrepareScript {
    /// `/var/lib/isulad/rootfs/<container id>`
    PerContainer,
    Path(String),
    Fail(i32),
}

#[derive(Debug)]
struct Script {
    init_ret: i32,
    prepare: PrepareScript,
    remove_ret: i32,
    mount_ret: i32,
    umount_ret: i32,
}

#[derive(Debug, Default)]
struct Recorded {
    init: Vec<ModuleConfig>,
    prepare: Vec<PrepareRequest>,
    operations: Vec<RecordedOperation>,
}

/// Scriptable, recording image module.
#[derive(Debug)]
pub struct StubImageModule {
    script: Mutex<Script>,
    recorded: Mutex<Recorded>,
}

impl Default for StubImageModule {
    fn default() -> Self {
        Self::new()
    }
}

impl StubImageModule {
    /// Every call succeeds; prepare returns `/var/lib/isulad/rootfs/<id>`.
    pub fn new() -> Self {
        Self {
            script: Mutex::new(Script {
                init_ret: 0,
                prepare: PrepareScript::PerContainer,
                remove_ret: 0,
                mount_ret: 0,
                umount_ret: 0,
            }),
            recorded: Mutex::new(Recorded::default()),
        }
    }

    pub fn with_init_ret(self, ret: i32) -> Self {
        self.script.lock().init_ret = ret;
        self
    }

    /// Make prepare return `path` regardless of container id.
    pub fn with_prepare_path(self, path: impl Into<String>) -> Self {
        self.script.lock().prepare = PrepareScript::Path(path.into());
        self
    }

    /// Make prepare fail with `ret`. `ret` must be non-zero.
    pub fn with_prepare_failure(self, ret: i32) -> Self {
        assert_ne!(ret, 0, "a failing prepare needs a non-zero status");
        self.script.lock().prepare = PrepareScript::Fail(ret);
        self
    }

    pub fn with_remove_ret(self, ret: i32) -> Self {
        self.script.lock().remove_ret = ret;
        self
    }

    pub fn with_mount_ret(self, ret: i32) -> Self {
        self.script.lock().mount_ret = ret;
        self
    }

    pub fn with_umount_ret(self, ret: i32) -> Self {
        self.script.lock().umount_ret = ret;
        self
    }

    pub fn init_calls(&self) -> usize {
        self.recorded.lock().init.len()
    }

    pub fn prepare_calls(&self) -> usize {
        self.recorded.lock().prepare.len()
    }

    /// Copies of every config passed to `module_init`, oldest first.
    pub fn init_configs(&self) -> Vec<ModuleConfig> {
        self.recorded.lock().init.clone()
    }

    pub fn prepare_requests(&self) -> Vec<PrepareRequest> {
        self.recorded.lock().prepare.clone()
    }

    pub fn operations(&self) -> Vec<RecordedOperation> {
        self.recorded.lock().operations.clone()
    }

    fn record_operation(
        &self,
        op: &'static str,
        image_type: &str,
        image_name: Option<&str>,
        container_id: &str,
    ) {
        self.recorded.lock().operations.push(RecordedOperation {
            op,
            image_type: image_type.to_string(),
            image_name: image_name.map(str::to_string),
            container_id: container_id.to_string(),
        });
    }
}

impl ImageModule for StubImageModule {
    fn module_init(&self, config: &ModuleConfig) -> i32 {
        self.recorded.lock().init.push(config.clone());
        self.script.lock().init_ret
    }

    fn prepare_container_rootfs(&self, request: &PrepareRequest) -> Result<String, i32> {
        self.recorded.lock().prepare.push(request.clone());
        match &self.script.lock().prepare {
            PrepareScript::PerContainer => {
                Ok(format!("/var/lib/isulad/rootfs/{}", request.container_id))
            }
            PrepareScript::Path(path) => Ok(path.clone()),
            PrepareScript::Fail(ret) => Err(*ret),
        }
    }

    fn remove_container_rootfs(&self, image_type: &str, container_id: &str) -> i32 {
        self.record_operation("remove", image_type, None, container_id);
        self.script.lock().remove_ret
    }

    fn mount_container_rootfs(
        &self,
        image_type: &str,
        image_name: &str,
        container_id: &str,
    ) -> i32 {
        self.record_operation("mount", image_type, Some(image_name), container_id);
        self.script.lock().mount_ret
    }

    fn umount_container_rootfs(
        &self,
        image_type: &str,
        image_name: &str,
        container_id: &str,
    ) -> i32 {
        self.record_operation("umount", image_type, Some(image_name), container_id);
        self.script.lock().umount_ret
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Temporary directory holding a daemon.json with `content`.
///
/// Keep the returned `TempDir` alive for as long as the path is used.
pub fn daemon_config_file(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("daemon.json");
    std::fs::write(&path, content).expect("Failed to write daemon.json");
    (dir, path)
}
