//! Integration tests for RootfsDriver on top of a stub image module.

use std::path::PathBuf;
use std::sync::Arc;

use isulimg::{DaemonConfig, IsulimgError, RootfsDriver};
use isulimg_test_utils::{StubImageModule, daemon_config_file};

fn driver_with(stub: &Arc<StubImageModule>) -> RootfsDriver {
    RootfsDriver::init(DaemonConfig::default(), stub.clone()).unwrap()
}

#[test]
fn test_init_applies_defaults() {
    let stub = Arc::new(StubImageModule::new());
    let driver = driver_with(&stub);

    assert_eq!(driver.config().graph, "/var/lib/isulad");

    let configs = stub.init_configs();
    assert_eq!(configs.len(), 1);
    assert_eq!(configs[0].graph, "/var/lib/isulad");
    assert_eq!(configs[0].state, "/var/run/isulad");
    assert_eq!(configs[0].storage_driver, "overlay2");
    assert!(configs[0].storage_opts.is_empty());
    assert!(!configs[0].image_layer_check);
}

#[test]
fn test_init_from_daemon_json() {
    let (_dir, path) = daemon_config_file(
        r#"{
            "graph": "/data/isulad",
            "storage-driver": "devicemapper",
            "storage-opts": ["dm.fs=ext4", "dm.min_free_space=10%"],
            "image-layer-check": true
        }"#,
    );
    let stub = Arc::new(StubImageModule::new());

    RootfsDriver::init(DaemonConfig::load(&path).unwrap(), stub.clone()).unwrap();

    let config = &stub.init_configs()[0];
    assert_eq!(config.graph, "/data/isulad");
    assert_eq!(config.storage_driver, "devicemapper");
    assert_eq!(
        config.storage_opts,
        vec![
            Some("dm.fs=ext4".to_string()),
            Some("dm.min_free_space=10%".to_string())
        ]
    );
    assert!(config.image_layer_check);
}

#[test]
fn test_init_rejects_unsupported_driver_before_calling_module() {
    let stub = Arc::new(StubImageModule::new());
    let config = DaemonConfig {
        storage_driver: "aufs".into(),
        ..Default::default()
    };

    let err = RootfsDriver::init(config, stub.clone()).unwrap_err();

    assert!(matches!(err, IsulimgError::Config(_)));
    assert_eq!(stub.init_calls(), 0);
}

#[test]
fn test_init_failure_reports_status() {
    let stub = Arc::new(StubImageModule::new().with_init_ret(-1));

    let err = RootfsDriver::init(DaemonConfig::default(), stub).unwrap_err();

    assert!(matches!(err, IsulimgError::Engine(_)));
    assert!(err.to_string().contains("get ret code: -1"));
}

#[test]
fn test_generate_rootfs() {
    let stub = Arc::new(StubImageModule::new());
    let driver = driver_with(&stub);

    let rootfs = driver.generate_rootfs("abc", "busybox").unwrap();

    assert_eq!(rootfs, PathBuf::from("/var/lib/isulad/rootfs/abc"));
    assert_eq!(stub.prepare_requests()[0].image_type, "oci");
}

#[test]
fn test_generate_rootfs_failure() {
    let stub = Arc::new(StubImageModule::new().with_prepare_failure(1));
    let driver = driver_with(&stub);

    let err = driver.generate_rootfs("abc", "busybox").unwrap_err();
    assert!(matches!(err, IsulimgError::Storage(_)));
}

#[test]
fn test_generate_rootfs_empty_path_is_failure() {
    let stub = Arc::new(StubImageModule::new().with_prepare_path(""));
    let driver = driver_with(&stub);

    assert!(driver.generate_rootfs("abc", "busybox").is_err());
}

#[test]
fn test_mount_and_umount() {
    let stub = Arc::new(StubImageModule::new().with_umount_ret(5));
    let driver = driver_with(&stub);

    driver.mount_rootfs("abc", "busybox").unwrap();
    let err = driver.umount_rootfs("abc", "busybox").unwrap_err();
    assert_eq!(
        err.to_string(),
        "storage error: umount container abc's rootfs get ret code: 5"
    );

    let ops = stub.operations();
    assert_eq!(ops[0].op, "mount");
    assert_eq!(ops[1].op, "umount");
}

#[test]
fn test_cleanup_rootfs_never_fails() {
    let stub = Arc::new(StubImageModule::new().with_remove_ret(2));
    let driver = driver_with(&stub);

    driver.cleanup_rootfs("abc");

    let ops = stub.operations();
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].op, "remove");
    assert_eq!(ops[0].container_id, "abc");
}

#[test]
fn test_init_from_factory_checks_config_first() {
    let config = DaemonConfig {
        storage_driver: "btrfs".into(),
        ..Default::default()
    };

    let err = RootfsDriver::init_from_factory(config).unwrap_err();
    assert!(matches!(err, IsulimgError::Config(_)));
    assert!(err.to_string().contains("not support storage driver: btrfs"));
}

#[test]
#[cfg(not(feature = "native"))]
fn test_init_from_factory_without_native_module() {
    let err = RootfsDriver::init_from_factory(DaemonConfig::default()).unwrap_err();
    assert!(matches!(err, IsulimgError::Unsupported(_)));
}
