//! Constants shared with the iSulad image module.
//!
//! These values must match what libisulad_img expects on the other side of
//! the FFI boundary.

/// Status codes exchanged with the image module
pub mod status {
    /// Returned by the image module on success
    pub const SUCCESS: i32 = 0;

    /// Returned by the marshalling layer when a required argument is absent
    /// or cannot be represented as a C string. No external call is made.
    pub const INVALID_ARGUMENT: i32 = -1;
}

/// Image type constants
pub mod image {
    /// The only image type this layer hands to the image module
    pub const TYPE_OCI: &str = "oci";
}

/// iSulad daemon defaults, applied when daemon.json leaves a field empty
pub mod daemon {
    /// Default location of the iSulad daemon config
    pub const CONFIG_FILE: &str = "/etc/isulad/daemon.json";

    pub const GRAPH_PATH: &str = "/var/lib/isulad";

    pub const STATE_PATH: &str = "/var/run/isulad";

    pub const RUNTIME: &str = "lcr";

    pub const STORAGE_DRIVER: &str = "overlay2";
}

/// Storage driver names understood by the image module
pub mod drivers {
    pub const OVERLAY2: &str = "overlay2";

    pub const DEVICEMAPPER: &str = "devicemapper";
}
