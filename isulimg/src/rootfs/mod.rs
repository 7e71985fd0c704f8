//! Container rootfs lifecycle.
//!
//! `RootfsDriver` is what callers outside the marshalling layer use: it
//! initializes the image module from the iSulad daemon config and turns the
//! module's raw statuses into errors with context.

mod driver;

pub use driver::RootfsDriver;
