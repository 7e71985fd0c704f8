pub mod mount;
pub mod prepare;
pub mod rm;
