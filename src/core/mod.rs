

pub mod config;
pub mod error;

pub use self::config::{ActionFlags, Credentials, DeleteErrorPolicy, WipeConfig};
pub use self::error::{Result, WipeError};
