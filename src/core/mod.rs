//! Core infrastructure for newton-gbt.
//!
//! Fundamental types, default constants and error handling shared by every
//! other module.

pub mod constants;
pub mod error;
pub mod types;

pub use constants::*;
pub use error::{DatasetError, GbtError, Result};
pub use types::*;

/// Initialize the `env_logger` backend for the `log` facade.
///
/// Defaults the filter to `info` when `RUST_LOG` is unset. Calling this more
/// than once is harmless.
pub fn initialize_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    // A logger may already be installed by the host application.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}
