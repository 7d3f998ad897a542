//! Shared bootstrap utilities for client front-ends.
//!
//! Provides configuration loading, logging setup, and assembly of the
//! transport, contract client and read cache.
pub mod builder;
pub mod config;
pub mod logging;

pub use builder::{ClientBuilder, ClientSetup};
pub use config::AppConfig;
pub use logging::setup_logging;
