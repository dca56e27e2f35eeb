//! System orchestration, configuration, startup and shutdown.

pub mod catalog_system;
pub mod config;
pub mod terminal;
pub mod tracing;

pub use self::catalog_system::CatalogSystem;
pub use self::config::{Command, Config};
pub use self::tracing::setup_tracing;
