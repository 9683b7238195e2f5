//! Sparkify Warehouse Library
//!
//! Stages raw song and event JSON in an analytical warehouse, loads it into a
//! star schema and runs aggregate queries against it.

pub mod cli;
pub mod config;
pub mod pipeline;
pub mod queries;
pub mod schema;
pub mod warehouse;

// Re-export commonly used types for convenience
pub use config::{AppConfig, CliConfig, ConfigError};
pub use queries::QueryCatalog;
pub use warehouse::{open_warehouse, Row, Warehouse, WarehouseError};
