//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!
//! Route tree:
//!     AppConfig.routes (GroupConfig tree)
//!     → mount.rs (resolve names against a Catalog)
//!     → Router
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Duplicate detection stays in the router; config only checks shape

pub mod loader;
pub mod mount;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use mount::{mount, Catalog, MountError};
pub use schema::{AppConfig, GroupConfig, LogFormat, LoggingConfig, RouteConfig, ServerConfig};
