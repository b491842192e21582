//! # Redlink Configuration
//!
//! Configuration loading and validation for the Redlink enhancement engine.
//!
//! Raw, partially filled [`RedlinkSettings`] can come from an OSGi-style
//! property map, the process environment or a TOML file. Settings are merged
//! and then validated into an immutable [`RedlinkConfig`], which is the only
//! type the engine accepts.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use redlink_config::{RedlinkConfig, RedlinkSettings};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = RedlinkSettings::load_from_file("redlink.toml")?
//!         .overlay(RedlinkSettings::from_env());
//!     let config = RedlinkConfig::try_from(settings)?;
//!     println!("using API version {}", config.api_version());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod error;
mod loader;

pub use config::*;
pub use error::{ConfigError, ConfigResult};
pub use loader::*;
