//! drillbag-client — Item sources and configuration.
//!
//! Implements the `ItemSource` trait for the remote generation service and
//! for a scripted in-process mock, plus TOML configuration loading with
//! environment variable resolution.

pub mod config;
pub mod http;
pub mod mock;

pub use config::{create_source, load_config, load_config_from, DrillbagConfig, SourceConfig};
pub use http::HttpItemSource;
pub use mock::{MockItemSource, MockReply};
