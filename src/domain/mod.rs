// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer: keys, values, the configuration tree and its operations.
//!
//! Nothing here performs I/O. Reading and writing documents is the job of the
//! adapters.

pub mod config_key;
pub mod config_value;
pub mod configuration;
pub mod errors;
pub mod hierarchical;
pub mod node;
pub mod property;
pub mod service;

// Re-export commonly used types
pub use config_key::{parse_attribute_name, parse_element_names, ConfigKey, KeyPath};
pub use config_value::ConfigValue;
pub use configuration::Configuration;
pub use errors::{ConfigError, Result};
pub use hierarchical::HierarchicalConfig;
pub use node::ConfigNode;
pub use property::PropertyValue;
pub use service::ConfigurationService;
