// SPDX-License-Identifier: MIT OR Apache-2.0

//! A hierarchical configuration store backed by XML files.
//!
//! An XML document is loaded into a tree of named nodes. Properties are
//! addressed with dotted element paths, optionally ending in an attribute
//! selector: `element2.subelement.subsubelement` names a nested element and
//! `element3[@name]` names the `name` attribute of `element3`. Repeated
//! elements and repeated additions form lists.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: keys, values, the configuration tree and the
//!   [`Configuration`](domain::Configuration) trait
//! - **Ports**: trait definitions for document formats and layered sources
//!   (`ConfigFormat`, `ConfigSource`)
//! - **Adapters**: the quick-xml format and the file-backed
//!   `XmlConfiguration`
//! - **Service**: a composite service answering lookups from several sources
//!
//! # Feature Flags
//!
//! - `xml`: Enable the XML format and file adapter (default)
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust
//! use xmlcfg::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let mut config: XmlConfiguration = r#"
//!     <configuration>
//!       <element2><subelement><subsubelement>I'm complex!</subsubelement></subelement></element2>
//!       <element3 name="foo">value</element3>
//!     </configuration>"#
//!     .parse()?;
//!
//! assert_eq!(
//!     config.get_string("element2.subelement.subsubelement").as_deref(),
//!     Some("I'm complex!")
//! );
//!
//! config.add_property("element3[@name]", "bar");
//! assert_eq!(config.get_list("element3[@name]"), vec!["foo", "bar"]);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        ConfigError, ConfigKey, ConfigValue, Configuration, ConfigurationService,
        HierarchicalConfig, PropertyValue, Result,
    };
    pub use crate::ports::{ConfigFormat, ConfigSource};
    pub use crate::service::{ConfigurationServiceBuilder, DefaultConfigService};

    #[cfg(feature = "xml")]
    pub use crate::adapters::{XmlConfiguration, XmlFormat};
}
