// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing the XML implementations of the ports.
//!
//! [`XmlFormat`] implements `ConfigFormat` with quick-xml, and
//! [`XmlConfiguration`] ties it to a file to provide a `ConfigSource`.

pub mod file_location;
#[cfg(feature = "xml")]
pub mod xml_file;
#[cfg(feature = "xml")]
pub mod xml_format;

pub use file_location::FileLocation;
#[cfg(feature = "xml")]
pub use xml_file::XmlConfiguration;
#[cfg(feature = "xml")]
pub use xml_format::XmlFormat;
