// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the configuration service implementations.
//!
//! The service combines several `ConfigSource`s behind the
//! `ConfigurationService` trait.

pub mod default_service;

// Re-export commonly used types
pub use default_service::{ConfigurationServiceBuilder, DefaultConfigService};
