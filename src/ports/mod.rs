// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! The adapters implement these traits; the service only talks to them.

pub mod format;
pub mod source;

// Re-export commonly used types
pub use format::ConfigFormat;
pub use source::ConfigSource;
