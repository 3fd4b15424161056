// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration source trait definition.
//!
//! Sources are what a [`DefaultConfigService`](crate::service::DefaultConfigService)
//! layers on top of each other. Each one is named, carries a priority, and can be
//! asked for a single value per key.

use crate::domain::{ConfigKey, ConfigValue, Result};

/// A named, prioritized provider of configuration values.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a service can be shared across
/// threads.
///
/// # Priority
///
/// Higher values take precedence. File-backed sources use priority 1; anything
/// meant to override files (per-user settings, test fixtures) should use more.
///
/// # Examples
///
/// ```rust
/// use xmlcfg::domain::{ConfigKey, ConfigValue, Result};
/// use xmlcfg::ports::ConfigSource;
///
/// struct Defaults;
///
/// impl ConfigSource for Defaults {
///     fn name(&self) -> &str {
///         "defaults"
///     }
///
///     fn priority(&self) -> u8 {
///         0
///     }
///
///     fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
///         Ok((key.as_str() == "server.port").then(|| ConfigValue::from("8080")))
///     }
///
///     fn all_keys(&self) -> Result<Vec<ConfigKey>> {
///         Ok(vec![ConfigKey::from("server.port")])
///     }
///
///     fn reload(&mut self) -> Result<()> {
///         Ok(())
///     }
/// }
///
/// assert_eq!(Defaults.get_str("server.port").unwrap().unwrap().as_str(), "8080");
/// ```
pub trait ConfigSource: Send + Sync {
    /// Short identifier used in logs and error messages, e.g. `"xml-file"`.
    fn name(&self) -> &str;

    /// Precedence of this source; higher wins.
    fn priority(&self) -> u8;

    /// Looks up `key`.
    ///
    /// Returns `Ok(None)` when this source does not hold the key. For keys with
    /// several values the first one is returned.
    fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>>;

    /// Every key this source holds a value for.
    fn all_keys(&self) -> Result<Vec<ConfigKey>>;

    /// Re-reads the source from its backing storage, if it has any.
    fn reload(&mut self) -> Result<()>;

    /// Convenience wrapper around [`ConfigSource::get`] taking a string key.
    fn get_str(&self, key: &str) -> Result<Option<ConfigValue>> {
        self.get(&ConfigKey::from(key))
    }
}
