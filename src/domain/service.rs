// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration service trait definition.
//!
//! A service answers lookups from several [`ConfigSource`](crate::ports::ConfigSource)s
//! at once, for example a user's XML file layered over a system-wide one.

use crate::domain::{ConfigKey, ConfigValue, Result};

/// The main lookup interface over a set of configuration sources.
///
/// # Examples
///
/// ```rust
/// use xmlcfg::domain::{ConfigKey, ConfigValue, ConfigurationService, Result};
///
/// struct Fixed;
///
/// impl ConfigurationService for Fixed {
///     fn get(&self, _key: &ConfigKey) -> Result<ConfigValue> {
///         Ok(ConfigValue::from("value"))
///     }
///
///     fn get_or_default(&self, key: &ConfigKey, default: &str) -> ConfigValue {
///         self.get(key).unwrap_or_else(|_| ConfigValue::from(default))
///     }
///
///     fn has(&self, key: &ConfigKey) -> bool {
///         self.get(key).is_ok()
///     }
///
///     fn reload(&mut self) -> Result<()> {
///         Ok(())
///     }
/// }
///
/// assert_eq!(Fixed.get(&ConfigKey::from("element")).unwrap().as_str(), "value");
/// ```
pub trait ConfigurationService {
    /// Retrieves the value of `key` from the highest-priority source that has it.
    ///
    /// # Errors
    ///
    /// `ConfigError::ConfigKeyNotFound` if no source holds the key.
    fn get(&self, key: &ConfigKey) -> Result<ConfigValue>;

    /// Retrieves the value of `key`, or `default` if no source holds it.
    fn get_or_default(&self, key: &ConfigKey, default: &str) -> ConfigValue;

    /// Returns `true` if any source holds `key`.
    fn has(&self, key: &ConfigKey) -> bool;

    /// Reloads every source that supports it.
    fn reload(&mut self) -> Result<()>;
}
