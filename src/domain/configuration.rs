// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `Configuration` trait: the key/value API shared by every configuration.
//!
//! Implementors supply the primitive tree operations. Typed getters, list access,
//! prefix filtering and `${key}` interpolation come for free.

use crate::domain::{ConfigError, ConfigKey, ConfigValue, PropertyValue, Result};

const VARIABLE_START: &str = "${";
const VARIABLE_END: char = '}';

/// A hierarchical key/value configuration.
///
/// Keys use the syntax described in [`crate::domain::config_key`]. Values are
/// untyped strings; a key holding several values reads as a
/// [`PropertyValue::List`].
///
/// # Examples
///
/// ```
/// use xmlcfg::domain::{Configuration, HierarchicalConfig};
///
/// let mut config = HierarchicalConfig::new();
/// config.add_property("server.port", "8080");
/// config.add_property("server.host", "localhost");
/// config.add_property("server.url", "http://${server.host}:${server.port}/");
///
/// assert_eq!(config.get_u32("server.port").unwrap(), 8080);
/// assert_eq!(
///     config.get_string("server.url").as_deref(),
///     Some("http://localhost:8080/")
/// );
/// ```
pub trait Configuration {
    /// Returns every value stored under `key`, or `None` if it has none.
    fn get_property(&self, key: &str) -> Option<PropertyValue>;

    /// Adds a value to `key`. An existing value turns into a list.
    fn add_property(&mut self, key: &str, value: &str);

    /// Replaces the value(s) of `key`.
    fn set_property(&mut self, key: &str, value: &str);

    /// Removes the value(s) of `key`, leaving keys below it alone.
    fn clear_property(&mut self, key: &str);

    /// Removes `key` together with everything below it.
    fn clear_tree(&mut self, key: &str);

    /// Every key that currently holds a value, in document order.
    fn get_keys(&self) -> Vec<ConfigKey>;

    /// Removes all properties.
    fn clear(&mut self);

    /// Returns `true` if `key` holds a value.
    fn contains_key(&self, key: &str) -> bool {
        self.get_property(key).is_some()
    }

    /// Returns `true` if no key holds a value.
    fn is_empty(&self) -> bool {
        self.get_keys().is_empty()
    }

    /// Keys equal to `prefix` or located below it.
    fn get_keys_with_prefix(&self, prefix: &str) -> Vec<ConfigKey> {
        self.get_keys()
            .into_iter()
            .filter(|key| key.starts_with_path(prefix))
            .collect()
    }

    /// All values of `key`; empty when the key is missing.
    fn get_list(&self, key: &str) -> Vec<String> {
        self.get_property(key)
            .map(PropertyValue::into_list)
            .unwrap_or_default()
    }

    /// The first value of `key` with `${...}` references resolved.
    fn get_string(&self, key: &str) -> Option<String> {
        let raw = self.get_property(key)?;
        let first = raw.first()?;
        let mut resolving = vec![key.to_string()];
        Some(resolve_variables(self, first, &mut resolving))
    }

    /// Like [`Configuration::get_string`], falling back to `default`.
    fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_string(key).unwrap_or_else(|| default.to_string())
    }

    /// Resolves `${...}` references in arbitrary text.
    fn interpolate(&self, text: &str) -> String {
        resolve_variables(self, text, &mut Vec::new())
    }

    /// The first value of `key` as a [`ConfigValue`].
    fn get_value(&self, key: &str) -> Result<ConfigValue> {
        self.get_string(key)
            .map(ConfigValue::from)
            .ok_or_else(|| ConfigError::ConfigKeyNotFound {
                key: key.to_string(),
            })
    }

    /// Reads `key` as a boolean.
    fn get_bool(&self, key: &str) -> Result<bool> {
        self.get_value(key)?.as_bool(key)
    }

    /// Reads `key` as an `i32`.
    fn get_i32(&self, key: &str) -> Result<i32> {
        self.get_value(key)?.as_i32(key)
    }

    /// Reads `key` as an `i64`.
    fn get_i64(&self, key: &str) -> Result<i64> {
        self.get_value(key)?.as_i64(key)
    }

    /// Reads `key` as a `u32`.
    fn get_u32(&self, key: &str) -> Result<u32> {
        self.get_value(key)?.as_u32(key)
    }

    /// Reads `key` as a `u64`.
    fn get_u64(&self, key: &str) -> Result<u64> {
        self.get_value(key)?.as_u64(key)
    }

    /// Reads `key` as an `f64`.
    fn get_f64(&self, key: &str) -> Result<f64> {
        self.get_value(key)?.as_f64(key)
    }
}

/// Replaces `${name}` with the first value of `name`, recursively.
///
/// `resolving` holds the keys currently being expanded; a reference to one of
/// them is a cycle and stays literal. Unknown and unterminated references stay
/// literal as well.
fn resolve_variables<C>(config: &C, text: &str, resolving: &mut Vec<String>) -> String
where
    C: Configuration + ?Sized,
{
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(VARIABLE_START) {
        out.push_str(&rest[..start]);
        let after = &rest[start + VARIABLE_START.len()..];
        let Some(end) = after.find(VARIABLE_END) else {
            out.push_str(&rest[start..]);
            return out;
        };

        let name = &after[..end];
        let reference = &rest[start..start + VARIABLE_START.len() + end + 1];

        if resolving.iter().any(|key| key == name) {
            tracing::warn!("Cyclic reference to '{}' left unresolved", name);
            out.push_str(reference);
        } else {
            let value = config
                .get_property(name)
                .and_then(|p| p.first().map(str::to_string));
            match value {
                Some(value) => {
                    resolving.push(name.to_string());
                    out.push_str(&resolve_variables(config, &value, resolving));
                    resolving.pop();
                }
                None => out.push_str(reference),
            }
        }

        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}
