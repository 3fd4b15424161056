// SPDX-License-Identifier: MIT OR Apache-2.0

//! Default configuration service implementation.
//!
//! [`DefaultConfigService`] layers several configuration sources, typically a
//! handful of XML files, and answers each lookup from the highest-priority
//! source that holds the key.

use crate::domain::{ConfigError, ConfigKey, ConfigValue, ConfigurationService, Result};
use crate::ports::ConfigSource;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

/// Default implementation of the configuration service.
///
/// Sources with higher priority values are queried first. Sources sharing a
/// priority keep the order they were added in, so the earlier one wins.
///
/// # Examples
///
/// ```rust
/// use xmlcfg::prelude::*;
/// use xmlcfg::service::DefaultConfigService;
///
/// # fn main() -> Result<()> {
/// let service = DefaultConfigService::builder()
///     .with_xml_str("<configuration><port>8080</port></configuration>")?
///     .build()?;
///
/// assert_eq!(service.get(&ConfigKey::from("port"))?.as_u32("port")?, 8080);
/// # Ok(())
/// # }
/// ```
pub struct DefaultConfigService {
    /// Configuration sources, highest priority first
    sources: Vec<Box<dyn ConfigSource>>,
    /// Values already resolved, by key
    cache: Arc<RwLock<HashMap<String, ConfigValue>>>,
}

impl DefaultConfigService {
    /// Creates a service without any sources.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a new configuration service builder.
    pub fn builder() -> ConfigurationServiceBuilder {
        ConfigurationServiceBuilder::new()
    }

    /// Adds a configuration source to the service.
    ///
    /// Sources are re-sorted by priority and the cache is cleared.
    pub fn add_source(&mut self, source: Box<dyn ConfigSource>) {
        tracing::debug!(
            "Adding configuration source '{}' with priority {}",
            source.name(),
            source.priority()
        );
        self.sources.push(source);
        self.sort_sources();
        self.invalidate_cache();
    }

    /// Names of the sources in the order they are queried.
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Every key held by at least one source, in source order.
    ///
    /// Sources that fail to list their keys are skipped.
    pub fn all_keys(&self) -> Vec<ConfigKey> {
        let mut seen = HashSet::new();
        let mut keys = Vec::new();
        for source in &self.sources {
            match source.all_keys() {
                Ok(source_keys) => {
                    for key in source_keys {
                        if seen.insert(key.clone()) {
                            keys.push(key);
                        }
                    }
                }
                Err(e) => {
                    tracing::debug!("Error listing keys of source '{}': {}", source.name(), e);
                }
            }
        }
        keys
    }

    /// Sorts sources by priority (highest first). The sort is stable.
    fn sort_sources(&mut self) {
        self.sources.sort_by_key(|b| std::cmp::Reverse(b.priority()));
    }

    fn invalidate_cache(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.clear();
        }
    }

    /// Queries all sources for a configuration value, respecting priority order.
    fn query_sources(&self, key: &ConfigKey) -> Option<ConfigValue> {
        for source in &self.sources {
            match source.get(key) {
                Ok(Some(value)) => return Some(value),
                Ok(None) => continue,
                Err(e) => {
                    tracing::debug!(
                        "Error querying source '{}' for key '{}': {}",
                        source.name(),
                        key,
                        e
                    );
                }
            }
        }
        None
    }
}

impl Default for DefaultConfigService {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationService for DefaultConfigService {
    fn get(&self, key: &ConfigKey) -> Result<ConfigValue> {
        if let Ok(cache) = self.cache.read() {
            if let Some(value) = cache.get(key.as_str()) {
                return Ok(value.clone());
            }
        }

        let value = self
            .query_sources(key)
            .ok_or_else(|| ConfigError::ConfigKeyNotFound {
                key: key.as_str().to_string(),
            })?;

        if let Ok(mut cache) = self.cache.write() {
            cache.insert(key.as_str().to_string(), value.clone());
        }

        Ok(value)
    }

    fn get_or_default(&self, key: &ConfigKey, default: &str) -> ConfigValue {
        self.get(key).unwrap_or_else(|_| ConfigValue::from(default))
    }

    fn has(&self, key: &ConfigKey) -> bool {
        self.get(key).is_ok()
    }

    fn reload(&mut self) -> Result<()> {
        for source in &mut self.sources {
            if let Err(e) = source.reload() {
                tracing::warn!("Failed to reload source '{}': {}", source.name(), e);
            }
        }

        self.invalidate_cache();
        Ok(())
    }
}

/// Builder for constructing a `DefaultConfigService`.
///
/// # Examples
///
/// ```rust,no_run
/// use xmlcfg::service::ConfigurationServiceBuilder;
///
/// # fn main() -> xmlcfg::domain::Result<()> {
/// let service = ConfigurationServiceBuilder::new()
///     .with_xml_file("/etc/myapp/config.xml")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ConfigurationServiceBuilder {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigurationServiceBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Adds a configuration source to the builder.
    pub fn with_source(mut self, source: Box<dyn ConfigSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Adds the XML file at `path` as a configuration source.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed.
    #[cfg(feature = "xml")]
    pub fn with_xml_file(self, path: impl AsRef<std::path::Path>) -> Result<Self> {
        use crate::adapters::XmlConfiguration;
        let config = XmlConfiguration::from_file(path)?;
        Ok(self.with_source(Box::new(config)))
    }

    /// Adds an in-memory XML document as a configuration source.
    ///
    /// ```rust
    /// use xmlcfg::prelude::*;
    /// use xmlcfg::service::ConfigurationServiceBuilder;
    ///
    /// # fn main() -> Result<()> {
    /// let service = ConfigurationServiceBuilder::new()
    ///     .with_xml_str(r#"<configuration><db host="localhost"/></configuration>"#)?
    ///     .build()?;
    /// assert!(service.has(&ConfigKey::from("db[@host]")));
    /// # Ok(())
    /// # }
    /// ```
    #[cfg(feature = "xml")]
    pub fn with_xml_str(self, xml: &str) -> Result<Self> {
        use crate::adapters::XmlConfiguration;
        let config: XmlConfiguration = xml.parse()?;
        Ok(self.with_source(Box::new(config)))
    }

    /// Builds the configuration service.
    pub fn build(self) -> Result<DefaultConfigService> {
        let mut service = DefaultConfigService::new();

        for source in self.sources {
            service.add_source(source);
        }

        Ok(service)
    }
}

impl Default for ConfigurationServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
