// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared helpers for the integration tests.

use std::collections::HashMap;
use std::path::PathBuf;
use xmlcfg::domain::{ConfigKey, ConfigValue, Result};
use xmlcfg::ports::ConfigSource;

/// Directory holding the XML fixtures.
#[allow(dead_code)]
pub fn resources_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("resources")
}

/// Path of the main XML fixture.
#[allow(dead_code)]
pub fn test_xml() -> PathBuf {
    resources_dir().join("test.xml")
}

/// In-memory source with a fixed priority, for layering tests.
#[allow(dead_code)]
pub struct MapSource {
    name: String,
    priority: u8,
    values: HashMap<String, String>,
}

#[allow(dead_code)]
impl MapSource {
    pub fn new(name: &str, priority: u8) -> Self {
        Self {
            name: name.to_string(),
            priority,
            values: HashMap::new(),
        }
    }

    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl ConfigSource for MapSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }

    fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        Ok(self
            .values
            .get(key.as_str())
            .map(|v| ConfigValue::from(v.as_str())))
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        let mut keys: Vec<ConfigKey> = self
            .values
            .keys()
            .map(|k| ConfigKey::from(k.as_str()))
            .collect();
        keys.sort();
        Ok(keys)
    }

    fn reload(&mut self) -> Result<()> {
        Ok(())
    }
}
