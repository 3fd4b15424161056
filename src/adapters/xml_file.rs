// SPDX-License-Identifier: MIT OR Apache-2.0

//! File-backed XML configuration.
//!
//! [`XmlConfiguration`] couples a [`HierarchicalConfig`] with a [`FileLocation`]
//! and the [`XmlFormat`], so a configuration can be loaded from and saved to an
//! XML file. It is also a [`ConfigSource`] and can be layered in a
//! [`DefaultConfigService`](crate::service::DefaultConfigService).

use crate::adapters::{FileLocation, XmlFormat};
use crate::domain::{
    ConfigError, ConfigKey, ConfigNode, ConfigValue, Configuration, HierarchicalConfig,
    PropertyValue, Result,
};
use crate::ports::{ConfigFormat, ConfigSource};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Maximum allowed size of a configuration file (10MB)
const MAX_XML_FILE_SIZE: u64 = 10 * 1024 * 1024;

const SOURCE_NAME: &str = "xml-file";

const DEFAULT_FILE_NAME: &str = "config.xml";

/// A hierarchical configuration stored in an XML file.
///
/// # Priority
///
/// As a [`ConfigSource`], XML files have a priority of 1.
///
/// # Examples
///
/// ```rust
/// use xmlcfg::adapters::XmlConfiguration;
/// use xmlcfg::domain::Configuration;
///
/// let mut config: XmlConfiguration = r#"
///     <configuration>
///       <element3 name="foo">value</element3>
///       <list><item>one</item><item>two</item></list>
///     </configuration>"#
///     .parse()
///     .unwrap();
///
/// assert_eq!(config.get_string("element3[@name]").as_deref(), Some("foo"));
/// assert_eq!(config.get_list("list.item"), vec!["one", "two"]);
///
/// config.add_property("list.item", "three");
/// assert!(config.to_xml_string().unwrap().contains("<item>three</item>"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct XmlConfiguration {
    config: HierarchicalConfig,
    location: FileLocation,
}

impl XmlConfiguration {
    /// Creates an empty configuration with root element `configuration` and no file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the configuration stored at `path`.
    ///
    /// The parent directory of `path` becomes the base path and its last
    /// component the file name, so a later [`save`](Self::save) writes back to
    /// the same file.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use xmlcfg::adapters::XmlConfiguration;
    ///
    /// let config = XmlConfiguration::from_file("/etc/myapp/config.xml").unwrap();
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self {
            config: HierarchicalConfig::new(),
            location: FileLocation::from_path(path),
        };
        config.load()?;
        Ok(config)
    }

    /// Loads `config.xml` from the OS-appropriate configuration directory.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name (e.g., "myapp")
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use xmlcfg::adapters::XmlConfiguration;
    ///
    /// let config = XmlConfiguration::from_default_location("myapp", "com.example").unwrap();
    /// ```
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        Self::with_filename(app_name, qualifier, DEFAULT_FILE_NAME)
    }

    /// Loads `filename` from the OS-appropriate configuration directory.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use xmlcfg::adapters::XmlConfiguration;
    ///
    /// let config =
    ///     XmlConfiguration::with_filename("myapp", "com.example", "settings.xml").unwrap();
    /// ```
    pub fn with_filename(app_name: &str, qualifier: &str, filename: &str) -> Result<Self> {
        let proj_dirs =
            ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| ConfigError::SourceError {
                source_name: SOURCE_NAME.to_string(),
                message: "Failed to determine project directories".to_string(),
                source: None,
            })?;

        let mut config = Self::new();
        config.set_base_path(proj_dirs.config_dir());
        config.set_file_name(filename);
        config.load()?;
        Ok(config)
    }

    /// The file name as it was set.
    pub fn file_name(&self) -> Option<&str> {
        self.location.file_name()
    }

    /// Sets the file name used by [`load`](Self::load) and [`save`](Self::save).
    pub fn set_file_name(&mut self, file_name: impl Into<String>) {
        self.location.set_file_name(file_name);
    }

    /// The base path the file name is resolved against.
    pub fn base_path(&self) -> Option<&Path> {
        self.location.base_path()
    }

    /// Sets the base path the file name is resolved against.
    pub fn set_base_path(&mut self, base_path: impl Into<PathBuf>) {
        self.location.set_base_path(base_path);
    }

    /// Points the configuration at `path`, replacing file name and base path.
    pub fn set_file(&mut self, path: impl AsRef<Path>) {
        self.location.set_file(path);
    }

    /// The file this configuration loads from and saves to.
    pub fn file(&self) -> Option<PathBuf> {
        self.location.file()
    }

    /// The list delimiter, `None` when splitting is disabled.
    pub fn list_delimiter(&self) -> Option<char> {
        self.config.list_delimiter()
    }

    /// Sets or disables the list delimiter used when adding and loading values.
    pub fn set_list_delimiter(&mut self, delimiter: Option<char>) {
        self.config.set_list_delimiter(delimiter);
    }

    /// Name of the root element.
    pub fn root_name(&self) -> &str {
        self.config.root_name()
    }

    /// Renames the root element written by [`save`](Self::save).
    pub fn set_root_name(&mut self, name: impl Into<String>) {
        self.config.set_root_name(name);
    }

    /// The in-memory configuration tree.
    pub fn hierarchy(&self) -> &HierarchicalConfig {
        &self.config
    }

    /// Adds the content of [`file`](Self::file) to this configuration.
    ///
    /// # Errors
    ///
    /// `ConfigError::NoFileName` if no file name is set, `SourceError` if the
    /// file cannot be read and `ParseError` if it is not well-formed XML.
    pub fn load(&mut self) -> Result<()> {
        let path = self.file().ok_or(ConfigError::NoFileName)?;
        self.load_from(path)
    }

    /// Adds the content of the file at `path` to this configuration.
    pub fn load_from<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let document = self.read_document(path)?;
        self.config.merge(document);
        tracing::debug!("Loaded XML configuration from {}", path.display());
        Ok(())
    }

    /// Adds the content of an XML document to this configuration.
    ///
    /// The document element's name becomes the root name.
    pub fn load_str(&mut self, xml: &str) -> Result<()> {
        let document = self.format().parse(xml)?;
        self.config.merge(document);
        Ok(())
    }

    /// Writes the configuration to [`file`](Self::file).
    ///
    /// # Errors
    ///
    /// `ConfigError::NoFileName` if no file name is set, `IoError` if the file
    /// cannot be written.
    pub fn save(&self) -> Result<()> {
        let path = self.file().ok_or(ConfigError::NoFileName)?;
        self.save_to(path)
    }

    /// Writes the configuration to `path`.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let xml = self.to_xml_string()?;
        fs::write(path, xml)?;
        tracing::debug!("Saved XML configuration to {}", path.display());
        Ok(())
    }

    /// Renders the configuration as an XML document.
    pub fn to_xml_string(&self) -> Result<String> {
        self.format().write(self.config.root())
    }

    fn format(&self) -> XmlFormat {
        XmlFormat::with_list_delimiter(self.config.list_delimiter())
    }

    fn read_document(&self, path: &Path) -> Result<ConfigNode> {
        let content = read_config_file(path)?;
        self.format().parse(&content)
    }
}

/// Reads a configuration file, refusing files above [`MAX_XML_FILE_SIZE`].
fn read_config_file(path: &Path) -> Result<String> {
    let display_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>");

    let metadata = fs::metadata(path).map_err(|e| ConfigError::SourceError {
        source_name: SOURCE_NAME.to_string(),
        message: format!("Failed to read file metadata: {}", display_name),
        source: Some(Box::new(e)),
    })?;

    if metadata.len() > MAX_XML_FILE_SIZE {
        return Err(ConfigError::SourceError {
            source_name: SOURCE_NAME.to_string(),
            message: format!(
                "Configuration file too large: {} bytes (max {} bytes)",
                metadata.len(),
                MAX_XML_FILE_SIZE
            ),
            source: None,
        });
    }

    fs::read_to_string(path).map_err(|e| ConfigError::SourceError {
        source_name: SOURCE_NAME.to_string(),
        message: format!("Failed to read configuration file: {}", display_name),
        source: Some(Box::new(e)),
    })
}

impl FromStr for XmlConfiguration {
    type Err = ConfigError;

    fn from_str(xml: &str) -> Result<Self> {
        let mut config = Self::new();
        config.load_str(xml)?;
        Ok(config)
    }
}

impl Configuration for XmlConfiguration {
    fn get_property(&self, key: &str) -> Option<PropertyValue> {
        self.config.get_property(key)
    }

    fn add_property(&mut self, key: &str, value: &str) {
        self.config.add_property(key, value);
    }

    fn set_property(&mut self, key: &str, value: &str) {
        self.config.set_property(key, value);
    }

    fn clear_property(&mut self, key: &str) {
        self.config.clear_property(key);
    }

    fn clear_tree(&mut self, key: &str) {
        self.config.clear_tree(key);
    }

    fn get_keys(&self) -> Vec<ConfigKey> {
        self.config.get_keys()
    }

    fn clear(&mut self) {
        self.config.clear();
    }
}

impl ConfigSource for XmlConfiguration {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn priority(&self) -> u8 {
        1
    }

    fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        Ok(self.get_string(key.as_str()).map(ConfigValue::from))
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self.get_keys())
    }

    fn reload(&mut self) -> Result<()> {
        let path = self.file().ok_or(ConfigError::NoFileName)?;
        // Parse before clearing so a broken file leaves the old values in place
        let document = self.read_document(&path)?;
        self.config.clear();
        self.config.merge(document);
        tracing::debug!("Reloaded XML configuration from {}", path.display());
        Ok(())
    }
}
