// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration keys and the key-path parser.
//!
//! A key addresses a node of the configuration tree with dot-separated element
//! names, optionally followed by an attribute selector:
//!
//! ```text
//! element2.subelement.subsubelement
//! element3[@name]
//! ```
//!
//! Parsing is total. A missing key yields no element names and no attribute, and
//! an unterminated attribute marker takes the rest of the key as the attribute name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between element names.
pub const NODE_DELIMITER: char = '.';
/// Opening marker of an attribute selector.
pub const ATTRIBUTE_START: &str = "[@";
/// Closing marker of an attribute selector.
pub const ATTRIBUTE_END: &str = "]";

/// Splits the path portion of a key into its element names.
///
/// Anything from the first `[@` on is ignored. Empty segments are dropped, so
/// `"a..b"` and `".a.b."` both parse as `["a", "b"]`. A `None` key yields an
/// empty vector.
///
/// # Examples
///
/// ```
/// use xmlcfg::domain::config_key::parse_element_names;
///
/// assert_eq!(parse_element_names(Some("x.y.z[@name]")), vec!["x", "y", "z"]);
/// assert!(parse_element_names(None).is_empty());
/// ```
pub fn parse_element_names(key: Option<&str>) -> Vec<String> {
    let Some(key) = key else {
        return Vec::new();
    };

    let path = match key.find(ATTRIBUTE_START) {
        Some(start) => &key[..start],
        None => key,
    };

    path.split(NODE_DELIMITER)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extracts the attribute name of a key.
///
/// Returns the text between `[@` and the next `]`, or everything after `[@` when
/// the closing bracket is missing. Keys without a marker, and `None`, yield `None`.
///
/// # Examples
///
/// ```
/// use xmlcfg::domain::config_key::parse_attribute_name;
///
/// assert_eq!(parse_attribute_name(Some("x.y.z[@name]")).as_deref(), Some("name"));
/// assert_eq!(parse_attribute_name(Some("x.y.z[@name")).as_deref(), Some("name"));
/// assert_eq!(parse_attribute_name(Some("x.y.z")), None);
/// ```
pub fn parse_attribute_name(key: Option<&str>) -> Option<String> {
    let key = key?;
    let start = key.find(ATTRIBUTE_START)?;
    let rest = &key[start + ATTRIBUTE_START.len()..];
    let name = match rest.find(ATTRIBUTE_END) {
        Some(end) => &rest[..end],
        None => rest,
    };
    Some(name.to_string())
}

/// A parsed key: the element path plus an optional attribute name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyPath {
    /// Element names from the root's children downwards
    pub elements: Vec<String>,
    /// Attribute selected on the last element, if any
    pub attribute: Option<String>,
}

impl KeyPath {
    /// Parses a key string.
    pub fn parse(key: &str) -> Self {
        Self {
            elements: parse_element_names(Some(key)),
            attribute: parse_attribute_name(Some(key)),
        }
    }

    /// Creates a path addressing an element.
    pub fn element<I, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            elements: elements.into_iter().map(Into::into).collect(),
            attribute: None,
        }
    }

    /// Returns a copy of this path selecting `attribute` on its last element.
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// Returns `true` if the path addresses nothing at all.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.attribute.is_none()
    }

    /// Returns `true` if the path selects an attribute.
    pub fn is_attribute(&self) -> bool {
        self.attribute.is_some()
    }

    /// Renders the path back into key syntax.
    ///
    /// ```
    /// use xmlcfg::domain::KeyPath;
    ///
    /// let path = KeyPath::element(["element3"]).with_attribute("name");
    /// assert_eq!(path.to_key(), "element3[@name]");
    /// ```
    pub fn to_key(&self) -> String {
        let mut key = self.elements.join(&NODE_DELIMITER.to_string());
        if let Some(attribute) = &self.attribute {
            key.push_str(ATTRIBUTE_START);
            key.push_str(attribute);
            key.push_str(ATTRIBUTE_END);
        }
        key
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_key())
    }
}

/// A type-safe wrapper for configuration keys.
///
/// The key keeps the text it was created from; [`ConfigKey::path`] parses it on
/// demand.
///
/// # Examples
///
/// ```
/// use xmlcfg::domain::config_key::ConfigKey;
///
/// let key = ConfigKey::from("element3[@name]");
/// assert_eq!(key.element_names(), vec!["element3"]);
/// assert_eq!(key.attribute_name().as_deref(), Some("name"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Creates a new `ConfigKey` from a `String`.
    pub fn new(key: String) -> Self {
        ConfigKey(key)
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `ConfigKey` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Element names of this key, see [`parse_element_names`].
    pub fn element_names(&self) -> Vec<String> {
        parse_element_names(Some(&self.0))
    }

    /// Attribute name of this key, see [`parse_attribute_name`].
    pub fn attribute_name(&self) -> Option<String> {
        parse_attribute_name(Some(&self.0))
    }

    /// Parses the key into a [`KeyPath`].
    pub fn path(&self) -> KeyPath {
        KeyPath::parse(&self.0)
    }

    /// Returns `true` if this key equals `prefix` or lies below it.
    ///
    /// `a.b` is below `a`, and so is `a[@x]`; `ab` is not.
    pub fn starts_with_path(&self, prefix: &str) -> bool {
        match self.0.strip_prefix(prefix) {
            Some("") => true,
            Some(rest) => rest.starts_with(NODE_DELIMITER) || rest.starts_with(ATTRIBUTE_START),
            None => false,
        }
    }
}

impl From<String> for ConfigKey {
    fn from(s: String) -> Self {
        ConfigKey(s)
    }
}

impl From<&str> for ConfigKey {
    fn from(s: &str) -> Self {
        ConfigKey(s.to_string())
    }
}

impl From<&KeyPath> for ConfigKey {
    fn from(path: &KeyPath) -> Self {
        ConfigKey(path.to_key())
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_element_names_without_attribute() {
        assert_eq!(parse_element_names(Some("x.y.z")), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_parse_element_names_with_attribute() {
        assert_eq!(
            parse_element_names(Some("x.y.z[@name]")),
            vec!["x", "y", "z"]
        );
    }

    #[test]
    fn test_parse_element_names_null_key() {
        assert!(parse_element_names(None).is_empty());
    }

    #[test]
    fn test_parse_element_names_drops_empty_segments() {
        assert_eq!(parse_element_names(Some(".a..b.")), vec!["a", "b"]);
        assert!(parse_element_names(Some("")).is_empty());
        assert!(parse_element_names(Some("[@root]")).is_empty());
    }

    #[test]
    fn test_parse_element_names_single_segment() {
        assert_eq!(parse_element_names(Some("element")), vec!["element"]);
    }

    #[test]
    fn test_parse_attribute_name() {
        assert_eq!(parse_attribute_name(Some("x.y.z")), None);
        assert_eq!(
            parse_attribute_name(Some("x.y.z[@name]")),
            Some("name".to_string())
        );
        assert_eq!(
            parse_attribute_name(Some("x.y.z[@name")),
            Some("name".to_string())
        );
        assert_eq!(parse_attribute_name(None), None);
    }

    #[test]
    fn test_parse_attribute_name_edge_cases() {
        assert_eq!(parse_attribute_name(Some("x[@]")), Some(String::new()));
        assert_eq!(parse_attribute_name(Some("[@id]")), Some("id".to_string()));
        // Only the first marker counts
        assert_eq!(
            parse_attribute_name(Some("a[@b][@c]")),
            Some("b".to_string())
        );
        // A bare bracket is not an attribute marker
        assert_eq!(parse_attribute_name(Some("a[b]")), None);
    }

    #[test]
    fn test_key_path_parse_and_render() {
        let path = KeyPath::parse("element2.subelement[@id]");
        assert_eq!(path.elements, vec!["element2", "subelement"]);
        assert_eq!(path.attribute.as_deref(), Some("id"));
        assert!(path.is_attribute());
        assert_eq!(path.to_key(), "element2.subelement[@id]");
        assert_eq!(path.to_string(), "element2.subelement[@id]");
    }

    #[test]
    fn test_key_path_normalizes_on_render() {
        assert_eq!(KeyPath::parse("a..b[@c").to_key(), "a.b[@c]");
    }

    #[test]
    fn test_key_path_empty() {
        assert!(KeyPath::parse("").is_empty());
        assert!(KeyPath::parse("...").is_empty());
        assert!(!KeyPath::parse("[@x]").is_empty());
    }

    #[test]
    fn test_config_key_accessors() {
        let key = ConfigKey::from("list.item[@type]");
        assert_eq!(key.as_str(), "list.item[@type]");
        assert_eq!(key.element_names(), vec!["list", "item"]);
        assert_eq!(key.attribute_name().as_deref(), Some("type"));
        assert_eq!(key.path(), KeyPath::element(["list", "item"]).with_attribute("type"));
    }

    #[test]
    fn test_config_key_starts_with_path() {
        let key = ConfigKey::from("element2.subelement");
        assert!(key.starts_with_path("element2"));
        assert!(key.starts_with_path("element2.subelement"));
        assert!(!key.starts_with_path("element"));

        let attr = ConfigKey::from("element3[@name]");
        assert!(attr.starts_with_path("element3"));
        assert!(!attr.starts_with_path("element"));
    }

    #[test]
    fn test_config_key_conversions() {
        let key = ConfigKey::new("test.key".to_string());
        let s: &str = key.as_ref();
        assert_eq!(s, "test.key");
        assert_eq!(format!("{}", key), "test.key");

        let inner: String = key.clone().into();
        assert_eq!(inner, "test.key");
        assert_eq!(key.into_string(), "test.key");
    }

    #[test]
    fn test_config_key_from_key_path() {
        let path = KeyPath::element(["a", "b"]);
        assert_eq!(ConfigKey::from(&path).as_str(), "a.b");
    }

    #[test]
    fn test_config_key_hash() {
        let mut map = HashMap::new();
        map.insert(ConfigKey::from("element"), "value");

        assert_eq!(map.get(&ConfigKey::from("element")), Some(&"value"));
        assert_eq!(map.get(&ConfigKey::from("element2")), None);
    }
}
