// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tree-backed implementation of [`Configuration`].

use crate::domain::config_key::KeyPath;
use crate::domain::{ConfigKey, ConfigNode, Configuration, PropertyValue};
use serde::{Deserialize, Serialize};
use std::mem;

/// Name given to the root element of a fresh configuration.
pub const DEFAULT_ROOT_NAME: &str = "configuration";

/// Delimiter used to split list values unless configured otherwise.
pub const DEFAULT_LIST_DELIMITER: char = ',';

/// An in-memory hierarchical configuration.
///
/// With a list delimiter set (the default is `,`), values containing the
/// delimiter are split into separate values when they are added or merged in
/// from a parsed document. Values are always stored trimmed and empty values
/// are never stored, so whatever is saved reads back unchanged.
///
/// # Examples
///
/// ```
/// use xmlcfg::domain::{Configuration, HierarchicalConfig, PropertyValue};
///
/// let mut config = HierarchicalConfig::new();
/// config.add_property("hosts", "alpha, beta");
/// assert_eq!(config.get_list("hosts"), vec!["alpha", "beta"]);
///
/// config.set_list_delimiter(None);
/// config.set_property("hosts", "alpha, beta");
/// assert_eq!(
///     config.get_property("hosts"),
///     Some(PropertyValue::Single("alpha, beta".to_string()))
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchicalConfig {
    root: ConfigNode,
    list_delimiter: Option<char>,
}

impl HierarchicalConfig {
    /// Creates an empty configuration with the default root name and delimiter.
    pub fn new() -> Self {
        Self {
            root: ConfigNode::new(DEFAULT_ROOT_NAME),
            list_delimiter: Some(DEFAULT_LIST_DELIMITER),
        }
    }

    /// Wraps an existing tree as-is, without splitting any values.
    pub fn from_root(root: ConfigNode) -> Self {
        Self {
            root,
            list_delimiter: Some(DEFAULT_LIST_DELIMITER),
        }
    }

    /// The root node.
    pub fn root(&self) -> &ConfigNode {
        &self.root
    }

    /// Name of the root element.
    pub fn root_name(&self) -> &str {
        &self.root.name
    }

    /// Renames the root element.
    pub fn set_root_name(&mut self, name: impl Into<String>) {
        self.root.name = name.into();
    }

    /// The list delimiter, `None` when splitting is disabled.
    pub fn list_delimiter(&self) -> Option<char> {
        self.list_delimiter
    }

    /// Sets or disables the list delimiter. Stored values are not re-split.
    pub fn set_list_delimiter(&mut self, delimiter: Option<char>) {
        self.list_delimiter = delimiter;
    }

    /// Splits `value` on the list delimiter.
    ///
    /// Every token is trimmed and empty tokens are dropped, the same way element
    /// text is read back from a document. A value made only of whitespace and
    /// delimiters therefore yields no tokens at all: adding it stores nothing and
    /// setting it clears the key.
    pub fn split_value(&self, value: &str) -> Vec<String> {
        let tokens: Vec<&str> = match self.list_delimiter {
            Some(delimiter) => value.split(delimiter).collect(),
            None => vec![value],
        };
        tokens
            .into_iter()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Adds the content of a parsed document to this configuration.
    ///
    /// The document's root name replaces the current one; its attributes and
    /// children are appended after the existing ones, with list values split.
    pub fn merge(&mut self, document: ConfigNode) {
        let ConfigNode {
            name,
            attributes,
            children,
            ..
        } = document;

        self.root.name = name;
        let attributes = self.split_attributes(attributes);
        self.root.attributes.extend(attributes);
        for child in children {
            let nodes = self.split_node(child);
            self.root.children.extend(nodes);
        }
    }

    fn split_attributes(&self, attributes: Vec<ConfigNode>) -> Vec<ConfigNode> {
        let mut split = Vec::with_capacity(attributes.len());
        for attr in attributes {
            let Some(value) = attr.value else {
                continue;
            };
            for token in self.split_value(&value) {
                split.push(ConfigNode::with_value(attr.name.clone(), token));
            }
        }
        split
    }

    /// Splits the value of `node` into sibling nodes, recursively.
    ///
    /// The first token stays on the original node along with its attributes and
    /// children; each further token becomes a value-only sibling.
    fn split_node(&self, mut node: ConfigNode) -> Vec<ConfigNode> {
        node.attributes = self.split_attributes(mem::take(&mut node.attributes));

        let mut children = Vec::with_capacity(node.children.len());
        for child in mem::take(&mut node.children) {
            children.extend(self.split_node(child));
        }
        node.children = children;

        let mut tokens = match node.value.take() {
            Some(value) => self.split_value(&value).into_iter(),
            None => Vec::new().into_iter(),
        };
        node.value = tokens.next();

        let name = node.name.clone();
        let mut nodes = vec![node];
        nodes.extend(tokens.map(|token| ConfigNode::with_value(name.clone(), token)));
        nodes
    }

    fn addressable(key: &str) -> Option<KeyPath> {
        let path = KeyPath::parse(key);
        if path.is_empty() || path.attribute.as_deref() == Some("") {
            tracing::debug!("Ignoring key '{}': it addresses no element or attribute", key);
            return None;
        }
        Some(path)
    }
}

impl Default for HierarchicalConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Configuration for HierarchicalConfig {
    fn get_property(&self, key: &str) -> Option<PropertyValue> {
        PropertyValue::from_values(self.root.values_at(&KeyPath::parse(key)))
    }

    fn add_property(&mut self, key: &str, value: &str) {
        let Some(path) = Self::addressable(key) else {
            return;
        };
        for token in self.split_value(value) {
            self.root.append_value(&path, token);
        }
    }

    fn set_property(&mut self, key: &str, value: &str) {
        let Some(path) = Self::addressable(key) else {
            return;
        };
        let values = self.split_value(value);
        self.root.set_values(&path, values);
    }

    fn clear_property(&mut self, key: &str) {
        self.root.clear_values(&KeyPath::parse(key));
    }

    fn clear_tree(&mut self, key: &str) {
        let path = KeyPath::parse(key);
        if path.is_attribute() {
            self.root.clear_values(&path);
        } else {
            self.root.remove_path(&path.elements);
        }
    }

    fn get_keys(&self) -> Vec<ConfigKey> {
        self.root.keys().iter().map(ConfigKey::from).collect()
    }

    fn clear(&mut self) {
        self.root.children.clear();
        self.root.attributes.clear();
        self.root.value = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let config = HierarchicalConfig::new();
        assert!(config.is_empty());
        assert_eq!(config.root_name(), "configuration");
        assert_eq!(config.list_delimiter(), Some(','));
    }

    #[test]
    fn test_add_property_to_empty_configuration() {
        let mut config = HierarchicalConfig::new();
        config.add_property("test.string", "hello");
        assert_eq!(config.get_string("test.string").as_deref(), Some("hello"));
    }

    #[test]
    fn test_repeated_add_makes_list() {
        let mut config = HierarchicalConfig::new();
        config.add_property("test.array", "value1");
        config.add_property("test.array", "value2");

        let property = config.get_property("test.array").unwrap();
        assert!(property.is_list());
        assert_eq!(config.get_list("test.array"), vec!["value1", "value2"]);
    }

    #[test]
    fn test_add_splits_on_delimiter() {
        let mut config = HierarchicalConfig::new();
        config.add_property("servers", "a, b ,c");
        assert_eq!(config.get_list("servers"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_add_with_custom_delimiter() {
        let mut config = HierarchicalConfig::new();
        config.set_list_delimiter(Some(';'));
        config.add_property("path", "/bin;/usr/bin");
        config.add_property("csv", "a,b");
        assert_eq!(config.get_list("path"), vec!["/bin", "/usr/bin"]);
        assert_eq!(config.get_list("csv"), vec!["a,b"]);
    }

    #[test]
    fn test_values_are_trimmed() {
        let mut config = HierarchicalConfig::new();
        config.add_property("padded", "  padded ");
        config.set_property("e[@a]", " x ");
        assert_eq!(config.get_list("padded"), vec!["padded"]);
        assert_eq!(config.get_list("e[@a]"), vec!["x"]);

        config.set_list_delimiter(None);
        config.add_property("literal", " a, b ");
        assert_eq!(config.get_list("literal"), vec!["a, b"]);
    }

    #[test]
    fn test_empty_values_are_not_stored() {
        let mut config = HierarchicalConfig::new();
        config.add_property("empty", "");
        config.add_property("blank", "   ");
        config.add_property("e[@a]", "");
        assert!(config.is_empty());
        assert!(config.root().children.is_empty());
    }

    #[test]
    fn test_setting_empty_value_clears_key() {
        let mut config = HierarchicalConfig::new();
        config.add_property("k", "value");
        config.add_property("e[@a]", "value");

        config.set_property("k", "");
        config.set_property("e[@a]", " ");
        assert!(config.get_property("k").is_none());
        assert!(config.get_property("e[@a]").is_none());
        assert!(config.get_keys().is_empty());
    }

    #[test]
    fn test_only_delimiters_yield_nothing() {
        let mut config = HierarchicalConfig::new();
        config.add_property("k", ",");
        assert!(config.get_property("k").is_none());

        config.add_property("k", "kept");
        config.set_property("k", " , ,");
        assert!(config.get_property("k").is_none());
    }

    #[test]
    fn test_set_property_replaces_list() {
        let mut config = HierarchicalConfig::new();
        config.add_property("list.item", "one");
        config.add_property("list.item", "two");
        config.set_property("list.item", "only");
        assert_eq!(
            config.get_property("list.item"),
            Some(PropertyValue::Single("only".to_string()))
        );
    }

    #[test]
    fn test_set_and_clear_attribute() {
        let mut config = HierarchicalConfig::new();
        config.set_property("foo[@bar]", "value");
        assert_eq!(config.get_string("foo[@bar]").as_deref(), Some("value"));

        config.clear_property("foo[@bar]");
        assert!(config.get_property("foo[@bar]").is_none());
        assert!(config.root().children.is_empty());
    }

    #[test]
    fn test_root_attribute_key() {
        let mut config = HierarchicalConfig::new();
        config.set_property("[@version]", "3");
        assert_eq!(config.get_string("[@version]").as_deref(), Some("3"));
        assert_eq!(config.get_keys(), vec![ConfigKey::from("[@version]")]);
    }

    #[test]
    fn test_unaddressable_keys_are_ignored() {
        let mut config = HierarchicalConfig::new();
        config.add_property("", "x");
        config.add_property("...", "x");
        config.set_property("a[@]", "x");
        assert!(config.is_empty());
        assert!(config.get_property("").is_none());
    }

    #[test]
    fn test_clear_tree_removes_subtree() {
        let mut config = HierarchicalConfig::new();
        config.add_property("a.b.c", "1");
        config.add_property("a.d", "2");
        config.add_property("e", "3");

        config.clear_tree("a");
        assert_eq!(config.get_keys(), vec![ConfigKey::from("e")]);
    }

    #[test]
    fn test_clear_property_leaves_children() {
        let mut config = HierarchicalConfig::new();
        config.add_property("a", "parent");
        config.add_property("a.b", "child");

        // add_property("a.b") reuses the existing `a`
        assert_eq!(config.root().children.len(), 1);

        config.clear_property("a");
        assert!(config.get_property("a").is_none());
        assert_eq!(config.get_string("a.b").as_deref(), Some("child"));
    }

    #[test]
    fn test_merge_splits_loaded_values() {
        let mut document = ConfigNode::new("settings");
        let hosts = document.add_child(ConfigNode::with_value("hosts", "a,b"));
        hosts.add_attribute("ports", "80, 443");

        let mut config = HierarchicalConfig::new();
        config.merge(document);

        assert_eq!(config.root_name(), "settings");
        assert_eq!(config.get_list("hosts"), vec!["a", "b"]);
        assert_eq!(config.get_list("hosts[@ports]"), vec!["80", "443"]);
    }

    #[test]
    fn test_merge_without_delimiter_keeps_values() {
        let mut document = ConfigNode::new("configuration");
        document.add_child(ConfigNode::with_value("csv", "a,b"));

        let mut config = HierarchicalConfig::new();
        config.set_list_delimiter(None);
        config.merge(document);

        assert_eq!(config.get_list("csv"), vec!["a,b"]);
    }

    #[test]
    fn test_merge_appends_to_existing_content() {
        let mut config = HierarchicalConfig::new();
        config.add_property("item", "first");

        let mut document = ConfigNode::new("configuration");
        document.add_child(ConfigNode::with_value("item", "second"));
        config.merge(document);

        assert_eq!(config.get_list("item"), vec!["first", "second"]);
    }

    #[test]
    fn test_from_root_keeps_values_unsplit() {
        let mut root = ConfigNode::new("configuration");
        root.add_child(ConfigNode::with_value("csv", "a,b"));
        let config = HierarchicalConfig::from_root(root);
        assert_eq!(config.get_list("csv"), vec!["a,b"]);
    }
}
