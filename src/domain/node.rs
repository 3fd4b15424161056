// SPDX-License-Identifier: MIT OR Apache-2.0

//! The in-memory configuration tree.
//!
//! Every XML element becomes a [`ConfigNode`]. Its trimmed text is the node's
//! value, nested elements are its children, and each attribute is a separate
//! attribute node. Repeated elements are sibling children sharing a name; an
//! attribute with several values is several attribute nodes sharing a name.
//!
//! Paths are matched against every node with the right name at each level, so a
//! lookup of `list.item` visits all `item` children of all `list` elements.

use crate::domain::config_key::KeyPath;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A node of the configuration tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigNode {
    /// Element or attribute name
    pub name: String,
    /// Text content; `None` for purely structural elements
    pub value: Option<String>,
    /// Nested elements in document order
    pub children: Vec<ConfigNode>,
    /// Attribute nodes in document order
    pub attributes: Vec<ConfigNode>,
}

impl ConfigNode {
    /// Creates a node without a value.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates a node holding `value`.
    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Appends a child element and returns it.
    pub fn add_child(&mut self, child: ConfigNode) -> &mut ConfigNode {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Appends an attribute value.
    pub fn add_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.push(ConfigNode::with_value(name, value));
    }

    /// First child named `name`.
    pub fn child(&self, name: &str) -> Option<&ConfigNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All children named `name`.
    pub fn children_named<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a ConfigNode> + 'n
    where
        'a: 'n,
    {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// All values of attribute `name`.
    pub fn attribute_values<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a str> + 'n
    where
        'a: 'n,
    {
        self.attributes
            .iter()
            .filter(move |a| a.name == name)
            .filter_map(|a| a.value.as_deref())
    }

    /// Attributes grouped by name, in order of first appearance.
    pub fn grouped_attributes(&self) -> Vec<(&str, Vec<&str>)> {
        let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
        for attr in &self.attributes {
            let Some(value) = attr.value.as_deref() else {
                continue;
            };
            match groups.iter_mut().find(|(name, _)| *name == attr.name) {
                Some((_, values)) => values.push(value),
                None => groups.push((attr.name.as_str(), vec![value])),
            }
        }
        groups
    }

    /// Returns `true` if the node carries nothing: no value, children or attributes.
    pub fn is_empty_leaf(&self) -> bool {
        self.value.is_none() && self.children.is_empty() && self.attributes.is_empty()
    }

    /// Finds every node reached by following `elements` from this node.
    ///
    /// An empty path yields this node itself.
    pub fn find(&self, elements: &[String]) -> Vec<&ConfigNode> {
        let mut found = Vec::new();
        self.collect_matches(elements, &mut found);
        found
    }

    fn collect_matches<'a>(&'a self, elements: &[String], found: &mut Vec<&'a ConfigNode>) {
        match elements.split_first() {
            None => found.push(self),
            Some((name, rest)) => {
                for child in self.children.iter().filter(|c| &c.name == name) {
                    child.collect_matches(rest, found);
                }
            }
        }
    }

    /// Calls `f` on every node reached by following `elements`.
    fn for_each_match_mut<F>(&mut self, elements: &[String], f: &mut F)
    where
        F: FnMut(&mut ConfigNode),
    {
        match elements.split_first() {
            None => f(self),
            Some((name, rest)) => {
                for child in self.children.iter_mut().filter(|c| &c.name == name) {
                    child.for_each_match_mut(rest, f);
                }
            }
        }
    }

    /// Walks `elements` downwards, reusing the last child of each name and
    /// creating the ones that are missing.
    pub fn ensure_path(&mut self, elements: &[String]) -> &mut ConfigNode {
        let mut node = self;
        for name in elements {
            let index = match node.children.iter().rposition(|c| &c.name == name) {
                Some(index) => index,
                None => {
                    node.children.push(ConfigNode::new(name.clone()));
                    node.children.len() - 1
                }
            };
            node = &mut node.children[index];
        }
        node
    }

    /// All values stored under `path`, in document order.
    pub fn values_at(&self, path: &KeyPath) -> Vec<String> {
        if path.is_empty() {
            return Vec::new();
        }
        let nodes = self.find(&path.elements);
        match &path.attribute {
            Some(attribute) => nodes
                .iter()
                .flat_map(|node| node.attribute_values(attribute))
                .map(str::to_string)
                .collect(),
            None => nodes.iter().filter_map(|node| node.value.clone()).collect(),
        }
    }

    /// Stores one more value under `path`.
    ///
    /// Elements are always appended as a new node, attributes as a new attribute
    /// node, so a second value for the same key forms a list.
    pub fn append_value(&mut self, path: &KeyPath, value: String) {
        match &path.attribute {
            Some(attribute) => {
                let target = self.ensure_path(&path.elements);
                target.add_attribute(attribute.clone(), value);
            }
            None => {
                let Some((last, parents)) = path.elements.split_last() else {
                    return;
                };
                let parent = self.ensure_path(parents);
                parent.add_child(ConfigNode::with_value(last.clone(), value));
            }
        }
    }

    /// Replaces the values stored under `path` with `values`.
    ///
    /// Existing nodes are overwritten in order. Extra values are appended;
    /// nodes left over lose their value and disappear once empty.
    pub fn set_values(&mut self, path: &KeyPath, values: Vec<String>) {
        if path.is_empty() {
            return;
        }
        let mut pending = values.into_iter();

        match &path.attribute {
            Some(attribute) => {
                self.for_each_match_mut(&path.elements, &mut |node| {
                    for attr in node.attributes.iter_mut().filter(|a| &a.name == attribute) {
                        attr.value = pending.next();
                    }
                    node.attributes.retain(|a| a.value.is_some());
                });
            }
            None => {
                self.for_each_match_mut(&path.elements, &mut |node| {
                    node.value = pending.next();
                });
            }
        }

        for value in pending {
            self.append_value(path, value);
        }
        self.prune_path(&path.elements);
    }

    /// Removes the values stored under `path`.
    ///
    /// Elements keep their children and attributes; elements left without any
    /// content are dropped. Nothing below `path` is touched.
    pub fn clear_values(&mut self, path: &KeyPath) {
        if path.is_empty() {
            return;
        }
        match &path.attribute {
            Some(attribute) => self.for_each_match_mut(&path.elements, &mut |node| {
                node.attributes.retain(|a| &a.name != attribute);
            }),
            None => self.for_each_match_mut(&path.elements, &mut |node| {
                node.value = None;
            }),
        }
        self.prune_path(&path.elements);
    }

    /// Removes every element matching `elements`, subtrees included.
    pub fn remove_path(&mut self, elements: &[String]) {
        let Some((last, parents)) = elements.split_last() else {
            return;
        };
        self.for_each_match_mut(parents, &mut |parent| {
            parent.children.retain(|c| &c.name != last);
        });
        self.prune_path(parents);
    }

    /// Drops empty leaves along `elements`, bottom-up.
    fn prune_path(&mut self, elements: &[String]) {
        let Some((name, rest)) = elements.split_first() else {
            return;
        };
        for child in self.children.iter_mut().filter(|c| &c.name == name) {
            child.prune_path(rest);
        }
        self.children.retain(|c| !(&c.name == name && c.is_empty_leaf()));
    }

    /// Every path below this node that holds a value.
    ///
    /// Paths are unique and appear in document order; an element's own key comes
    /// before its attribute keys.
    pub fn keys(&self) -> Vec<KeyPath> {
        let mut seen = HashSet::new();
        let mut keys = Vec::new();
        let mut prefix = Vec::new();
        self.push_attribute_keys(&prefix, &mut seen, &mut keys);
        for child in &self.children {
            child.collect_keys(&mut prefix, &mut seen, &mut keys);
        }
        keys
    }

    fn collect_keys(
        &self,
        prefix: &mut Vec<String>,
        seen: &mut HashSet<String>,
        keys: &mut Vec<KeyPath>,
    ) {
        prefix.push(self.name.clone());
        if self.value.is_some() {
            Self::push_key(KeyPath::element(prefix.iter().cloned()), seen, keys);
        }
        self.push_attribute_keys(prefix, seen, keys);
        for child in &self.children {
            child.collect_keys(prefix, seen, keys);
        }
        prefix.pop();
    }

    fn push_attribute_keys(
        &self,
        prefix: &[String],
        seen: &mut HashSet<String>,
        keys: &mut Vec<KeyPath>,
    ) {
        for attr in self.attributes.iter().filter(|a| a.value.is_some()) {
            let path = KeyPath::element(prefix.iter().cloned()).with_attribute(attr.name.clone());
            Self::push_key(path, seen, keys);
        }
    }

    fn push_key(path: KeyPath, seen: &mut HashSet<String>, keys: &mut Vec<KeyPath>) {
        if seen.insert(path.to_key()) {
            keys.push(path);
        }
    }
}
