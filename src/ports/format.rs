// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document format trait definition.
//!
//! A format turns the text of a configuration file into a [`ConfigNode`] tree and
//! back. The tree keeps element nesting, repetition and attributes, so a format
//! only has to deal with syntax.

use crate::domain::{ConfigNode, Result};

/// A text format for hierarchical configuration documents.
///
/// # Examples
///
/// ```rust
/// use xmlcfg::domain::{ConfigNode, Result};
/// use xmlcfg::ports::ConfigFormat;
///
/// /// One `name=value` pair per line, all directly below the root.
/// struct LineFormat;
///
/// impl ConfigFormat for LineFormat {
///     fn parse(&self, content: &str) -> Result<ConfigNode> {
///         let mut root = ConfigNode::new("configuration");
///         for (name, value) in content.lines().filter_map(|l| l.split_once('=')) {
///             root.add_child(ConfigNode::with_value(name, value));
///         }
///         Ok(root)
///     }
///
///     fn write(&self, root: &ConfigNode) -> Result<String> {
///         Ok(root
///             .children
///             .iter()
///             .filter_map(|c| c.value.as_ref().map(|v| format!("{}={}\n", c.name, v)))
///             .collect())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["lines"]
///     }
/// }
///
/// let root = LineFormat.parse("a=1\nb=2").unwrap();
/// assert_eq!(LineFormat.write(&root).unwrap(), "a=1\nb=2\n");
/// ```
pub trait ConfigFormat {
    /// Parses a document into a tree rooted at its document element.
    ///
    /// # Errors
    ///
    /// `ConfigError::ParseError` if the content is not a well-formed document.
    fn parse(&self, content: &str) -> Result<ConfigNode>;

    /// Renders a tree as a document.
    ///
    /// # Errors
    ///
    /// `ConfigError::WriteError` if the tree cannot be expressed in this format.
    fn write(&self, root: &ConfigNode) -> Result<String>;

    /// File extensions (without the dot) this format reads and writes.
    fn supported_extensions(&self) -> &[&str];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConfigError;

    /// Flat `name=value` lines, enough to exercise the contract.
    struct LineFormat;

    impl ConfigFormat for LineFormat {
        fn parse(&self, content: &str) -> Result<ConfigNode> {
            let mut root = ConfigNode::new("configuration");
            for line in content.lines().filter(|l| !l.trim().is_empty()) {
                let (name, value) = line.split_once('=').ok_or_else(|| ConfigError::ParseError {
                    message: format!("missing '=' in line '{}'", line),
                    source: None,
                })?;
                root.add_child(ConfigNode::with_value(name.trim(), value.trim()));
            }
            Ok(root)
        }

        fn write(&self, root: &ConfigNode) -> Result<String> {
            let mut out = String::new();
            for child in &root.children {
                if !child.children.is_empty() {
                    return Err(ConfigError::WriteError {
                        message: format!("element '{}' is nested", child.name),
                        source: None,
                    });
                }
                if let Some(value) = &child.value {
                    out.push_str(&format!("{}={}\n", child.name, value));
                }
            }
            Ok(out)
        }

        fn supported_extensions(&self) -> &[&str] {
            &["lines"]
        }
    }

    #[test]
    fn test_format_parse() {
        let root = LineFormat.parse("element = value\n\nother=1").unwrap();
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.child("element").unwrap().value.as_deref(), Some("value"));
    }

    #[test]
    fn test_format_parse_error() {
        let result = LineFormat.parse("no separator");
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_format_write() {
        let root = LineFormat.parse("a=1\nb=2").unwrap();
        assert_eq!(LineFormat.write(&root).unwrap(), "a=1\nb=2\n");
    }

    #[test]
    fn test_format_write_error() {
        let mut root = ConfigNode::new("configuration");
        root.add_child(ConfigNode::new("outer"))
            .add_child(ConfigNode::with_value("inner", "x"));
        assert!(matches!(
            LineFormat.write(&root),
            Err(ConfigError::WriteError { .. })
        ));
    }

    #[test]
    fn test_format_as_trait_object() {
        let format: Box<dyn ConfigFormat> = Box::new(LineFormat);
        assert_eq!(format.supported_extensions(), &["lines"]);
    }
}
