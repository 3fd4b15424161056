// SPDX-License-Identifier: MIT OR Apache-2.0

//! XML document format.
//!
//! Reading keeps elements, attributes, text and CDATA and drops comments,
//! processing instructions and the doctype. Writing produces a UTF-8 document
//! indented by two spaces.

use crate::domain::hierarchical::DEFAULT_LIST_DELIMITER;
use crate::domain::{ConfigError, ConfigNode, Result};
use crate::ports::ConfigFormat;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

const INDENT_CHAR: u8 = b' ';
const INDENT_SIZE: usize = 2;

/// quick-xml based implementation of [`ConfigFormat`].
///
/// Repeated attribute values cannot be expressed in XML, so they are joined
/// with the list delimiter when written.
///
/// # Examples
///
/// ```rust
/// use xmlcfg::adapters::XmlFormat;
/// use xmlcfg::ports::ConfigFormat;
///
/// let format = XmlFormat::new();
/// let root = format
///     .parse("<configuration><element3 name=\"foo\">value</element3></configuration>")
///     .unwrap();
///
/// let element3 = root.child("element3").unwrap();
/// assert_eq!(element3.value.as_deref(), Some("value"));
/// assert_eq!(element3.attribute_values("name").collect::<Vec<_>>(), vec!["foo"]);
/// ```
#[derive(Debug, Clone)]
pub struct XmlFormat {
    list_delimiter: char,
}

impl XmlFormat {
    /// Creates a format joining repeated attribute values with `,`.
    pub fn new() -> Self {
        Self {
            list_delimiter: DEFAULT_LIST_DELIMITER,
        }
    }

    /// Creates a format joining repeated attribute values with `delimiter`,
    /// falling back to `,` when splitting is disabled.
    pub fn with_list_delimiter(delimiter: Option<char>) -> Self {
        Self {
            list_delimiter: delimiter.unwrap_or(DEFAULT_LIST_DELIMITER),
        }
    }

    fn start_node(event: &BytesStart<'_>) -> Result<ConfigNode> {
        let mut node = ConfigNode::new(String::from_utf8_lossy(event.name().as_ref()));
        for attr in event.attributes() {
            let attr = attr.map_err(|e| ConfigError::parse("Invalid attribute", e))?;
            let value = attr
                .unescape_value()
                .map_err(|e| ConfigError::parse("Invalid attribute value", e))?;
            node.add_attribute(String::from_utf8_lossy(attr.key.as_ref()), value);
        }
        Ok(node)
    }

    fn close_node(
        node: ConfigNode,
        open: &mut [(ConfigNode, String)],
        root: &mut Option<ConfigNode>,
    ) -> Result<()> {
        if let Some((parent, _)) = open.last_mut() {
            parent.children.push(node);
            return Ok(());
        }
        if root.is_some() {
            return Err(ConfigError::ParseError {
                message: format!("Second root element <{}>", node.name),
                source: None,
            });
        }
        *root = Some(node);
        Ok(())
    }

    fn write_node(&self, writer: &mut Writer<Vec<u8>>, node: &ConfigNode) -> Result<()> {
        check_name("element", &node.name)?;
        let mut start = BytesStart::new(node.name.as_str());
        let delimiter = self.list_delimiter.to_string();
        for (name, values) in node.grouped_attributes() {
            check_name("attribute", name)?;
            start.push_attribute((name, values.join(&delimiter).as_str()));
        }

        if node.value.is_none() && node.children.is_empty() {
            return writer
                .write_event(Event::Empty(start))
                .map_err(|e| ConfigError::write("Failed to write element", e));
        }

        writer
            .write_event(Event::Start(start))
            .map_err(|e| ConfigError::write("Failed to write element", e))?;
        if let Some(value) = &node.value {
            writer
                .write_event(Event::Text(BytesText::new(value)))
                .map_err(|e| ConfigError::write("Failed to write text", e))?;
        }
        for child in &node.children {
            self.write_node(writer, child)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(node.name.as_str())))
            .map_err(|e| ConfigError::write("Failed to close element", e))
    }
}

/// Refuses names a reader could not parse back, so nothing unreadable is saved.
fn check_name(kind: &str, name: &str) -> Result<()> {
    if is_xml_name(name) {
        return Ok(());
    }
    Err(ConfigError::WriteError {
        message: format!("'{}' is not a valid XML {} name", name, kind),
        source: None,
    })
}

/// `Name` production of XML 1.0 (fifth edition).
fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_start_char(first) => chars.all(is_name_char),
        _ => false,
    }
}

fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | 'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}'
            | '\u{300}'..='\u{36F}'
            | '\u{203F}'..='\u{2040}')
}

impl Default for XmlFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigFormat for XmlFormat {
    fn parse(&self, content: &str) -> Result<ConfigNode> {
        let mut reader = Reader::from_str(content);
        // Elements still open, each with the text collected so far
        let mut open: Vec<(ConfigNode, String)> = Vec::new();
        let mut root = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => open.push((Self::start_node(&e)?, String::new())),
                Ok(Event::Empty(e)) => {
                    let node = Self::start_node(&e)?;
                    Self::close_node(node, &mut open, &mut root)?;
                }
                Ok(Event::End(_)) => {
                    let Some((mut node, text)) = open.pop() else {
                        return Err(ConfigError::ParseError {
                            message: "Closing tag without an open element".to_string(),
                            source: None,
                        });
                    };
                    let text = text.trim();
                    if !text.is_empty() {
                        node.value = Some(text.to_string());
                    }
                    Self::close_node(node, &mut open, &mut root)?;
                }
                Ok(Event::Text(e)) => {
                    if let Some((_, text)) = open.last_mut() {
                        let unescaped = e
                            .unescape()
                            .map_err(|e| ConfigError::parse("Invalid text content", e))?;
                        text.push_str(&unescaped);
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some((_, text)) = open.last_mut() {
                        text.push_str(&String::from_utf8_lossy(&e));
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    let context = format!("Malformed XML at byte {}", reader.buffer_position());
                    return Err(ConfigError::parse(&context, e));
                }
            }
        }

        if let Some((node, _)) = open.last() {
            return Err(ConfigError::ParseError {
                message: format!("Unexpected end of document inside <{}>", node.name),
                source: None,
            });
        }

        root.ok_or_else(|| ConfigError::ParseError {
            message: "Document has no root element".to_string(),
            source: None,
        })
    }

    fn write(&self, root: &ConfigNode) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), INDENT_CHAR, INDENT_SIZE);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(|e| ConfigError::write("Failed to write declaration", e))?;
        self.write_node(&mut writer, root)?;

        let mut document = String::from_utf8(writer.into_inner())
            .map_err(|e| ConfigError::write("Generated document is not UTF-8", e))?;
        document.push('\n');
        Ok(document)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["xml"]
    }
}
