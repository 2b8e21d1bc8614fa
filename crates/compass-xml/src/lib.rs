//! Load CoMPASS settings exports into an owned element tree using quick-xml.
//!
//! The export encodes everything as nested child elements, so the tree keeps
//! tag names, direct text and children only. Attributes are dropped.

use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("xml: {0}")]
    Xml(String),
    #[error("invalid document: {0}")]
    Invalid(String),
}

/// One element of the settings tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Tag name as written in the document.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Trimmed direct text content, `None` when the element has no text.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// First direct child with the given tag name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// All direct children with the given tag name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Text of the first direct child with the given tag name.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(Element::text)
    }

    fn push_text(&mut self, text: &str) {
        match self.text.as_mut() {
            Some(existing) => existing.push_str(text),
            None => self.text = Some(text.to_string()),
        }
    }
}

/// Parsed settings document. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn into_root(self) -> Element {
        self.root
    }
}

/// Read and parse the settings file at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Document, XmlError> {
    let path = path.as_ref();
    let xml = fs::read_to_string(path).map_err(|source| XmlError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = xml.len(), "read settings file");
    parse(&xml)
}

/// Parse an XML string into a [`Document`].
///
/// Only well-formedness is checked: balanced tags and exactly one root
/// element. Comments, processing instructions and the doctype are skipped.
pub fn parse(xml: &str) -> Result<Document, XmlError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if stack.is_empty() && root.is_some() {
                    return Err(XmlError::Invalid("multiple root elements".into()));
                }
                stack.push(Element::new(element_name(&e)));
            }
            Ok(Event::Empty(e)) => {
                attach(&mut stack, &mut root, Element::new(element_name(&e)))?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| XmlError::Invalid("unexpected closing tag".into()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(|err| XmlError::Xml(err.to_string()))?;
                push_text(&mut stack, &text)?;
            }
            Ok(Event::CData(e)) => {
                let raw = e.into_inner();
                push_text(&mut stack, &String::from_utf8_lossy(&raw))?;
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(XmlError::Xml(err.to_string())),
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(XmlError::Invalid(format!("unclosed element <{}>", open.name)));
    }
    let root = root.ok_or_else(|| XmlError::Invalid("no root element".into()))?;
    debug!(root = %root.name, children = root.children.len(), "parsed settings document");
    Ok(Document { root })
}

fn element_name(event: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(event.name().as_ref()).to_string()
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XmlError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(XmlError::Invalid("multiple root elements".into()));
    }
    *root = Some(element);
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str) -> Result<(), XmlError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    match stack.last_mut() {
        Some(current) => {
            current.push_text(trimmed);
            Ok(())
        }
        None => Err(XmlError::Invalid(format!(
            "text outside the root element: {trimmed}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_nested_settings() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <configuration>
                <!-- exported by CoMPASS -->
                <board>
                    <id>1234</id>
                    <modelName>DT5730</modelName>
                    <parameters>
                        <entry>
                            <key>SRV_PARAM_RECLEN</key>
                            <value><value xsi:type="xs:string">1024</value></value>
                        </entry>
                    </parameters>
                </board>
                <board/>
            </configuration>
        "#;
        let doc = parse(xml).expect("parse xml");
        let root = doc.root();
        assert_eq!(root.name(), "configuration");
        assert_eq!(root.children_named("board").count(), 2);

        let board = root.child("board").expect("board");
        assert_eq!(board.child_text("id"), Some("1234"));
        assert_eq!(board.child_text("modelName"), Some("DT5730"));
        let entry = board
            .child("parameters")
            .and_then(|p| p.child("entry"))
            .expect("entry");
        assert_eq!(entry.child_text("key"), Some("SRV_PARAM_RECLEN"));
        let value = entry.child("value").expect("value");
        assert_eq!(value.text(), None);
        assert_eq!(value.child_text("value"), Some("1024"));
    }

    #[test]
    fn text_is_unescaped_and_cdata_kept() {
        let doc = parse("<a><b>x &amp; y</b><c><![CDATA[<raw>]]></c></a>").expect("parse");
        assert_eq!(doc.root().child_text("b"), Some("x & y"));
        assert_eq!(doc.root().child_text("c"), Some("<raw>"));
    }

    #[test]
    fn empty_elements_have_no_text() {
        let doc = parse("<a><b></b><c/></a>").expect("parse");
        assert_eq!(doc.root().child_text("b"), None);
        assert_eq!(doc.root().child_text("c"), None);
        assert!(doc.root().child("missing").is_none());
    }

    #[test]
    fn mismatched_tags_are_rejected() {
        let err = parse("<a><b></a>").unwrap_err();
        assert!(matches!(err, XmlError::Xml(_)), "unexpected error: {err:?}");
    }

    #[test]
    fn unclosed_root_is_rejected() {
        let err = parse("<a><b>1</b>").unwrap_err();
        assert!(matches!(err, XmlError::Invalid(ref msg) if msg.contains("<a>")));
    }

    #[test]
    fn empty_input_has_no_root() {
        let err = parse("  <!-- nothing -->  ").unwrap_err();
        assert!(matches!(err, XmlError::Invalid(_)));
    }

    #[test]
    fn second_root_is_rejected() {
        let err = parse("<a/><b/>").unwrap_err();
        assert!(matches!(err, XmlError::Invalid(ref msg) if msg.contains("multiple")));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = load("/nonexistent/compass/settings.xml").unwrap_err();
        match err {
            XmlError::Io { path, .. } => {
                assert_eq!(path, PathBuf::from("/nonexistent/compass/settings.xml"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn load_reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!("compass-xml-{}.xml", std::process::id()));
        fs::write(&path, "<root><board><id>7</id></board></root>").expect("write temp file");
        let doc = load(&path).expect("load");
        let _ = fs::remove_file(&path);
        assert_eq!(
            doc.root().child("board").and_then(|b| b.child_text("id")),
            Some("7")
        );
    }
}
