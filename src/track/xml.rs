//! Shared XML plumbing for the GPX, KML and TCX formats.
//!
//! Reading goes through [`roxmltree`]; writing goes through [`XmlElement`],
//! an immutable element tree rendered with 2-space indentation.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use roxmltree::{Document, Node};

use crate::error::TrackconvError;

/// Parses an XML string, attributing failures to `path`.
pub(crate) fn parse<'input>(
    xml: &'input str,
    path: &Path,
) -> Result<Document<'input>, TrackconvError> {
    Document::parse(xml).map_err(|source| TrackconvError::XmlParse {
        path: path.to_path_buf(),
        message: source.to_string(),
    })
}

/// Finds the first direct child element named `tag`.
pub(crate) fn child_element<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == tag)
}

/// Trimmed text of the first direct child element named `tag`, if any.
pub(crate) fn optional_child_text(node: Node<'_, '_>, tag: &str) -> Option<String> {
    child_element(node, tag)
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}

/// Trimmed text of the first descendant element named `tag`, if any.
///
/// Mirrors DOM `getElementsByTagName` lookups, which search at any depth
/// (TCX keeps latitude/longitude nested inside `Position`).
pub(crate) fn optional_descendant_text(node: Node<'_, '_>, tag: &str) -> Option<String> {
    node.descendants()
        .find(|n| n.is_element() && n.tag_name().name() == tag)
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}

/// Like [`optional_descendant_text`], but a missing or empty element is a
/// parse failure.
pub(crate) fn required_descendant_text(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<String, TrackconvError> {
    optional_descendant_text(node, tag).ok_or_else(|| TrackconvError::XmlParse {
        path: path.to_path_buf(),
        message: format!("missing <{tag}> in {context}"),
    })
}

/// All descendant elements named `tag`, in document order.
pub(crate) fn elements_named<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.descendants()
        .filter(move |n| n.is_element() && n.tag_name().name() == tag)
}

/// One element of an XML document under construction.
///
/// An element carries either text content or child elements, never both;
/// that is all the track formats need.
#[derive(Clone, Debug)]
pub(crate) struct XmlElement {
    name: &'static str,
    attrs: Vec<(&'static str, String)>,
    text: Option<String>,
    children: Vec<XmlElement>,
}

impl XmlElement {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub(crate) fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub(crate) fn text(mut self, value: impl Into<String>) -> Self {
        self.text = Some(value.into());
        self
    }

    pub(crate) fn child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    /// Appends a child to an element that is still being assembled in a loop.
    pub(crate) fn push(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// Renders the document with an XML declaration and 2-space indentation.
    pub(crate) fn render(&self) -> String {
        let mut out = String::new();
        writeln!(out, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>").expect("write to string");
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        write!(out, "{indent}<{}", self.name).expect("write to string");
        for (name, value) in &self.attrs {
            write!(out, " {}=\"{}\"", name, xml_escape(value)).expect("write to string");
        }

        if !self.children.is_empty() {
            writeln!(out, ">").expect("write to string");
            for child in &self.children {
                child.render_into(out, depth + 1);
            }
            writeln!(out, "{indent}</{}>", self.name).expect("write to string");
        } else if let Some(text) = &self.text {
            writeln!(out, ">{}</{}>", xml_escape(text), self.name).expect("write to string");
        } else {
            writeln!(out, "/>").expect("write to string");
        }
    }

    /// Renders the document and writes it to `path`, overwriting it.
    pub(crate) fn write_file(&self, path: &Path) -> Result<(), TrackconvError> {
        fs::write(path, self.render()).map_err(|source| TrackconvError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })
    }
}

pub(crate) fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
