//! Minimal owned element tree over `quick-xml` events.
//!
//! JANE answers with small documents (at most a few hundred nodes), so the
//! response is materialized once and then queried positionally, which the
//! author layout needs.

use crate::utils::error::{JaneError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// First descendant named `name`, in document order.
    pub fn find(&self, name: &str) -> Option<&Element> {
        for child in self.child_elements() {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.find(name) {
                return Some(found);
            }
        }
        None
    }

    /// Every descendant named `name`, in document order.
    pub fn find_all(&self, name: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect(name, &mut found);
        found
    }

    fn collect<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        for child in self.child_elements() {
            if child.name == name {
                found.push(child);
            }
            child.collect(name, found);
        }
    }

    /// Text of the first child node, if that node is text.
    pub fn first_text(&self) -> Option<&str> {
        match self.children.first() {
            Some(Node::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(Node::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(Node::Text(text.to_string()));
        }
    }
}

fn element_from(start: &BytesStart<'_>) -> Result<Element> {
    let name = String::from_utf8_lossy(start.name().as_ref()).to_ascii_lowercase();
    let mut element = Element::new(name);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| JaneError::decode(format!("bad attribute: {}", e)))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase();
        let value = attr
            .unescape_value()
            .map_err(|e| JaneError::decode(format!("bad attribute value: {}", e)))?;
        element.attributes.push((key, value.into_owned()));
    }

    Ok(element)
}

/// Parses `text` into a synthetic `#document` element holding the top-level nodes.
pub fn parse_document(text: &str) -> Result<Element> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack = vec![Element::new("#document")];

    loop {
        let event = reader.read_event().map_err(|e| {
            JaneError::decode(format!(
                "malformed xml at byte {}: {}",
                reader.buffer_position(),
                e
            ))
        })?;

        match event {
            Event::Start(start) => stack.push(element_from(&start)?),
            Event::Empty(start) => {
                let element = element_from(&start)?;
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Element(element));
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| JaneError::decode("unexpected closing tag"))?;
                let parent = stack
                    .last_mut()
                    .ok_or_else(|| JaneError::decode("unexpected closing tag"))?;
                parent.children.push(Node::Element(element));
            }
            Event::Text(raw) => {
                let text = raw
                    .unescape()
                    .map_err(|e| JaneError::decode(format!("bad text content: {}", e)))?;
                if let Some(current) = stack.last_mut() {
                    if !text.is_empty() {
                        current.push_text(&text);
                    }
                }
            }
            Event::CData(raw) => {
                let bytes = raw.into_inner();
                let text = String::from_utf8_lossy(&bytes);
                let text = text.trim();
                if let Some(current) = stack.last_mut() {
                    if !text.is_empty() {
                        current.push_text(text);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if stack.len() != 1 {
        let open = stack.last().map(|el| el.name.clone()).unwrap_or_default();
        return Err(JaneError::decode(format!("unclosed element <{}>", open)));
    }

    let document = stack
        .pop()
        .ok_or_else(|| JaneError::decode("empty document"))?;
    if document.child_elements().next().is_none() {
        return Err(JaneError::decode("document has no root element"));
    }

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_document() {
        let doc = parse_document(
            r#"<?xml version="1.0"?>
            <Results>
                <journal rank="1" score="90"><journalname>Nature &amp; Co</journalname></journal>
                <journal rank="2" score="80"/>
            </Results>"#,
        )
        .unwrap();

        let results = doc.find("results").unwrap();
        let journals: Vec<_> = results.child_elements().collect();
        assert_eq!(journals.len(), 2);
        assert_eq!(journals[0].attr("rank"), Some("1"));
        assert_eq!(
            journals[0].find("journalname").and_then(|n| n.first_text()),
            Some("Nature & Co")
        );
        assert_eq!(journals[1].attr("score"), Some("80"));
        assert!(journals[1].children.is_empty());
    }

    #[test]
    fn test_find_all_is_document_ordered_and_recursive() {
        let doc = parse_document(
            "<a><b>1</b><c><b>2</b><d><b>3</b></d></c><b>4</b></a>",
        )
        .unwrap();

        let texts: Vec<_> = doc
            .find_all("b")
            .into_iter()
            .filter_map(|b| b.first_text())
            .collect();
        assert_eq!(texts, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_cdata_text() {
        let doc = parse_document("<title><![CDATA[Fish <and> chips]]></title>").unwrap();
        assert_eq!(
            doc.find("title").and_then(|t| t.first_text()),
            Some("Fish <and> chips")
        );
    }

    #[test]
    fn test_malformed_documents_are_decode_errors() {
        for text in ["", "   ", "<a><b></a>", "<a><b>", "just text"] {
            let err = parse_document(text).unwrap_err();
            assert!(
                matches!(err, JaneError::DecodeError { .. }),
                "{:?} should be a decode error, got {:?}",
                text,
                err
            );
        }
    }
}
