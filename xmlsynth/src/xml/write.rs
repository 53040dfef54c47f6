//! Pretty-printing serializer

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::{Attribute, Document, Element, Misc, Node};
use crate::error::XmlError;

/// Indentation width used for every emitted document
const INDENT: usize = 2;

/// Serialize a document with an XML declaration and 2-space indentation
///
/// # Errors
///
/// Returns an error if the writer fails, which for an in-memory buffer only
/// happens on malformed content.
pub fn to_xml_string(document: &Document) -> Result<String, XmlError> {
    let mut writer = XmlWriter::new();
    writer.declaration()?;
    for misc in &document.prolog {
        writer.misc(misc)?;
    }
    writer.element(&document.root)?;
    for misc in &document.epilogue {
        writer.misc(misc)?;
    }
    writer.finish()
}

/// Streaming writer shared by document serialization and template rendering
pub struct XmlWriter {
    inner: Writer<Vec<u8>>,
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlWriter {
    /// Create a writer over an in-memory buffer
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Writer::new_with_indent(Vec::new(), b' ', INDENT),
        }
    }

    const fn compact() -> Self {
        Self {
            inner: Writer::new(Vec::new()),
        }
    }

    /// Write `<?xml version="1.0" encoding="UTF-8"?>`
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn declaration(&mut self) -> Result<(), XmlError> {
        self.inner
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(())
    }

    /// Write markup found outside the root element
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn misc(&mut self, misc: &Misc) -> Result<(), XmlError> {
        match misc {
            Misc::Comment(text) => self.comment(text),
            Misc::ProcessingInstruction(text) => self.processing_instruction(text),
            Misc::DocType(text) => {
                self.inner
                    .write_event(Event::DocType(BytesText::from_escaped(text.as_str())))?;
                Ok(())
            }
        }
    }

    /// Write a whole element subtree
    ///
    /// Leaf content is written on the same line as its tags, so a leaf holding
    /// text and a comment gains no whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn element(&mut self, element: &Element) -> Result<(), XmlError> {
        if element.children.is_empty() {
            return self.empty(&element.name, &element.attributes);
        }
        if element.is_leaf() {
            return self.inline_element(&element.name, &element.attributes, |inner| {
                element.children.iter().try_for_each(|child| inner.node(child))
            });
        }
        self.start(&element.name, &element.attributes)?;
        for child in &element.children {
            self.node(child)?;
        }
        self.end(&element.name)
    }

    /// Write an element whose content is produced by `content` without any
    /// indentation
    ///
    /// # Errors
    ///
    /// Returns an error if `content` or the underlying writer fails.
    pub fn inline_element<F>(
        &mut self,
        name: &str,
        attributes: &[Attribute],
        content: F,
    ) -> Result<(), XmlError>
    where
        F: FnOnce(&mut Self) -> Result<(), XmlError>,
    {
        let mut inner = Self::compact();
        content(&mut inner)?;
        let fragment = String::from_utf8(inner.inner.into_inner())?;
        self.start(name, attributes)?;
        self.raw_text(&fragment)?;
        self.end(name)
    }

    /// Write one child node
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn node(&mut self, node: &Node) -> Result<(), XmlError> {
        match node {
            Node::Element(element) => self.element(element),
            Node::Text(text) => self.text(text),
            Node::CData(text) => {
                self.inner.write_event(Event::CData(BytesCData::new(text.as_str())))?;
                Ok(())
            }
            Node::Comment(text) => self.comment(text),
            Node::ProcessingInstruction(text) => self.processing_instruction(text),
        }
    }

    /// Open an element
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn start(&mut self, name: &str, attributes: &[Attribute]) -> Result<(), XmlError> {
        self.inner
            .write_event(Event::Start(start_tag(name, attributes)))?;
        Ok(())
    }

    /// Close an element
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn end(&mut self, name: &str) -> Result<(), XmlError> {
        self.inner.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Write a self-closing element
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn empty(&mut self, name: &str, attributes: &[Attribute]) -> Result<(), XmlError> {
        self.inner
            .write_event(Event::Empty(start_tag(name, attributes)))?;
        Ok(())
    }

    /// Write escaped character data
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn text(&mut self, text: &str) -> Result<(), XmlError> {
        self.inner.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    /// Write character data that is already escaped
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn raw_text(&mut self, text: &str) -> Result<(), XmlError> {
        self.inner
            .write_event(Event::Text(BytesText::from_escaped(text)))?;
        Ok(())
    }

    /// Write a comment verbatim
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn comment(&mut self, text: &str) -> Result<(), XmlError> {
        self.inner
            .write_event(Event::Comment(BytesText::from_escaped(text)))?;
        Ok(())
    }

    /// Write a processing instruction verbatim
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn processing_instruction(&mut self, text: &str) -> Result<(), XmlError> {
        self.inner.write_event(Event::PI(BytesPI::new(text)))?;
        Ok(())
    }

    /// Consume the writer and return the document text, newline-terminated
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is not valid UTF-8.
    pub fn finish(self) -> Result<String, XmlError> {
        let mut output = String::from_utf8(self.inner.into_inner())?;
        output.push('\n');
        Ok(output)
    }
}

fn start_tag<'a>(name: &'a str, attributes: &'a [Attribute]) -> BytesStart<'a> {
    let mut start = BytesStart::new(name);
    for attribute in attributes {
        start.push_attribute((attribute.name.as_str(), attribute.value.as_str()));
    }
    start
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_str;

    #[test]
    fn test_serialize_pretty_prints_with_declaration() {
        let doc = parse_str("<root a=\"1\"><child>text</child><empty/></root>").unwrap();
        let xml = to_xml_string(&doc).unwrap();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <root a=\"1\">\n  <child>text</child>\n  <empty/>\n</root>\n"
        );
    }

    #[test]
    fn test_serialize_escapes_text_and_attributes() {
        let doc = parse_str(r#"<r q="a &amp; b"><t>1 &lt; 2</t></r>"#).unwrap();
        let xml = to_xml_string(&doc).unwrap();
        assert!(xml.contains(r#"q="a &amp; b""#));
        assert!(xml.contains("<t>1 &lt; 2</t>"));
    }

    #[test]
    fn test_leaf_with_comment_stays_on_one_line() {
        let doc = parse_str("<r><natOp> VENDA <!-- op --></natOp><b/></r>").unwrap();
        let xml = to_xml_string(&doc).unwrap();
        assert!(xml.contains("\n  <natOp> VENDA <!-- op --></natOp>\n  <b/>\n"), "{xml}");
    }

    #[test]
    fn test_serialize_round_trip_is_stable() {
        let source = r#"<!-- generated --><nfe:NFe xmlns:nfe="urn:nfe"><nfe:ide><nfe:cUF>35</nfe:cUF></nfe:ide></nfe:NFe>"#;
        let first = to_xml_string(&parse_str(source).unwrap()).unwrap();
        let second = to_xml_string(&parse_str(&first).unwrap()).unwrap();
        assert_eq!(first, second);
        assert!(first.contains("<!-- generated -->"));
        assert!(first.contains(r#"<nfe:NFe xmlns:nfe="urn:nfe">"#));
    }
}
