//! Event-stream parser building the owned tree

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{Attribute, Document, Element, Misc, Node};
use crate::error::XmlError;

/// Parse a complete XML document
///
/// Whitespace-only text is dropped so the tree can be re-indented on output.
/// The XML declaration is not kept; serialization always writes a fresh one.
///
/// # Errors
///
/// Returns an error if the markup is not well-formed: mismatched or unclosed
/// tags, bad attributes or entities, text outside the root element, no root,
/// or more than one root.
///
/// # Example
///
/// ```rust
/// use xmlsynth::xml::parse_str;
///
/// let doc = parse_str("<nfe><xNome>Acme Corp</xNome></nfe>").unwrap();
/// assert_eq!(doc.root.name, "nfe");
/// ```
pub fn parse_str(input: &str) -> Result<Document, XmlError> {
    let mut reader = Reader::from_str(input);

    let mut prolog = Vec::new();
    let mut epilogue = Vec::new();
    let mut root: Option<Element> = None;
    let mut stack: Vec<Element> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(element_from_start(&start)?),
            Event::End(end) => {
                let element = stack.pop().ok_or_else(|| {
                    XmlError::UnexpectedEnd(String::from_utf8_lossy(end.name().as_ref()).into_owned())
                })?;
                attach(element, &mut stack, &mut root)?;
            }
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                attach(element, &mut stack, &mut root)?;
            }
            Event::Text(text) => {
                if is_blank(&text) {
                    continue;
                }
                let text = text.unescape()?.into_owned();
                match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::Text(text)),
                    None => return Err(XmlError::TextOutsideRoot(text)),
                }
            }
            Event::CData(cdata) => {
                let text = String::from_utf8_lossy(&cdata).into_owned();
                match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::CData(text)),
                    None => return Err(XmlError::TextOutsideRoot(text)),
                }
            }
            Event::Comment(comment) => {
                let text = String::from_utf8_lossy(&comment).into_owned();
                match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::Comment(text)),
                    None => outside_root(root.as_ref(), &mut prolog, &mut epilogue).push(Misc::Comment(text)),
                }
            }
            Event::PI(pi) => {
                let text = String::from_utf8_lossy(&pi).into_owned();
                match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::ProcessingInstruction(text)),
                    None => outside_root(root.as_ref(), &mut prolog, &mut epilogue)
                        .push(Misc::ProcessingInstruction(text)),
                }
            }
            Event::DocType(doctype) => {
                prolog.push(Misc::DocType(String::from_utf8_lossy(&doctype).into_owned()));
            }
            Event::Decl(_) => {}
            Event::Eof => break,
        }
    }

    if let Some(open) = stack.pop() {
        return Err(XmlError::UnclosedElement(open.name));
    }

    let root = root.ok_or(XmlError::MissingRoot)?;
    Ok(Document {
        prolog,
        root,
        epilogue,
    })
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element, XmlError> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    for attribute in start.attributes() {
        let attribute = attribute?;
        element.attributes.push(Attribute {
            name: String::from_utf8_lossy(attribute.key.as_ref()).into_owned(),
            value: attribute.unescape_value()?.into_owned(),
        });
    }
    Ok(element)
}

fn attach(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), XmlError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Element(element));
        return Ok(());
    }
    if root.is_some() {
        return Err(XmlError::MultipleRoots);
    }
    *root = Some(element);
    Ok(())
}

/// True when the raw text is only XML whitespace
fn is_blank(raw: &[u8]) -> bool {
    raw.iter().all(|byte| matches!(byte, b' ' | b'\t' | b'\n' | b'\r'))
}

const fn outside_root<'v>(
    root: Option<&Element>,
    prolog: &'v mut Vec<Misc>,
    epilogue: &'v mut Vec<Misc>,
) -> &'v mut Vec<Misc> {
    if root.is_some() {
        epilogue
    } else {
        prolog
    }
}
