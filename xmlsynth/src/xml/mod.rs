//! Owned XML document tree
//!
//! Sample documents are parsed into a small tree so the mapping and template
//! stages can ask structural questions (is this element a leaf, what is its
//! local name) without re-reading the event stream. Names and attributes are
//! kept exactly as written, namespace prefixes included, so a serialized tree
//! round-trips the source markup.

mod parse;
mod write;

pub use parse::parse_str;
pub use write::{to_xml_string, XmlWriter};

/// A parsed XML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Comments, processing instructions and doctype before the root
    pub prolog: Vec<Misc>,
    /// The root element
    pub root: Element,
    /// Comments and processing instructions after the root
    pub epilogue: Vec<Misc>,
}

/// Markup allowed outside the root element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Misc {
    /// `<!-- ... -->`
    Comment(String),
    /// `<? ... ?>` (not the XML declaration)
    ProcessingInstruction(String),
    /// `<!DOCTYPE ...>`
    DocType(String),
}

/// A child of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Nested element
    Element(Element),
    /// Character data, unescaped
    Text(String),
    /// `<![CDATA[ ... ]]>` section
    CData(String),
    /// Comment
    Comment(String),
    /// Processing instruction
    ProcessingInstruction(String),
}

/// An attribute with its value unescaped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Qualified name (`xmlns:nfe`, `Id`, ...)
    pub name: String,
    /// Unescaped value
    pub value: String,
}

/// An XML element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Qualified name as written, e.g. `nfe:xNome`
    pub name: String,
    /// Attributes in document order
    pub attributes: Vec<Attribute>,
    /// Child nodes in document order
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes or children
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Name without any namespace prefix
    ///
    /// ```rust
    /// use xmlsynth::xml::Element;
    ///
    /// assert_eq!(Element::new("nfe:xNome").local_name(), "xNome");
    /// assert_eq!(Element::new("CEP").local_name(), "CEP");
    /// ```
    #[must_use]
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    /// True when no child is an element
    ///
    /// Text-only and empty elements are leaves; an element with any child
    /// element is not, whatever text it also holds.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        !self
            .children
            .iter()
            .any(|child| matches!(child, Node::Element(_)))
    }

    /// Child elements, skipping text and comments
    #[must_use]
    pub fn child_elements(&self) -> impl DoubleEndedIterator<Item = &Self> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Concatenated text and CDATA directly inside this element
    #[must_use]
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                Node::Text(text) | Node::CData(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Depth-first pre-order iterator over this element and all descendants
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// All leaf elements in document order
    #[must_use]
    pub fn leaves(&self) -> impl Iterator<Item = &Self> {
        self.descendants().filter(|element| element.is_leaf())
    }

    /// Builder-style helper to append an attribute
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Builder-style helper to append a child node
    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Builder-style helper to append a text node
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Node::Text(text.into()))
    }
}

/// Iterator returned by [`Element::descendants`]
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        // Reverse so the first child is visited first.
        self.stack.extend(element.child_elements().rev());
        Some(element)
    }
}

/// Strip a `prefix:` from a qualified name
#[must_use]
pub fn local_name(qualified: &str) -> &str {
    qualified
        .rsplit_once(':')
        .map_or(qualified, |(_, local)| local)
}
