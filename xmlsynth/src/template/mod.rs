//! Templates built from sample documents
//!
//! A template is the sample's tree with mapped leaves swapped for
//! [`TemplateNode::Generated`] slots. Nothing is fabricated here: templates
//! are immutable, and every call to [`Template::render`] asks the resolver
//! for a fresh value per slot.
//!
//! # Example
//!
//! ```rust
//! use xmlsynth::classify::RuleSet;
//! use xmlsynth::mapping::MappingBuilder;
//! use xmlsynth::template::{IgnoreSet, TemplateBuilder};
//! use xmlsynth::xml::parse_str;
//!
//! let doc = parse_str("<emit><xNome>Acme Corp</xNome><versao>4.00</versao></emit>").unwrap();
//! let mapping = MappingBuilder::new(RuleSet::defaults()).build(&doc.root);
//! let template = TemplateBuilder::new(IgnoreSet::default()).build("sample.xml", &doc, &mapping);
//!
//! let xml = template.render(|path| format!("<{path}>")).unwrap();
//! assert!(xml.contains("<xNome>&lt;person.name&gt;</xNome>"));
//! assert!(xml.contains("<versao>4.00</versao>"));
//! ```

mod builder;

pub use builder::{IgnoreSet, TemplateBuilder, DEFAULT_IGNORE_TAGS};

use crate::error::XmlError;
use crate::provider::DataPath;
use crate::xml::{Attribute, Misc, Node, XmlWriter};

/// A node of a template tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateNode {
    /// A non-leaf element or a mapped leaf, re-emitted on each render
    Element(TemplateElement),
    /// Sample content copied through unchanged
    Literal(Node),
    /// Placeholder filled at render time
    Generated(DataPath),
}

/// An element re-emitted on every render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateElement {
    /// Qualified name as written in the sample
    pub name: String,
    /// Attributes as written in the sample
    pub attributes: Vec<Attribute>,
    /// Children in document order
    pub children: Vec<TemplateNode>,
}

impl TemplateElement {
    /// True when no child is an element, literal or not
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        !self.children.iter().any(|child| {
            matches!(
                child,
                TemplateNode::Element(_) | TemplateNode::Literal(Node::Element(_))
            )
        })
    }
}

/// Leaf counts collected while building a template
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemplateStats {
    /// Leaf elements in the sample
    pub leaves: usize,
    /// Leaves replaced by a placeholder
    pub generated: usize,
    /// Leaves kept because their name is in the ignore set
    pub ignored: usize,
    /// Distinct tag names in the mapping the template was built with
    pub mapped: usize,
}

/// An immutable, reusable document skeleton
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    prolog: Vec<Misc>,
    root: TemplateElement,
    epilogue: Vec<Misc>,
    stats: TemplateStats,
}

impl Template {
    /// Identifier of the sample this template came from
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Root of the template tree
    #[must_use]
    pub const fn root(&self) -> &TemplateElement {
        &self.root
    }

    /// Leaf counts
    #[must_use]
    pub const fn stats(&self) -> TemplateStats {
        self.stats
    }

    /// Placeholders in document order
    #[must_use]
    pub fn placeholders(&self) -> Vec<DataPath> {
        let mut found = Vec::new();
        collect_placeholders(&self.root, &mut found);
        found
    }

    /// Render a concrete document, calling `resolve` once per placeholder
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render<F>(&self, mut resolve: F) -> Result<String, XmlError>
    where
        F: FnMut(DataPath) -> String,
    {
        self.write(&mut |writer, path| writer.text(&resolve(path)))
    }

    /// Serialize the template itself, placeholders shown as `{{ gen('path') }}`
    ///
    /// The output is deterministic for a given sample and mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn skeleton(&self) -> Result<String, XmlError> {
        self.write(&mut |writer, path| writer.raw_text(&format!("{{{{ gen('{path}') }}}}")))
    }

    fn write(&self, slot: &mut SlotWriter<'_>) -> Result<String, XmlError> {
        let mut writer = XmlWriter::new();
        writer.declaration()?;
        for misc in &self.prolog {
            writer.misc(misc)?;
        }
        write_element(&mut writer, &self.root, slot)?;
        for misc in &self.epilogue {
            writer.misc(misc)?;
        }
        writer.finish()
    }
}

type SlotWriter<'a> = dyn FnMut(&mut XmlWriter, DataPath) -> Result<(), XmlError> + 'a;

fn write_element(
    writer: &mut XmlWriter,
    element: &TemplateElement,
    slot: &mut SlotWriter<'_>,
) -> Result<(), XmlError> {
    if element.children.is_empty() {
        return writer.empty(&element.name, &element.attributes);
    }
    if element.is_leaf() {
        return writer.inline_element(&element.name, &element.attributes, |inner| {
            write_children(inner, element, slot)
        });
    }
    writer.start(&element.name, &element.attributes)?;
    write_children(writer, element, slot)?;
    writer.end(&element.name)
}

fn write_children(
    writer: &mut XmlWriter,
    element: &TemplateElement,
    slot: &mut SlotWriter<'_>,
) -> Result<(), XmlError> {
    for child in &element.children {
        match child {
            TemplateNode::Element(inner) => write_element(writer, inner, slot)?,
            TemplateNode::Literal(node) => writer.node(node)?,
            TemplateNode::Generated(path) => slot(writer, *path)?,
        }
    }
    Ok(())
}

fn collect_placeholders(element: &TemplateElement, found: &mut Vec<DataPath>) {
    for child in &element.children {
        match child {
            TemplateNode::Element(inner) => collect_placeholders(inner, found),
            TemplateNode::Generated(path) => found.push(*path),
            TemplateNode::Literal(_) => {}
        }
    }
}
