//! Turning a sample document plus its mapping into a template

use std::collections::HashSet;

use super::{Template, TemplateElement, TemplateNode, TemplateStats};
use crate::mapping::TagMapping;
use crate::xml::{Document, Element, Node};

/// Structural NF-e tags that must keep their sample value
pub const DEFAULT_IGNORE_TAGS: &[&str] = &[
    "versao",
    "verProc",
    "version",
    "schemaVersion",
    "tpAmb",
    "tpEmis",
    "finNFe",
    "mod",
    "serie",
    "DigestValue",
    "SignatureValue",
    "X509Certificate",
];

/// Local tag names that are never replaced, whatever the mapping says
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreSet {
    tags: HashSet<String>,
}

impl Default for IgnoreSet {
    fn default() -> Self {
        DEFAULT_IGNORE_TAGS.iter().copied().collect()
    }
}

impl IgnoreSet {
    /// An ignore set with no entries
    #[must_use]
    pub fn empty() -> Self {
        Self {
            tags: HashSet::new(),
        }
    }

    /// True when `tag_name` must be preserved
    #[must_use]
    pub fn contains(&self, tag_name: &str) -> bool {
        self.tags.contains(tag_name)
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// True when nothing is ignored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Builds templates; holds the ignore set shared by every document
#[derive(Debug, Clone, Default)]
pub struct TemplateBuilder {
    ignore: IgnoreSet,
}

impl TemplateBuilder {
    /// Create a builder with the given ignore set
    #[must_use]
    pub const fn new(ignore: IgnoreSet) -> Self {
        Self { ignore }
    }

    /// The ignore set in use
    #[must_use]
    pub const fn ignore_set(&self) -> &IgnoreSet {
        &self.ignore
    }

    /// Build a template from `document` using `mapping`
    ///
    /// For every leaf: ignored names and unmapped names are copied verbatim;
    /// mapped names get their text and CDATA replaced by a single placeholder
    /// (comments and processing instructions inside the leaf stay). Element
    /// names, attributes and order never change.
    #[must_use]
    pub fn build(&self, source: &str, document: &Document, mapping: &TagMapping) -> Template {
        let mut stats = TemplateStats {
            mapped: mapping.len(),
            ..TemplateStats::default()
        };
        let root = match self.convert(&document.root, mapping, &mut stats) {
            TemplateNode::Element(root) => root,
            // A leaf root left untouched still needs an element wrapper.
            other => TemplateElement {
                name: document.root.name.clone(),
                attributes: document.root.attributes.clone(),
                children: literal_children(&document.root, other),
            },
        };
        Template {
            source: source.to_string(),
            prolog: document.prolog.clone(),
            root,
            epilogue: document.epilogue.clone(),
            stats,
        }
    }

    fn convert(&self, element: &Element, mapping: &TagMapping, stats: &mut TemplateStats) -> TemplateNode {
        if !element.is_leaf() {
            let children = element
                .children
                .iter()
                .map(|child| match child {
                    Node::Element(inner) => self.convert(inner, mapping, stats),
                    other => TemplateNode::Literal(other.clone()),
                })
                .collect();
            return TemplateNode::Element(TemplateElement {
                name: element.name.clone(),
                attributes: element.attributes.clone(),
                children,
            });
        }

        stats.leaves += 1;
        let tag = element.local_name();
        if self.ignore.contains(tag) {
            stats.ignored += 1;
            return TemplateNode::Literal(Node::Element(element.clone()));
        }
        let Some(path) = mapping.get(tag) else {
            return TemplateNode::Literal(Node::Element(element.clone()));
        };

        stats.generated += 1;
        let mut children = vec![TemplateNode::Generated(path)];
        children.extend(
            element
                .children
                .iter()
                .filter(|child| matches!(child, Node::Comment(_) | Node::ProcessingInstruction(_)))
                .cloned()
                .map(TemplateNode::Literal),
        );
        TemplateNode::Element(TemplateElement {
            name: element.name.clone(),
            attributes: element.attributes.clone(),
            children,
        })
    }
}

fn literal_children(root: &Element, converted: TemplateNode) -> Vec<TemplateNode> {
    match converted {
        TemplateNode::Literal(Node::Element(element)) => {
            element.children.into_iter().map(TemplateNode::Literal).collect()
        }
        _ => root.children.iter().cloned().map(TemplateNode::Literal).collect(),
    }
}
