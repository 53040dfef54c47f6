//! Per-document tag mapping

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::classify::TagClassifier;
use crate::provider::DataPath;
use crate::xml::Element;

/// Tag name (local, namespace stripped) to data path, for one document
///
/// Keyed by name rather than node, so every leaf sharing a name shares the
/// outcome of the first inference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagMapping {
    entries: BTreeMap<String, DataPath>,
}

impl TagMapping {
    /// Path assigned to `tag_name`, if any
    #[must_use]
    pub fn get(&self, tag_name: &str) -> Option<DataPath> {
        self.entries.get(tag_name).copied()
    }

    /// True when `tag_name` has a path
    #[must_use]
    pub fn contains(&self, tag_name: &str) -> bool {
        self.entries.contains_key(tag_name)
    }

    /// Number of mapped tag names
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was mapped
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in tag-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, DataPath)> {
        self.entries.iter().map(|(tag, path)| (tag.as_str(), *path))
    }
}

impl FromIterator<(String, DataPath)> for TagMapping {
    fn from_iter<I: IntoIterator<Item = (String, DataPath)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Builds a [`TagMapping`] by classifying each distinct leaf name once
#[derive(Debug, Clone)]
pub struct MappingBuilder<C> {
    classifier: C,
}

impl<C: TagClassifier> MappingBuilder<C> {
    /// Wrap a classifier
    pub const fn new(classifier: C) -> Self {
        Self { classifier }
    }

    /// The wrapped classifier
    pub const fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Classify every leaf under `root`
    ///
    /// The classifier runs once per distinct local name; misses are cached
    /// too, and dropped from the result.
    pub fn build(&self, root: &Element) -> TagMapping {
        let mut seen: HashMap<&str, Option<DataPath>> = HashMap::new();
        for leaf in root.leaves() {
            seen.entry(leaf.local_name())
                .or_insert_with_key(|tag| self.classifier.infer(tag));
        }
        seen.into_iter()
            .filter_map(|(tag, path)| path.map(|path| (tag.to_string(), path)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::RuleSet;
    use crate::xml::{parse_str, Node};
    use std::cell::RefCell;

    struct CountingClassifier {
        inner: RuleSet,
        calls: RefCell<Vec<String>>,
    }

    impl TagClassifier for CountingClassifier {
        fn infer(&self, tag_name: &str) -> Option<DataPath> {
            self.calls.borrow_mut().push(tag_name.to_string());
            self.inner.infer(tag_name)
        }
    }

    const INVOICE: &str = r#"<nfe:NFe xmlns:nfe="http://www.portalfiscal.inf.br/nfe">
      <nfe:emit>
        <nfe:CNPJ>11222333000181</nfe:CNPJ>
        <nfe:xNome>Acme Corp</nfe:xNome>
        <nfe:enderEmit>
          <nfe:xLgr>Rua A</nfe:xLgr>
          <nfe:CEP>01001000</nfe:CEP>
        </nfe:enderEmit>
      </nfe:emit>
      <nfe:dest>
        <nfe:xNome>Fulano</nfe:xNome>
        <nfe:enderDest>
          <nfe:CEP>20040002</nfe:CEP>
        </nfe:enderDest>
      </nfe:dest>
      <nfe:natOp>Venda</nfe:natOp>
    </nfe:NFe>"#;

    fn path(text: &str) -> DataPath {
        text.parse().unwrap()
    }

    #[test]
    fn test_acme_scenario_maps_xnome_to_person_name() {
        let doc = parse_str("<emit><xNome>Acme Corp</xNome></emit>").unwrap();
        let mapping = MappingBuilder::new(RuleSet::defaults()).build(&doc.root);
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get("xNome"), Some(path("person.name")));
    }

    #[test]
    fn test_mapping_strips_namespaces_and_skips_unmatched() {
        let doc = parse_str(INVOICE).unwrap();
        let mapping = MappingBuilder::new(RuleSet::defaults()).build(&doc.root);

        let entries: Vec<_> = mapping.iter().map(|(t, p)| (t.to_string(), p.to_string())).collect();
        assert_eq!(
            entries,
            vec![
                ("CEP".to_string(), "location.postcode".to_string()),
                ("CNPJ".to_string(), "company.cnpj".to_string()),
                ("xLgr".to_string(), "location.street".to_string()),
                ("xNome".to_string(), "person.name".to_string()),
            ]
        );
        assert!(!mapping.contains("natOp"));
        assert!(!mapping.contains("nfe:CEP"));
    }

    #[test]
    fn test_classifier_runs_once_per_distinct_tag() {
        let doc = parse_str(INVOICE).unwrap();
        let classifier = CountingClassifier {
            inner: RuleSet::defaults(),
            calls: RefCell::new(Vec::new()),
        };
        let builder = MappingBuilder::new(&classifier);
        builder.build(&doc.root);

        let mut calls = classifier.calls.borrow().clone();
        calls.sort();
        // CEP and xNome appear twice each but are classified once; the
        // unmatched natOp is classified once as well.
        assert_eq!(calls, vec!["CEP", "CNPJ", "natOp", "xLgr", "xNome"]);
    }

    #[test]
    fn test_non_leaf_names_are_never_mapped() {
        // <CEP> here has a child element, so it is not a leaf.
        let doc = parse_str("<r><CEP><inner>x</inner></CEP><fone>1</fone></r>").unwrap();
        let mapping = MappingBuilder::new(RuleSet::defaults()).build(&doc.root);
        assert!(!mapping.contains("CEP"));
        assert_eq!(mapping.get("fone"), Some(path("person.phone")));
    }

    #[test]
    fn test_mapping_only_contains_leaf_names() {
        let doc = parse_str(INVOICE).unwrap();
        let mapping = MappingBuilder::new(RuleSet::defaults()).build(&doc.root);
        let leaf_names: Vec<_> = doc.root.leaves().map(Element::local_name).collect();
        for (tag, _) in mapping.iter() {
            assert!(leaf_names.contains(&tag), "{tag} is not a leaf");
        }
    }

    #[test]
    fn test_traversal_order_does_not_matter() {
        let doc = parse_str(INVOICE).unwrap();
        let builder = MappingBuilder::new(RuleSet::defaults());
        let forward = builder.build(&doc.root);

        let mut reversed = doc.root.clone();
        reverse_children(&mut reversed);
        let backward = builder.build(&reversed);

        assert_eq!(forward, backward);
        assert_eq!(forward, builder.build(&doc.root));
    }

    fn reverse_children(element: &mut Element) {
        element.children.reverse();
        for child in &mut element.children {
            if let Node::Element(inner) = child {
                reverse_children(inner);
            }
        }
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let doc = parse_str("<r><CEP>1</CEP></r>").unwrap();
        let mapping = MappingBuilder::new(RuleSet::defaults()).build(&doc.root);
        let text = toml::to_string(&mapping).unwrap();
        assert_eq!(text.trim(), r#"CEP = "location.postcode""#);
    }
}
