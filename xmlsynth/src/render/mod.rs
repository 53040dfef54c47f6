//! Batch rendering
//!
//! The driver owns the template pool for one run. Each iteration picks a
//! template uniformly at random (with replacement) and renders it with a
//! resolver that asks the provider for a fresh value per placeholder. No
//! state survives from one render to the next.

mod sink;

pub use sink::{DirectorySink, DocumentSink};

use std::path::PathBuf;

use rand::seq::SliceRandom;
use rand::RngCore;
use tracing::{debug, info, warn};

use crate::error::{SynthResult, XmlError};
use crate::provider::ValueProvider;
use crate::template::Template;

/// Substituted for any placeholder the provider cannot fill
///
/// The built-in provider never produces this string.
pub const SENTINEL: &str = "UNKNOWN";

/// Outcome of a batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Documents asked for
    pub requested: usize,
    /// Documents actually written
    pub generated: usize,
    /// Files written, in order; empty for sinks that are not files
    pub outputs: Vec<PathBuf>,
}

/// Renders documents from a pool of templates
#[derive(Debug)]
pub struct RenderDriver<P> {
    templates: Vec<Template>,
    provider: P,
}

impl<P: ValueProvider> RenderDriver<P> {
    /// Take ownership of the template pool
    pub const fn new(templates: Vec<Template>, provider: P) -> Self {
        Self {
            templates,
            provider,
        }
    }

    /// Templates in the pool
    #[must_use]
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Render one template with fresh values
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render(&self, template: &Template, rng: &mut dyn RngCore) -> Result<String, XmlError> {
        template.render(|path| {
            self.provider
                .value_for(path, rng)
                .unwrap_or_else(|| SENTINEL.to_string())
        })
    }

    /// Render `count` documents into `sink`
    ///
    /// An empty pool generates nothing and is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or the sink fails; documents already
    /// written stay written.
    pub fn render_batch<S: DocumentSink + ?Sized>(
        &self,
        count: usize,
        rng: &mut dyn RngCore,
        sink: &mut S,
    ) -> SynthResult<BatchReport> {
        self.render_batch_with_progress(count, rng, sink, |_| {})
    }

    /// Like [`render_batch`](Self::render_batch), calling `on_rendered` with
    /// the 1-based index after each document is written
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or the sink fails.
    pub fn render_batch_with_progress<S, F>(
        &self,
        count: usize,
        rng: &mut dyn RngCore,
        sink: &mut S,
        mut on_rendered: F,
    ) -> SynthResult<BatchReport>
    where
        S: DocumentSink + ?Sized,
        F: FnMut(usize),
    {
        let mut report = BatchReport {
            requested: count,
            ..BatchReport::default()
        };
        if self.templates.is_empty() {
            warn!(requested = count, "template pool is empty, nothing to generate");
            return Ok(report);
        }

        sink.begin(count)?;
        for index in 1..=count {
            let Some(template) = self.templates.choose(rng) else {
                break;
            };
            let document = self.render(template, rng)?;
            if let Some(path) = sink.write(index, &document)? {
                report.outputs.push(path);
            }
            debug!(index, source = template.source(), "rendered document");
            report.generated += 1;
            on_rendered(index);
        }

        info!(generated = report.generated, "batch complete");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::RuleSet;
    use crate::mapping::MappingBuilder;
    use crate::provider::{DataPath, FakeProvider};
    use crate::template::TemplateBuilder;
    use crate::xml::parse_str;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Knows no path at all
    struct NullProvider;

    impl ValueProvider for NullProvider {
        fn value_for(&self, _path: DataPath, _rng: &mut dyn RngCore) -> Option<String> {
            None
        }
    }

    fn template(xml: &str) -> Template {
        let doc = parse_str(xml).unwrap();
        let mapping = MappingBuilder::new(RuleSet::defaults()).build(&doc.root);
        TemplateBuilder::default().build("t.xml", &doc, &mapping)
    }

    fn leaf_texts(xml: &str, local: &str) -> Vec<String> {
        parse_str(xml)
            .unwrap()
            .root
            .leaves()
            .filter(|leaf| leaf.local_name() == local)
            .map(crate::xml::Element::text)
            .collect()
    }

    #[test]
    fn test_acme_render_replaces_value_with_fabricated_name() {
        let driver = RenderDriver::new(
            vec![template("<emit><xNome>Acme Corp</xNome></emit>")],
            FakeProvider,
        );
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let xml = driver.render(&driver.templates()[0], &mut rng).unwrap();
            let names = leaf_texts(&xml, "xNome");
            assert_eq!(names.len(), 1);
            assert!(!names[0].is_empty());
            assert_ne!(names[0], "Acme Corp");
            assert_eq!(names[0].split(' ').count(), 3, "{}", names[0]);
        }
    }

    #[test]
    fn test_repeated_tag_resolves_independently() {
        let driver = RenderDriver::new(
            vec![template(
                "<nfe><dest><CEP>01001000</CEP></dest><entrega><CEP>01001000</CEP></entrega></nfe>",
            )],
            FakeProvider,
        );
        assert_eq!(
            driver.templates()[0].placeholders(),
            vec![
                "location.postcode".parse::<DataPath>().unwrap(),
                "location.postcode".parse::<DataPath>().unwrap()
            ]
        );

        let mut rng = StdRng::seed_from_u64(2);
        let differs = (0..20).any(|_| {
            let xml = driver.render(&driver.templates()[0], &mut rng).unwrap();
            let values = leaf_texts(&xml, "CEP");
            values[0] != values[1]
        });
        assert!(differs, "two CEP leaves never received different values");
    }

    #[test]
    fn test_unresolvable_paths_render_sentinel() {
        let driver = RenderDriver::new(
            vec![template("<r><xNome>a</xNome><CEP>b</CEP><natOp>c</natOp></r>")],
            NullProvider,
        );
        let mut rng = StdRng::seed_from_u64(3);
        let xml = driver.render(&driver.templates()[0], &mut rng).unwrap();
        assert_eq!(leaf_texts(&xml, "xNome"), vec![SENTINEL]);
        assert_eq!(leaf_texts(&xml, "CEP"), vec![SENTINEL]);
        assert_eq!(leaf_texts(&xml, "natOp"), vec!["c"]);
    }

    #[test]
    fn test_structure_is_identical_across_seeds() {
        let source = r#"<NFe versao="4.00"><emit><CNPJ>1</CNPJ><xNome>A</xNome></emit><det nItem="1"><xProd>P</xProd></det></NFe>"#;
        let driver = RenderDriver::new(vec![template(source)], FakeProvider);

        let one = driver
            .render(&driver.templates()[0], &mut StdRng::seed_from_u64(10))
            .unwrap();
        let two = driver
            .render(&driver.templates()[0], &mut StdRng::seed_from_u64(20))
            .unwrap();
        assert_ne!(one, two);

        // Blank out leaf text and the documents must match byte for byte.
        let mut a = parse_str(&one).unwrap();
        let mut b = parse_str(&two).unwrap();
        blank_leaves(&mut a.root);
        blank_leaves(&mut b.root);
        assert_eq!(a, b);
    }

    fn blank_leaves(element: &mut crate::xml::Element) {
        if element.is_leaf() {
            element.children.clear();
            return;
        }
        for child in &mut element.children {
            if let crate::xml::Node::Element(inner) = child {
                blank_leaves(inner);
            }
        }
    }

    #[test]
    fn test_empty_pool_generates_nothing() {
        let driver = RenderDriver::new(Vec::new(), FakeProvider);
        let mut sink: Vec<String> = Vec::new();
        let report = driver
            .render_batch(5, &mut StdRng::seed_from_u64(0), &mut sink)
            .unwrap();
        assert_eq!(report.requested, 5);
        assert_eq!(report.generated, 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_batch_draws_from_every_template() {
        let driver = RenderDriver::new(
            vec![template("<a><CEP>1</CEP></a>"), template("<b><CEP>1</CEP></b>")],
            FakeProvider,
        );
        let mut sink: Vec<String> = Vec::new();
        let mut seen = Vec::new();
        let report = driver
            .render_batch_with_progress(40, &mut StdRng::seed_from_u64(4), &mut sink, |i| seen.push(i))
            .unwrap();

        assert_eq!(report.generated, 40);
        assert_eq!(seen, (1..=40).collect::<Vec<_>>());
        assert!(sink.iter().any(|doc| doc.contains("<a>")));
        assert!(sink.iter().any(|doc| doc.contains("<b>")));
    }

    #[test]
    fn test_same_seed_same_batch() {
        let driver = RenderDriver::new(
            vec![
                template("<a><xNome>x</xNome><CEP>1</CEP></a>"),
                template("<b><CNPJ>1</CNPJ><vProd>2</vProd></b>"),
            ],
            FakeProvider,
        );
        let mut first: Vec<String> = Vec::new();
        let mut second: Vec<String> = Vec::new();
        driver
            .render_batch(10, &mut StdRng::seed_from_u64(99), &mut first)
            .unwrap();
        driver
            .render_batch(10, &mut StdRng::seed_from_u64(99), &mut second)
            .unwrap();
        assert_eq!(first, second);
    }
}
