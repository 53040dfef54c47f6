//! Sample ingestion
//!
//! Reads a directory of sample documents and turns each into a template. A
//! document that cannot be read, parsed or serialized is reported and
//! skipped; it never stops the others.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::classify::{RuleSet, TagClassifier};
use crate::error::{SynthError, SynthResult};
use crate::mapping::{MappingBuilder, TagMapping};
use crate::template::{IgnoreSet, Template, TemplateBuilder};
use crate::xml::{parse_str, Document};

/// A sample that produced no template
#[derive(Debug)]
pub struct DocumentFailure {
    /// The offending file
    pub path: PathBuf,
    /// What went wrong
    pub error: SynthError,
}

/// Outcome of [`TemplateFactory::ingest_dir`]
#[derive(Debug, Default)]
pub struct IngestReport {
    /// `*.xml` files found
    pub found: usize,
    /// Templates built, in file-name order
    pub templates: Vec<Template>,
    /// Files that were skipped
    pub failures: Vec<DocumentFailure>,
}

/// Classifier plus ignore set: everything needed to go from sample to template
#[derive(Debug, Clone)]
pub struct TemplateFactory<C = RuleSet> {
    mapper: MappingBuilder<C>,
    builder: TemplateBuilder,
}

impl Default for TemplateFactory {
    fn default() -> Self {
        Self::new(RuleSet::defaults(), IgnoreSet::default())
    }
}

impl<C: TagClassifier> TemplateFactory<C> {
    /// Combine a classifier and an ignore set
    pub const fn new(classifier: C, ignore: IgnoreSet) -> Self {
        Self {
            mapper: MappingBuilder::new(classifier),
            builder: TemplateBuilder::new(ignore),
        }
    }

    /// Infer the tag mapping of a parsed document
    #[must_use]
    pub fn mapping(&self, document: &Document) -> TagMapping {
        self.mapper.build(&document.root)
    }

    /// Map and template a parsed document
    ///
    /// The template is serialized once here so that a document whose
    /// template cannot be written fails now rather than during a batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be serialized.
    pub fn template_from_document(
        &self,
        source: &str,
        document: &Document,
    ) -> SynthResult<(TagMapping, Template)> {
        let mapping = self.mapping(document);
        let template = self.builder.build(source, document, &mapping);
        template.skeleton()?;
        let stats = template.stats();
        debug!(
            source,
            mapped = mapping.len(),
            leaves = stats.leaves,
            generated = stats.generated,
            ignored = stats.ignored,
            "built template"
        );
        Ok((mapping, template))
    }

    /// Parse, map and template an in-memory document
    ///
    /// # Errors
    ///
    /// Returns an error if `xml` is not well formed or the template cannot
    /// be serialized.
    pub fn template_from_str(&self, source: &str, xml: &str) -> SynthResult<Template> {
        let document = parse_str(xml)?;
        let (_, template) = self.template_from_document(source, &document)?;
        Ok(template)
    }

    /// Read, parse, map and template one file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its content is
    /// rejected by [`template_from_str`](Self::template_from_str).
    pub fn template_from_file(&self, path: &Path) -> SynthResult<Template> {
        let xml = std::fs::read_to_string(path).map_err(|source| SynthError::io(path, source))?;
        self.template_from_str(&source_name(path), &xml)
    }

    /// Build a template for every `*.xml` file directly inside `dir`
    ///
    /// A missing directory is created and yields an empty report. Files are
    /// processed in file-name order.
    ///
    /// # Errors
    ///
    /// Returns an error only if the directory itself cannot be created or
    /// listed; per-document problems land in [`IngestReport::failures`].
    pub fn ingest_dir(&self, dir: &Path) -> SynthResult<IngestReport> {
        let files = list_samples(dir)?;
        let mut report = IngestReport {
            found: files.len(),
            ..IngestReport::default()
        };

        for path in files {
            match self.template_from_file(&path) {
                Ok(template) => report.templates.push(template),
                Err(error) => {
                    warn!(path = %path.display(), %error, "skipping sample document");
                    report.failures.push(DocumentFailure { path, error });
                }
            }
        }

        info!(
            dir = %dir.display(),
            found = report.found,
            templates = report.templates.len(),
            failed = report.failures.len(),
            "ingested samples"
        );
        Ok(report)
    }
}

/// `*.xml` files directly inside `dir`, sorted by name
///
/// # Errors
///
/// Returns an error if `dir` cannot be created or read.
pub fn list_samples(dir: &Path) -> SynthResult<Vec<PathBuf>> {
    if !dir.exists() {
        info!(dir = %dir.display(), "input directory missing, creating it");
        std::fs::create_dir_all(dir).map_err(|source| SynthError::io(dir, source))?;
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|err| SynthError::io(dir, err.into()))?;
        if entry.file_type().is_file() && is_xml(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn is_xml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}
