//! xmlsynth: synthetic XML documents from real samples
//!
//! Sample documents (typically Brazilian NF-e invoices) are read once. Every
//! leaf tag name is classified into a data category such as `person.name` or
//! `location.postcode`, and each sample becomes a template whose classified
//! leaves are placeholders. Rendering a template asks a [`ValueProvider`] for a
//! fresh value at every placeholder, so the generated documents keep the
//! structure of the samples while carrying fabricated data.
//!
//! # Pipeline
//!
//! 1. [`classify`]: tag name to [`DataPath`] via an ordered regex table
//! 2. [`mapping`]: one [`TagMapping`] per document, each name classified once
//! 3. [`template`]: the document tree with mapped leaves turned into slots
//! 4. [`render`]: pick templates at random and render them into a sink
//!
//! [`pipeline`] ties the first three together for a directory of samples.
//!
//! # Quick Start
//!
//! ```rust
//! use rand::{rngs::StdRng, SeedableRng};
//! use xmlsynth::prelude::*;
//!
//! # fn main() -> xmlsynth::SynthResult<()> {
//! let factory = TemplateFactory::default();
//! let template = factory.template_from_str(
//!     "sample.xml",
//!     "<emit><xNome>Acme Corp</xNome><CEP>01001-000</CEP></emit>",
//! )?;
//!
//! let driver = RenderDriver::new(vec![template], FakeProvider);
//! let mut documents: Vec<String> = Vec::new();
//! let report = driver.render_batch(3, &mut StdRng::seed_from_u64(7), &mut documents)?;
//!
//! assert_eq!(report.generated, 3);
//! assert!(documents.iter().all(|doc| !doc.contains("Acme Corp")));
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod mapping;
pub mod observability;
pub mod pipeline;
pub mod provider;
pub mod render;
pub mod template;
pub mod xml;

pub use error::{SynthError, SynthResult, XmlError};
pub use provider::{DataPath, ValueProvider};
pub use render::SENTINEL;

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! ```rust
    //! use xmlsynth::prelude::*;
    //! ```

    pub use crate::classify::{RuleSet, RuleSpec, TagClassifier};
    pub use crate::config::XmlSynthConfig;
    pub use crate::error::{SynthError, SynthResult};
    pub use crate::mapping::{MappingBuilder, TagMapping};
    pub use crate::pipeline::{IngestReport, TemplateFactory};
    pub use crate::provider::{DataPath, FakeProvider, ValueProvider};
    pub use crate::render::{BatchReport, DirectorySink, DocumentSink, RenderDriver, SENTINEL};
    pub use crate::template::{IgnoreSet, Template, TemplateBuilder};
}
