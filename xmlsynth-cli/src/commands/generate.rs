//! Batch generation command

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use xmlsynth::config::{GenerationSettings, XmlSynthConfig};
use xmlsynth::pipeline::IngestReport;
use xmlsynth::prelude::{DirectorySink, FakeProvider, RenderDriver};

/// Build templates from samples and write a batch of documents
pub struct GenerateCommand {
    /// Overrides `generation.count`
    pub count: Option<usize>,
    /// Overrides `generation.input_dir`
    pub input: Option<PathBuf>,
    /// Overrides `generation.output_dir`
    pub output: Option<PathBuf>,
    /// Overrides `generation.seed`
    pub seed: Option<u64>,
    /// Overrides `generation.file_prefix`
    pub prefix: Option<String>,
    /// Explicit configuration file
    pub config: Option<PathBuf>,
}

impl GenerateCommand {
    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        let mut config = XmlSynthConfig::load_with(self.config.as_deref())
            .context("Failed to load configuration")?;
        self.apply_overrides(&mut config.generation);
        config.validate().context("Invalid configuration")?;
        let settings = &config.generation;
        tracing::debug!(?settings, "resolved generation settings");

        let factory = config
            .template_factory()
            .context("Failed to build tag classifier")?;

        println!(
            "{} {}",
            style("Reading samples from").green().bold(),
            style(settings.input_dir.display()).cyan()
        );
        let report = factory.ingest_dir(&settings.input_dir).with_context(|| {
            format!("Failed to read sample directory: {}", settings.input_dir.display())
        })?;
        print_ingest(&report);

        if report.templates.is_empty() {
            println!();
            println!(
                "{}",
                style("No templates available; nothing generated.").yellow().bold()
            );
            println!(
                "  Add sample XML files to {} and run again.",
                style(settings.input_dir.display()).cyan()
            );
            return Ok(());
        }

        let mut rng = settings
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let mut sink = DirectorySink::new(&settings.output_dir, settings.file_prefix.as_str())
            .with_context(|| {
                format!("Failed to create output directory: {}", settings.output_dir.display())
            })?;
        let driver = RenderDriver::new(report.templates, FakeProvider);

        let progress = ProgressBar::new(u64::try_from(settings.count).unwrap_or(u64::MAX));
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .context("Failed to set progress style")?
                .progress_chars("=> "),
        );
        progress.set_message("rendering");

        let batch = driver
            .render_batch_with_progress(settings.count, &mut rng, &mut sink, |_| progress.inc(1))
            .with_context(|| {
                format!("Failed to write documents to {}", settings.output_dir.display())
            });
        progress.finish_and_clear();
        let batch = batch?;

        println!();
        println!(
            "{} {} document(s) in {}",
            style("✓ Generated").green().bold(),
            style(batch.generated).cyan().bold(),
            style(settings.output_dir.display()).cyan()
        );
        Ok(())
    }

    fn apply_overrides(&self, settings: &mut GenerationSettings) {
        if let Some(count) = self.count {
            settings.count = count;
        }
        if let Some(input) = &self.input {
            settings.input_dir.clone_from(input);
        }
        if let Some(output) = &self.output {
            settings.output_dir.clone_from(output);
        }
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if let Some(prefix) = &self.prefix {
            settings.file_prefix.clone_from(prefix);
        }
    }
}

fn print_ingest(report: &IngestReport) {
    println!("  {} {}", style("Source documents found:").bold(), report.found);
    println!(
        "  {} {}",
        style("Templates built:").bold(),
        report.templates.len()
    );
    for template in &report.templates {
        println!(
            "    - Processed {} (Mapped {} tags)",
            style(template.source()).cyan(),
            template.stats().mapped
        );
    }
    for failure in &report.failures {
        println!(
            "  {} {}: {}",
            style("✗").red().bold(),
            failure.path.display(),
            failure.error
        );
    }
}
