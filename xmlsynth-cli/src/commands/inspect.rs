//! Single-sample inspection command

use anyhow::{Context, Result};
use console::style;
use std::fs;
use std::path::PathBuf;
use xmlsynth::config::XmlSynthConfig;
use xmlsynth::xml::parse_str;

/// Print the mapping and template skeleton inferred for one sample
pub struct InspectCommand {
    /// Sample document
    pub file: PathBuf,
    /// Print the mapping as JSON only
    pub json: bool,
    /// Explicit configuration file
    pub config: Option<PathBuf>,
}

impl InspectCommand {
    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        let config = XmlSynthConfig::load_with(self.config.as_deref())
            .context("Failed to load configuration")?;
        let factory = config
            .template_factory()
            .context("Failed to build tag classifier")?;

        let xml = fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read {}", self.file.display()))?;
        let document =
            parse_str(&xml).with_context(|| format!("Failed to parse {}", self.file.display()))?;
        let source = self.file.display().to_string();
        let (mapping, template) = factory
            .template_from_document(&source, &document)
            .with_context(|| format!("Failed to build template for {}", self.file.display()))?;

        if self.json {
            let json = serde_json::to_string_pretty(&mapping).context("Failed to encode mapping")?;
            println!("{json}");
            return Ok(());
        }

        let stats = template.stats();
        println!(
            "{} {}",
            style("Sample:").bold(),
            style(&source).cyan()
        );
        println!(
            "  {} leaves, {} generated, {} ignored",
            stats.leaves, stats.generated, stats.ignored
        );
        println!();
        println!("{}", style("Mapping:").bold());
        if mapping.is_empty() {
            println!("  {}", style("(no tag matched a rule)").dim());
        }
        let width = mapping.iter().map(|(tag, _)| tag.len()).max().unwrap_or(0);
        for (tag, path) in mapping.iter() {
            println!("  {tag:<width$}  {}", style(path).green());
        }
        println!();
        println!("{}", style("Template:").bold());
        print!("{}", template.skeleton().context("Failed to serialize template")?);
        Ok(())
    }
}
