//! Configuration management
//!
//! Settings are layered with figment, later sources winning:
//!
//! 1. Built-in defaults
//! 2. `./xmlsynth.toml`, or the file given explicitly (e.g. `--config`)
//! 3. Environment variables with the `XMLSYNTH_` prefix, `__` separating
//!    sections from keys (`XMLSYNTH_GENERATION__COUNT=50`)
//!
//! Command-line flags are applied on top by the caller.
//!
//! # Example Configuration
//!
//! ```toml
//! [generation]
//! count = 100
//! input_dir = "sampling_files"
//! output_dir = "output"
//! file_prefix = "generated"
//! seed = 42
//!
//! [templates]
//! ignore_tags = ["versao", "serie", "tpAmb"]
//!
//! [classifier]
//! include_defaults = true
//! rules = [{ pattern = "^xNome$", path = "company.company_name" }]
//! ```

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::classify::{RuleSet, RuleSpec};
use crate::error::{SynthError, SynthResult};
use crate::pipeline::TemplateFactory;
use crate::template::{IgnoreSet, DEFAULT_IGNORE_TAGS};

/// File looked up in the working directory when no path is given
pub const CONFIG_FILE: &str = "xmlsynth.toml";

/// Prefix of the environment variables read as configuration
pub const ENV_PREFIX: &str = "XMLSYNTH_";

/// Batch generation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Documents to generate per run
    pub count: usize,

    /// Directory holding the sample documents
    pub input_dir: PathBuf,

    /// Directory receiving generated documents
    pub output_dir: PathBuf,

    /// Output files are named `<file_prefix>_<NNNN>.xml`
    pub file_prefix: String,

    /// Fixed RNG seed for reproducible runs; entropy when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            count: 10,
            input_dir: PathBuf::from("sampling_files"),
            output_dir: PathBuf::from("output"),
            file_prefix: "generated".to_string(),
            seed: None,
        }
    }
}

/// Template construction settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Local tag names whose sample value is always kept
    pub ignore_tags: Vec<String>,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            ignore_tags: DEFAULT_IGNORE_TAGS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl TemplateSettings {
    /// The configured ignore set
    #[must_use]
    pub fn ignore_set(&self) -> IgnoreSet {
        self.ignore_tags.iter().cloned().collect()
    }
}

/// Tag classification settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    /// Append the built-in rules after the user rules
    pub include_defaults: bool,

    /// User rules, tried before the built-in ones
    pub rules: Vec<RuleSpec>,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            include_defaults: true,
            rules: Vec::new(),
        }
    }
}

impl ClassifierSettings {
    /// Compile the configured rules
    ///
    /// # Errors
    ///
    /// Returns an error if a user pattern is not a valid regex.
    pub fn rule_set(&self) -> SynthResult<RuleSet> {
        RuleSet::from_specs(&self.rules, self.include_defaults)
    }
}

/// Complete xmlsynth configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlSynthConfig {
    /// Batch generation settings
    #[serde(default)]
    pub generation: GenerationSettings,

    /// Template construction settings
    #[serde(default)]
    pub templates: TemplateSettings,

    /// Tag classification settings
    #[serde(default)]
    pub classifier: ClassifierSettings,
}

impl XmlSynthConfig {
    /// Load from defaults, `./xmlsynth.toml` when present, and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed or a value is invalid.
    pub fn load() -> SynthResult<Self> {
        let local = PathBuf::from(CONFIG_FILE);
        let figment = Self::defaults_figment()?;
        let figment = if local.exists() {
            figment.merge(Toml::file(&local))
        } else {
            figment
        };
        Self::from_figment(&figment.merge(env_provider()))
    }

    /// Load from defaults, the given file and the environment
    ///
    /// Unlike [`load`](Self::load), the file must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed, or a value is
    /// invalid.
    pub fn load_from(path: &Path) -> SynthResult<Self> {
        if !path.is_file() {
            return Err(SynthError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "configuration file not found"),
            ));
        }
        let figment = Self::defaults_figment()?
            .merge(Toml::file(path))
            .merge(env_provider());
        Self::from_figment(&figment)
    }

    /// [`load_from`](Self::load_from) when a path is given, else [`load`](Self::load)
    ///
    /// # Errors
    ///
    /// See the two loaders.
    pub fn load_with(path: Option<&Path>) -> SynthResult<Self> {
        path.map_or_else(Self::load, Self::load_from)
    }

    /// Extract and validate from an arbitrary figment
    ///
    /// # Errors
    ///
    /// Returns an error if extraction or validation fails.
    pub fn from_figment(figment: &Figment) -> SynthResult<Self> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that deserialize fine but cannot be used
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::InvalidConfig`] describing the first problem.
    pub fn validate(&self) -> SynthResult<()> {
        if self.generation.count == 0 {
            return Err(SynthError::InvalidConfig(
                "generation.count must be at least 1".to_string(),
            ));
        }
        let prefix = &self.generation.file_prefix;
        if prefix.is_empty() || prefix.contains(['/', '\\']) {
            return Err(SynthError::InvalidConfig(format!(
                "generation.file_prefix '{prefix}' must be a non-empty file name"
            )));
        }
        Ok(())
    }

    /// Factory built from the classifier and template settings
    ///
    /// # Errors
    ///
    /// Returns an error if a classifier rule does not compile.
    pub fn template_factory(&self) -> SynthResult<TemplateFactory> {
        Ok(TemplateFactory::new(
            self.classifier.rule_set()?,
            self.templates.ignore_set(),
        ))
    }

    fn defaults_figment() -> SynthResult<Figment> {
        Ok(Figment::new().merge(Toml::string(&toml::to_string(&Self::default())?)))
    }
}

fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).split("__").lowercase(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::TagClassifier;
    use figment::Jail;

    fn to_figment(err: SynthError) -> figment::Error {
        err.to_string().into()
    }

    #[test]
    fn test_default_config() {
        let config = XmlSynthConfig::default();
        assert_eq!(config.generation.count, 10);
        assert_eq!(config.generation.input_dir, PathBuf::from("sampling_files"));
        assert_eq!(config.generation.output_dir, PathBuf::from("output"));
        assert_eq!(config.generation.file_prefix, "generated");
        assert_eq!(config.generation.seed, None);
        assert!(config.classifier.include_defaults);
        assert!(config.templates.ignore_tags.iter().any(|tag| tag == "versao"));
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        Jail::expect_with(|_jail| {
            let config = XmlSynthConfig::load().map_err(to_figment)?;
            assert_eq!(config, XmlSynthConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_local_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                [generation]
                count = 3
                seed = 7

                [templates]
                ignore_tags = ["natOp"]
                "#,
            )?;
            let config = XmlSynthConfig::load().map_err(to_figment)?;
            assert_eq!(config.generation.count, 3);
            assert_eq!(config.generation.seed, Some(7));
            assert_eq!(config.generation.output_dir, PathBuf::from("output"));
            assert_eq!(config.templates.ignore_tags, vec!["natOp"]);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE, "[generation]\ncount = 3\nfile_prefix = \"nfe\"\n")?;
            jail.set_env("XMLSYNTH_GENERATION__COUNT", 25);
            let config = XmlSynthConfig::load().map_err(to_figment)?;
            assert_eq!(config.generation.count, 25);
            assert_eq!(config.generation.file_prefix, "nfe");
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_must_exist() {
        Jail::expect_with(|jail| {
            let missing = jail.directory().join("missing.toml");
            let err = XmlSynthConfig::load_from(&missing).unwrap_err();
            assert!(matches!(err, SynthError::Io { .. }));

            jail.create_file("custom.toml", "[generation]\ncount = 4\n")?;
            let config = XmlSynthConfig::load_with(Some(Path::new("custom.toml"))).map_err(to_figment)?;
            assert_eq!(config.generation.count, 4);
            Ok(())
        });
    }

    #[test]
    fn test_zero_count_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE, "[generation]\ncount = 0\n")?;
            let err = XmlSynthConfig::load().unwrap_err();
            assert!(matches!(err, SynthError::InvalidConfig(_)));
            Ok(())
        });
    }

    #[test]
    fn test_unknown_rule_path_is_a_config_error() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                "[classifier]\nrules = [{ pattern = \"x\", path = \"person.shoe_size\" }]\n",
            )?;
            let err = XmlSynthConfig::load().unwrap_err();
            assert!(matches!(err, SynthError::Config(_)));
            Ok(())
        });
    }

    #[test]
    fn test_user_rules_take_precedence() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                [classifier]
                rules = [{ pattern = "^xNome$", path = "company.company_name" }]
                "#,
            )?;
            let config = XmlSynthConfig::load().map_err(to_figment)?;
            let rules = config.classifier.rule_set().map_err(to_figment)?;
            assert_eq!(rules.infer("xNome"), Some("company.company_name".parse().unwrap()));
            assert_eq!(rules.infer("CEP"), Some("location.postcode".parse().unwrap()));
            Ok(())
        });
    }

    #[test]
    fn test_defaults_serialize_to_loadable_toml() {
        let text = toml::to_string(&XmlSynthConfig::default()).unwrap();
        let parsed: XmlSynthConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, XmlSynthConfig::default());
    }
}
