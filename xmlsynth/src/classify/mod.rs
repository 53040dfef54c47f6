//! Tag classification
//!
//! Maps a bare tag name to the [`DataPath`] that should fill it. Matching is
//! purely lexical: a case-insensitive regex search over the tag name, first
//! rule wins. Nothing about the tag's value, position or ancestors is
//! consulted, so a name shared by different kinds of data (NF-e uses `xNome`
//! for both people and companies) always resolves to whichever rule comes
//! first. More specific patterns must therefore precede general ones.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{SynthError, SynthResult};
use crate::provider::{CompanyField, DataPath, LocationField, PersonField, ProductField};

/// Infers a data path from a namespace-stripped tag name
pub trait TagClassifier {
    /// Best path for `tag_name`, or `None` when nothing matches
    fn infer(&self, tag_name: &str) -> Option<DataPath>;
}

impl<C: TagClassifier + ?Sized> TagClassifier for &C {
    fn infer(&self, tag_name: &str) -> Option<DataPath> {
        (**self).infer(tag_name)
    }
}

/// Built-in rules tuned for Brazilian fiscal documents. Order matters.
pub const DEFAULT_RULES: &[(&str, DataPath)] = &[
    ("CNPJ", DataPath::Company(CompanyField::Cnpj)),
    ("CPF", DataPath::Person(PersonField::Cpf)),
    ("IE", DataPath::Company(CompanyField::Ie)),
    ("xFant", DataPath::Company(CompanyField::FantasyName)),
    ("razSocial", DataPath::Company(CompanyField::CompanyName)),
    // Address: NF-e tags and generic Portuguese names
    ("xLgr|Logradouro", DataPath::Location(LocationField::Street)),
    ("nro|Numero", DataPath::Location(LocationField::Number)),
    ("xBairro|Bairro", DataPath::Location(LocationField::District)),
    ("xMun|Cidade", DataPath::Location(LocationField::CityName)),
    ("cMun", DataPath::Location(LocationField::CityCode)),
    ("UF|Estado", DataPath::Location(LocationField::StateAbbr)),
    ("CEP", DataPath::Location(LocationField::Postcode)),
    // Product / fiscal
    ("xProd|Descricao", DataPath::Product(ProductField::Description)),
    ("NCM", DataPath::Product(ProductField::Ncm)),
    ("cEAN|EAN", DataPath::Product(ProductField::Ean)),
    ("vProd|ValorTotal|vUn|ValorUnit", DataPath::Product(ProductField::Price)),
    // Person / contact. xNome is ambiguous; it stays person.name.
    ("xNome|Nome", DataPath::Person(PersonField::Name)),
    ("email", DataPath::Person(PersonField::Email)),
    ("fone|Telefone", DataPath::Person(PersonField::Phone)),
];

/// A user-supplied rule as it appears in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Regex searched case-insensitively in the tag name
    pub pattern: String,
    /// Path the matching tags are filled with
    pub path: DataPath,
}

/// One compiled classification rule
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    path: DataPath,
}

impl Rule {
    /// Compile a rule; the pattern always matches case-insensitively
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::InvalidPattern`] if the regex does not compile.
    pub fn new(pattern: &str, path: DataPath) -> SynthResult<Self> {
        let compiled = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| SynthError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self {
            pattern: compiled,
            path,
        })
    }

    /// Source text of the pattern
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Path this rule assigns
    #[must_use]
    pub const fn path(&self) -> DataPath {
        self.path
    }

    /// True when the pattern occurs anywhere in `tag_name`
    #[must_use]
    pub fn matches(&self, tag_name: &str) -> bool {
        self.pattern.is_match(tag_name)
    }
}

/// Ordered rule table; the first matching rule wins
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::defaults()
    }
}

impl RuleSet {
    /// An empty rule set that classifies nothing
    #[must_use]
    pub const fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// The built-in [`DEFAULT_RULES`]
    ///
    /// # Panics
    ///
    /// Panics if a built-in pattern fails to compile, which the unit tests
    /// rule out.
    #[must_use]
    pub fn defaults() -> Self {
        let rules = DEFAULT_RULES
            .iter()
            .map(|&(pattern, path)| {
                Rule::new(pattern, path).expect("built-in classification patterns are valid")
            })
            .collect();
        Self { rules }
    }

    /// User rules first, then optionally the defaults
    ///
    /// # Errors
    ///
    /// Returns an error if any user pattern fails to compile.
    pub fn from_specs(specs: &[RuleSpec], include_defaults: bool) -> SynthResult<Self> {
        let mut set = Self::empty();
        for spec in specs {
            set.push(&spec.pattern, spec.path)?;
        }
        if include_defaults {
            set.rules.extend(Self::defaults().rules);
        }
        Ok(set)
    }

    /// Append a rule at the lowest precedence
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern fails to compile.
    pub fn push(&mut self, pattern: &str, path: DataPath) -> SynthResult<()> {
        self.rules.push(Rule::new(pattern, path)?);
        Ok(())
    }

    /// Rules in precedence order
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

impl TagClassifier for RuleSet {
    fn infer(&self, tag_name: &str) -> Option<DataPath> {
        self.rules
            .iter()
            .find(|rule| rule.matches(tag_name))
            .map(Rule::path)
    }
}
