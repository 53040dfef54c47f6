//! Typed `category.field` paths

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SynthError;

/// Declares a field enum with its canonical `snake_case` names.
macro_rules! field_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $(
                #[doc = concat!("`", $text, "`")]
                $variant,
            )+
        }

        impl $name {
            /// Every field of this category
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Canonical field name
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }

            fn parse(field: &str) -> Option<Self> {
                match field {
                    $($text => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

field_enum! {
    /// Fields of a fabricated person
    PersonField {
        Name => "name",
        Cpf => "cpf",
        Rg => "rg",
        Phone => "phone",
        Email => "email",
    }
}

field_enum! {
    /// Fields of a fabricated company
    CompanyField {
        CompanyName => "company_name",
        FantasyName => "fantasy_name",
        Cnpj => "cnpj",
        Ie => "ie",
    }
}

field_enum! {
    /// Fields of a fabricated address
    LocationField {
        Street => "street",
        Number => "number",
        District => "district",
        CityName => "city_name",
        CityCode => "city_code",
        StateAbbr => "state_abbr",
        Postcode => "postcode",
    }
}

field_enum! {
    /// Fields of a fabricated product line
    ProductField {
        Description => "description",
        Ean => "ean",
        Ncm => "ncm",
        Price => "price",
    }
}

/// Data category, the part of a path before the dot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// `person`
    Person,
    /// `company`
    Company,
    /// `location`
    Location,
    /// `product`
    Product,
}

impl Category {
    /// Every category
    pub const ALL: &'static [Self] = &[Self::Person, Self::Company, Self::Location, Self::Product];

    /// Canonical category name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Company => "company",
            Self::Location => "location",
            Self::Product => "product",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fabrication capability, written `category.field`
///
/// The set is closed: parsing an unknown category or field fails instead of
/// silently producing nothing at render time.
///
/// ```rust
/// use xmlsynth::provider::{DataPath, LocationField};
///
/// let path: DataPath = "location.postcode".parse().unwrap();
/// assert_eq!(path, DataPath::Location(LocationField::Postcode));
/// assert_eq!(path.to_string(), "location.postcode");
/// assert!("vehicle.plate".parse::<DataPath>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DataPath {
    /// `person.*`
    Person(PersonField),
    /// `company.*`
    Company(CompanyField),
    /// `location.*`
    Location(LocationField),
    /// `product.*`
    Product(ProductField),
}

impl DataPath {
    /// Category half of the path
    #[must_use]
    pub const fn category(self) -> Category {
        match self {
            Self::Person(_) => Category::Person,
            Self::Company(_) => Category::Company,
            Self::Location(_) => Category::Location,
            Self::Product(_) => Category::Product,
        }
    }

    /// Field half of the path
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::Person(field) => field.as_str(),
            Self::Company(field) => field.as_str(),
            Self::Location(field) => field.as_str(),
            Self::Product(field) => field.as_str(),
        }
    }

    /// Every known path, grouped by category
    pub fn all() -> impl Iterator<Item = Self> {
        PersonField::ALL
            .iter()
            .copied()
            .map(Self::Person)
            .chain(CompanyField::ALL.iter().copied().map(Self::Company))
            .chain(LocationField::ALL.iter().copied().map(Self::Location))
            .chain(ProductField::ALL.iter().copied().map(Self::Product))
    }
}

impl fmt::Display for DataPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.category(), self.field())
    }
}

impl FromStr for DataPath {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || SynthError::UnknownPath(s.to_string());
        let (category, field) = s.split_once('.').ok_or_else(unknown)?;
        let path = match category {
            "person" => PersonField::parse(field).map(Self::Person),
            "company" => CompanyField::parse(field).map(Self::Company),
            "location" => LocationField::parse(field).map(Self::Location),
            "product" => ProductField::parse(field).map(Self::Product),
            _ => None,
        };
        path.ok_or_else(unknown)
    }
}

impl TryFrom<String> for DataPath {
    type Error = SynthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DataPath> for String {
    fn from(path: DataPath) -> Self {
        path.to_string()
    }
}
