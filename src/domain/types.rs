//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs should carry these wrappers instead of raw primitives so that
//! identifiers, text values and numeric constraints are enforced at the
//! boundary.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier could not be parsed as a UUID.
    #[error("{0} must be a valid UUID")]
    InvalidId(&'static str),
    /// A numeric value required to be non-negative was negative.
    #[error("{0} must be zero or greater")]
    NegativeNumber(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// A string exceeded its maximum length in characters.
    #[error("{0} must be at most {1} characters")]
    TooLong(&'static str, usize),
    /// A decimal value could not be parsed.
    #[error("{0} must be a decimal number")]
    InvalidDecimal(&'static str),
    /// Unknown beer style.
    #[error("beerStyle has unknown value: {0}")]
    UnknownBeerStyle(String),
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

impl TypeConstraintError {
    /// Name of the field the violation refers to, if it is known.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidId(field)
            | Self::NegativeNumber(field)
            | Self::EmptyString(field)
            | Self::TooLong(field, _)
            | Self::InvalidDecimal(field) => Some(field),
            Self::UnknownBeerStyle(_) => Some("beerStyle"),
            Self::InvalidValue(_) => None,
        }
    }
}

fn trim_and_check_length<S: Into<String>>(
    value: S,
    field: &'static str,
    max_len: usize,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString(field));
    }
    if trimmed.chars().count() > max_len {
        return Err(TypeConstraintError::TooLong(field, max_len));
    }
    Ok(trimmed)
}

/// Macro to generate UUID-backed identifiers assigned by the store.
macro_rules! uuid_id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Wraps an existing UUID.
            pub const fn new(value: Uuid) -> Self {
                Self(value)
            }

            /// Generates a fresh random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            /// Parses the textual (hyphenated) representation.
            pub fn parse(value: &str) -> Result<Self, TypeConstraintError> {
                Uuid::parse_str(value.trim())
                    .map(Self)
                    .map_err(|_| TypeConstraintError::InvalidId($field))
            }

            /// Returns the raw UUID backing this identifier.
            pub const fn get(self) -> Uuid {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::parse(value)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

/// Trimmed, non-empty strings capped at a maximum number of characters.
macro_rules! bounded_string_newtype {
    ($name:ident, $doc:expr, $field:expr, $max:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Maximum length in characters.
            pub const MAX_LEN: usize = $max;

            /// Constructs a trimmed, non-empty value no longer than [`Self::MAX_LEN`].
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_check_length(value, $field, $max).map(Self)
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.as_str()
            }
        }
    };
}

macro_rules! non_negative_i32_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Constructs a value that must be zero or greater.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value >= 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NegativeNumber($field))
                }
            }

            /// Returns the raw `i32` value.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for i32 {
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }
    };
}

uuid_id_newtype!(BeerId, "Unique identifier for a beer.", "beerId");
uuid_id_newtype!(CustomerId, "Unique identifier for a customer.", "customerId");
uuid_id_newtype!(CategoryId, "Unique identifier for a category.", "categoryId");
uuid_id_newtype!(BeerOrderId, "Unique identifier for a beer order.", "beerOrderId");

bounded_string_newtype!(BeerName, "Display name of a beer.", "beerName", 50);
bounded_string_newtype!(Upc, "Universal product code of a beer.", "upc", 10);
bounded_string_newtype!(CustomerName, "Customer display name.", "name", 255);
bounded_string_newtype!(CustomerEmail, "Customer contact email.", "email", 255);
bounded_string_newtype!(
    CategoryDescription,
    "Human readable category label.",
    "description",
    50
);
bounded_string_newtype!(
    CustomerRef,
    "Free-form customer reference attached to an order.",
    "customerRef",
    255
);

/// Unicode case folding applied to beer names and search terms alike.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

impl BeerName {
    /// Folded name stored alongside the beer for substring search.
    pub fn search_key(&self) -> String {
        fold_case(self.as_str())
    }
}

non_negative_i32_newtype!(
    QuantityOnHand,
    "Number of units currently in stock.",
    "quantityOnHand"
);
non_negative_i32_newtype!(
    RecordVersion,
    "Optimistic-concurrency counter incremented on every write.",
    "version"
);

impl RecordVersion {
    /// Version assigned to freshly created records.
    pub const INITIAL: Self = Self(1);

    /// Version after one more successful write.
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Non-negative decimal price.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct BeerPrice(Decimal);

impl BeerPrice {
    /// Constructs a price that is zero or greater.
    pub fn new(value: Decimal) -> Result<Self, TypeConstraintError> {
        if value.is_sign_negative() && !value.is_zero() {
            Err(TypeConstraintError::NegativeNumber("price"))
        } else {
            Ok(Self(value))
        }
    }

    /// Parses a decimal string such as `"12.99"`.
    pub fn parse(value: &str) -> Result<Self, TypeConstraintError> {
        let decimal = Decimal::from_str(value.trim())
            .map_err(|_| TypeConstraintError::InvalidDecimal("price"))?;
        Self::new(decimal)
    }

    /// Returns the raw decimal value.
    pub const fn get(self) -> Decimal {
        self.0
    }
}

impl Display for BeerPrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for BeerPrice {
    type Error = TypeConstraintError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BeerPrice> for Decimal {
    fn from(value: BeerPrice) -> Self {
        value.0
    }
}

/// Fixed set of beer styles.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BeerStyle {
    Lager,
    Pilsner,
    Stout,
    Gose,
    Porter,
    Ale,
    Wheat,
    Ipa,
    PaleAle,
    Saison,
}

impl BeerStyle {
    pub const ALL: [BeerStyle; 10] = [
        Self::Lager,
        Self::Pilsner,
        Self::Stout,
        Self::Gose,
        Self::Porter,
        Self::Ale,
        Self::Wheat,
        Self::Ipa,
        Self::PaleAle,
        Self::Saison,
    ];

    /// String representation used in persistence and on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lager => "LAGER",
            Self::Pilsner => "PILSNER",
            Self::Stout => "STOUT",
            Self::Gose => "GOSE",
            Self::Porter => "PORTER",
            Self::Ale => "ALE",
            Self::Wheat => "WHEAT",
            Self::Ipa => "IPA",
            Self::PaleAle => "PALE_ALE",
            Self::Saison => "SAISON",
        }
    }
}

impl Display for BeerStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BeerStyle {
    type Err = TypeConstraintError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_uppercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == normalized)
            .ok_or_else(|| TypeConstraintError::UnknownBeerStyle(value.trim().to_string()))
    }
}

impl TryFrom<&str> for BeerStyle {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for BeerStyle {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BeerStyle> for String {
    fn from(value: BeerStyle) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_bounded_strings() {
        let value = BeerName::new("  Galaxy Cat  ").unwrap();
        assert_eq!(value.as_str(), "Galaxy Cat");
    }

    #[test]
    fn rejects_blank_beer_names() {
        let err = BeerName::new("   ").unwrap_err();
        assert_eq!(err, TypeConstraintError::EmptyString("beerName"));
        assert_eq!(err.field(), Some("beerName"));
    }

    #[test]
    fn rejects_overlong_upc() {
        let err = Upc::new("0123456789101221").unwrap_err();
        assert_eq!(err, TypeConstraintError::TooLong("upc", 10));
        assert!(Upc::new("0123456789").is_ok());
    }

    #[test]
    fn beer_name_limit_counts_characters() {
        assert!(BeerName::new("é".repeat(50)).is_ok());
        assert!(BeerName::new("é".repeat(51)).is_err());
    }

    #[test]
    fn search_key_folds_non_ascii_letters() {
        let name = BeerName::new("ÖLBIER Dunkel").unwrap();
        assert_eq!(name.search_key(), "ölbier dunkel");
        assert_eq!(fold_case("ÖL"), "öl");
    }

    #[test]
    fn parses_identifiers() {
        let id = BeerId::generate();
        assert_eq!(BeerId::parse(&id.to_string()).unwrap(), id);
        assert_eq!(
            BeerId::parse("not-a-uuid").unwrap_err(),
            TypeConstraintError::InvalidId("beerId")
        );
    }

    #[test]
    fn parses_beer_styles_case_insensitively() {
        assert_eq!("pale_ale".parse::<BeerStyle>().unwrap(), BeerStyle::PaleAle);
        assert_eq!("IPA".parse::<BeerStyle>().unwrap(), BeerStyle::Ipa);
        assert!("CIDER".parse::<BeerStyle>().is_err());
    }

    #[test]
    fn beer_style_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&BeerStyle::PaleAle).unwrap();
        assert_eq!(json, "\"PALE_ALE\"");
    }

    #[test]
    fn price_allows_zero_and_rejects_negative() {
        assert!(BeerPrice::parse("0").is_ok());
        assert_eq!(
            BeerPrice::parse("-0.01").unwrap_err(),
            TypeConstraintError::NegativeNumber("price")
        );
        assert_eq!(
            BeerPrice::parse("abc").unwrap_err(),
            TypeConstraintError::InvalidDecimal("price")
        );
    }

    #[test]
    fn version_starts_at_one_and_increments() {
        assert_eq!(RecordVersion::INITIAL.get(), 1);
        assert_eq!(RecordVersion::INITIAL.next().get(), 2);
    }

    #[test]
    fn quantity_rejects_negative_numbers() {
        assert_eq!(
            QuantityOnHand::new(-1).unwrap_err(),
            TypeConstraintError::NegativeNumber("quantityOnHand")
        );
    }
}
