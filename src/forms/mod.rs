//! Request payloads and their validation.
//!
//! Each `*Form` is deserialized from the request body, checked with
//! `validator` and converted into a typed `*Payload` with `TryFrom`.
//! Failures are reported as a list of [`FieldError`]s.

use std::fmt::{Display, Formatter};

use serde::Serialize;
use serde::ser::SerializeMap;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::domain::types::TypeConstraintError;

pub mod beers;
pub mod categories;
pub mod customers;
pub mod orders;

/// One violated constraint, serialized as `{"<field>": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl Serialize for FieldError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &self.message)?;
        map.end()
    }
}

impl From<TypeConstraintError> for FieldError {
    fn from(value: TypeConstraintError) -> Self {
        Self::new(value.field().unwrap_or("request"), value.to_string())
    }
}

/// Rust field names become the camelCase names clients send.
fn wire_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            name.extend(c.to_uppercase());
            upper = false;
        } else {
            name.push(c);
        }
    }
    name
}

/// Flatten `validator` output into a sorted list of field errors.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut list = Vec::new();
    for (field, kind) in errors.errors() {
        if let ValidationErrorsKind::Field(violations) = kind {
            for violation in violations {
                let message = violation
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| format!("failed {} validation", violation.code));
                list.push(FieldError::new(wire_name(field), message));
            }
        }
    }
    list.sort();
    list
}

/// Error returned when a form cannot be turned into its payload.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("form validation failed: {}", format_errors(.0))]
    Validation(Vec<FieldError>),
    #[error("form contains invalid data: {0}")]
    TypeConstraint(FieldError),
}

fn format_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl FormError {
    pub fn into_field_errors(self) -> Vec<FieldError> {
        match self {
            Self::Validation(errors) => errors,
            Self::TypeConstraint(error) => vec![error],
        }
    }
}

impl From<ValidationErrors> for FormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(field_errors(&value))
    }
}

impl From<TypeConstraintError> for FormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.into())
    }
}

/// Take a value `validate` has already required, naming the field if it is missing.
pub(crate) fn required<T>(field: &str, value: Option<T>) -> Result<T, FormError> {
    value.ok_or_else(|| FormError::Validation(vec![FieldError::new(field, "must not be null")]))
}

/// Parse an optional whole-number query parameter. Blank values count as absent.
pub(crate) fn query_number(field: &str, value: Option<&str>) -> Result<Option<i64>, FieldError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(number) => number
            .parse()
            .map(Some)
            .map_err(|_| FieldError::new(field, "must be a whole number")),
    }
}

/// Parse an optional `true`/`false` query parameter in any letter case.
pub(crate) fn query_flag(field: &str, value: Option<&str>) -> Result<Option<bool>, FieldError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(flag) if flag.eq_ignore_ascii_case("true") => Ok(Some(true)),
        Some(flag) if flag.eq_ignore_ascii_case("false") => Ok(Some(false)),
        Some(_) => Err(FieldError::new(field, "must be true or false")),
    }
}

/// Treat blank strings as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_single_entry_object() {
        let error = FieldError::new("beerName", "must not be blank");
        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(json, r#"{"beerName":"must not be blank"}"#);
    }

    #[test]
    fn converts_field_names_to_camel_case() {
        assert_eq!(wire_name("quantity_on_hand"), "quantityOnHand");
        assert_eq!(wire_name("beerName"), "beerName");
        assert_eq!(wire_name("upc"), "upc");
    }

    #[test]
    fn type_constraint_errors_name_their_field() {
        let error: FieldError = TypeConstraintError::TooLong("upc", 10).into();
        assert_eq!(error.field, "upc");
    }

    #[test]
    fn required_names_the_missing_field() {
        assert_eq!(required("upc", Some("42")).unwrap(), "42");

        let errors = required::<String>("upc", None).unwrap_err().into_field_errors();
        assert_eq!(errors, vec![FieldError::new("upc", "must not be null")]);
    }

    #[test]
    fn query_values_report_their_parameter() {
        assert_eq!(query_number("pageSize", Some(" 10 ")), Ok(Some(10)));
        assert_eq!(query_number("pageSize", Some("")), Ok(None));
        assert_eq!(
            query_number("pageSize", Some("lots")),
            Err(FieldError::new("pageSize", "must be a whole number"))
        );

        assert_eq!(query_flag("showInventory", Some("FALSE")), Ok(Some(false)));
        assert_eq!(query_flag("showInventory", None), Ok(None));
        assert_eq!(
            query_flag("showInventory", Some("maybe")).unwrap_err().field,
            "showInventory"
        );
    }

    #[test]
    fn blank_strings_are_absent() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some("x".to_string())), Some("x".to_string()));
        assert_eq!(non_blank(None), None);
    }
}
