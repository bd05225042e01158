//! Strongly-typed value objects used by the adapter and domain entities.
//!
//! These wrappers enforce basic invariants (e.g., mappable field names,
//! positive paging, normalized/validated email) so that once a value reaches
//! the query translator it can be treated as trusted.
use std::{ops::Deref, str::FromStr};

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use uuid::Uuid;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Field name contains characters outside `[A-Za-z0-9]` or does not start
    /// with a lowercase letter.
    #[error("invalid field name: {0:?}")]
    InvalidFieldName(String),
    /// Resource name is not a single safe path segment.
    #[error("invalid resource name: {0:?}")]
    InvalidResourceName(String),
    /// Page number is below one.
    #[error("page number must be at least 1, got {0}")]
    NonPositivePage(i64),
    /// Page size is zero or negative.
    #[error("page size must be greater than zero, got {0}")]
    NonPositivePageSize(i64),
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided uuid failed format validation.
    #[error("invalid uuid value")]
    InvalidUuid,
    /// Provided value is not one of the accepted options.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// UI-side (camelCase) name of a record field.
///
/// Valid names start with an ASCII lowercase letter and contain only ASCII
/// letters and digits. Under that rule the snake_case translation is
/// injective, so [`FieldName::from_snake_case`] recovers the original name.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct FieldName(String);

impl FieldName {
    /// Validates a camelCase field name.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into();
        let mut chars = value.chars();
        let valid = matches!(chars.next(), Some(first) if first.is_ascii_lowercase())
            && chars.all(|c| c.is_ascii_alphanumeric());
        if valid {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidFieldName(value))
        }
    }

    /// Recovers a camelCase name from its backend snake_case form.
    pub fn from_snake_case(value: &str) -> Result<Self, TypeConstraintError> {
        let mut camel = String::with_capacity(value.len());
        let mut chars = value.chars();
        while let Some(c) = chars.next() {
            if c == '_' {
                match chars.next() {
                    Some(next) if next.is_ascii_lowercase() => {
                        camel.push(next.to_ascii_uppercase())
                    }
                    _ => return Err(TypeConstraintError::InvalidFieldName(value.to_string())),
                }
            } else if c.is_ascii_uppercase() {
                return Err(TypeConstraintError::InvalidFieldName(value.to_string()));
            } else {
                camel.push(c);
            }
        }
        Self::new(camel)
    }

    /// Backend (snake_case) spelling: every uppercase letter `X` becomes `_x`.
    pub fn to_snake_case(&self) -> String {
        let mut snake = String::with_capacity(self.0.len() + 4);
        for c in self.0.chars() {
            if c.is_ascii_uppercase() {
                snake.push('_');
                snake.push(c.to_ascii_lowercase());
            } else {
                snake.push(c);
            }
        }
        snake
    }

    /// Borrow the camelCase name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for FieldName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for FieldName {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for FieldName {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FieldName> for String {
    fn from(value: FieldName) -> Self {
        value.0
    }
}

pub const CONTACTS_RESOURCE: &str = "contactos";
pub const USERS_RESOURCE: &str = "users";

/// REST resource collection name, used verbatim as a single path segment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceName(String);

impl ResourceName {
    /// Accepts ASCII alphanumerics, `-` and `_`.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into();
        if !value.is_empty()
            && value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidResourceName(value))
        }
    }

    /// The `/contactos` collection.
    pub fn contacts() -> Self {
        Self(CONTACTS_RESOURCE.to_string())
    }

    /// The `/users` collection.
    pub fn users() -> Self {
        Self(USERS_RESOURCE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for ResourceName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for ResourceName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for ResourceName {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// 1-based page number as requested by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageNumber(u64);

impl PageNumber {
    pub const FIRST: Self = Self(1);

    pub fn new(value: i64) -> Result<Self, TypeConstraintError> {
        if value >= 1 {
            Ok(Self(value as u64))
        } else {
            Err(TypeConstraintError::NonPositivePage(value))
        }
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// Page index transmitted to the backend, which counts pages from zero.
    pub const fn zero_based(self) -> u64 {
        self.0 - 1
    }
}

/// Number of records per page, always greater than zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageSize(u64);

impl PageSize {
    /// Page size the backend applies when none is sent.
    pub const DEFAULT: Self = Self(10);

    pub fn new(value: i64) -> Result<Self, TypeConstraintError> {
        if value > 0 {
            Ok(Self(value as u64))
        } else {
            Err(TypeConstraintError::NonPositivePageSize(value))
        }
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Identifier of a backend record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    pub const fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(
            Uuid::parse_str(s.trim()).map_err(|_| TypeConstraintError::InvalidUuid)?,
        ))
    }
}

impl From<Uuid> for RecordId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// Opaque bearer token issued by `/auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keeps the token out of logs.
impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

impl TryFrom<String> for AccessToken {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccessToken> for String {
    fn from(value: AccessToken) -> Self {
        value.0
    }
}

/// Lower-cased and validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = email.into().trim().to_lowercase();
        if normalized.validate_email() {
            Ok(Self(normalized))
        } else {
            Err(TypeConstraintError::InvalidEmail)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Email {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_name_translates_to_snake_case() {
        let cases = [
            ("estado", "estado"),
            ("nombreCompleto", "nombre_completo"),
            ("isSuperuser", "is_superuser"),
            ("address2Line", "address2_line"),
            ("aB", "a_b"),
        ];
        for (camel, snake) in cases {
            let name = FieldName::new(camel).expect("valid field name");
            assert_eq!(name.to_snake_case(), snake);
            assert_eq!(FieldName::from_snake_case(snake).unwrap(), name);
        }
    }

    #[test]
    fn field_name_rejects_unmappable_input() {
        for bad in ["", "nombre_completo", "Estado", "filter-x", "ñame", "a b", "1abc"] {
            assert_eq!(
                FieldName::new(bad),
                Err(TypeConstraintError::InvalidFieldName(bad.to_string()))
            );
        }
    }

    #[test]
    fn snake_case_inverse_rejects_non_translations() {
        for bad in ["_estado", "estado_", "a__b", "a_1", "nombreCompleto"] {
            assert!(FieldName::from_snake_case(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn paging_values_must_be_positive() {
        assert_eq!(PageNumber::new(1).unwrap().zero_based(), 0);
        assert_eq!(PageNumber::new(0), Err(TypeConstraintError::NonPositivePage(0)));
        assert_eq!(PageSize::new(10).unwrap().get(), 10);
        assert_eq!(
            PageSize::new(-3),
            Err(TypeConstraintError::NonPositivePageSize(-3))
        );
    }

    #[test]
    fn resource_name_is_a_single_segment() {
        assert!(ResourceName::new("contactos").is_ok());
        assert!(ResourceName::new("users").is_ok());
        assert!(ResourceName::new("").is_err());
        assert!(ResourceName::new("users/../auth").is_err());
        assert!(ResourceName::new("users?x=1").is_err());
    }

    #[test]
    fn email_is_normalized() {
        let email = Email::new("  Ana@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "ana@example.com");
        assert_eq!(Email::new("nope"), Err(TypeConstraintError::InvalidEmail));
    }

    #[test]
    fn access_token_is_not_printed() {
        let token = AccessToken::new("secret").unwrap();
        assert_eq!(format!("{token:?}"), "AccessToken(***)");
        assert!(AccessToken::new("   ").is_err());
    }

    #[test]
    fn record_id_parses_uuid() {
        let id: RecordId = "6f1c1a7e-4a5b-4c1e-9f0a-2b3c4d5e6f70".parse().unwrap();
        assert_eq!(id.to_string(), "6f1c1a7e-4a5b-4c1e-9f0a-2b3c4d5e6f70");
        assert_eq!(
            "not-a-uuid".parse::<RecordId>(),
            Err(TypeConstraintError::InvalidUuid)
        );
    }
}
