use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Email, RecordId, TypeConstraintError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub const fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    /// The other theme.
    pub const fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }
}

impl Display for ThemePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

/// Back-office account as returned by `/users` and `/auth/me`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: RecordId,
    pub email: String,
    pub nombres: String,
    pub apellidos: String,
    pub nombre_completo: String,
    pub is_active: bool,
    pub is_superuser: bool,
    #[serde(default)]
    pub theme_preference: ThemePreference,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: Email,
    pub nombres: String,
    pub apellidos: String,
    pub password: String,
    pub is_active: bool,
    pub is_superuser: bool,
    #[serde(default)]
    pub theme_preference: ThemePreference,
}

impl NewUser {
    /// Active, non-admin account with the light theme.
    #[must_use]
    pub fn new(email: Email, nombres: &str, apellidos: &str, password: String) -> Self {
        Self {
            email,
            nombres: nombres.trim().to_string(),
            apellidos: apellidos.trim().to_string(),
            password,
            is_active: true,
            is_superuser: false,
            theme_preference: ThemePreference::default(),
        }
    }
}

/// Partial update; `None` fields are left untouched by the backend.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombres: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apellidos: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_superuser: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_preference: Option<ThemePreference>,
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
