use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Email, RecordId, TypeConstraintError};

/// Sales-pipeline stage of a contact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    Prospecto,
    Calificado,
    Cliente,
    Inactivo,
}

impl ContactStatus {
    pub const ALL: [ContactStatus; 4] = [
        ContactStatus::Prospecto,
        ContactStatus::Calificado,
        ContactStatus::Cliente,
        ContactStatus::Inactivo,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ContactStatus::Prospecto => "prospecto",
            ContactStatus::Calificado => "calificado",
            ContactStatus::Cliente => "cliente",
            ContactStatus::Inactivo => "inactivo",
        }
    }
}

impl Display for ContactStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ContactStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| TypeConstraintError::InvalidValue(s.to_string()))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: RecordId,
    pub nombres: String,
    pub apellidos: String,
    pub nombre_completo: String,
    pub email: String,
    pub telefono: String,
    #[serde(default)]
    pub estado: ContactStatus,
    pub cedula: Option<String>,
    pub ciudad: Option<String>,
    pub pais: Option<String>,
    pub notas: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    pub nombres: String,
    pub apellidos: String,
    /// Left empty to let the full name be derived from the name parts.
    #[serde(default)]
    pub nombre_completo: String,
    pub email: Email,
    pub telefono: String,
    #[serde(default)]
    pub estado: ContactStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cedula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ciudad: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pais: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notas: Option<String>,
}

impl NewContact {
    #[must_use]
    pub fn new(nombres: &str, apellidos: &str, email: Email, telefono: &str) -> Self {
        Self {
            nombres: nombres.trim().to_string(),
            apellidos: apellidos.trim().to_string(),
            nombre_completo: String::new(),
            email,
            telefono: telefono.trim().to_string(),
            estado: ContactStatus::default(),
            cedula: None,
            ciudad: None,
            pais: None,
            notas: None,
        }
    }
}

/// Partial update; `None` fields are left untouched by the backend.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombres: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apellidos: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre_completo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<ContactStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cedula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ciudad: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pais: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notas: Option<String>,
}

impl UpdateContact {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
