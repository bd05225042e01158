//! Payloads of the authentication and account-settings endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::user::ThemePreference;

/// Login credentials, sent as the OAuth2 password-form `username`/`password`.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "username")]
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Body of `/auth/password-change`.
#[derive(Clone, Serialize, Deserialize)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

/// Body of `/users/me/settings`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub theme_preference: ThemePreference,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_encode_as_oauth_form() {
        let credentials = Credentials::new(" admin@example.com ", "s3cret");
        let encoded = serde_html_form::to_string(&credentials).unwrap();
        assert_eq!(encoded, "username=admin%40example.com&password=s3cret");
        assert!(!format!("{credentials:?}").contains("s3cret"));
    }

    #[test]
    fn settings_use_camel_case() {
        let settings = UserSettings {
            theme_preference: ThemePreference::Dark,
        };
        assert_eq!(
            serde_json::to_string(&settings).unwrap(),
            r#"{"themePreference":"dark"}"#
        );
    }
}
