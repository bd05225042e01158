use async_trait::async_trait;
use reqwest::Method;

use crate::domain::auth::{Credentials, PasswordChange, UserSettings};
use crate::domain::types::AccessToken;
use crate::domain::user::User;
use crate::models::auth::{MessageResponse, TokenResponse};
use crate::query::parse_record;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{AuthApi, HttpRepository};

#[async_trait]
impl AuthApi for HttpRepository {
    async fn login(&self, credentials: &Credentials) -> RepositoryResult<AccessToken> {
        let builder = self
            .anonymous_request(Method::POST, &["auth", "login"])
            .form(credentials);
        let body = self.execute(builder).await?;

        let response: TokenResponse = parse_record(&body)?;
        if !response.token_type.eq_ignore_ascii_case("bearer") {
            log::warn!("Unexpected token type {}", response.token_type);
        }
        let token = AccessToken::new(response.access_token)
            .map_err(|e| RepositoryError::MalformedResponse(e.to_string()))?;

        self.session().set_token(token.clone())?;
        log::info!("Logged in as {}", credentials.email);
        Ok(token)
    }

    fn logout(&self) -> RepositoryResult<()> {
        self.session().clear()
    }

    fn is_authenticated(&self) -> bool {
        self.session().token().is_some()
    }

    async fn identity(&self) -> RepositoryResult<User> {
        let body = self
            .execute(self.request(Method::GET, &["auth", "me"]))
            .await?;
        parse_record(&body)
    }

    async fn change_password(&self, change: &PasswordChange) -> RepositoryResult<()> {
        let builder = self
            .request(Method::POST, &["auth", "password-change"])
            .json(change);
        let body = self.execute(builder).await?;
        if let Ok(response) = parse_record::<MessageResponse>(&body) {
            log::info!("{}", response.message);
        }
        Ok(())
    }

    async fn update_settings(&self, settings: &UserSettings) -> RepositoryResult<()> {
        let builder = self
            .request(Method::PUT, &["users", "me", "settings"])
            .json(settings);
        self.execute(builder).await?;
        Ok(())
    }
}
