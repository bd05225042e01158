use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::auth::{Credentials, PasswordChange, UserSettings};
use crate::domain::contact::{Contact, NewContact, UpdateContact};
use crate::domain::list::{ListRequest, ListResponse, Record};
use crate::domain::types::{AccessToken, RecordId, ResourceName};
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::models::config::ClientConfig;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::session::SessionStore;

pub mod auth;
pub mod contact;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod record;
pub mod user;

/// Untyped access to any resource collection.
#[async_trait]
pub trait RecordReader: Send + Sync {
    async fn get_list(&self, request: ListRequest) -> RepositoryResult<ListResponse<Record>>;
    async fn get_one(&self, resource: &ResourceName, id: RecordId) -> RepositoryResult<Record>;
    async fn get_many(
        &self,
        resource: &ResourceName,
        ids: &[RecordId],
    ) -> RepositoryResult<Vec<Record>>;
}

#[async_trait]
pub trait RecordWriter: Send + Sync {
    async fn create(&self, resource: &ResourceName, record: &Record) -> RepositoryResult<Record>;
    async fn update(
        &self,
        resource: &ResourceName,
        id: RecordId,
        record: &Record,
    ) -> RepositoryResult<Record>;
    /// Returns the record as it was before deletion.
    async fn delete_one(&self, resource: &ResourceName, id: RecordId) -> RepositoryResult<Record>;
}

/// Contacts collection. List requests are always sent to `/contactos`.
#[async_trait]
pub trait ContactReader: Send + Sync {
    async fn list_contacts(&self, request: ListRequest) -> RepositoryResult<ListResponse<Contact>>;
    async fn get_contact(&self, id: RecordId) -> RepositoryResult<Contact>;
}

#[async_trait]
pub trait ContactWriter: Send + Sync {
    async fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact>;
    async fn update_contact(
        &self,
        id: RecordId,
        updates: &UpdateContact,
    ) -> RepositoryResult<Contact>;
    async fn delete_contact(&self, id: RecordId) -> RepositoryResult<Contact>;
}

/// Users collection. List requests are always sent to `/users`.
#[async_trait]
pub trait UserReader: Send + Sync {
    async fn list_users(&self, request: ListRequest) -> RepositoryResult<ListResponse<User>>;
    async fn get_user(&self, id: RecordId) -> RepositoryResult<User>;
}

#[async_trait]
pub trait UserWriter: Send + Sync {
    async fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    async fn update_user(&self, id: RecordId, updates: &UpdateUser) -> RepositoryResult<User>;
    async fn delete_user(&self, id: RecordId) -> RepositoryResult<User>;
}

/// Session and account endpoints.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for a token and stores it in the session.
    async fn login(&self, credentials: &Credentials) -> RepositoryResult<AccessToken>;
    /// Drops the stored token. No request is sent.
    fn logout(&self) -> RepositoryResult<()>;
    fn is_authenticated(&self) -> bool;
    async fn identity(&self) -> RepositoryResult<User>;
    async fn change_password(&self, change: &PasswordChange) -> RepositoryResult<()>;
    async fn update_settings(&self, settings: &UserSettings) -> RepositoryResult<()>;
}

/// REST implementation of every repository trait.
#[derive(Clone)]
pub struct HttpRepository {
    client: Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl HttpRepository {
    pub fn new(config: &ClientConfig, session: Arc<dyn SessionStore>) -> RepositoryResult<Self> {
        let base_url = config.api_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| RepositoryError::Validation(format!("invalid api_url {base_url}: {e}")))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    fn url(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for segment in segments {
            url.push('/');
            url.push_str(segment);
        }
        url
    }

    /// Starts a request to `segments` under the base URL, with the session
    /// token attached when one is stored.
    pub(crate) fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.authorize(self.client.request(method, self.url(segments)))
    }

    /// Like [`HttpRepository::request`], with an already encoded query string
    /// appended to the URL.
    pub(crate) fn request_with_query(
        &self,
        method: Method,
        segments: &[&str],
        query: &str,
    ) -> RequestBuilder {
        let mut url = self.url(segments);
        if !query.is_empty() {
            url.push('?');
            url.push_str(query);
        }
        self.authorize(self.client.request(method, url))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => builder.bearer_auth(token.as_str()),
            None => builder,
        }
    }

    /// Starts a request without consulting the session.
    pub(crate) fn anonymous_request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.client.request(method, self.url(segments))
    }

    /// Sends one request and returns the body of a 2xx response.
    pub(crate) async fn execute(&self, builder: RequestBuilder) -> RepositoryResult<String> {
        let request = builder.build()?;
        let method = request.method().clone();
        let url = request.url().clone();
        log::debug!("{method} {url}");

        let response = self.client.execute(request).await.map_err(|e| {
            log::error!("{method} {url} failed: {e}");
            RepositoryError::Transport(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            Ok(body)
        } else {
            log::warn!("{method} {url} returned {status}");
            Err(RepositoryError::from_status(status, body))
        }
    }
}

/// Converts a generic record into a typed entity.
pub(crate) fn from_record<T: DeserializeOwned>(record: Record) -> RepositoryResult<T> {
    serde_json::to_value(record)
        .and_then(serde_json::from_value)
        .map_err(|e| RepositoryError::MalformedResponse(e.to_string()))
}

/// Converts a typed payload into a generic record. Fails when the payload is
/// not an object or holds nested values.
pub(crate) fn to_record<T: Serialize>(payload: &T) -> RepositoryResult<Record> {
    match serde_json::to_value(payload) {
        Ok(Value::Object(fields)) => serde_json::from_value(Value::Object(fields))
            .map_err(|e| RepositoryError::Validation(format!("payload must be flat: {e}"))),
        Ok(other) => Err(RepositoryError::Validation(format!(
            "payload must be an object, got {other}"
        ))),
        Err(e) => Err(RepositoryError::Validation(e.to_string())),
    }
}
