//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::auth::{Credentials, PasswordChange, UserSettings};
use crate::domain::contact::{Contact, NewContact, UpdateContact};
use crate::domain::list::{ListRequest, ListResponse, Record};
use crate::domain::types::{AccessToken, RecordId, ResourceName};
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AuthApi, ContactReader, ContactWriter, RecordReader, RecordWriter, UserReader, UserWriter,
};

mock! {
    pub Repository {}

    #[async_trait]
    impl RecordReader for Repository {
        async fn get_list(&self, request: ListRequest) -> RepositoryResult<ListResponse<Record>>;
        async fn get_one(&self, resource: &ResourceName, id: RecordId) -> RepositoryResult<Record>;
        async fn get_many(
            &self,
            resource: &ResourceName,
            ids: &[RecordId],
        ) -> RepositoryResult<Vec<Record>>;
    }

    #[async_trait]
    impl RecordWriter for Repository {
        async fn create(&self, resource: &ResourceName, record: &Record) -> RepositoryResult<Record>;
        async fn update(
            &self,
            resource: &ResourceName,
            id: RecordId,
            record: &Record,
        ) -> RepositoryResult<Record>;
        async fn delete_one(&self, resource: &ResourceName, id: RecordId) -> RepositoryResult<Record>;
    }

    #[async_trait]
    impl ContactReader for Repository {
        async fn list_contacts(&self, request: ListRequest) -> RepositoryResult<ListResponse<Contact>>;
        async fn get_contact(&self, id: RecordId) -> RepositoryResult<Contact>;
    }

    #[async_trait]
    impl ContactWriter for Repository {
        async fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact>;
        async fn update_contact(
            &self,
            id: RecordId,
            updates: &UpdateContact,
        ) -> RepositoryResult<Contact>;
        async fn delete_contact(&self, id: RecordId) -> RepositoryResult<Contact>;
    }

    #[async_trait]
    impl UserReader for Repository {
        async fn list_users(&self, request: ListRequest) -> RepositoryResult<ListResponse<User>>;
        async fn get_user(&self, id: RecordId) -> RepositoryResult<User>;
    }

    #[async_trait]
    impl UserWriter for Repository {
        async fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        async fn update_user(&self, id: RecordId, updates: &UpdateUser) -> RepositoryResult<User>;
        async fn delete_user(&self, id: RecordId) -> RepositoryResult<User>;
    }

    #[async_trait]
    impl AuthApi for Repository {
        async fn login(&self, credentials: &Credentials) -> RepositoryResult<AccessToken>;
        fn logout(&self) -> RepositoryResult<()>;
        fn is_authenticated(&self) -> bool;
        async fn identity(&self) -> RepositoryResult<User>;
        async fn change_password(&self, change: &PasswordChange) -> RepositoryResult<()>;
        async fn update_settings(&self, settings: &UserSettings) -> RepositoryResult<()>;
    }
}
