use async_trait::async_trait;

use crate::domain::list::{ListRequest, ListResponse};
use crate::domain::types::{RecordId, ResourceName};
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    HttpRepository, RecordReader, RecordWriter, UserReader, UserWriter, from_record, to_record,
};

#[async_trait]
impl UserReader for HttpRepository {
    async fn list_users(&self, request: ListRequest) -> RepositoryResult<ListResponse<User>> {
        let request = ListRequest {
            resource: ResourceName::users(),
            ..request
        };
        self.get_list(request).await?.try_map(from_record)
    }

    async fn get_user(&self, id: RecordId) -> RepositoryResult<User> {
        from_record(self.get_one(&ResourceName::users(), id).await?)
    }
}

#[async_trait]
impl UserWriter for HttpRepository {
    async fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        let record = to_record(new_user)?;
        from_record(self.create(&ResourceName::users(), &record).await?)
    }

    async fn update_user(&self, id: RecordId, updates: &UpdateUser) -> RepositoryResult<User> {
        let record = to_record(updates)?;
        from_record(self.update(&ResourceName::users(), id, &record).await?)
    }

    async fn delete_user(&self, id: RecordId) -> RepositoryResult<User> {
        from_record(self.delete_one(&ResourceName::users(), id).await?)
    }
}
