use async_trait::async_trait;

use crate::domain::contact::{Contact, NewContact, UpdateContact};
use crate::domain::list::{ListRequest, ListResponse};
use crate::domain::types::{RecordId, ResourceName};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ContactReader, ContactWriter, HttpRepository, RecordReader, RecordWriter, from_record,
    to_record,
};

#[async_trait]
impl ContactReader for HttpRepository {
    async fn list_contacts(&self, request: ListRequest) -> RepositoryResult<ListResponse<Contact>> {
        let request = ListRequest {
            resource: ResourceName::contacts(),
            ..request
        };
        self.get_list(request).await?.try_map(from_record)
    }

    async fn get_contact(&self, id: RecordId) -> RepositoryResult<Contact> {
        from_record(self.get_one(&ResourceName::contacts(), id).await?)
    }
}

#[async_trait]
impl ContactWriter for HttpRepository {
    async fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact> {
        let record = to_record(new_contact)?;
        from_record(self.create(&ResourceName::contacts(), &record).await?)
    }

    async fn update_contact(
        &self,
        id: RecordId,
        updates: &UpdateContact,
    ) -> RepositoryResult<Contact> {
        let record = to_record(updates)?;
        from_record(self.update(&ResourceName::contacts(), id, &record).await?)
    }

    async fn delete_contact(&self, id: RecordId) -> RepositoryResult<Contact> {
        from_record(self.delete_one(&ResourceName::contacts(), id).await?)
    }
}
