use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;

use crate::domain::list::{ListRequest, ListResponse, Record};
use crate::domain::types::{RecordId, ResourceName};
use crate::query::{build_list_query, encode_query, parse_list_response, parse_record};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{HttpRepository, RecordReader, RecordWriter};

pub const IDS_PARAM: &str = "ids";

/// `get_many` accepts either a bare array or a list envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum ManyBody {
    Items(Vec<Record>),
    Envelope(ListResponse<Record>),
}

#[async_trait]
impl RecordReader for HttpRepository {
    async fn get_list(&self, request: ListRequest) -> RepositoryResult<ListResponse<Record>> {
        let query = encode_query(&build_list_query(&request)?)?;
        let builder =
            self.request_with_query(Method::GET, &[request.resource.as_str()], &query);

        let body = self.execute(builder).await?;
        let response = parse_list_response::<Record>(&body)?;

        // `build_list_query` already rejected non-positive sizes.
        let page_size = request.page_size.max(0) as u64;
        if response.items.len() as u64 > page_size {
            return Err(RepositoryError::MalformedResponse(format!(
                "{} items returned for a page of {page_size}",
                response.items.len()
            )));
        }

        Ok(response)
    }

    async fn get_one(&self, resource: &ResourceName, id: RecordId) -> RepositoryResult<Record> {
        let id = id.to_string();
        let body = self
            .execute(self.request(Method::GET, &[resource.as_str(), &id]))
            .await?;
        parse_record(&body)
    }

    async fn get_many(
        &self,
        resource: &ResourceName,
        ids: &[RecordId],
    ) -> RepositoryResult<Vec<Record>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = ids
            .iter()
            .map(RecordId::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let query = encode_query(&[(IDS_PARAM.to_string(), joined)])?;
        let builder = self.request_with_query(Method::GET, &[resource.as_str()], &query);

        let body = self.execute(builder).await?;
        match parse_record::<ManyBody>(&body)? {
            ManyBody::Items(items) => Ok(items),
            ManyBody::Envelope(envelope) => Ok(envelope.items),
        }
    }
}

#[async_trait]
impl RecordWriter for HttpRepository {
    async fn create(&self, resource: &ResourceName, record: &Record) -> RepositoryResult<Record> {
        let builder = self
            .request(Method::POST, &[resource.as_str()])
            .json(record);
        let body = self.execute(builder).await?;
        parse_record(&body)
    }

    async fn update(
        &self,
        resource: &ResourceName,
        id: RecordId,
        record: &Record,
    ) -> RepositoryResult<Record> {
        let id = id.to_string();
        let builder = self
            .request(Method::PUT, &[resource.as_str(), &id])
            .json(record);
        let body = self.execute(builder).await?;
        parse_record(&body)
    }

    async fn delete_one(&self, resource: &ResourceName, id: RecordId) -> RepositoryResult<Record> {
        let id = id.to_string();
        let body = self
            .execute(self.request(Method::DELETE, &[resource.as_str(), &id]))
            .await?;
        parse_record(&body)
    }
}
