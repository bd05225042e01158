//! Translation between UI listing requests and the backend's REST conventions.
//!
//! The backend pages from zero (`page=0` is the first page), names fields in
//! snake_case and expects multi-valued filters as a repeated key
//! (`filter_estado=a&filter_estado=b`), never with a `[]` suffix.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::list::{FilterOperator, FilterValue, ListRequest, ListResponse};
use crate::domain::types::{FieldName, PageNumber, PageSize};
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub const PAGE_PARAM: &str = "page";
pub const SIZE_PARAM: &str = "size";
pub const SORT_PARAM: &str = "sort";
pub const ORDER_PARAM: &str = "order";
pub const FILTER_PREFIX: &str = "filter_";

/// Ordered query parameters ready for encoding.
pub type QueryParams = Vec<(String, String)>;

/// Builds the query parameters of a list request.
///
/// Parameters come out as `page`, `size`, the filters in request order, then
/// `sort` and `order` for the first sorter. A filter whose value is an empty
/// sequence contributes nothing.
pub fn build_list_query(request: &ListRequest) -> RepositoryResult<QueryParams> {
    let page = PageNumber::new(request.page_number)?;
    let size = PageSize::new(request.page_size)?;

    let mut params: QueryParams = vec![
        (PAGE_PARAM.to_string(), page.zero_based().to_string()),
        (SIZE_PARAM.to_string(), size.get().to_string()),
    ];

    for filter in &request.filters {
        let field = FieldName::new(filter.field.as_str())?;
        let key = format!("{FILTER_PREFIX}{}", field.to_snake_case());

        match filter.operator {
            FilterOperator::Eq => match &filter.value {
                FilterValue::One(value) => params.push((key, value.to_string())),
                FilterValue::Many(values) => params.extend(
                    values
                        .iter()
                        .map(|value| (key.clone(), value.to_string())),
                ),
            },
        }
    }

    if let Some(sort) = request.sorters.first() {
        if request.sorters.len() > 1 {
            log::debug!(
                "Ignoring {} extra sort keys for {}",
                request.sorters.len() - 1,
                request.resource
            );
        }
        let field = FieldName::new(sort.field.as_str())?;
        params.push((SORT_PARAM.to_string(), field.to_snake_case()));
        params.push((ORDER_PARAM.to_string(), sort.direction.as_str().to_string()));
    }

    Ok(params)
}

/// Encodes parameters as a query string, repeating keys for multiple values.
pub fn encode_query(params: &[(String, String)]) -> RepositoryResult<String> {
    serde_html_form::to_string(params).map_err(|e| RepositoryError::Validation(e.to_string()))
}

/// Parses a `{items, total}` list body.
///
/// Fails with [`RepositoryError::MalformedResponse`] when either field is
/// missing, `items` is not a sequence of records, or `total` is not a
/// non-negative integer.
pub fn parse_list_response<T>(body: &str) -> RepositoryResult<ListResponse<T>>
where
    T: DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| RepositoryError::MalformedResponse(e.to_string()))
}

/// Inverse of [`parse_list_response`].
pub fn serialize_list_response<T>(response: &ListResponse<T>) -> RepositoryResult<String>
where
    T: Serialize,
{
    serde_json::to_string(response).map_err(|e| RepositoryError::MalformedResponse(e.to_string()))
}

/// Parses a single-record body.
pub fn parse_record<T>(body: &str) -> RepositoryResult<T>
where
    T: DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| RepositoryError::MalformedResponse(e.to_string()))
}
