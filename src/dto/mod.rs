//! DTO modules that bridge services with the command line and other front ends.

use serde::Serialize;

use crate::domain::list::ListResponse;
use crate::pagination::Paginated;

pub mod contacts;
pub mod users;

/// One rendered page of a resource list.
#[derive(Debug, Serialize)]
pub struct ListPageData<T> {
    /// Items of the current page together with the page navigation.
    pub items: Paginated<T>,
    /// Number of records matching the query on the server.
    pub total: u64,
    pub page_size: u64,
}

impl<T> ListPageData<T> {
    pub fn from_response(response: ListResponse<T>, page: usize, page_size: u64) -> Self {
        Self {
            items: Paginated::from_total(response.items, page, page_size, response.total),
            total: response.total,
            page_size,
        }
    }
}
