use serde::Deserialize;

use crate::domain::list::{ListRequest, Sort};
use crate::domain::types::{PageSize, ResourceName};

/// Query parameters accepted by the users list service.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UsersQuery {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub sort: Option<Sort>,
}

impl UsersQuery {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1)
    }

    pub fn page_size(&self) -> usize {
        self.page_size.unwrap_or(PageSize::DEFAULT.get() as usize)
    }

    pub fn to_list_request(&self) -> ListRequest {
        let mut request = ListRequest::new(ResourceName::users()).paginate(
            i64::try_from(self.page()).unwrap_or(i64::MAX),
            i64::try_from(self.page_size()).unwrap_or(i64::MAX),
        );

        if let Some(sort) = &self.sort {
            request = request.sort(sort.clone());
        }

        request
    }
}
