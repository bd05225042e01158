use serde::Deserialize;

use crate::domain::contact::ContactStatus;
use crate::domain::list::{Filter, FilterValue, ListRequest, Sort};
use crate::domain::types::{PageSize, ResourceName};

/// Query parameters accepted by the contacts list service.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ContactsQuery {
    /// 1-based page; the first page when absent.
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    /// Pipeline stages to include; every stage when empty.
    #[serde(default)]
    pub estado: Vec<ContactStatus>,
    pub sort: Option<Sort>,
}

impl ContactsQuery {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1)
    }

    pub fn page_size(&self) -> usize {
        self.page_size.unwrap_or(PageSize::DEFAULT.get() as usize)
    }

    pub fn to_list_request(&self) -> ListRequest {
        let mut request = ListRequest::new(ResourceName::contacts()).paginate(
            i64::try_from(self.page()).unwrap_or(i64::MAX),
            i64::try_from(self.page_size()).unwrap_or(i64::MAX),
        );

        if !self.estado.is_empty() {
            request = request.filter(Filter::eq(
                "estado",
                self.estado
                    .iter()
                    .map(|status| status.as_str())
                    .collect::<FilterValue>(),
            ));
        }
        if let Some(sort) = &self.sort {
            request = request.sort(sort.clone());
        }

        request
    }
}
