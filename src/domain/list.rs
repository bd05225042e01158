//! Listing requests and responses exchanged with the front end.
//!
//! A [`ListRequest`] carries UI-side values as the caller supplied them; the
//! query translator validates them when building query parameters, so an
//! invalid page or field name surfaces as a translation error rather than at
//! construction time.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::types::{PageSize, ResourceName};

/// Field value of a generic record: a scalar, or `None` for JSON `null`.
pub type RecordValue = Option<Scalar>;

/// Generic backend record: a flat mapping from field name to scalar or null.
/// Nested objects and arrays do not deserialize into it.
pub type Record = BTreeMap<String, RecordValue>;

/// Comparison applied by a filter. The backend only understands equality.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    #[default]
    Eq,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single filter operand.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Bool(value) => write!(f, "{value}"),
            Scalar::Integer(value) => write!(f, "{value}"),
            Scalar::Float(value) => write!(f, "{value}"),
            Scalar::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

/// Filter operand: either one scalar or a sequence of them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    One(Scalar),
    Many(Vec<Scalar>),
}

macro_rules! filter_value_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FilterValue {
                fn from(value: $ty) -> Self {
                    FilterValue::One(value.into())
                }
            }
        )*
    };
}

filter_value_from_scalar!(Scalar, &str, String, i64, f64, bool);

impl From<Vec<Scalar>> for FilterValue {
    fn from(values: Vec<Scalar>) -> Self {
        FilterValue::Many(values)
    }
}

impl<T: Into<Scalar>> FromIterator<T> for FilterValue {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        FilterValue::Many(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// camelCase field name as used by the front end.
    pub field: String,
    #[serde(default)]
    pub operator: FilterOperator,
    pub value: FilterValue,
}

impl Filter {
    /// Equality filter on `field`.
    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self {
            field: field.into(),
            operator: FilterOperator::Eq,
            value: value.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    /// camelCase field name as used by the front end.
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl Sort {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// One listing request for a resource collection.
#[derive(Clone, Debug, PartialEq)]
pub struct ListRequest {
    pub resource: ResourceName,
    /// 1-based page requested by the caller.
    pub page_number: i64,
    pub page_size: i64,
    pub filters: Vec<Filter>,
    /// Only the first entry is sent to the backend.
    pub sorters: Vec<Sort>,
}

impl ListRequest {
    /// First page with the default page size, no filters and no sorting.
    pub fn new(resource: ResourceName) -> Self {
        Self {
            resource,
            page_number: 1,
            page_size: PageSize::DEFAULT.get() as i64,
            filters: Vec::new(),
            sorters: Vec::new(),
        }
    }

    pub fn paginate(mut self, page_number: i64, page_size: i64) -> Self {
        self.page_number = page_number;
        self.page_size = page_size;
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sorters.push(sort);
        self
    }
}

/// One page of records together with the full server-side match count.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T = Record> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> ListResponse<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    /// Applies `f` to every item, failing on the first error.
    pub fn try_map<U, E, F>(self, f: F) -> Result<ListResponse<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        let items = self.items.into_iter().map(f).collect::<Result<Vec<_>, E>>()?;
        Ok(ListResponse {
            items,
            total: self.total,
        })
    }
}
