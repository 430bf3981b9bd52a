use crate::error::QueryError;
use crate::record::Status;
use log::warn;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Field a user list can be ordered by.
///
/// Each key maps to a typed accessor in the engine, so an unknown key can
/// only arise while parsing and always resolves to `Name`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Email,
    Id,
}

impl SortKey {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "name" => SortKey::Name,
            "email" => SortKey::Email,
            "id" => SortKey::Id,
            other => {
                warn!("unknown sort key '{}', falling back to name", other);
                SortKey::Name
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Email => "email",
            SortKey::Id => "id",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            other => {
                warn!("unknown sort order '{}', falling back to asc", other);
                SortOrder::Asc
            }
        }
    }

    pub fn is_desc(&self) -> bool {
        matches!(self, SortOrder::Desc)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "all" => StatusFilter::All,
            "active" => StatusFilter::Active,
            "inactive" => StatusFilter::Inactive,
            other => {
                warn!("unknown status filter '{}', falling back to all", other);
                StatusFilter::All
            }
        }
    }

    /// Whether a record with the given status passes this filter.
    /// Records without a status only pass `All`.
    pub fn admits(&self, status: Option<Status>) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => status == Some(Status::Active),
            StatusFilter::Inactive => status == Some(Status::Inactive),
        }
    }
}

/// Search, filter, ordering and pagination parameters for one engine call.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub search: String,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
    pub status: StatusFilter,
    /// 1-based page number
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort_by: SortKey::Name,
            sort_order: SortOrder::Asc,
            status: StatusFilter::All,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListQuery {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn sorted_by(mut self, key: SortKey, order: SortOrder) -> Self {
        self.sort_by = key;
        self.sort_order = order;
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn page(mut self, page: usize, page_size: usize) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    /// Build a query from loosely typed parameters such as URL query strings.
    ///
    /// Enumerated values are normalised; `page` and `pageSize` must parse as
    /// positive integers.
    pub fn from_raw(raw: &RawQuery) -> Result<Self, QueryError> {
        let defaults = ListQuery::default();

        Ok(ListQuery {
            search: raw.search.clone().unwrap_or_default(),
            sort_by: raw.sort_by.as_deref().map_or(defaults.sort_by, SortKey::parse),
            sort_order: raw
                .sort_order
                .as_deref()
                .map_or(defaults.sort_order, SortOrder::parse),
            status: raw
                .status
                .as_deref()
                .map_or(defaults.status, StatusFilter::parse),
            page: parse_positive("page", raw.page.as_deref(), defaults.page)?,
            page_size: parse_positive("pageSize", raw.page_size.as_deref(), defaults.page_size)?,
        })
    }
}

/// Unvalidated query parameters exactly as a presentation layer hands them over.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuery {
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub status: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

fn parse_positive(name: &str, value: Option<&str>, default: usize) -> Result<usize, QueryError> {
    let Some(value) = value else {
        return Ok(default);
    };

    let parsed: i64 = value
        .trim()
        .parse()
        .map_err(|_| QueryError::invalid(format!("{name} must be an integer, got '{value}'")))?;

    if parsed <= 0 {
        return Err(QueryError::invalid(format!(
            "{name} must be positive, got {parsed}"
        )));
    }

    usize::try_from(parsed)
        .map_err(|_| QueryError::invalid(format!("{name} is out of range: {parsed}")))
}
