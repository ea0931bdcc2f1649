//! Query string helpers shared by list endpoints

use crate::request::Query;

/// Something that contributes query parameters to a request
pub trait QueryParams {
    /// Add this value's parameters to `query`
    fn append_to(&self, query: &mut Query);

    /// Build a fresh query from this value alone
    fn to_query(&self) -> Query {
        let mut query = Query::new();
        self.append_to(&mut query);
        query
    }
}

/// Time window in milliseconds since the Unix epoch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    pub start_ms: Option<u64>,
    pub end_ms: Option<u64>,
}

impl TimeRange {
    pub fn new(start_ms: u64, end_ms: u64) -> Self {
        Self {
            start_ms: Some(start_ms),
            end_ms: Some(end_ms),
        }
    }

    pub fn since(start_ms: u64) -> Self {
        Self {
            start_ms: Some(start_ms),
            end_ms: None,
        }
    }
}

impl QueryParams for TimeRange {
    fn append_to(&self, query: &mut Query) {
        query.insert_opt("startTime", self.start_ms.filter(|ms| *ms != 0));
        query.insert_opt("endTime", self.end_ms.filter(|ms| *ms != 0));
    }
}

/// Cursor based pagination
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paging {
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

impl Paging {
    pub fn limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            cursor: None,
        }
    }

    /// Continue from a cursor returned in a previous page
    pub fn after(cursor: impl Into<String>) -> Self {
        Self {
            limit: None,
            cursor: Some(cursor.into()),
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl QueryParams for Paging {
    fn append_to(&self, query: &mut Query) {
        query.insert_opt("limit", self.limit.filter(|limit| *limit != 0));
        if let Some(cursor) = self.cursor.as_deref().filter(|c| !c.is_empty()) {
            query.insert("cursor", cursor);
        }
    }
}

/// Pagination restricted to a time window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagingAndTimeRange {
    pub paging: Paging,
    pub time_range: TimeRange,
}

impl PagingAndTimeRange {
    pub fn new(paging: Paging, time_range: TimeRange) -> Self {
        Self { paging, time_range }
    }
}

impl QueryParams for PagingAndTimeRange {
    fn append_to(&self, query: &mut Query) {
        self.paging.append_to(query);
        self.time_range.append_to(query);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_params_add_nothing() {
        assert!(TimeRange::default().to_query().is_empty());
        assert!(Paging::default().to_query().is_empty());
        assert!(PagingAndTimeRange::default().to_query().is_empty());
    }

    #[test]
    fn test_zero_values_are_omitted() {
        let params = PagingAndTimeRange::new(Paging::limit(0), TimeRange::new(0, 0));
        assert!(params.to_query().is_empty());
    }

    #[test]
    fn test_time_range() {
        let query = TimeRange::new(1000, 2000).to_query();
        assert_eq!(query.get("startTime"), Some("1000"));
        assert_eq!(query.get("endTime"), Some("2000"));
    }

    #[test]
    fn test_empty_cursor_is_skipped() {
        let paging = Paging {
            limit: Some(5),
            cursor: Some(String::new()),
        };
        let query = paging.to_query();
        assert_eq!(query.get("limit"), Some("5"));
        assert_eq!(query.get("cursor"), None);
    }

    #[test]
    fn test_paging_and_time_range_merge() {
        let params = PagingAndTimeRange::new(Paging::after("abc").with_limit(10), TimeRange::since(7));
        assert_eq!(
            params.to_query().encode().unwrap(),
            "cursor=abc&limit=10&startTime=7"
        );
    }
}
