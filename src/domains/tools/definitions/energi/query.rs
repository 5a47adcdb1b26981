//! Query parameters for the Energinet Data Service dataset endpoints.

use serde::Serialize;

/// Largest page the tools will ever request.
pub const MAX_LIMIT: usize = 100;

/// Clamp a requested limit to the allowed range (1-100).
///
/// Zero and negative limits become 1.
pub fn clamp_limit(limit: i64) -> usize {
    // in range after the clamp, so the cast cannot truncate
    limit.clamp(1, MAX_LIMIT as i64) as usize
}

/// Build the filter expression selecting a single price area.
pub fn price_area_filter(price_area: &str) -> String {
    format!(r#""PriceArea" = "{}""#, price_area)
}

/// Query string parameters sent with a dataset request.
///
/// Unset fields are left out of the query string. Field order is the order
/// the parameters appear on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    columns: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<String>,
}

impl QueryParams {
    /// Start a parameter set with the given page size, clamped to 1-100.
    pub fn with_limit(limit: i64) -> Self {
        Self {
            limit: Some(clamp_limit(limit)),
            ..Default::default()
        }
    }

    /// Records to skip. Zero and negative offsets are not sent.
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = u64::try_from(offset).ok().filter(|o| *o > 0);
        self
    }

    pub fn start(mut self, start: Option<impl Into<String>>) -> Self {
        self.start = non_empty(start);
        self
    }

    pub fn end(mut self, end: Option<impl Into<String>>) -> Self {
        self.end = non_empty(end);
        self
    }

    pub fn filter(mut self, filter: Option<impl Into<String>>) -> Self {
        self.filter = non_empty(filter);
        self
    }

    pub fn columns(mut self, columns: Option<impl Into<String>>) -> Self {
        self.columns = non_empty(columns);
        self
    }

    pub fn sort(mut self, sort: Option<impl Into<String>>) -> Self {
        self.sort = non_empty(sort);
        self
    }

    /// The clamped limit, if one was set.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Render as an URL-encoded query string (used for logging).
    pub fn to_query_string(&self) -> String {
        serde_urlencoded::to_string(self).unwrap_or_default()
    }
}

fn non_empty(value: Option<impl Into<String>>) -> Option<String> {
    value.map(Into::into).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(0), 1);
        assert_eq!(clamp_limit(1), 1);
        assert_eq!(clamp_limit(24), 24);
        assert_eq!(clamp_limit(100), 100);
        assert_eq!(clamp_limit(101), 100);
        assert_eq!(clamp_limit(i64::MAX), 100);
    }

    #[test]
    fn test_negative_limit_becomes_one() {
        assert_eq!(clamp_limit(-5), 1);
        assert_eq!(clamp_limit(i64::MIN), 1);
        assert_eq!(QueryParams::with_limit(-5).to_query_string(), "limit=1");
    }

    #[test]
    fn test_limit_in_range_is_unchanged() {
        for limit in 1..=MAX_LIMIT {
            assert_eq!(QueryParams::with_limit(limit as i64).limit(), Some(limit));
        }
    }

    #[test]
    fn test_limit_above_range_is_capped() {
        for limit in [101, 250, 1000, 10_000] {
            assert_eq!(QueryParams::with_limit(limit).limit(), Some(MAX_LIMIT));
        }
    }

    #[test]
    fn test_zero_offset_is_omitted() {
        let params = QueryParams::with_limit(10).offset(0);
        assert_eq!(params.to_query_string(), "limit=10");

        let params = QueryParams::with_limit(10).offset(20);
        assert_eq!(params.to_query_string(), "limit=10&offset=20");
    }

    #[test]
    fn test_negative_offset_is_omitted() {
        let params = QueryParams::with_limit(10).offset(-3);
        assert_eq!(params.to_query_string(), "limit=10");
    }

    #[test]
    fn test_empty_strings_are_omitted() {
        let params = QueryParams::with_limit(5)
            .start(Some(""))
            .end(None::<String>)
            .sort(Some("HourUTC DESC"));
        assert_eq!(params.to_query_string(), "limit=5&sort=HourUTC+DESC");
    }

    #[test]
    fn test_query_string_order_and_encoding() {
        let params = QueryParams::with_limit(2)
            .offset(4)
            .start(Some("2024-01-01T00:00"))
            .end(Some("2024-01-02T00:00"))
            .filter(Some(price_area_filter("DK1")))
            .columns(Some("HourDK,SpotPriceDKK"))
            .sort(Some("HourUTC DESC"));

        let query = params.to_query_string();
        let keys: Vec<_> = query
            .split('&')
            .filter_map(|pair| pair.split_once('=').map(|(k, _)| k))
            .collect();
        assert_eq!(
            keys,
            ["limit", "offset", "start", "end", "filter", "columns", "sort"]
        );
        assert!(query.contains("filter=%22PriceArea%22+%3D+%22DK1%22"));
    }

    #[test]
    fn test_price_area_filter() {
        assert_eq!(price_area_filter("DK2"), r#""PriceArea" = "DK2""#);
    }
}
