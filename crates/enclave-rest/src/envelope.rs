//! Response envelope wrapping every synchronous API result

use serde::{Deserialize, Deserializer};

use crate::error::{RestError, RestResult};

/// `{success, result, error, error_code}` wrapper
///
/// `error` and `error_code` may be absent or `null`; both read as empty.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub result: Option<T>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub error: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub error_code: String,
}

/// Read a string field that the exchange sometimes sends as `null`
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.success
    }

    fn failure(&self) -> RestError {
        RestError::Envelope {
            message: self.error.clone(),
            code: self.error_code.clone(),
        }
    }

    /// Get the result, returning an error if the API reported failure
    pub fn into_result(self) -> RestResult<T> {
        if !self.success {
            return Err(self.failure());
        }
        self.result
            .ok_or_else(|| RestError::Parse("No result in response".to_string()))
    }

    /// Like [`Envelope::into_result`], but a missing result becomes `T::default()`
    pub fn into_result_or_default(self) -> RestResult<T>
    where
        T: Default,
    {
        if !self.success {
            return Err(self.failure());
        }
        Ok(self.result.unwrap_or_default())
    }

    /// Check success and discard the result
    pub fn into_unit(self) -> RestResult<()> {
        if !self.success {
            return Err(self.failure());
        }
        Ok(())
    }
}

/// Cursors for fetching neighbouring pages
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub prev_cursor: Option<String>,
}

impl PageInfo {
    /// Cursor for the next page, if there is one
    pub fn next(&self) -> Option<&str> {
        self.next_cursor.as_deref().filter(|c| !c.is_empty())
    }

    pub fn prev(&self) -> Option<&str> {
        self.prev_cursor.as_deref().filter(|c| !c.is_empty())
    }
}

/// Envelope with a `pageInfo` sibling
#[derive(Debug, Deserialize)]
pub struct PaginatedEnvelope<T> {
    #[serde(flatten)]
    pub envelope: Envelope<Vec<T>>,
    #[serde(rename = "pageInfo", default)]
    pub page_info: PageInfo,
}

impl<T> PaginatedEnvelope<T> {
    /// An absent result is an empty page
    pub fn into_page(self) -> RestResult<Page<T>> {
        let items = self.envelope.into_result_or_default()?;
        Ok(Page {
            items,
            page_info: self.page_info,
        })
    }
}

/// One page of a list endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_info: PageInfo,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page_info.next().is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct OrderId {
        order_id: String,
    }

    #[test]
    fn test_success_envelope() {
        let envelope: Envelope<OrderId> =
            serde_json::from_str(r#"{"success":true,"result":{"orderId":"123"}}"#).unwrap();
        assert_eq!(envelope.into_result().unwrap().order_id, "123");
    }

    #[test]
    fn test_failure_envelope() {
        let envelope: Envelope<OrderId> = serde_json::from_str(
            r#"{"success":false,"error":"insufficient balance","error_code":"E100"}"#,
        )
        .unwrap();
        match envelope.into_result() {
            Err(RestError::Envelope { message, code }) => {
                assert_eq!(message, "insufficient balance");
                assert_eq!(code, "E100");
            }
            other => panic!("expected Envelope error, got {:?}", other),
        }
    }

    #[test]
    fn test_null_error_fields_on_success() {
        let envelope: Envelope<OrderId> = serde_json::from_str(
            r#"{"success":true,"result":{"orderId":"123"},"error":null,"error_code":null}"#,
        )
        .unwrap();
        assert!(envelope.error.is_empty());
        assert!(envelope.error_code.is_empty());
        assert_eq!(envelope.into_result().unwrap().order_id, "123");
    }

    #[test]
    fn test_null_message_on_failure_keeps_code() {
        let envelope: Envelope<OrderId> =
            serde_json::from_str(r#"{"success":false,"error":null,"error_code":"E100"}"#).unwrap();
        match envelope.into_result() {
            Err(RestError::Envelope { message, code }) => {
                assert!(message.is_empty());
                assert_eq!(code, "E100");
            }
            other => panic!("expected Envelope error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_result_is_parse_error() {
        let envelope: Envelope<OrderId> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(matches!(envelope.into_result(), Err(RestError::Parse(_))));
    }

    #[test]
    fn test_missing_result_defaults_when_asked() {
        let envelope: Envelope<Vec<String>> =
            serde_json::from_str(r#"{"success":true,"result":null}"#).unwrap();
        assert!(envelope.into_result_or_default().unwrap().is_empty());
    }

    #[test]
    fn test_failure_wins_over_unit() {
        let envelope: Envelope<serde_json::Value> =
            serde_json::from_str(r#"{"success":false,"error":"nope","error_code":"E1"}"#).unwrap();
        assert!(envelope.into_unit().is_err());
    }

    #[test]
    fn test_paginated_envelope() {
        let body = r#"{
            "success": true,
            "result": [{"orderId": "1"}, {"orderId": "2"}],
            "error": "",
            "error_code": "",
            "pageInfo": {"nextCursor": "abc", "prevCursor": ""}
        }"#;
        let page = serde_json::from_str::<PaginatedEnvelope<OrderId>>(body)
            .unwrap()
            .into_page()
            .unwrap();
        assert_eq!(page.len(), 2);
        assert!(page.has_next());
        assert_eq!(page.page_info.next(), Some("abc"));
        assert_eq!(page.page_info.prev(), None);
        let ids: Vec<String> = page.into_iter().map(|o| o.order_id).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_paginated_envelope_without_page_info() {
        let page = serde_json::from_str::<PaginatedEnvelope<OrderId>>(r#"{"success":true,"result":[]}"#)
            .unwrap()
            .into_page()
            .unwrap();
        assert!(page.is_empty());
        assert!(!page.has_next());
    }
}
