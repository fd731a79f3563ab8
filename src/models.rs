//! Data structures exchanged with the backend function and the page.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ============================================================================
// Backend Request
// ============================================================================

/// Remote operation the proxy asks the backend function to run.
pub const GROUPS_SEARCH_ENDPOINT: &str = "accounts.groups.search";

/// Fixed search: every group reachable under the playground access model.
pub const GROUPS_QUERY: &str = "select * from groups";
pub const ACCESS_MODEL: &str = "playground-access";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub query: String,
    pub model: String,
}

/// Body posted to the backend function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendRequest {
    pub endpoint: String,
    pub params: SearchParams,
}

impl BackendRequest {
    pub fn groups_search() -> Self {
        Self {
            endpoint: GROUPS_SEARCH_ENDPOINT.to_string(),
            params: SearchParams {
                query: GROUPS_QUERY.to_string(),
                model: ACCESS_MODEL.to_string(),
            },
        }
    }
}

// ============================================================================
// Search Result
// ============================================================================

/// One access group as returned by the identity API.
///
/// Only `groupId` is guaranteed; the display helpers supply the fallbacks
/// the page shows for everything else. Fields of an unexpected type decode
/// the way the page script reads them instead of failing the whole result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRecord {
    #[serde(default, deserialize_with = "lenient_id")]
    pub group_id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub members_count: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub model: Option<String>,
}

/// Strings as-is, numbers and `true` stringified, anything else absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    })
}

fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

/// Any JSON number counts; everything else is treated as missing.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}

impl GroupRecord {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.group_id)
    }

    /// Member count as shown on the page: `5.0` reads `5`, zero or missing reads `0`.
    pub fn members(&self) -> String {
        match self.members_count {
            Some(n) if n != 0.0 && !n.is_nan() => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    (n as i64).to_string()
                } else {
                    n.to_string()
                }
            }
            _ => "0".to_string(),
        }
    }

    pub fn model_label(&self) -> &str {
        self.model
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or("N/A")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub results: Option<Vec<GroupRecord>>,
}

impl SearchResult {
    /// Records to render; absent and empty lists are the same empty state.
    pub fn groups(&self) -> &[GroupRecord] {
        self.results.as_deref().unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.groups().is_empty()
    }
}

// ============================================================================
// Error Body
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(BackendRequest::groups_search()).unwrap();
        assert_eq!(
            body,
            json!({
                "endpoint": "accounts.groups.search",
                "params": {"query": "select * from groups", "model": "playground-access"}
            })
        );
    }

    #[test]
    fn test_full_record_display() {
        let record: GroupRecord = serde_json::from_value(json!({
            "groupId": "g1", "name": "Team A", "membersCount": 5, "model": "m1"
        }))
        .unwrap();
        assert_eq!(record.display_name(), "Team A");
        assert_eq!(record.members(), "5");
        assert_eq!(record.model_label(), "m1");
    }

    #[test]
    fn test_bare_record_fallbacks() {
        let record: GroupRecord = serde_json::from_value(json!({"groupId": "g2"})).unwrap();
        assert_eq!(record.display_name(), "g2");
        assert_eq!(record.members(), "0");
        assert_eq!(record.model_label(), "N/A");

        let blank = GroupRecord {
            group_id: "g3".to_string(),
            name: Some(String::new()),
            members_count: None,
            model: Some(String::new()),
        };
        assert_eq!(blank.display_name(), "g3");
        assert_eq!(blank.model_label(), "N/A");
    }

    #[test]
    fn test_float_and_mistyped_fields_decode() {
        let record: GroupRecord = serde_json::from_value(json!({
            "groupId": "g1", "name": "Team A", "membersCount": 5.0, "model": "m1"
        }))
        .unwrap();
        assert_eq!(record.members(), "5");

        let record: GroupRecord = serde_json::from_value(json!({
            "groupId": 42, "name": null, "membersCount": "many", "model": {"id": "m"}
        }))
        .unwrap();
        assert_eq!(record.display_name(), "42");
        assert_eq!(record.members(), "0");
        assert_eq!(record.model_label(), "N/A");

        let record: GroupRecord =
            serde_json::from_value(json!({"groupId": "g", "membersCount": 2.5})).unwrap();
        assert_eq!(record.members(), "2.5");
    }

    #[test]
    fn test_absent_and_empty_results() {
        let absent: SearchResult = serde_json::from_value(json!({})).unwrap();
        let empty: SearchResult = serde_json::from_value(json!({"results": []})).unwrap();
        let null: SearchResult = serde_json::from_value(json!({"results": null})).unwrap();
        assert!(absent.is_empty());
        assert!(empty.is_empty());
        assert!(null.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_tolerated() {
        let result: SearchResult = serde_json::from_value(json!({
            "statusCode": 200,
            "results": [{"groupId": "g1", "created": "2024-01-01"}]
        }))
        .unwrap();
        assert_eq!(result.groups().len(), 1);
    }
}
