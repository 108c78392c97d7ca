/// Uniform response envelope
///
/// Every API response, success or failure, shares one shape:
///
/// ```json
/// { "success": bool, "data": ..., "error": "...", "count": n, "stats": {...} }
/// ```
///
/// Optional members are omitted entirely when unset, so a create response is
/// just `{ "success": true, "data": {...} }` while a list response also
/// carries `count` and `stats`.

use serde::Serialize;
use taskboard_shared::query::TaskStats;

/// Response envelope wrapping every API payload
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    /// Whether the request succeeded
    pub success: bool,

    /// Number of items in `data` (list responses only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    /// Aggregate counts over the caller's entire task set (list responses)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<TaskStats>,

    /// Response payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Error message (failure responses only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    /// Success envelope carrying only a payload
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            count: None,
            stats: None,
            data: Some(data),
            error: None,
        }
    }

    /// Success envelope for a list: payload plus count and global stats
    pub fn list(data: T, count: usize, stats: TaskStats) -> Self {
        Self {
            success: true,
            count: Some(count),
            stats: Some(stats),
            data: Some(data),
            error: None,
        }
    }
}

impl Envelope<serde_json::Value> {
    /// Failure envelope carrying only an error message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            count: None,
            stats: None,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_envelope_omits_unset_members() {
        let envelope = Envelope::data(json!({"id": 1}));
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["id"], 1);
        assert!(json.get("count").is_none());
        assert!(json.get("stats").is_none());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_list_envelope_carries_count_and_stats() {
        let stats = TaskStats {
            total_tasks: 3,
            completed_tasks: 1,
            pending_tasks: 2,
        };
        let envelope = Envelope::list(json!([1, 2]), 2, stats);
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["count"], 2);
        assert_eq!(json["stats"]["totalTasks"], 3);
        assert_eq!(json["stats"]["pendingTasks"], 2);
    }

    #[test]
    fn test_error_envelope() {
        let envelope = Envelope::error("Task not found");
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Task not found");
        assert!(json.get("data").is_none());
    }
}
