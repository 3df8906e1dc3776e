use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Structured event stream emitted by the search controller
///
/// One JSON object per event, tagged by `event`, so a scripted typing session
/// can be replayed and inspected with jq.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SearchEvent {
    /// Query text changed (input is visible immediately)
    QueryChanged {
        timestamp: DateTime<Utc>,
        query: String,
    },

    /// Debounce timer (re)scheduled
    TimerScheduled {
        timestamp: DateTime<Utc>,
        query: String,
        delay_ms: u64,
        superseded: bool,
    },

    /// Timer fired and a source call was issued
    FetchStarted {
        timestamp: DateTime<Utc>,
        query: String,
        dispatch: u64,
    },

    /// Source resolved
    FetchCompleted {
        timestamp: DateTime<Utc>,
        query: String,
        dispatch: u64,
        results: usize,
        /// False when a newer dispatch made this result stale and it was dropped
        applied: bool,
    },

    /// Source rejected
    FetchFailed {
        timestamp: DateTime<Utc>,
        query: String,
        dispatch: u64,
        message: String,
        /// False when a newer dispatch made this failure stale and it was dropped
        applied: bool,
    },
}

impl SearchEvent {
    /// Get timestamp from any event variant
    pub fn timestamp(&self) -> &DateTime<Utc> {
        match self {
            SearchEvent::QueryChanged { timestamp, .. } => timestamp,
            SearchEvent::TimerScheduled { timestamp, .. } => timestamp,
            SearchEvent::FetchStarted { timestamp, .. } => timestamp,
            SearchEvent::FetchCompleted { timestamp, .. } => timestamp,
            SearchEvent::FetchFailed { timestamp, .. } => timestamp,
        }
    }

    /// Get the query an event refers to
    pub fn query(&self) -> &str {
        match self {
            SearchEvent::QueryChanged { query, .. } => query,
            SearchEvent::TimerScheduled { query, .. } => query,
            SearchEvent::FetchStarted { query, .. } => query,
            SearchEvent::FetchCompleted { query, .. } => query,
            SearchEvent::FetchFailed { query, .. } => query,
        }
    }

    /// Check if this event marks a source call being issued
    pub fn is_fetch_start(&self) -> bool {
        matches!(self, SearchEvent::FetchStarted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_timer_scheduled() {
        let event = SearchEvent::TimerScheduled {
            timestamp: Utc::now(),
            query: "lap".to_string(),
            delay_ms: 750,
            superseded: true,
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""event":"timer_scheduled"#));
        assert!(json.contains(r#""delay_ms":750"#));
        assert!(json.contains(r#""superseded":true"#));
    }

    #[test]
    fn test_deserialize_fetch_completed() {
        let json = r#"{"event":"fetch_completed","timestamp":"2024-05-01T12:00:00Z","query":"laptop","dispatch":2,"results":3,"applied":false}"#;
        let event: SearchEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.query(), "laptop");
        assert!(matches!(
            event,
            SearchEvent::FetchCompleted { dispatch: 2, results: 3, applied: false, .. }
        ));
    }

    #[test]
    fn test_serialize_dropped_failure() {
        let event = SearchEvent::FetchFailed {
            timestamp: Utc::now(),
            query: "lap".to_string(),
            dispatch: 1,
            message: "mock failure".to_string(),
            applied: false,
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""event":"fetch_failed"#));
        assert!(json.contains(r#""applied":false"#));
    }

    #[test]
    fn test_event_helpers() {
        let event = SearchEvent::FetchStarted {
            timestamp: Utc::now(),
            query: "tab".to_string(),
            dispatch: 1,
        };

        assert_eq!(event.query(), "tab");
        assert!(event.is_fetch_start());
    }
}
