//! Shared data-transfer types for the minutes taker.
//!
//! The meeting/template structs below are the persisted shapes: the whole
//! store is serialized as one [`MeetingStoreFile`] blob, and the camelCase
//! field names (`startTime`, `actionItems`, `timerDuration`, ...) must stay
//! exactly as they are so that blobs written by earlier releases keep
//! loading. Dates travel as `YYYY-MM-DD` strings; an unset optional date is
//! the empty string.

use serde::{Deserialize, Serialize};

/// One meeting's full record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: String,
    pub title: String,
    /// Meeting date (`YYYY-MM-DD`)
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    /// Attendees as free text
    pub attendees: String,
    pub agenda: String,
    /// Meeting type tag (`"team"`, `"one-on-one"`, ...) or empty
    pub meeting_type: String,
    /// Minutes as rich-text markup
    pub minutes: String,
    pub action_items: Vec<ActionItem>,
    pub decisions: Vec<Decision>,
    /// Elapsed timer duration in seconds
    pub timer_duration: u64,
    pub is_template: bool,
}

/// A task captured during a meeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub id: String,
    pub description: String,
    pub assignee: String,
    /// Due date (`YYYY-MM-DD`) or empty when none was set
    pub due_date: String,
    pub completed: bool,
}

/// A decision recorded during a meeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub id: String,
    pub description: String,
    pub decision_makers: String,
    pub rationale: String,
    /// Decision date (`YYYY-MM-DD`) or empty when none was set
    pub date: String,
}

/// A reusable meeting skeleton snapshotted from a meeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingTemplate {
    pub id: String,
    pub name: String,
    pub meeting_type: String,
    pub agenda: String,
    pub attendees: String,
    pub location: String,
}

/// Root of the persisted store blob.
///
/// The active-meeting pointer is deliberately absent: it is session state and
/// does not survive restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingStoreFile {
    pub meetings: Vec<Meeting>,
    pub templates: Vec<MeetingTemplate>,
}

/// Request to render a meeting as a minutes document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocumentRequest {
    /// Meeting to export; uses the active meeting when not provided
    pub meeting_id: Option<String>,
}

/// Rendered minutes document plus a suggested filename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocumentResponse {
    pub content: String,
    pub filename: String,
    pub meeting_title: String,
}

/// Request to export a meeting document to a directory on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathRequest {
    /// Meeting to export; uses the active meeting when not provided
    pub meeting_id: Option<String>,
    /// Target directory; uses the Documents folder when not provided
    pub custom_path: Option<String>,
}

/// Outcome of an export-to-path operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathResponse {
    pub success: bool,
    pub message: String,
    pub file_path: String,
    pub meeting_title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meeting_serializes_with_camel_case_field_names() {
        let meeting = Meeting {
            id: "m1".to_string(),
            title: "Standup".to_string(),
            date: "2024-05-01".to_string(),
            start_time: "09:00".to_string(),
            end_time: "09:15".to_string(),
            location: "".to_string(),
            attendees: "".to_string(),
            agenda: "".to_string(),
            meeting_type: "team".to_string(),
            minutes: "".to_string(),
            action_items: vec![ActionItem {
                id: "a1".to_string(),
                description: "Ship v2".to_string(),
                assignee: "Amy".to_string(),
                due_date: "2024-05-01".to_string(),
                completed: false,
            }],
            decisions: vec![Decision {
                id: "d1".to_string(),
                description: "Adopt Rust".to_string(),
                decision_makers: "Amy, Bob".to_string(),
                rationale: "".to_string(),
                date: "".to_string(),
            }],
            timer_duration: 0,
            is_template: false,
        };

        let json = serde_json::to_string(&meeting).unwrap();
        for key in [
            "\"startTime\"",
            "\"endTime\"",
            "\"meetingType\"",
            "\"actionItems\"",
            "\"dueDate\"",
            "\"decisionMakers\"",
            "\"timerDuration\"",
            "\"isTemplate\"",
        ] {
            assert!(json.contains(key), "missing key {} in {}", key, json);
        }
    }

    #[test]
    fn test_store_file_round_trip() {
        let file = MeetingStoreFile {
            meetings: vec![],
            templates: vec![MeetingTemplate {
                id: "t1".to_string(),
                name: "Weekly".to_string(),
                meeting_type: "team".to_string(),
                agenda: "Review".to_string(),
                attendees: "Everyone".to_string(),
                location: "Room 1".to_string(),
            }],
        };

        let json = serde_json::to_string(&file).unwrap();
        let parsed: MeetingStoreFile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, file);
        assert!(json.contains("\"meetings\""));
        assert!(json.contains("\"templates\""));
    }
}
