//! Domain model for a meeting template.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::meeting::MeetingType;

/// A reusable meeting skeleton. Templates capture only the structural
/// context of a meeting (type, agenda, attendees, location); minutes, action
/// items, decisions and timer state stay behind. Once created, a template
/// has no link back to its source meeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingTemplate {
    pub id: String,
    pub name: String,
    pub meeting_type: MeetingType,
    pub agenda: String,
    pub attendees: String,
    pub location: String,
}

impl MeetingTemplate {
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }
}
