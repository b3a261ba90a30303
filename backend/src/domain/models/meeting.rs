//! Domain model for a meeting and its owned collections.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Meeting type tag. The set matches the meeting form's selector; `None`
/// is the untagged state and serializes to the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MeetingType {
    #[default]
    None,
    Team,
    OneOnOne,
    ProjectKickoff,
    StatusUpdate,
    Sales,
    Client,
    Board,
    PerformanceReview,
    Strategy,
    Brainstorming,
    Training,
    AllHands,
    Retrospective,
    Planning,
    Interview,
    Other,
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown meeting type tag: {0}")]
pub struct UnknownMeetingType(pub String);

impl MeetingType {
    /// Tag value as stored in the persisted blob ("" when untagged).
    pub fn as_tag(&self) -> &'static str {
        match self {
            MeetingType::None => "",
            MeetingType::Team => "team",
            MeetingType::OneOnOne => "one-on-one",
            MeetingType::ProjectKickoff => "project-kickoff",
            MeetingType::StatusUpdate => "status-update",
            MeetingType::Sales => "sales",
            MeetingType::Client => "client",
            MeetingType::Board => "board",
            MeetingType::PerformanceReview => "performance-review",
            MeetingType::Strategy => "strategy",
            MeetingType::Brainstorming => "brainstorming",
            MeetingType::Training => "training",
            MeetingType::AllHands => "all-hands",
            MeetingType::Retrospective => "retrospective",
            MeetingType::Planning => "planning",
            MeetingType::Interview => "interview",
            MeetingType::Other => "other",
        }
    }

    /// Parse a stored tag value.
    pub fn from_tag(tag: &str) -> Result<Self, UnknownMeetingType> {
        match tag {
            "" => Ok(MeetingType::None),
            "team" => Ok(MeetingType::Team),
            "one-on-one" => Ok(MeetingType::OneOnOne),
            "project-kickoff" => Ok(MeetingType::ProjectKickoff),
            "status-update" => Ok(MeetingType::StatusUpdate),
            "sales" => Ok(MeetingType::Sales),
            "client" => Ok(MeetingType::Client),
            "board" => Ok(MeetingType::Board),
            "performance-review" => Ok(MeetingType::PerformanceReview),
            "strategy" => Ok(MeetingType::Strategy),
            "brainstorming" => Ok(MeetingType::Brainstorming),
            "training" => Ok(MeetingType::Training),
            "all-hands" => Ok(MeetingType::AllHands),
            "retrospective" => Ok(MeetingType::Retrospective),
            "planning" => Ok(MeetingType::Planning),
            "interview" => Ok(MeetingType::Interview),
            "other" => Ok(MeetingType::Other),
            unknown => Err(UnknownMeetingType(unknown.to_string())),
        }
    }

    /// Human-readable label for exported documents ("" when untagged).
    pub fn label(&self) -> &'static str {
        match self {
            MeetingType::None => "",
            MeetingType::Team => "Team Meeting",
            MeetingType::OneOnOne => "One-on-One",
            MeetingType::ProjectKickoff => "Project Kickoff",
            MeetingType::StatusUpdate => "Status Update",
            MeetingType::Sales => "Sales Meeting",
            MeetingType::Client => "Client Meeting",
            MeetingType::Board => "Board Meeting",
            MeetingType::PerformanceReview => "Performance Review",
            MeetingType::Strategy => "Strategy Session",
            MeetingType::Brainstorming => "Brainstorming Session",
            MeetingType::Training => "Training Session",
            MeetingType::AllHands => "All-Hands Meeting",
            MeetingType::Retrospective => "Retrospective",
            MeetingType::Planning => "Planning Meeting",
            MeetingType::Interview => "Interview",
            MeetingType::Other => "Other",
        }
    }
}

/// One meeting's full record. The id never changes after creation; action
/// items and decisions are owned exclusively by this meeting and keep their
/// insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub attendees: String,
    pub agenda: String,
    pub meeting_type: MeetingType,
    /// Rich-text markup as produced by the minutes editor
    pub minutes: String,
    pub action_items: Vec<ActionItem>,
    pub decisions: Vec<Decision>,
    /// Elapsed timer duration in seconds
    pub timer_duration: u64,
    pub is_template: bool,
}

impl Meeting {
    /// Generate a fresh meeting id, collision-free across the process
    /// lifetime.
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }
}

/// A task captured during a meeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub id: String,
    pub description: String,
    pub assignee: String,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
}

impl ActionItem {
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }
}

/// A decision recorded during a meeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub id: String,
    pub description: String,
    pub decision_makers: String,
    pub rationale: String,
    pub date: Option<NaiveDate>,
}

impl Decision {
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }
}
