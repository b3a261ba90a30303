//! Domain-level command and query types.
//!
//! These structs are the inputs and outputs of the domain services. Partial
//! updates are closed structs with one `Option` per updatable attribute:
//! `None` keeps the prior value. Attributes that are themselves optional
//! (clearable dates) use `Option<Option<...>>`, where `Some(None)` clears
//! the value.
//!
//! Mutations aimed at a missing target are not errors: the result payload
//! carries `None`/`false` and the store is left untouched.

pub mod meetings {
    use chrono::NaiveDate;

    use crate::domain::models::meeting::{ActionItem, Decision, Meeting, MeetingType};

    /// Input for creating a meeting. Unset fields take the store defaults:
    /// today's date, empty strings, empty collections, zero duration.
    #[derive(Debug, Clone, Default)]
    pub struct CreateMeetingCommand {
        pub title: Option<String>,
        pub date: Option<NaiveDate>,
        pub start_time: Option<String>,
        pub end_time: Option<String>,
        pub location: Option<String>,
        pub attendees: Option<String>,
        pub agenda: Option<String>,
        pub meeting_type: Option<MeetingType>,
        pub minutes: Option<String>,
        pub action_items: Option<Vec<ActionItem>>,
        pub decisions: Option<Vec<Decision>>,
        pub timer_duration: Option<u64>,
    }

    /// Partial update of a meeting's scalar fields. The id itself is never
    /// updatable.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateMeetingCommand {
        pub meeting_id: String,
        pub title: Option<String>,
        pub date: Option<NaiveDate>,
        pub start_time: Option<String>,
        pub end_time: Option<String>,
        pub location: Option<String>,
        pub attendees: Option<String>,
        pub agenda: Option<String>,
        pub meeting_type: Option<MeetingType>,
        pub minutes: Option<String>,
        pub timer_duration: Option<u64>,
        pub is_template: Option<bool>,
    }

    #[derive(Debug, Clone)]
    pub struct GetMeetingCommand {
        pub meeting_id: String,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteMeetingCommand {
        pub meeting_id: String,
    }

    /// Input for moving the active-meeting pointer. The id is not checked
    /// against the meeting collection.
    #[derive(Debug, Clone)]
    pub struct SetActiveMeetingCommand {
        pub meeting_id: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct CreateMeetingResult {
        pub meeting: Meeting,
    }

    /// `meeting` is `None` when the target did not exist (no-op).
    #[derive(Debug, Clone)]
    pub struct UpdateMeetingResult {
        pub meeting: Option<Meeting>,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteMeetingResult {
        pub deleted: bool,
        /// Active pointer after the deletion
        pub active_meeting_id: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct GetMeetingResult {
        pub meeting: Option<Meeting>,
    }

    #[derive(Debug, Clone)]
    pub struct ListMeetingsResult {
        pub meetings: Vec<Meeting>,
    }

    /// `meeting` is `None` when the pointer is unset or dangling.
    #[derive(Debug, Clone)]
    pub struct GetActiveMeetingResult {
        pub meeting: Option<Meeting>,
    }

    #[derive(Debug, Clone)]
    pub struct SetActiveMeetingResult {
        pub active_meeting_id: Option<String>,
    }
}

pub mod action_items {
    use chrono::NaiveDate;

    use crate::domain::models::meeting::ActionItem;

    /// Input for appending an action item to a meeting.
    #[derive(Debug, Clone, Default)]
    pub struct AddActionItemCommand {
        pub meeting_id: String,
        pub description: String,
        pub assignee: String,
        pub due_date: Option<NaiveDate>,
        pub completed: bool,
    }

    /// Partial update of one action item, addressed by (meeting, item).
    #[derive(Debug, Clone, Default)]
    pub struct UpdateActionItemCommand {
        pub meeting_id: String,
        pub item_id: String,
        pub description: Option<String>,
        pub assignee: Option<String>,
        /// `Some(None)` clears the due date
        pub due_date: Option<Option<NaiveDate>>,
        pub completed: Option<bool>,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteActionItemCommand {
        pub meeting_id: String,
        pub item_id: String,
    }

    /// `item` is `None` when the meeting did not exist (no-op).
    #[derive(Debug, Clone)]
    pub struct AddActionItemResult {
        pub item: Option<ActionItem>,
    }

    /// `item` is `None` when the meeting or the item did not exist (no-op).
    #[derive(Debug, Clone)]
    pub struct UpdateActionItemResult {
        pub item: Option<ActionItem>,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteActionItemResult {
        pub deleted: bool,
    }
}

pub mod decisions {
    use chrono::NaiveDate;

    use crate::domain::models::meeting::Decision;

    /// Input for appending a decision to a meeting.
    #[derive(Debug, Clone, Default)]
    pub struct AddDecisionCommand {
        pub meeting_id: String,
        pub description: String,
        pub decision_makers: String,
        pub rationale: String,
        pub date: Option<NaiveDate>,
    }

    /// Partial update of one decision, addressed by (meeting, decision).
    #[derive(Debug, Clone, Default)]
    pub struct UpdateDecisionCommand {
        pub meeting_id: String,
        pub decision_id: String,
        pub description: Option<String>,
        pub decision_makers: Option<String>,
        pub rationale: Option<String>,
        /// `Some(None)` clears the date
        pub date: Option<Option<NaiveDate>>,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteDecisionCommand {
        pub meeting_id: String,
        pub decision_id: String,
    }

    /// `decision` is `None` when the meeting did not exist (no-op).
    #[derive(Debug, Clone)]
    pub struct AddDecisionResult {
        pub decision: Option<Decision>,
    }

    /// `decision` is `None` when the meeting or decision did not exist.
    #[derive(Debug, Clone)]
    pub struct UpdateDecisionResult {
        pub decision: Option<Decision>,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteDecisionResult {
        pub deleted: bool,
    }
}

pub mod templates {
    use crate::domain::models::meeting::{Meeting, MeetingType};
    use crate::domain::models::template::MeetingTemplate;

    /// Input for snapshotting a meeting into a named template.
    #[derive(Debug, Clone)]
    pub struct SaveAsTemplateCommand {
        pub name: String,
        pub meeting_id: String,
    }

    /// Input for instantiating a new meeting from a template.
    #[derive(Debug, Clone)]
    pub struct CreateFromTemplateCommand {
        pub template_id: String,
    }

    /// Partial update of a template.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateTemplateCommand {
        pub template_id: String,
        pub name: Option<String>,
        pub meeting_type: Option<MeetingType>,
        pub agenda: Option<String>,
        pub attendees: Option<String>,
        pub location: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct GetTemplateCommand {
        pub template_id: String,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteTemplateCommand {
        pub template_id: String,
    }

    /// `template` is `None` when the source meeting did not exist (no-op).
    #[derive(Debug, Clone)]
    pub struct SaveAsTemplateResult {
        pub template: Option<MeetingTemplate>,
    }

    /// `meeting` is `None` when the template did not exist (no-op).
    #[derive(Debug, Clone)]
    pub struct CreateFromTemplateResult {
        pub meeting: Option<Meeting>,
    }

    /// `template` is `None` when the target did not exist (no-op).
    #[derive(Debug, Clone)]
    pub struct UpdateTemplateResult {
        pub template: Option<MeetingTemplate>,
    }

    #[derive(Debug, Clone)]
    pub struct GetTemplateResult {
        pub template: Option<MeetingTemplate>,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteTemplateResult {
        pub deleted: bool,
    }

    #[derive(Debug, Clone)]
    pub struct ListTemplatesResult {
        pub templates: Vec<MeetingTemplate>,
    }
}
