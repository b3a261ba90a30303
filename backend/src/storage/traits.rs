//! # Storage Traits
//!
//! Storage abstraction traits for the meeting store. The domain layer works
//! against these interfaces, so the persistence format can change without
//! touching the services.
//!
//! All operations are synchronous: the app is a single-writer desktop
//! process and nothing here blocks on anything but the local filesystem.

use anyhow::Result;

use crate::domain::models::meeting::Meeting;
use crate::domain::models::template::MeetingTemplate;

/// Interface for meeting persistence plus the active-meeting pointer.
pub trait MeetingStorage: Send + Sync {
    /// Append a new meeting to the collection.
    fn store_meeting(&self, meeting: &Meeting) -> Result<()>;

    /// Retrieve a specific meeting by id.
    fn get_meeting(&self, meeting_id: &str) -> Result<Option<Meeting>>;

    /// List all meetings in insertion order.
    fn list_meetings(&self) -> Result<Vec<Meeting>>;

    /// Replace an existing meeting wholesale.
    /// Returns false when no meeting with that id exists.
    fn update_meeting(&self, meeting: &Meeting) -> Result<bool>;

    /// Remove a meeting and its owned collections.
    /// Returns false when no meeting with that id exists.
    fn delete_meeting(&self, meeting_id: &str) -> Result<bool>;

    /// Current active-meeting pointer. The id may dangle; resolving it is
    /// the caller's job.
    fn get_active_meeting_id(&self) -> Result<Option<String>>;

    /// Move the active-meeting pointer. The id is not validated.
    fn set_active_meeting_id(&self, meeting_id: Option<&str>) -> Result<()>;
}

/// Interface for template persistence.
pub trait TemplateStorage: Send + Sync {
    /// Append a new template to the collection.
    fn store_template(&self, template: &MeetingTemplate) -> Result<()>;

    /// Retrieve a specific template by id.
    fn get_template(&self, template_id: &str) -> Result<Option<MeetingTemplate>>;

    /// List all templates in insertion order.
    fn list_templates(&self) -> Result<Vec<MeetingTemplate>>;

    /// Replace an existing template wholesale.
    /// Returns false when no template with that id exists.
    fn update_template(&self, template: &MeetingTemplate) -> Result<bool>;

    /// Remove a template.
    /// Returns false when no template with that id exists.
    fn delete_template(&self, template_id: &str) -> Result<bool>;
}
