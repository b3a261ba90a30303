//! Template service: snapshotting meetings into reusable templates and
//! instantiating meetings from them.
//!
//! A template captures only meeting context (type, agenda, attendees,
//! location). It lives independently of its source meeting from the moment
//! it is created.

use anyhow::Result;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::domain::commands::meetings::CreateMeetingCommand;
use crate::domain::commands::templates::{
    CreateFromTemplateCommand, CreateFromTemplateResult, DeleteTemplateCommand,
    DeleteTemplateResult, GetTemplateCommand, GetTemplateResult, ListTemplatesResult,
    SaveAsTemplateCommand, SaveAsTemplateResult, UpdateTemplateCommand, UpdateTemplateResult,
};
use crate::domain::meeting_service::MeetingService;
use crate::domain::models::template::MeetingTemplate;
use crate::storage::json::MeetingStoreRepository;
use crate::storage::traits::{MeetingStorage, TemplateStorage};

/// Service owning the template collection.
#[derive(Clone)]
pub struct TemplateService {
    repository: Arc<MeetingStoreRepository>,
    meeting_service: MeetingService,
}

impl TemplateService {
    pub fn new(repository: Arc<MeetingStoreRepository>, meeting_service: MeetingService) -> Self {
        Self {
            repository,
            meeting_service,
        }
    }

    /// Snapshot a meeting's context fields into a new named template.
    /// A missing meeting is a no-op; the name is not checked for uniqueness.
    pub fn save_as_template(&self, command: SaveAsTemplateCommand) -> Result<SaveAsTemplateResult> {
        let meeting = match self.repository.get_meeting(&command.meeting_id)? {
            Some(meeting) => meeting,
            None => {
                warn!(
                    "Ignoring template snapshot for unknown meeting {}",
                    command.meeting_id
                );
                return Ok(SaveAsTemplateResult { template: None });
            }
        };

        let template = MeetingTemplate {
            id: MeetingTemplate::generate_id(),
            name: command.name,
            meeting_type: meeting.meeting_type,
            agenda: meeting.agenda,
            attendees: meeting.attendees,
            location: meeting.location,
        };

        self.repository.store_template(&template)?;

        info!(
            "Saved template {} (\"{}\") from meeting {}",
            template.id, template.name, command.meeting_id
        );

        Ok(SaveAsTemplateResult {
            template: Some(template),
        })
    }

    /// Instantiate a new meeting from a template. The meeting is seeded with
    /// the template's context fields, everything else defaults, and it
    /// becomes the active meeting. A missing template is a no-op.
    pub fn create_from_template(
        &self,
        command: CreateFromTemplateCommand,
    ) -> Result<CreateFromTemplateResult> {
        let template = match self.repository.get_template(&command.template_id)? {
            Some(template) => template,
            None => {
                warn!("Ignoring unknown template {}", command.template_id);
                return Ok(CreateFromTemplateResult { meeting: None });
            }
        };

        let created = self.meeting_service.create_meeting(CreateMeetingCommand {
            meeting_type: Some(template.meeting_type),
            agenda: Some(template.agenda),
            attendees: Some(template.attendees),
            location: Some(template.location),
            ..Default::default()
        })?;

        info!(
            "Created meeting {} from template {}",
            created.meeting.id, command.template_id
        );

        Ok(CreateFromTemplateResult {
            meeting: Some(created.meeting),
        })
    }

    /// Get a template by id.
    pub fn get_template(&self, command: GetTemplateCommand) -> Result<GetTemplateResult> {
        debug!("Getting template {}", command.template_id);
        let template = self.repository.get_template(&command.template_id)?;
        Ok(GetTemplateResult { template })
    }

    /// List all templates in insertion order.
    pub fn list_templates(&self) -> Result<ListTemplatesResult> {
        let templates = self.repository.list_templates()?;
        debug!("Listed {} templates", templates.len());
        Ok(ListTemplatesResult { templates })
    }

    /// Merge the given fields over an existing template. A missing id is a
    /// no-op.
    pub fn update_template(&self, command: UpdateTemplateCommand) -> Result<UpdateTemplateResult> {
        let mut template = match self.repository.get_template(&command.template_id)? {
            Some(template) => template,
            None => {
                warn!("Ignoring update for unknown template {}", command.template_id);
                return Ok(UpdateTemplateResult { template: None });
            }
        };

        if let Some(name) = command.name {
            template.name = name;
        }
        if let Some(meeting_type) = command.meeting_type {
            template.meeting_type = meeting_type;
        }
        if let Some(agenda) = command.agenda {
            template.agenda = agenda;
        }
        if let Some(attendees) = command.attendees {
            template.attendees = attendees;
        }
        if let Some(location) = command.location {
            template.location = location;
        }

        self.repository.update_template(&template)?;
        debug!("Updated template {}", template.id);

        Ok(UpdateTemplateResult {
            template: Some(template),
        })
    }

    /// Remove a template. A missing id is a no-op.
    pub fn delete_template(&self, command: DeleteTemplateCommand) -> Result<DeleteTemplateResult> {
        let deleted = self.repository.delete_template(&command.template_id)?;

        if deleted {
            info!("Deleted template {}", command.template_id);
        } else {
            warn!("Ignoring delete for unknown template {}", command.template_id);
        }

        Ok(DeleteTemplateResult { deleted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::action_items::AddActionItemCommand;
    use crate::domain::commands::meetings::DeleteMeetingCommand;
    use crate::domain::models::meeting::MeetingType;
    use crate::storage::json::JsonConnection;
    use tempfile::{tempdir, TempDir};

    fn setup_test() -> (TemplateService, MeetingService, TempDir) {
        let temp_dir = tempdir().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        let repository = Arc::new(MeetingStoreRepository::new(Arc::new(connection)).unwrap());
        let meeting_service = MeetingService::new(repository.clone());
        let template_service = TemplateService::new(repository, meeting_service.clone());
        (template_service, meeting_service, temp_dir)
    }

    #[test]
    fn test_save_as_template_copies_context_fields_only() {
        let (templates, meetings, _temp_dir) = setup_test();
        let meeting = meetings
            .create_meeting(CreateMeetingCommand {
                title: Some("Weekly sync".to_string()),
                agenda: Some("Review".to_string()),
                attendees: Some("Everyone".to_string()),
                location: Some("Room 2".to_string()),
                meeting_type: Some(MeetingType::Team),
                minutes: Some("<p>Old notes</p>".to_string()),
                ..Default::default()
            })
            .unwrap()
            .meeting;
        meetings
            .add_action_item(AddActionItemCommand {
                meeting_id: meeting.id.clone(),
                description: "Done already".to_string(),
                ..Default::default()
            })
            .unwrap();

        let template = templates
            .save_as_template(SaveAsTemplateCommand {
                name: "Weekly".to_string(),
                meeting_id: meeting.id,
            })
            .unwrap()
            .template
            .unwrap();

        assert_eq!(template.name, "Weekly");
        assert_eq!(template.meeting_type, MeetingType::Team);
        assert_eq!(template.agenda, "Review");
        assert_eq!(template.attendees, "Everyone");
        assert_eq!(template.location, "Room 2");
        assert_eq!(templates.list_templates().unwrap().templates.len(), 1);
    }

    #[test]
    fn test_save_as_template_for_unknown_meeting_is_a_noop() {
        let (templates, _meetings, _temp_dir) = setup_test();

        let result = templates
            .save_as_template(SaveAsTemplateCommand {
                name: "Nope".to_string(),
                meeting_id: "ghost".to_string(),
            })
            .unwrap();

        assert!(result.template.is_none());
        assert!(templates.list_templates().unwrap().templates.is_empty());
    }

    #[test]
    fn test_create_from_template_seeds_context_and_defaults_the_rest() {
        let (templates, meetings, _temp_dir) = setup_test();
        let meeting = meetings
            .create_meeting(CreateMeetingCommand {
                agenda: Some("Review".to_string()),
                attendees: Some("Everyone".to_string()),
                location: Some("Room 2".to_string()),
                meeting_type: Some(MeetingType::Retrospective),
                minutes: Some("<p>Notes from last time</p>".to_string()),
                ..Default::default()
            })
            .unwrap()
            .meeting;
        meetings
            .add_action_item(AddActionItemCommand {
                meeting_id: meeting.id.clone(),
                description: "Old item".to_string(),
                ..Default::default()
            })
            .unwrap();

        let template = templates
            .save_as_template(SaveAsTemplateCommand {
                name: "Retro".to_string(),
                meeting_id: meeting.id,
            })
            .unwrap()
            .template
            .unwrap();

        let new_meeting = templates
            .create_from_template(CreateFromTemplateCommand {
                template_id: template.id,
            })
            .unwrap()
            .meeting
            .unwrap();

        assert_eq!(new_meeting.meeting_type, MeetingType::Retrospective);
        assert_eq!(new_meeting.agenda, "Review");
        assert_eq!(new_meeting.attendees, "Everyone");
        assert_eq!(new_meeting.location, "Room 2");
        // Content never travels through a template.
        assert_eq!(new_meeting.minutes, "");
        assert!(new_meeting.action_items.is_empty());
        assert!(new_meeting.decisions.is_empty());
        assert_eq!(new_meeting.timer_duration, 0);

        // The instantiated meeting becomes active.
        let active = meetings.get_active_meeting().unwrap().meeting.unwrap();
        assert_eq!(active.id, new_meeting.id);
    }

    #[test]
    fn test_create_from_unknown_template_is_a_noop() {
        let (templates, meetings, _temp_dir) = setup_test();

        let result = templates
            .create_from_template(CreateFromTemplateCommand {
                template_id: "ghost".to_string(),
            })
            .unwrap();

        assert!(result.meeting.is_none());
        assert!(meetings.list_meetings().unwrap().meetings.is_empty());
    }

    #[test]
    fn test_templates_survive_source_meeting_deletion() {
        let (templates, meetings, _temp_dir) = setup_test();
        let meeting = meetings
            .create_meeting(CreateMeetingCommand {
                agenda: Some("Review".to_string()),
                ..Default::default()
            })
            .unwrap()
            .meeting;

        let template = templates
            .save_as_template(SaveAsTemplateCommand {
                name: "Weekly".to_string(),
                meeting_id: meeting.id.clone(),
            })
            .unwrap()
            .template
            .unwrap();

        meetings
            .delete_meeting(DeleteMeetingCommand { meeting_id: meeting.id })
            .unwrap();

        let survivor = templates
            .get_template(GetTemplateCommand {
                template_id: template.id,
            })
            .unwrap()
            .template
            .unwrap();
        assert_eq!(survivor.agenda, "Review");

        // And the template still instantiates.
        let new_meeting = templates
            .create_from_template(CreateFromTemplateCommand {
                template_id: survivor.id,
            })
            .unwrap()
            .meeting
            .unwrap();
        assert_eq!(new_meeting.agenda, "Review");
    }

    #[test]
    fn test_update_template_merges_fields() {
        let (templates, meetings, _temp_dir) = setup_test();
        let meeting = meetings
            .create_meeting(CreateMeetingCommand {
                agenda: Some("Review".to_string()),
                location: Some("Room 2".to_string()),
                ..Default::default()
            })
            .unwrap()
            .meeting;
        let template = templates
            .save_as_template(SaveAsTemplateCommand {
                name: "Weekly".to_string(),
                meeting_id: meeting.id,
            })
            .unwrap()
            .template
            .unwrap();

        let updated = templates
            .update_template(UpdateTemplateCommand {
                template_id: template.id,
                name: Some("Weekly Sync".to_string()),
                ..Default::default()
            })
            .unwrap()
            .template
            .unwrap();

        assert_eq!(updated.name, "Weekly Sync");
        assert_eq!(updated.agenda, "Review");
        assert_eq!(updated.location, "Room 2");
    }

    #[test]
    fn test_update_or_delete_unknown_template_is_a_noop() {
        let (templates, _meetings, _temp_dir) = setup_test();

        let updated = templates
            .update_template(UpdateTemplateCommand {
                template_id: "ghost".to_string(),
                name: Some("Nope".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert!(updated.template.is_none());

        let deleted = templates
            .delete_template(DeleteTemplateCommand {
                template_id: "ghost".to_string(),
            })
            .unwrap();
        assert!(!deleted.deleted);
    }

    #[test]
    fn test_delete_template() {
        let (templates, meetings, _temp_dir) = setup_test();
        let meeting = meetings.create_meeting(CreateMeetingCommand::default()).unwrap().meeting;
        let template = templates
            .save_as_template(SaveAsTemplateCommand {
                name: "Weekly".to_string(),
                meeting_id: meeting.id,
            })
            .unwrap()
            .template
            .unwrap();

        let result = templates
            .delete_template(DeleteTemplateCommand {
                template_id: template.id,
            })
            .unwrap();

        assert!(result.deleted);
        assert!(templates.list_templates().unwrap().templates.is_empty());
    }
}
