//! JSON-backed meeting store repository.
//!
//! The whole store lives in memory and is rewritten as one blob after every
//! mutation, so readers always observe a single consistent state. Reads
//! serve clones straight from memory; the file only matters at startup
//! (rehydration) and after mutations (write-through).
//!
//! The blob maps the domain models onto the `shared` DTO shapes, whose
//! camelCase field names are the stable on-disk contract.

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::models::meeting::{ActionItem, Decision, Meeting, MeetingType};
use crate::domain::models::template::MeetingTemplate;
use crate::storage::traits::{MeetingStorage, TemplateStorage};

use super::connection::JsonConnection;

/// Full in-memory store state. The active pointer is session state and is
/// never written to the blob.
#[derive(Debug, Default)]
struct StoreState {
    meetings: Vec<Meeting>,
    templates: Vec<MeetingTemplate>,
    active_meeting_id: Option<String>,
}

/// Repository owning the meeting and template collections, write-through to
/// a single JSON blob.
#[derive(Clone)]
pub struct MeetingStoreRepository {
    connection: Arc<JsonConnection>,
    state: Arc<Mutex<StoreState>>,
}

impl MeetingStoreRepository {
    /// Create a repository, rehydrating the store blob when one exists.
    pub fn new(connection: Arc<JsonConnection>) -> Result<Self> {
        let state = match connection.read_store()? {
            Some(content) => {
                let file: shared::MeetingStoreFile = serde_json::from_str(&content)
                    .context("Failed to parse meeting store blob")?;
                let state = state_from_file(file)?;
                info!(
                    "Rehydrated store: {} meetings, {} templates",
                    state.meetings.len(),
                    state.templates.len()
                );
                state
            }
            None => {
                debug!("No store blob found, starting empty");
                StoreState::default()
            }
        };

        Ok(Self {
            connection,
            state: Arc::new(Mutex::new(state)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>> {
        self.state.lock().map_err(|_| anyhow!("meeting store lock poisoned"))
    }

    /// Serialize the current state and rewrite the blob.
    fn persist(&self, state: &StoreState) -> Result<()> {
        let file = state_to_file(state);
        let content = serde_json::to_string_pretty(&file)
            .context("Failed to serialize meeting store blob")?;
        self.connection.write_store(&content)
    }
}

impl MeetingStorage for MeetingStoreRepository {
    fn store_meeting(&self, meeting: &Meeting) -> Result<()> {
        let mut state = self.lock()?;
        state.meetings.push(meeting.clone());
        self.persist(&state)
    }

    fn get_meeting(&self, meeting_id: &str) -> Result<Option<Meeting>> {
        let state = self.lock()?;
        Ok(state.meetings.iter().find(|m| m.id == meeting_id).cloned())
    }

    fn list_meetings(&self) -> Result<Vec<Meeting>> {
        let state = self.lock()?;
        Ok(state.meetings.clone())
    }

    fn update_meeting(&self, meeting: &Meeting) -> Result<bool> {
        let mut state = self.lock()?;

        let slot = match state.meetings.iter_mut().find(|m| m.id == meeting.id) {
            Some(slot) => slot,
            None => {
                warn!("No meeting {} to update", meeting.id);
                return Ok(false);
            }
        };

        *slot = meeting.clone();
        self.persist(&state)?;
        Ok(true)
    }

    fn delete_meeting(&self, meeting_id: &str) -> Result<bool> {
        let mut state = self.lock()?;

        let before = state.meetings.len();
        state.meetings.retain(|m| m.id != meeting_id);
        if state.meetings.len() == before {
            return Ok(false);
        }

        self.persist(&state)?;
        Ok(true)
    }

    fn get_active_meeting_id(&self) -> Result<Option<String>> {
        let state = self.lock()?;
        Ok(state.active_meeting_id.clone())
    }

    fn set_active_meeting_id(&self, meeting_id: Option<&str>) -> Result<()> {
        let mut state = self.lock()?;
        state.active_meeting_id = meeting_id.map(|id| id.to_string());
        Ok(())
    }
}

impl TemplateStorage for MeetingStoreRepository {
    fn store_template(&self, template: &MeetingTemplate) -> Result<()> {
        let mut state = self.lock()?;
        state.templates.push(template.clone());
        self.persist(&state)
    }

    fn get_template(&self, template_id: &str) -> Result<Option<MeetingTemplate>> {
        let state = self.lock()?;
        Ok(state.templates.iter().find(|t| t.id == template_id).cloned())
    }

    fn list_templates(&self) -> Result<Vec<MeetingTemplate>> {
        let state = self.lock()?;
        Ok(state.templates.clone())
    }

    fn update_template(&self, template: &MeetingTemplate) -> Result<bool> {
        let mut state = self.lock()?;

        let slot = match state.templates.iter_mut().find(|t| t.id == template.id) {
            Some(slot) => slot,
            None => {
                warn!("No template {} to update", template.id);
                return Ok(false);
            }
        };

        *slot = template.clone();
        self.persist(&state)?;
        Ok(true)
    }

    fn delete_template(&self, template_id: &str) -> Result<bool> {
        let mut state = self.lock()?;

        let before = state.templates.len();
        state.templates.retain(|t| t.id != template_id);
        if state.templates.len() == before {
            return Ok(false);
        }

        self.persist(&state)?;
        Ok(true)
    }
}

/* ------------------------- blob <-> domain mapping ------------------------ */

fn state_to_file(state: &StoreState) -> shared::MeetingStoreFile {
    shared::MeetingStoreFile {
        meetings: state.meetings.iter().map(meeting_to_dto).collect(),
        templates: state.templates.iter().map(template_to_dto).collect(),
    }
}

fn state_from_file(file: shared::MeetingStoreFile) -> Result<StoreState> {
    Ok(StoreState {
        meetings: file
            .meetings
            .into_iter()
            .map(meeting_from_dto)
            .collect::<Result<Vec<_>>>()?,
        templates: file
            .templates
            .into_iter()
            .map(template_from_dto)
            .collect::<Result<Vec<_>>>()?,
        active_meeting_id: None,
    })
}

fn meeting_to_dto(meeting: &Meeting) -> shared::Meeting {
    shared::Meeting {
        id: meeting.id.clone(),
        title: meeting.title.clone(),
        date: date_to_string(meeting.date),
        start_time: meeting.start_time.clone(),
        end_time: meeting.end_time.clone(),
        location: meeting.location.clone(),
        attendees: meeting.attendees.clone(),
        agenda: meeting.agenda.clone(),
        meeting_type: meeting.meeting_type.as_tag().to_string(),
        minutes: meeting.minutes.clone(),
        action_items: meeting.action_items.iter().map(action_item_to_dto).collect(),
        decisions: meeting.decisions.iter().map(decision_to_dto).collect(),
        timer_duration: meeting.timer_duration,
        is_template: meeting.is_template,
    }
}

fn meeting_from_dto(dto: shared::Meeting) -> Result<Meeting> {
    Ok(Meeting {
        meeting_type: MeetingType::from_tag(&dto.meeting_type)
            .with_context(|| format!("Meeting {} has an invalid type tag", dto.id))?,
        date: date_from_string(&dto.date)
            .with_context(|| format!("Meeting {} has an invalid date", dto.id))?,
        action_items: dto
            .action_items
            .into_iter()
            .map(action_item_from_dto)
            .collect::<Result<Vec<_>>>()?,
        decisions: dto
            .decisions
            .into_iter()
            .map(decision_from_dto)
            .collect::<Result<Vec<_>>>()?,
        id: dto.id,
        title: dto.title,
        start_time: dto.start_time,
        end_time: dto.end_time,
        location: dto.location,
        attendees: dto.attendees,
        agenda: dto.agenda,
        minutes: dto.minutes,
        timer_duration: dto.timer_duration,
        is_template: dto.is_template,
    })
}

fn action_item_to_dto(item: &ActionItem) -> shared::ActionItem {
    shared::ActionItem {
        id: item.id.clone(),
        description: item.description.clone(),
        assignee: item.assignee.clone(),
        due_date: optional_date_to_string(item.due_date),
        completed: item.completed,
    }
}

fn action_item_from_dto(dto: shared::ActionItem) -> Result<ActionItem> {
    Ok(ActionItem {
        due_date: optional_date_from_string(&dto.due_date)
            .with_context(|| format!("Action item {} has an invalid due date", dto.id))?,
        id: dto.id,
        description: dto.description,
        assignee: dto.assignee,
        completed: dto.completed,
    })
}

fn decision_to_dto(decision: &Decision) -> shared::Decision {
    shared::Decision {
        id: decision.id.clone(),
        description: decision.description.clone(),
        decision_makers: decision.decision_makers.clone(),
        rationale: decision.rationale.clone(),
        date: optional_date_to_string(decision.date),
    }
}

fn decision_from_dto(dto: shared::Decision) -> Result<Decision> {
    Ok(Decision {
        date: optional_date_from_string(&dto.date)
            .with_context(|| format!("Decision {} has an invalid date", dto.id))?,
        id: dto.id,
        description: dto.description,
        decision_makers: dto.decision_makers,
        rationale: dto.rationale,
    })
}

fn template_to_dto(template: &MeetingTemplate) -> shared::MeetingTemplate {
    shared::MeetingTemplate {
        id: template.id.clone(),
        name: template.name.clone(),
        meeting_type: template.meeting_type.as_tag().to_string(),
        agenda: template.agenda.clone(),
        attendees: template.attendees.clone(),
        location: template.location.clone(),
    }
}

fn template_from_dto(dto: shared::MeetingTemplate) -> Result<MeetingTemplate> {
    Ok(MeetingTemplate {
        meeting_type: MeetingType::from_tag(&dto.meeting_type)
            .with_context(|| format!("Template {} has an invalid type tag", dto.id))?,
        id: dto.id,
        name: dto.name,
        agenda: dto.agenda,
        attendees: dto.attendees,
        location: dto.location,
    })
}

fn date_to_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn date_from_string(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| anyhow!("Invalid date '{}': {}", value, e))
}

fn optional_date_to_string(date: Option<NaiveDate>) -> String {
    date.map(date_to_string).unwrap_or_default()
}

fn optional_date_from_string(value: &str) -> Result<Option<NaiveDate>> {
    if value.is_empty() {
        return Ok(None);
    }
    date_from_string(value).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn setup_test_repo() -> (MeetingStoreRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        let repo = MeetingStoreRepository::new(Arc::new(connection)).unwrap();
        (repo, temp_dir)
    }

    fn sample_meeting(id: &str) -> Meeting {
        Meeting {
            id: id.to_string(),
            title: "Standup".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            start_time: "09:00".to_string(),
            end_time: "09:15".to_string(),
            location: "Room 1".to_string(),
            attendees: "Amy, Bob".to_string(),
            agenda: "Updates".to_string(),
            meeting_type: MeetingType::Team,
            minutes: "<p>Notes</p>".to_string(),
            action_items: vec![ActionItem {
                id: "item-1".to_string(),
                description: "Ship v2".to_string(),
                assignee: "Amy".to_string(),
                due_date: NaiveDate::from_ymd_opt(2024, 5, 10),
                completed: false,
            }],
            decisions: vec![Decision {
                id: "dec-1".to_string(),
                description: "Adopt Rust".to_string(),
                decision_makers: "Amy".to_string(),
                rationale: "Fast".to_string(),
                date: None,
            }],
            timer_duration: 90,
            is_template: false,
        }
    }

    #[test]
    fn test_store_and_get_meeting() {
        let (repo, _temp_dir) = setup_test_repo();

        let meeting = sample_meeting("m1");
        repo.store_meeting(&meeting).unwrap();

        let loaded = repo.get_meeting("m1").unwrap().unwrap();
        assert_eq!(loaded, meeting);
        assert!(repo.get_meeting("missing").unwrap().is_none());
    }

    #[test]
    fn test_blob_uses_stable_field_names() {
        let (repo, temp_dir) = setup_test_repo();
        repo.store_meeting(&sample_meeting("m1")).unwrap();

        let content =
            fs::read_to_string(temp_dir.path().join("meeting-store.json")).unwrap();
        for key in [
            "\"meetings\"",
            "\"templates\"",
            "\"startTime\"",
            "\"endTime\"",
            "\"meetingType\"",
            "\"actionItems\"",
            "\"dueDate\"",
            "\"decisionMakers\"",
            "\"timerDuration\"",
            "\"isTemplate\"",
        ] {
            assert!(content.contains(key), "blob missing {}", key);
        }
        // Tag values, not enum variant names.
        assert!(content.contains("\"team\""));
        // Unset optional dates are empty strings.
        assert!(content.contains("\"date\": \"\""));
    }

    #[test]
    fn test_rehydration_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let meeting = sample_meeting("m1");

        {
            let connection = JsonConnection::new(temp_dir.path()).unwrap();
            let repo = MeetingStoreRepository::new(Arc::new(connection)).unwrap();
            repo.store_meeting(&meeting).unwrap();
            repo.store_template(&MeetingTemplate {
                id: "t1".to_string(),
                name: "Weekly".to_string(),
                meeting_type: MeetingType::Team,
                agenda: "Review".to_string(),
                attendees: "Everyone".to_string(),
                location: "Room 2".to_string(),
            })
            .unwrap();
            repo.set_active_meeting_id(Some("m1")).unwrap();
        }

        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        let repo = MeetingStoreRepository::new(Arc::new(connection)).unwrap();

        assert_eq!(repo.get_meeting("m1").unwrap().unwrap(), meeting);
        assert_eq!(repo.list_templates().unwrap().len(), 1);
        // The active pointer is session state and does not persist.
        assert!(repo.get_active_meeting_id().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_blob_is_a_startup_error() {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        connection.write_store("not json").unwrap();

        assert!(MeetingStoreRepository::new(Arc::new(connection)).is_err());
    }

    #[test]
    fn test_update_missing_meeting_leaves_blob_untouched() {
        let (repo, temp_dir) = setup_test_repo();
        repo.store_meeting(&sample_meeting("m1")).unwrap();
        let before =
            fs::read_to_string(temp_dir.path().join("meeting-store.json")).unwrap();

        let updated = repo.update_meeting(&sample_meeting("ghost")).unwrap();

        assert!(!updated);
        let after =
            fs::read_to_string(temp_dir.path().join("meeting-store.json")).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_delete_meeting() {
        let (repo, _temp_dir) = setup_test_repo();
        repo.store_meeting(&sample_meeting("m1")).unwrap();
        repo.store_meeting(&sample_meeting("m2")).unwrap();

        assert!(repo.delete_meeting("m1").unwrap());
        assert!(!repo.delete_meeting("m1").unwrap());

        let remaining = repo.list_meetings().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, "m2");
    }

    #[test]
    fn test_meetings_keep_insertion_order() {
        let (repo, _temp_dir) = setup_test_repo();
        for id in ["a", "b", "c"] {
            repo.store_meeting(&sample_meeting(id)).unwrap();
        }

        let ids: Vec<String> =
            repo.list_meetings().unwrap().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_active_pointer_is_unchecked() {
        let (repo, _temp_dir) = setup_test_repo();

        repo.set_active_meeting_id(Some("nope")).unwrap();
        assert_eq!(repo.get_active_meeting_id().unwrap().as_deref(), Some("nope"));

        repo.set_active_meeting_id(None).unwrap();
        assert!(repo.get_active_meeting_id().unwrap().is_none());
    }

    #[test]
    fn test_template_crud() {
        let (repo, _temp_dir) = setup_test_repo();
        let mut template = MeetingTemplate {
            id: "t1".to_string(),
            name: "Weekly".to_string(),
            meeting_type: MeetingType::Team,
            agenda: "Review".to_string(),
            attendees: "".to_string(),
            location: "".to_string(),
        };

        repo.store_template(&template).unwrap();
        template.name = "Weekly Sync".to_string();
        assert!(repo.update_template(&template).unwrap());
        assert_eq!(
            repo.get_template("t1").unwrap().unwrap().name,
            "Weekly Sync"
        );

        assert!(repo.delete_template("t1").unwrap());
        assert!(!repo.delete_template("t1").unwrap());
        assert!(repo.list_templates().unwrap().is_empty());
    }
}
