//! Meeting service: CRUD over meetings, their action items and decisions,
//! and the active-meeting pointer.
//!
//! Mutations aimed at a missing id are silent no-ops by contract: the store
//! stays total and nothing here raises for a stale reference. Field
//! validation is a form-layer concern and deliberately absent.

use anyhow::Result;
use chrono::Local;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::domain::commands::action_items::{
    AddActionItemCommand, AddActionItemResult, DeleteActionItemCommand, DeleteActionItemResult,
    UpdateActionItemCommand, UpdateActionItemResult,
};
use crate::domain::commands::decisions::{
    AddDecisionCommand, AddDecisionResult, DeleteDecisionCommand, DeleteDecisionResult,
    UpdateDecisionCommand, UpdateDecisionResult,
};
use crate::domain::commands::meetings::{
    CreateMeetingCommand, CreateMeetingResult, DeleteMeetingCommand, DeleteMeetingResult,
    GetActiveMeetingResult, GetMeetingCommand, GetMeetingResult, ListMeetingsResult,
    SetActiveMeetingCommand, SetActiveMeetingResult, UpdateMeetingCommand, UpdateMeetingResult,
};
use crate::domain::models::meeting::{ActionItem, Decision, Meeting};
use crate::storage::json::MeetingStoreRepository;
use crate::storage::traits::MeetingStorage;

/// Service owning all meeting-scoped operations.
#[derive(Clone)]
pub struct MeetingService {
    repository: Arc<MeetingStoreRepository>,
}

impl MeetingService {
    pub fn new(repository: Arc<MeetingStoreRepository>) -> Self {
        Self { repository }
    }

    /// Create a meeting from the given partial fields. Unset fields default
    /// (today's date, empty strings, empty collections). The new meeting
    /// becomes the active meeting. Always succeeds.
    pub fn create_meeting(&self, command: CreateMeetingCommand) -> Result<CreateMeetingResult> {
        let meeting = Meeting {
            id: Meeting::generate_id(),
            title: command.title.unwrap_or_default(),
            date: command.date.unwrap_or_else(|| Local::now().date_naive()),
            start_time: command.start_time.unwrap_or_default(),
            end_time: command.end_time.unwrap_or_default(),
            location: command.location.unwrap_or_default(),
            attendees: command.attendees.unwrap_or_default(),
            agenda: command.agenda.unwrap_or_default(),
            meeting_type: command.meeting_type.unwrap_or_default(),
            minutes: command.minutes.unwrap_or_default(),
            action_items: command.action_items.unwrap_or_default(),
            decisions: command.decisions.unwrap_or_default(),
            timer_duration: command.timer_duration.unwrap_or(0),
            is_template: false,
        };

        self.repository.store_meeting(&meeting)?;
        self.repository.set_active_meeting_id(Some(&meeting.id))?;

        info!("Created meeting {} (\"{}\")", meeting.id, meeting.title);

        Ok(CreateMeetingResult { meeting })
    }

    /// Get a meeting by id.
    pub fn get_meeting(&self, command: GetMeetingCommand) -> Result<GetMeetingResult> {
        debug!("Getting meeting {}", command.meeting_id);
        let meeting = self.repository.get_meeting(&command.meeting_id)?;
        Ok(GetMeetingResult { meeting })
    }

    /// List all meetings in insertion order.
    pub fn list_meetings(&self) -> Result<ListMeetingsResult> {
        let meetings = self.repository.list_meetings()?;
        debug!("Listed {} meetings", meetings.len());
        Ok(ListMeetingsResult { meetings })
    }

    /// Merge the given fields over an existing meeting. Every other meeting
    /// is untouched; a missing id is a no-op.
    pub fn update_meeting(&self, command: UpdateMeetingCommand) -> Result<UpdateMeetingResult> {
        let mut meeting = match self.repository.get_meeting(&command.meeting_id)? {
            Some(meeting) => meeting,
            None => {
                warn!("Ignoring update for unknown meeting {}", command.meeting_id);
                return Ok(UpdateMeetingResult { meeting: None });
            }
        };

        if let Some(title) = command.title {
            meeting.title = title;
        }
        if let Some(date) = command.date {
            meeting.date = date;
        }
        if let Some(start_time) = command.start_time {
            meeting.start_time = start_time;
        }
        if let Some(end_time) = command.end_time {
            meeting.end_time = end_time;
        }
        if let Some(location) = command.location {
            meeting.location = location;
        }
        if let Some(attendees) = command.attendees {
            meeting.attendees = attendees;
        }
        if let Some(agenda) = command.agenda {
            meeting.agenda = agenda;
        }
        if let Some(meeting_type) = command.meeting_type {
            meeting.meeting_type = meeting_type;
        }
        if let Some(minutes) = command.minutes {
            meeting.minutes = minutes;
        }
        if let Some(timer_duration) = command.timer_duration {
            meeting.timer_duration = timer_duration;
        }
        if let Some(is_template) = command.is_template {
            meeting.is_template = is_template;
        }

        self.repository.update_meeting(&meeting)?;
        debug!("Updated meeting {}", meeting.id);

        Ok(UpdateMeetingResult {
            meeting: Some(meeting),
        })
    }

    /// Delete a meeting along with its owned collections. When it was the
    /// active meeting, the pointer moves to the first remaining meeting, or
    /// to none. A missing id is a no-op.
    pub fn delete_meeting(&self, command: DeleteMeetingCommand) -> Result<DeleteMeetingResult> {
        let deleted = self.repository.delete_meeting(&command.meeting_id)?;

        if !deleted {
            warn!("Ignoring delete for unknown meeting {}", command.meeting_id);
            return Ok(DeleteMeetingResult {
                deleted: false,
                active_meeting_id: self.repository.get_active_meeting_id()?,
            });
        }

        if self.repository.get_active_meeting_id()?.as_deref() == Some(command.meeting_id.as_str())
        {
            let next = self.repository.list_meetings()?.first().map(|m| m.id.clone());
            self.repository.set_active_meeting_id(next.as_deref())?;
        }

        info!("Deleted meeting {}", command.meeting_id);

        Ok(DeleteMeetingResult {
            deleted: true,
            active_meeting_id: self.repository.get_active_meeting_id()?,
        })
    }

    /// Move the active-meeting pointer. The id is deliberately not checked
    /// against the collection; a dangling pointer reads back as "no active
    /// meeting".
    pub fn set_active_meeting(
        &self,
        command: SetActiveMeetingCommand,
    ) -> Result<SetActiveMeetingResult> {
        self.repository
            .set_active_meeting_id(command.meeting_id.as_deref())?;
        debug!("Active meeting set to {:?}", command.meeting_id);
        Ok(SetActiveMeetingResult {
            active_meeting_id: command.meeting_id,
        })
    }

    /// Resolve the active-meeting pointer to a meeting. Unset and dangling
    /// pointers both resolve to `None`.
    pub fn get_active_meeting(&self) -> Result<GetActiveMeetingResult> {
        let meeting = match self.repository.get_active_meeting_id()? {
            Some(meeting_id) => {
                let resolved = self.repository.get_meeting(&meeting_id)?;
                if resolved.is_none() {
                    warn!("Active meeting {} no longer exists", meeting_id);
                }
                resolved
            }
            None => None,
        };
        Ok(GetActiveMeetingResult { meeting })
    }

    /// Append an action item with a freshly generated id to a meeting.
    /// A missing meeting is a no-op.
    pub fn add_action_item(&self, command: AddActionItemCommand) -> Result<AddActionItemResult> {
        let mut meeting = match self.repository.get_meeting(&command.meeting_id)? {
            Some(meeting) => meeting,
            None => {
                warn!(
                    "Ignoring action item for unknown meeting {}",
                    command.meeting_id
                );
                return Ok(AddActionItemResult { item: None });
            }
        };

        let item = ActionItem {
            id: ActionItem::generate_id(),
            description: command.description,
            assignee: command.assignee,
            due_date: command.due_date,
            completed: command.completed,
        };

        meeting.action_items.push(item.clone());
        self.repository.update_meeting(&meeting)?;

        info!("Added action item {} to meeting {}", item.id, meeting.id);

        Ok(AddActionItemResult { item: Some(item) })
    }

    /// Merge the given fields over one action item, addressed by
    /// (meeting, item). Missing meeting or item is a no-op; sibling items
    /// keep their order.
    pub fn update_action_item(
        &self,
        command: UpdateActionItemCommand,
    ) -> Result<UpdateActionItemResult> {
        let mut meeting = match self.repository.get_meeting(&command.meeting_id)? {
            Some(meeting) => meeting,
            None => {
                warn!(
                    "Ignoring action item update for unknown meeting {}",
                    command.meeting_id
                );
                return Ok(UpdateActionItemResult { item: None });
            }
        };

        let item = match meeting
            .action_items
            .iter_mut()
            .find(|i| i.id == command.item_id)
        {
            Some(item) => item,
            None => {
                warn!(
                    "Ignoring update for unknown action item {} in meeting {}",
                    command.item_id, command.meeting_id
                );
                return Ok(UpdateActionItemResult { item: None });
            }
        };

        if let Some(description) = command.description {
            item.description = description;
        }
        if let Some(assignee) = command.assignee {
            item.assignee = assignee;
        }
        if let Some(due_date) = command.due_date {
            item.due_date = due_date;
        }
        if let Some(completed) = command.completed {
            item.completed = completed;
        }

        let item = item.clone();
        self.repository.update_meeting(&meeting)?;

        Ok(UpdateActionItemResult { item: Some(item) })
    }

    /// Remove one action item; the remaining items keep their relative
    /// order. Missing meeting or item is a no-op.
    pub fn delete_action_item(
        &self,
        command: DeleteActionItemCommand,
    ) -> Result<DeleteActionItemResult> {
        let mut meeting = match self.repository.get_meeting(&command.meeting_id)? {
            Some(meeting) => meeting,
            None => {
                warn!(
                    "Ignoring action item delete for unknown meeting {}",
                    command.meeting_id
                );
                return Ok(DeleteActionItemResult { deleted: false });
            }
        };

        let before = meeting.action_items.len();
        meeting.action_items.retain(|i| i.id != command.item_id);
        if meeting.action_items.len() == before {
            warn!(
                "Ignoring delete for unknown action item {} in meeting {}",
                command.item_id, command.meeting_id
            );
            return Ok(DeleteActionItemResult { deleted: false });
        }

        self.repository.update_meeting(&meeting)?;
        info!(
            "Deleted action item {} from meeting {}",
            command.item_id, command.meeting_id
        );

        Ok(DeleteActionItemResult { deleted: true })
    }

    /// Append a decision with a freshly generated id to a meeting.
    /// A missing meeting is a no-op.
    pub fn add_decision(&self, command: AddDecisionCommand) -> Result<AddDecisionResult> {
        let mut meeting = match self.repository.get_meeting(&command.meeting_id)? {
            Some(meeting) => meeting,
            None => {
                warn!(
                    "Ignoring decision for unknown meeting {}",
                    command.meeting_id
                );
                return Ok(AddDecisionResult { decision: None });
            }
        };

        let decision = Decision {
            id: Decision::generate_id(),
            description: command.description,
            decision_makers: command.decision_makers,
            rationale: command.rationale,
            date: command.date,
        };

        meeting.decisions.push(decision.clone());
        self.repository.update_meeting(&meeting)?;

        info!("Added decision {} to meeting {}", decision.id, meeting.id);

        Ok(AddDecisionResult {
            decision: Some(decision),
        })
    }

    /// Merge the given fields over one decision, addressed by
    /// (meeting, decision). Missing meeting or decision is a no-op.
    pub fn update_decision(&self, command: UpdateDecisionCommand) -> Result<UpdateDecisionResult> {
        let mut meeting = match self.repository.get_meeting(&command.meeting_id)? {
            Some(meeting) => meeting,
            None => {
                warn!(
                    "Ignoring decision update for unknown meeting {}",
                    command.meeting_id
                );
                return Ok(UpdateDecisionResult { decision: None });
            }
        };

        let decision = match meeting
            .decisions
            .iter_mut()
            .find(|d| d.id == command.decision_id)
        {
            Some(decision) => decision,
            None => {
                warn!(
                    "Ignoring update for unknown decision {} in meeting {}",
                    command.decision_id, command.meeting_id
                );
                return Ok(UpdateDecisionResult { decision: None });
            }
        };

        if let Some(description) = command.description {
            decision.description = description;
        }
        if let Some(decision_makers) = command.decision_makers {
            decision.decision_makers = decision_makers;
        }
        if let Some(rationale) = command.rationale {
            decision.rationale = rationale;
        }
        if let Some(date) = command.date {
            decision.date = date;
        }

        let decision = decision.clone();
        self.repository.update_meeting(&meeting)?;

        Ok(UpdateDecisionResult {
            decision: Some(decision),
        })
    }

    /// Remove one decision; the remaining decisions keep their relative
    /// order. Missing meeting or decision is a no-op.
    pub fn delete_decision(&self, command: DeleteDecisionCommand) -> Result<DeleteDecisionResult> {
        let mut meeting = match self.repository.get_meeting(&command.meeting_id)? {
            Some(meeting) => meeting,
            None => {
                warn!(
                    "Ignoring decision delete for unknown meeting {}",
                    command.meeting_id
                );
                return Ok(DeleteDecisionResult { deleted: false });
            }
        };

        let before = meeting.decisions.len();
        meeting.decisions.retain(|d| d.id != command.decision_id);
        if meeting.decisions.len() == before {
            warn!(
                "Ignoring delete for unknown decision {} in meeting {}",
                command.decision_id, command.meeting_id
            );
            return Ok(DeleteDecisionResult { deleted: false });
        }

        self.repository.update_meeting(&meeting)?;
        info!(
            "Deleted decision {} from meeting {}",
            command.decision_id, command.meeting_id
        );

        Ok(DeleteDecisionResult { deleted: true })
    }
}
