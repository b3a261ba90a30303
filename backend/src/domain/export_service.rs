//! Export service: turns a meeting snapshot into a plain-text minutes
//! document and writes it to disk.
//!
//! Everything here is read-only over one owned snapshot of a meeting, taken
//! before rendering starts; later store mutations cannot bleed into a
//! document. Paginated PDF and word-processor rendering belong to the
//! document widgets; they consume the same snapshot.

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use log::{error, info};
use regex::Regex;
use std::fs;
use std::path::PathBuf;

use shared::{
    ExportDocumentRequest, ExportDocumentResponse, ExportToPathRequest, ExportToPathResponse,
};

use crate::domain::commands::meetings::GetMeetingCommand;
use crate::domain::meeting_service::MeetingService;
use crate::domain::models::meeting::{Meeting, MeetingType};
use crate::domain::timer_service::format_duration;

/// Service rendering meeting snapshots as documents.
#[derive(Clone)]
pub struct ExportService {
    tag_pattern: Regex,
}

impl ExportService {
    pub fn new() -> Self {
        Self {
            tag_pattern: Regex::new(r"<[^>]*>").expect("tag pattern"),
        }
    }

    /// Take an owned point-in-time copy of a meeting: the given id, or the
    /// active meeting when none is given. Exporting with nothing to export
    /// is a real error, reported at the boundary.
    pub fn snapshot_meeting(
        &self,
        meeting_id: Option<String>,
        meeting_service: &MeetingService,
    ) -> Result<Meeting> {
        match meeting_id {
            Some(id) => meeting_service
                .get_meeting(GetMeetingCommand {
                    meeting_id: id.clone(),
                })?
                .meeting
                .ok_or_else(|| anyhow::anyhow!("Meeting not found: {}", id)),
            None => meeting_service
                .get_active_meeting()?
                .meeting
                .ok_or_else(|| anyhow::anyhow!("No active meeting set and no meeting_id provided")),
        }
    }

    /// Render a meeting snapshot as a plain-text minutes document.
    pub fn render_document(&self, meeting: &Meeting) -> String {
        let mut content = String::new();

        let title = if meeting.title.trim().is_empty() {
            "Meeting Minutes"
        } else {
            meeting.title.as_str()
        };
        content.push_str(title);
        content.push('\n');

        if meeting.meeting_type != MeetingType::None {
            content.push_str(&format!("Type: {}\n", meeting.meeting_type.label()));
        }
        content.push_str(&format!("Date: {}\n", format_date(meeting.date)));
        if !meeting.start_time.is_empty() && !meeting.end_time.is_empty() {
            content.push_str(&format!(
                "Time: {} - {}\n",
                meeting.start_time, meeting.end_time
            ));
        }
        if !meeting.location.is_empty() {
            content.push_str(&format!("Location: {}\n", meeting.location));
        }
        if meeting.timer_duration > 0 {
            content.push_str(&format!(
                "Duration: {}\n",
                format_duration(meeting.timer_duration)
            ));
        }

        if !meeting.attendees.is_empty() {
            content.push_str("\nAttendees:\n");
            content.push_str(&meeting.attendees);
            content.push('\n');
        }

        if !meeting.agenda.is_empty() {
            content.push_str("\nAgenda:\n");
            content.push_str(&meeting.agenda);
            content.push('\n');
        }

        content.push_str("\nMinutes:\n");
        content.push_str(self.strip_markup(&meeting.minutes).trim());
        content.push('\n');

        if !meeting.decisions.is_empty() {
            content.push_str("\nDecisions:\n");
            for (index, decision) in meeting.decisions.iter().enumerate() {
                content.push_str(&format!("{}. {}\n", index + 1, decision.description));
                if !decision.decision_makers.is_empty() {
                    content.push_str(&format!(
                        "   Decision Makers: {}\n",
                        decision.decision_makers
                    ));
                }
                if !decision.rationale.is_empty() {
                    content.push_str(&format!("   Rationale: {}\n", decision.rationale));
                }
            }
        }

        if !meeting.action_items.is_empty() {
            content.push_str("\nAction Items:\n");
            for (index, item) in meeting.action_items.iter().enumerate() {
                let status = if item.completed { "[COMPLETED] " } else { "" };
                let assignee = if item.assignee.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", item.assignee)
                };
                let due = match item.due_date {
                    Some(date) => format!(" - Due: {}", format_date(date)),
                    None => String::new(),
                };
                content.push_str(&format!(
                    "{}. {}{}{}{}\n",
                    index + 1,
                    status,
                    item.description,
                    assignee,
                    due
                ));
            }
        }

        content
    }

    /// Strip rich-text markup down to plain text: tags removed, the handful
    /// of entities the minutes editor emits decoded.
    pub fn strip_markup(&self, input: &str) -> String {
        let without_tags = self.tag_pattern.replace_all(input, "");
        without_tags
            .replace("&nbsp;", " ")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&amp;", "&")
    }

    /// Render a meeting (given id, or the active one) and produce the
    /// document content plus a suggested filename.
    pub fn export_document(
        &self,
        request: ExportDocumentRequest,
        meeting_service: &MeetingService,
    ) -> Result<ExportDocumentResponse> {
        let meeting = self.snapshot_meeting(request.meeting_id, meeting_service)?;

        let content = self.render_document(&meeting);
        let filename = format!(
            "{}_minutes_{}.txt",
            filename_slug(&meeting.title),
            Utc::now().format("%Y%m%d")
        );

        info!(
            "Exported meeting {} as \"{}\" ({} bytes)",
            meeting.id,
            filename,
            content.len()
        );

        Ok(ExportDocumentResponse {
            content,
            filename,
            meeting_title: meeting.title,
        })
    }

    /// Export a meeting document to a directory on disk: the given path, or
    /// the Documents folder (home directory fallback). Failures come back in
    /// the response rather than as errors; the store is never affected.
    pub fn export_to_path(
        &self,
        request: ExportToPathRequest,
        meeting_service: &MeetingService,
    ) -> Result<ExportToPathResponse> {
        let document = self.export_document(
            ExportDocumentRequest {
                meeting_id: request.meeting_id,
            },
            meeting_service,
        )?;

        let export_dir = match request.custom_path {
            Some(ref custom_path) if !custom_path.trim().is_empty() => {
                PathBuf::from(sanitize_path(custom_path))
            }
            _ => match dirs::document_dir().or_else(dirs::home_dir) {
                Some(dir) => dir,
                None => {
                    error!("Could not determine an export directory");
                    return Ok(ExportToPathResponse {
                        success: false,
                        message: "Failed to determine export directory".to_string(),
                        file_path: String::new(),
                        meeting_title: document.meeting_title,
                    });
                }
            },
        };

        if let Err(e) = fs::create_dir_all(&export_dir) {
            error!("Failed to create export directory {:?}: {}", export_dir, e);
            return Ok(ExportToPathResponse {
                success: false,
                message: format!("Failed to create export directory: {}", e),
                file_path: export_dir.to_string_lossy().to_string(),
                meeting_title: document.meeting_title,
            });
        }

        let file_path = export_dir.join(&document.filename);
        match fs::write(&file_path, &document.content) {
            Ok(()) => {
                let file_path = file_path.to_string_lossy().to_string();
                info!("Exported \"{}\" to {}", document.meeting_title, file_path);
                Ok(ExportToPathResponse {
                    success: true,
                    message: format!("File exported successfully to: {}", file_path),
                    file_path,
                    meeting_title: document.meeting_title,
                })
            }
            Err(e) => {
                error!("Failed to write export file {:?}: {}", file_path, e);
                Ok(ExportToPathResponse {
                    success: false,
                    message: format!("Failed to write export file: {}", e),
                    file_path: file_path.to_string_lossy().to_string(),
                    meeting_title: document.meeting_title,
                })
            }
        }
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}

/// Long-form date for documents, e.g. "May 1, 2024".
fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

fn filename_slug(title: &str) -> String {
    if title.trim().is_empty() {
        "meeting".to_string()
    } else {
        title.trim().replace(' ', "_").to_lowercase()
    }
}

/// Clean up a user-supplied export path: surrounding quotes, escaped
/// spaces, trailing separators, tilde expansion.
fn sanitize_path(path: &str) -> String {
    let mut cleaned = path.trim().to_string();

    if (cleaned.starts_with('"') && cleaned.ends_with('"') && cleaned.len() >= 2)
        || (cleaned.starts_with('\'') && cleaned.ends_with('\'') && cleaned.len() >= 2)
    {
        cleaned = cleaned[1..cleaned.len() - 1].trim().to_string();
    }

    cleaned = cleaned.replace("\\ ", " ");

    while cleaned.ends_with('/') || cleaned.ends_with('\\') {
        cleaned.pop();
    }

    if let Some(rest) = cleaned.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            if rest.is_empty() {
                cleaned = home.to_string_lossy().to_string();
            } else if let Some(tail) = rest.strip_prefix('/') {
                cleaned = home.join(tail).to_string_lossy().to_string();
            }
        }
    }

    cleaned
}
