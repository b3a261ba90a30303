//! # Domain Module
//!
//! Business logic for the minutes taker.
//!
//! ## Module Organization
//!
//! - **meeting_service**: meeting CRUD, nested action items and decisions,
//!   and the active-meeting pointer
//! - **template_service**: snapshotting meetings into templates and
//!   instantiating meetings from them
//! - **timer_service**: the cancellable once-per-second meeting timer
//! - **export_service**: meeting snapshots rendered as minutes documents
//! - **commands**: command/result types consumed by the services
//! - **models**: the meeting, action item, decision and template entities
//!
//! ## Core Rules
//!
//! - Ids are generated once and never change; collections keep insertion
//!   order.
//! - Mutations aimed at a missing id are silent no-ops; the store is total
//!   and has no invalid states of its own.
//! - The store validates nothing; input validation belongs to the forms in
//!   front of it.
//! - The active-meeting pointer may dangle; readers resolve it to "no
//!   active meeting".

pub mod commands;
pub mod export_service;
pub mod meeting_service;
pub mod models;
pub mod template_service;
pub mod timer_service;

pub use export_service::ExportService;
pub use meeting_service::MeetingService;
pub use template_service::TemplateService;
pub use timer_service::{format_duration, MeetingTimer};
