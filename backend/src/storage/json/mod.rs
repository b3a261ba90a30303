//! # JSON Storage Module
//!
//! File-based storage implementation persisting the whole store as a single
//! JSON blob, rehydrated at startup and rewritten after every mutation.
//!
//! ## File Format
//!
//! `meeting-store.json`:
//! ```json
//! {
//!   "meetings": [
//!     { "id": "…", "title": "Standup", "date": "2024-05-01",
//!       "startTime": "09:00", "endTime": "09:15", "meetingType": "team",
//!       "actionItems": [], "decisions": [], "timerDuration": 0,
//!       "isTemplate": false, "location": "", "attendees": "",
//!       "agenda": "", "minutes": "" }
//!   ],
//!   "templates": []
//! }
//! ```
//!
//! Field names are the stable contract with blobs written by earlier
//! releases; the active-meeting pointer is not part of the blob.

pub mod connection;
pub mod store_repository;

pub use connection::JsonConnection;
pub use store_repository::MeetingStoreRepository;
