//! # Storage Module
//!
//! Handles persistence for the minutes taker. The domain layer depends on
//! the traits in [`traits`], so the JSON-blob implementation in [`json`] can
//! be swapped without touching business logic.

pub mod json;
pub mod traits;

pub use json::{JsonConnection, MeetingStoreRepository};
pub use traits::{MeetingStorage, TemplateStorage};
