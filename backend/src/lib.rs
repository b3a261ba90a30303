//! # Minutes Taker Backend
//!
//! Meeting-minutes backend: meetings with nested action items and
//! decisions, reusable templates, a meeting timer, and plain-text export.
//!
//! All state is held in memory by a single-writer store and persisted as
//! one JSON blob after every mutation. The UI layer in front of this crate
//! only handles presentation concerns.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

pub mod domain;
pub mod storage;

pub use storage::json::JsonConnection;

/// Main backend struct that wires all services over one store.
pub struct Backend {
    pub meeting_service: domain::MeetingService,
    pub template_service: domain::TemplateService,
    pub export_service: domain::ExportService,
    pub timer: domain::MeetingTimer,
}

impl Backend {
    /// Create a backend rooted at the given data directory.
    pub fn new<P: AsRef<Path>>(data_directory: P) -> Result<Self> {
        let connection = Arc::new(JsonConnection::new(data_directory)?);
        Self::with_connection(connection)
    }

    /// Create a backend in the default data directory.
    pub fn new_default() -> Result<Self> {
        let connection = Arc::new(JsonConnection::new_default()?);
        Self::with_connection(connection)
    }

    fn with_connection(connection: Arc<JsonConnection>) -> Result<Self> {
        let repository = Arc::new(storage::MeetingStoreRepository::new(connection)?);

        let meeting_service = domain::MeetingService::new(repository.clone());
        let template_service =
            domain::TemplateService::new(repository, meeting_service.clone());
        let export_service = domain::ExportService::new();
        let timer = domain::MeetingTimer::new(meeting_service.clone());

        Ok(Backend {
            meeting_service,
            template_service,
            export_service,
            timer,
        })
    }
}
