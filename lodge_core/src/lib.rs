use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::info;

use crate::service::{
    calendar::CalendarService,
    contact::{ContactService, LogNotifier, Notifier},
    education::EducationService,
    history::HistoryService,
    members::MembersService,
    publications::PublicationsService,
    search::SearchService,
    site::SiteService,
    statistics::StatisticsService,
};

pub mod config;
pub mod entity;
pub mod error;
pub mod ids;
pub mod models;
pub mod pagination;
pub mod service;
pub mod visibility;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

/// Runtime handle for the lodge site: configuration, the connection pool
/// and one handle per service.
#[derive(Clone)]
pub struct LodgeCore {
    pub config: config::LodgeConfig,
    pub db: DatabaseConnection,

    pub site: SiteService,
    pub statistics: StatisticsService,
    pub members: MembersService,
    pub education: EducationService,
    pub calendar: CalendarService,
    pub publications: PublicationsService,
    pub history: HistoryService,
    pub search: SearchService,
    pub contact: ContactService,
}

impl LodgeCore {
    /// Opens the database from `config`, migrates it and builds the services.
    pub async fn start(config: config::LodgeConfig) -> Result<Self, error::CoreError> {
        let db = models::open_or_create_db(&config).await?;
        models::migrate_up(&db).await?;

        let notifier = Arc::new(LogNotifier::new(config.contact_recipient.clone()));
        let core = Self::with_db(config, db, notifier);
        info!(bind = %core.config.bind_address, "lodge core started");
        Ok(core)
    }

    /// Builds the services over an already migrated connection.
    pub fn with_db(
        config: config::LodgeConfig,
        db: DatabaseConnection,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            site: SiteService::new(db.clone()),
            statistics: StatisticsService::new(db.clone()),
            members: MembersService::new(db.clone()),
            education: EducationService::new(db.clone()),
            calendar: CalendarService::new(db.clone()),
            publications: PublicationsService::new(db.clone()),
            history: HistoryService::new(db.clone()),
            search: SearchService::new(db.clone()),
            contact: ContactService::new(db.clone(), notifier),
            config,
            db,
        }
    }

    pub async fn shutdown(self) -> Result<(), error::CoreError> {
        self.db.close().await?;
        info!("database closed");
        Ok(())
    }
}

pub mod prelude {
    pub use super::config;
    pub use super::entity;
    pub use super::error;
    pub use super::ids;
    pub use super::models;
    pub use super::service;
    pub use super::visibility::{Gated, Viewer, Visible};
    pub use super::LodgeCore;
}
