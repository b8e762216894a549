use std::sync::Arc;

use common::SeasoningRepository;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::repository::SeaOrmSeasoningRepository;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub seasonings: Arc<dyn SeasoningRepository>,
    pub config: AppConfig,
}

impl AppState {
    /// Wire the SeaORM-backed repositories onto `db`.
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        Self {
            seasonings: Arc::new(SeaOrmSeasoningRepository::new(db.clone())),
            db,
            config,
        }
    }
}
