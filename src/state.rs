use crate::config::Config;
use crate::db::Database;
use crate::error::AppResult;
use crate::models::department::Departments;
use crate::services::load_departments;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, db: Database) -> Self {
        Self { db, config }
    }

    /// Fresh snapshot of the department document; never cached.
    pub async fn departments(&self) -> AppResult<Departments> {
        load_departments(&self.config.departments_path).await
    }
}
