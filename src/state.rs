use crate::{
    config::AppConfig,
    db::DbPool,
    services::{ingest::IngestService, store::TripStore},
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DbPool,
    pub store: TripStore,
    pub ingest: IngestService,
}

impl AppState {
    pub fn new(config: AppConfig, db: DbPool) -> Self {
        let store = TripStore::new(db.clone());
        let ingest = IngestService::new(store.clone());
        Self {
            config,
            db,
            store,
            ingest,
        }
    }
}
