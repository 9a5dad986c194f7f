use std::sync::Arc;

use loft_service::LoftService;
use loft_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<LoftService>,
}
impl AppState {
	pub async fn new(config: loft_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		Ok(Self::from_service(LoftService::new(config, db)))
	}

	pub fn from_service(service: LoftService) -> Self {
		Self { service: Arc::new(service) }
	}
}
