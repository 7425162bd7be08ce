use anyhow::Context;

use crate::config::Config;
use crate::db::Store;
use crate::services::{AssetStore, EntryService};

/// First-run identity so the app is usable immediately after start.
const SEED_USERNAME: &str = "test";
const SEED_PASSWORD: &str = "password";

#[derive(Clone)]
pub struct AppState {
    pub config: Config,

    pub store: Store,

    pub assets: AssetStore,

    pub entries: EntryService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        store.ensure_seed_user(SEED_USERNAME, SEED_PASSWORD).await?;

        let assets = AssetStore::new(&config.general.upload_path);
        assets
            .ensure_root()
            .await
            .with_context(|| format!("Failed to create upload directory '{}'", config.general.upload_path))?;

        let entries = EntryService::new(store.clone(), assets.clone());

        Ok(Self {
            config,
            store,
            assets,
            entries,
        })
    }
}
