//! Shared application state

use anyhow::Result;
use std::sync::Arc;

use crate::application::ports::outbound::ContentGenerator;
use crate::application::services::{GameGenerationService, GameServiceImpl};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::export::{CardSheetRenderer, CardSheetWriter};
use crate::infrastructure::gemini::GeminiClient;
use crate::infrastructure::persistence::{open_game_store, SqliteGameStore};

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub generation_service: GameGenerationService<Arc<dyn ContentGenerator>, SqliteGameStore>,
    pub game_service: GameServiceImpl<SqliteGameStore>,
    pub card_sheet_renderer: CardSheetRenderer,
    pub card_sheet_writer: CardSheetWriter,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        // Open SQLite and make sure the schema is in place
        let store = open_game_store(&config.database).await?;

        // Initialize Gemini client
        let api_key = config.ai.api_key()?;
        let generator = GeminiClient::new(&config.ai, api_key)?;

        Ok(Self::with_parts(config, Arc::new(generator), store))
    }

    /// Wire services around an existing generator and store
    pub fn with_parts(
        config: AppConfig,
        generator: Arc<dyn ContentGenerator>,
        store: SqliteGameStore,
    ) -> Self {
        let card_sheet_writer = CardSheetWriter::new(config.storage.files_dir.clone());
        Self {
            generation_service: GameGenerationService::new(generator, store.clone()),
            game_service: GameServiceImpl::new(store),
            card_sheet_renderer: CardSheetRenderer::default(),
            card_sheet_writer,
            config,
        }
    }
}
