//! Generation Service - turns a theme into a persisted game
//!
//! One request runs a strictly sequential state machine:
//!
//! ```text
//! Init -> GeneratingStory -> ParsingStory -> PersistingGame
//!      -> GeneratingRoleCards -> ParsingRoleCards
//!      -> GeneratingEventCards -> ParsingEventCards
//!      -> PersistingCardsAndMeta -> Committed
//! ```
//!
//! Any stage can move to `Aborted`. `PersistingGame` only stages the game
//! record; no SQL runs until `PersistingCardsAndMeta`, which opens the write
//! transaction and inserts the game, its cards and its meta rows in one
//! burst. SQLite's write lock is therefore never held across a generator
//! call. Aborting rolls the transaction back; so does dropping the request
//! future, because the open transaction is dropped with the state.

use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::application::ports::outbound::{
    ContentGenerator, GameStore, GameUnitOfWork, GeneratorError, PersistenceError,
};
use crate::application::services::llm::{
    build_event_prompt, build_role_prompt, build_story_prompt, parse_card_batch, parse_story,
    ResponseError,
};
use crate::domain::aggregates::{
    build_cards, build_meta, AggregateError, GameBlueprint, ROLE_CARD_COUNT,
};
use crate::domain::entities::NewGame;
use crate::domain::value_objects::{CardDraft, GameId, StoryBackground};

/// Raw generation request as received from a caller
#[derive(Debug, Clone)]
pub struct GenerateGame {
    pub theme: String,
    pub card_count: i64,
    pub style: String,
    pub description: Option<String>,
}

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationStage {
    Init,
    GeneratingStory,
    ParsingStory,
    PersistingGame,
    GeneratingRoleCards,
    ParsingRoleCards,
    GeneratingEventCards,
    ParsingEventCards,
    PersistingCardsAndMeta,
    Committed,
    Aborted,
}

impl GenerationStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::GeneratingStory => "generating_story",
            Self::ParsingStory => "parsing_story",
            Self::PersistingGame => "persisting_game",
            Self::GeneratingRoleCards => "generating_role_cards",
            Self::ParsingRoleCards => "parsing_role_cards",
            Self::GeneratingEventCards => "generating_event_cards",
            Self::ParsingEventCards => "parsing_event_cards",
            Self::PersistingCardsAndMeta => "persisting_cards_and_meta",
            Self::Committed => "committed",
            Self::Aborted => "aborted",
        }
    }
}

impl std::fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What went wrong inside a stage
#[derive(Debug, thiserror::Error)]
pub enum GenerationFailure {
    #[error(transparent)]
    Validation(#[from] AggregateError),
    #[error(transparent)]
    ExternalService(#[from] GeneratorError),
    #[error(transparent)]
    Parse(#[from] ResponseError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// A pipeline run that ended in `Aborted`
#[derive(Debug, thiserror::Error)]
#[error("game generation failed during {stage}: {failure}")]
pub struct GenerationError {
    /// The stage that failed
    pub stage: GenerationStage,
    #[source]
    pub failure: GenerationFailure,
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match &self.failure {
            GenerationFailure::Validation(_) => ErrorKind::Validation,
            GenerationFailure::ExternalService(GeneratorError::QuotaExceeded(_)) => {
                ErrorKind::QuotaExhausted
            }
            GenerationFailure::ExternalService(_) => ErrorKind::ExternalService,
            GenerationFailure::Parse(_) => ErrorKind::Parse,
            GenerationFailure::Persistence(_) => ErrorKind::Persistence,
        }
    }
}

/// User-visible classification of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    /// External service reported quota or rate exhaustion
    QuotaExhausted,
    ExternalService,
    Parse,
    Persistence,
    Layout,
}

impl ErrorKind {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation => "validation_error",
            Self::QuotaExhausted => "quota_exhausted",
            Self::ExternalService => "external_service_error",
            Self::Parse => "parse_error",
            Self::Persistence => "persistence_error",
            Self::Layout => "layout_error",
        }
    }
}

type OpenTransaction = Box<dyn GameUnitOfWork>;

enum PipelineState {
    Init(GenerateGame),
    GeneratingStory {
        blueprint: GameBlueprint,
    },
    ParsingStory {
        blueprint: GameBlueprint,
        raw: String,
    },
    PersistingGame {
        blueprint: GameBlueprint,
        story: StoryBackground,
    },
    GeneratingRoleCards {
        blueprint: GameBlueprint,
        story: StoryBackground,
        game: NewGame,
    },
    ParsingRoleCards {
        blueprint: GameBlueprint,
        story: StoryBackground,
        game: NewGame,
        raw: String,
    },
    GeneratingEventCards {
        story: StoryBackground,
        game: NewGame,
        roles: Vec<CardDraft>,
        remaining: usize,
    },
    ParsingEventCards {
        game: NewGame,
        roles: Vec<CardDraft>,
        raw: String,
    },
    PersistingCardsAndMeta {
        game: NewGame,
        roles: Vec<CardDraft>,
        events: Vec<CardDraft>,
    },
    Committed {
        game_id: GameId,
    },
    Aborted {
        stage: GenerationStage,
        failure: GenerationFailure,
        tx: Option<OpenTransaction>,
    },
}

impl PipelineState {
    fn stage(&self) -> GenerationStage {
        match self {
            Self::Init(_) => GenerationStage::Init,
            Self::GeneratingStory { .. } => GenerationStage::GeneratingStory,
            Self::ParsingStory { .. } => GenerationStage::ParsingStory,
            Self::PersistingGame { .. } => GenerationStage::PersistingGame,
            Self::GeneratingRoleCards { .. } => GenerationStage::GeneratingRoleCards,
            Self::ParsingRoleCards { .. } => GenerationStage::ParsingRoleCards,
            Self::GeneratingEventCards { .. } => GenerationStage::GeneratingEventCards,
            Self::ParsingEventCards { .. } => GenerationStage::ParsingEventCards,
            Self::PersistingCardsAndMeta { .. } => GenerationStage::PersistingCardsAndMeta,
            Self::Committed { .. } => GenerationStage::Committed,
            Self::Aborted { .. } => GenerationStage::Aborted,
        }
    }
}

fn abort(
    stage: GenerationStage,
    failure: impl Into<GenerationFailure>,
    tx: Option<OpenTransaction>,
) -> PipelineState {
    PipelineState::Aborted {
        stage,
        failure: failure.into(),
        tx,
    }
}

/// Drives one generation request from `Init` to `Committed` or `Aborted`
pub struct GameGenerationService<G, S> {
    generator: G,
    store: S,
}

impl<G: ContentGenerator, S: GameStore> GameGenerationService<G, S> {
    pub fn new(generator: G, store: S) -> Self {
        Self { generator, store }
    }

    /// Run the whole pipeline. The game id is returned only after commit.
    #[instrument(
        skip(self, request),
        fields(run_id = %Uuid::new_v4(), theme = %request.theme, card_count = request.card_count)
    )]
    pub async fn generate(&self, request: GenerateGame) -> Result<GameId, GenerationError> {
        let mut state = PipelineState::Init(request);
        loop {
            state = match state {
                PipelineState::Committed { game_id } => {
                    info!(game_id = %game_id, "Game generation committed");
                    return Ok(game_id);
                }
                PipelineState::Aborted { stage, failure, tx } => {
                    error!(stage = %stage, error = %failure, "Game generation aborted");
                    if let Some(tx) = tx {
                        if let Err(e) = tx.rollback().await {
                            warn!(error = %e, "Rollback after abort failed");
                        }
                    }
                    return Err(GenerationError { stage, failure });
                }
                active => {
                    debug!(stage = %active.stage(), "Entering stage");
                    self.advance(active).await
                }
            };
        }
    }

    async fn advance(&self, state: PipelineState) -> PipelineState {
        let stage = state.stage();
        match state {
            PipelineState::Init(request) => {
                match GameBlueprint::new(
                    &request.theme,
                    request.card_count,
                    &request.style,
                    request.description.as_deref(),
                ) {
                    Ok(blueprint) => PipelineState::GeneratingStory { blueprint },
                    Err(e) => abort(stage, e, None),
                }
            }

            PipelineState::GeneratingStory { blueprint } => {
                let prompt = build_story_prompt(blueprint.theme(), blueprint.style());
                match self.generator.generate(&prompt).await {
                    Ok(raw) => PipelineState::ParsingStory { blueprint, raw },
                    Err(e) => abort(stage, e, None),
                }
            }

            PipelineState::ParsingStory { blueprint, raw } => match parse_story(&raw) {
                Ok(story) => {
                    debug!(story = %story.as_str(), "Story background parsed");
                    PipelineState::PersistingGame { blueprint, story }
                }
                Err(e) => abort(stage, e, None),
            },

            PipelineState::PersistingGame { blueprint, story } => {
                // Inserted later with the cards, in a single write burst
                let game = blueprint.build_game(&story);
                PipelineState::GeneratingRoleCards {
                    blueprint,
                    story,
                    game,
                }
            }

            PipelineState::GeneratingRoleCards {
                blueprint,
                story,
                game,
            } => {
                let prompt = build_role_prompt(ROLE_CARD_COUNT, story.as_str());
                match self.generator.generate(&prompt).await {
                    Ok(raw) => PipelineState::ParsingRoleCards {
                        blueprint,
                        story,
                        game,
                        raw,
                    },
                    Err(e) => abort(stage, e, None),
                }
            }

            PipelineState::ParsingRoleCards {
                blueprint,
                story,
                game,
                raw,
            } => {
                let roles = match parse_card_batch(&raw) {
                    Ok(roles) => roles,
                    Err(e) => return abort(stage, e, None),
                };
                match blueprint.remaining_card_count(roles.len()) {
                    Ok(remaining) => PipelineState::GeneratingEventCards {
                        story,
                        game,
                        roles,
                        remaining,
                    },
                    Err(e) => abort(stage, e, None),
                }
            }

            PipelineState::GeneratingEventCards {
                story,
                game,
                roles,
                remaining,
            } => {
                if remaining == 0 {
                    debug!("Role cards fill the deck; no event cards requested");
                    return PipelineState::PersistingCardsAndMeta {
                        game,
                        roles,
                        events: Vec::new(),
                    };
                }
                let prompt = build_event_prompt(remaining, story.as_str());
                match self.generator.generate(&prompt).await {
                    Ok(raw) => PipelineState::ParsingEventCards { game, roles, raw },
                    Err(e) => abort(stage, e, None),
                }
            }

            PipelineState::ParsingEventCards { game, roles, raw } => match parse_card_batch(&raw) {
                Ok(events) => {
                    let requested = game.card_count;
                    let produced = roles.len() + events.len();
                    if produced != requested as usize {
                        warn!(requested, produced, "Generator returned a different card count");
                    }
                    PipelineState::PersistingCardsAndMeta {
                        game,
                        roles,
                        events,
                    }
                }
                Err(e) => abort(stage, e, None),
            },

            PipelineState::PersistingCardsAndMeta {
                game,
                roles,
                events,
            } => {
                let mut tx = match self.store.begin().await {
                    Ok(tx) => tx,
                    Err(e) => return abort(stage, e, None),
                };
                let game_id = match tx.create_game(&game).await {
                    Ok(game_id) => game_id,
                    Err(e) => return abort(stage, e, Some(tx)),
                };
                for card in build_cards(game_id, roles, events) {
                    if let Err(e) = tx.create_card(&card).await {
                        return abort(stage, e, Some(tx));
                    }
                }
                for meta in build_meta(game_id) {
                    if let Err(e) = tx.create_meta(&meta).await {
                        return abort(stage, e, Some(tx));
                    }
                }
                match tx.commit().await {
                    Ok(()) => PipelineState::Committed { game_id },
                    Err(e) => abort(stage, e, None),
                }
            }

            terminal @ (PipelineState::Committed { .. } | PipelineState::Aborted { .. }) => {
                terminal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::MetaCounter;
    use crate::domain::value_objects::CardType;
    use crate::test_support::{
        card_batch_json, file_store, memory_store, story_json, Fault, FaultyStore,
        ScriptedGenerator,
    };
    use std::sync::Arc;
    use std::time::Duration;

    fn request(card_count: i64) -> GenerateGame {
        GenerateGame {
            theme: "Fantasy Adventure".to_string(),
            card_count,
            style: "dark".to_string(),
            description: None,
        }
    }

    fn happy_script(events: usize) -> ScriptedGenerator {
        ScriptedGenerator::new(vec![
            Ok(story_json("The realm of Eldoria is fading.")),
            Ok(card_batch_json("Hero", ROLE_CARD_COUNT, "A wandering warrior")),
            Ok(card_batch_json("Event", events, "Combat event: undead ambush")),
        ])
    }

    #[tokio::test]
    async fn test_fantasy_adventure_scenario() {
        let store = memory_store().await;
        let generator = Arc::new(happy_script(6));
        let service = GameGenerationService::new(generator.clone(), store.clone());

        let game_id = service.generate(request(10)).await.unwrap();
        assert!(game_id.value() > 0);

        let game = store.get_game(game_id).await.unwrap().unwrap();
        assert_eq!(game.theme, "Fantasy Adventure");
        assert_eq!(game.card_count, 10);
        assert_eq!(game.description, "The realm of Eldoria is fading.");

        let cards = store.list_cards(game_id).await.unwrap();
        assert_eq!(cards.len(), 10);
        let roles = cards.iter().filter(|c| c.card_type == CardType::Role).count();
        assert_eq!(roles, 4);
        assert!(cards[..4].iter().all(|c| c.card_type == CardType::Role));
        assert!(cards[4..].iter().all(|c| c.card_type == CardType::Event));

        for counter in MetaCounter::ALL {
            assert_eq!(store.get_meta(&counter.key(game_id)).await.unwrap(), Some(0));
        }

        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 3);
        assert!(prompts[1].starts_with("Generate 4 "));
        assert!(prompts[2].starts_with("Generate 6 "));
        assert!(prompts[2].contains("The realm of Eldoria is fading."));
    }

    #[tokio::test]
    async fn test_event_count_follows_realized_role_count() {
        let store = memory_store().await;
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Ok(story_json("A frozen kingdom.")),
            Ok(card_batch_json("Hero", 3, "A tired ranger")),
            Ok(card_batch_json("Event", 9, "Plot event: thaw")),
        ]));
        let service = GameGenerationService::new(generator.clone(), store.clone());

        let game_id = service.generate(request(12)).await.unwrap();
        assert!(generator.prompts()[2].starts_with("Generate 9 "));
        assert_eq!(store.list_cards(game_id).await.unwrap().len(), 12);
    }

    #[tokio::test]
    async fn test_description_override_is_persisted_verbatim() {
        let store = memory_store().await;
        let generator = Arc::new(happy_script(6));
        let service = GameGenerationService::new(generator.clone(), store.clone());

        let mut req = request(10);
        req.description = Some("A heist in a floating city.".to_string());
        let game_id = service.generate(req).await.unwrap();

        let game = store.get_game(game_id).await.unwrap().unwrap();
        assert_eq!(game.description, "A heist in a floating city.");
        // Cards are still seeded from the generated story
        assert!(generator.prompts()[1].contains("The realm of Eldoria is fading."));
    }

    #[tokio::test]
    async fn test_invalid_request_aborts_in_init_without_calling_generator() {
        let store = memory_store().await;
        let generator = Arc::new(ScriptedGenerator::new(vec![]));
        let service = GameGenerationService::new(generator.clone(), store.clone());

        let err = service.generate(request(9)).await.unwrap_err();
        assert_eq!(err.stage, GenerationStage::Init);
        assert!(matches!(err.failure, GenerationFailure::Validation(_)));
        assert!(generator.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_story_aborts_in_parsing_story() {
        let store = memory_store().await;
        let generator = Arc::new(ScriptedGenerator::new(vec![Ok("not json".to_string())]));
        let service = GameGenerationService::new(generator, store.clone());

        let err = service.generate(request(10)).await.unwrap_err();
        assert_eq!(err.stage, GenerationStage::ParsingStory);
        assert!(matches!(err.failure, GenerationFailure::Parse(_)));
        assert!(store.list_games().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generator_failures_abort_at_their_stage() {
        let cases = vec![
            (
                vec![Err(GeneratorError::QuotaExceeded("daily limit".to_string()))],
                GenerationStage::GeneratingStory,
            ),
            (
                vec![
                    Ok(story_json("Story")),
                    Err(GeneratorError::Timeout),
                ],
                GenerationStage::GeneratingRoleCards,
            ),
            (
                vec![
                    Ok(story_json("Story")),
                    Ok(card_batch_json("Hero", 4, "A knight")),
                    Err(GeneratorError::ServiceUnavailable("503".to_string())),
                ],
                GenerationStage::GeneratingEventCards,
            ),
        ];

        for (index, (script, expected_stage)) in cases.into_iter().enumerate() {
            let store = memory_store().await;
            let service =
                GameGenerationService::new(Arc::new(ScriptedGenerator::new(script)), store.clone());
            let err = service.generate(request(10)).await.unwrap_err();
            assert_eq!(err.stage, expected_stage);
            assert!(matches!(err.failure, GenerationFailure::ExternalService(_)));
            let expected_kind = if index == 0 {
                ErrorKind::QuotaExhausted
            } else {
                ErrorKind::ExternalService
            };
            assert_eq!(err.kind(), expected_kind);
            assert!(store.list_games().await.unwrap().is_empty(), "{expected_stage}");
        }
    }

    #[tokio::test]
    async fn test_malformed_card_batches_persist_nothing() {
        let cases = vec![
            (
                vec![Ok(story_json("Story")), Ok("[{\"name\": \"x\"}]".to_string())],
                GenerationStage::ParsingRoleCards,
            ),
            (
                vec![
                    Ok(story_json("Story")),
                    Ok(card_batch_json("Hero", 4, "A knight")),
                    Ok("{oops".to_string()),
                ],
                GenerationStage::ParsingEventCards,
            ),
        ];

        for (script, expected_stage) in cases {
            let store = memory_store().await;
            let service =
                GameGenerationService::new(Arc::new(ScriptedGenerator::new(script)), store.clone());
            let err = service.generate(request(10)).await.unwrap_err();
            assert_eq!(err.stage, expected_stage);
            assert!(matches!(err.failure, GenerationFailure::Parse(_)));
            assert!(store.list_games().await.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_too_many_role_cards_is_rejected_not_clamped() {
        let store = memory_store().await;
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Ok(story_json("Story")),
            Ok(card_batch_json("Hero", 11, "A knight")),
        ]));
        let service = GameGenerationService::new(generator, store.clone());

        let err = service.generate(request(10)).await.unwrap_err();
        assert_eq!(err.stage, GenerationStage::ParsingRoleCards);
        assert!(matches!(
            err.failure,
            GenerationFailure::Validation(AggregateError::RoleCardsExceedRequest { .. })
        ));
        assert!(store.list_games().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_role_cards_filling_the_deck_skip_event_generation() {
        let store = memory_store().await;
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Ok(story_json("Story")),
            Ok(card_batch_json("Hero", 10, "A knight")),
        ]));
        let service = GameGenerationService::new(generator.clone(), store.clone());

        let game_id = service.generate(request(10)).await.unwrap();
        assert_eq!(generator.prompts().len(), 2);
        assert_eq!(store.list_cards(game_id).await.unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_persistence_failures_leave_no_partial_state() {
        let faults = [
            (Fault::CreateGame, GenerationStage::PersistingCardsAndMeta),
            (Fault::CreateCard(0), GenerationStage::PersistingCardsAndMeta),
            (Fault::CreateCard(7), GenerationStage::PersistingCardsAndMeta),
            (Fault::CreateMeta(1), GenerationStage::PersistingCardsAndMeta),
            (Fault::Commit, GenerationStage::PersistingCardsAndMeta),
        ];

        for (fault, expected_stage) in faults {
            let inner = memory_store().await;
            let store = FaultyStore::new(inner.clone(), fault);
            let service = GameGenerationService::new(Arc::new(happy_script(6)), store);

            let err = service.generate(request(10)).await.unwrap_err();
            assert_eq!(err.stage, expected_stage, "{fault:?}");
            assert!(matches!(err.failure, GenerationFailure::Persistence(_)));

            assert!(inner.list_games().await.unwrap().is_empty(), "{fault:?}");
            assert!(inner.get_game(GameId::new(1)).await.unwrap().is_none());
            assert!(inner.list_cards(GameId::new(1)).await.unwrap().is_empty());
            for counter in MetaCounter::ALL {
                assert_eq!(
                    inner.get_meta(&counter.key(GameId::new(1))).await.unwrap(),
                    None
                );
            }
        }
    }

    async fn assert_nothing_persisted<S: GameStore>(store: &S) {
        assert!(store.list_games().await.unwrap().is_empty());
        for counter in MetaCounter::ALL {
            assert_eq!(store.get_meta(&counter.key(GameId::new(1))).await.unwrap(), None);
        }
    }

    #[tokio::test]
    async fn test_overlapping_runs_do_not_block_each_other() {
        let dir = tempfile::tempdir().unwrap();
        // Each run spends far longer in the generator than a writer may wait
        let store = file_store(&dir, 1).await;
        let slow = |prefix: &str| {
            Arc::new(
                ScriptedGenerator::new(vec![
                    Ok(story_json(&format!("{prefix} story"))),
                    Ok(card_batch_json(prefix, ROLE_CARD_COUNT, "A wandering warrior")),
                    Ok(card_batch_json(prefix, 6, "Plot event: a storm")),
                ])
                .with_delay(Duration::from_millis(1200)),
            )
        };
        let first = GameGenerationService::new(slow("First"), store.clone());
        let second = GameGenerationService::new(slow("Second"), store.clone());

        let (a, b) = tokio::join!(first.generate(request(10)), async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            second.generate(request(10)).await
        });
        let a = a.unwrap();
        let b = b.unwrap();
        assert_ne!(a, b);

        for game_id in [a, b] {
            assert_eq!(store.list_cards(game_id).await.unwrap().len(), 10);
            for counter in MetaCounter::ALL {
                assert_eq!(store.get_meta(&counter.key(game_id)).await.unwrap(), Some(0));
            }
        }
        assert_eq!(store.list_games().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_cancelled_run_leaves_nothing_behind() {
        let store = memory_store().await;
        let generator = Arc::new(
            ScriptedGenerator::new(vec![
                Ok(story_json("Story")),
                Ok(card_batch_json("Hero", ROLE_CARD_COUNT, "A knight")),
            ])
            .hanging_when_exhausted(),
        );
        let service = GameGenerationService::new(generator.clone(), store.clone());

        let outcome =
            tokio::time::timeout(Duration::from_millis(200), service.generate(request(10))).await;
        assert!(outcome.is_err());
        // Cancelled while waiting on the event call
        assert_eq!(generator.prompts().len(), 3);
        assert_nothing_persisted(&store).await;
    }

    #[tokio::test]
    async fn test_cancelled_commit_rolls_back() {
        let inner = memory_store().await;
        let store = FaultyStore::new(inner.clone(), Fault::StallCommit);
        let service = GameGenerationService::new(Arc::new(happy_script(6)), store);

        let outcome =
            tokio::time::timeout(Duration::from_millis(200), service.generate(request(10))).await;
        assert!(outcome.is_err());
        assert_nothing_persisted(&inner).await;
        assert!(inner.list_cards(GameId::new(1)).await.unwrap().is_empty());

        // The dropped transaction released the connection
        let service = GameGenerationService::new(Arc::new(happy_script(6)), inner.clone());
        let game_id = service.generate(request(10)).await.unwrap();
        assert_eq!(inner.list_cards(game_id).await.unwrap().len(), 10);
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(GenerationStage::ParsingStory.to_string(), "parsing_story");
        assert_eq!(
            GenerationStage::PersistingCardsAndMeta.to_string(),
            "persisting_cards_and_meta"
        );
    }
}
