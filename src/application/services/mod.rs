//! Application services - Use case implementations

pub mod game_service;
pub mod generation_service;
pub mod llm;

pub use game_service::{GameDetail, GameService, GameServiceImpl};
pub use generation_service::{
    ErrorKind, GameGenerationService, GenerateGame, GenerationError, GenerationFailure,
    GenerationStage,
};
