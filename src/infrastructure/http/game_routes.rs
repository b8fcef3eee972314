//! Game API routes

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use std::sync::Arc;

use crate::application::dto::{
    GameDetailResponseDto, GameResponseDto, GenerateGameRequestDto, GenerateGameResponseDto,
};
use crate::application::services::GameService;
use crate::domain::value_objects::{CardId, GameId};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::state::AppState;

/// Generate and persist a new game
pub async fn generate_game(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateGameRequestDto>, JsonRejection>,
) -> Result<Json<GenerateGameResponseDto>, ApiError> {
    let Json(req) = payload?;
    let game_id = state.generation_service.generate(req.into()).await?;

    Ok(Json(GenerateGameResponseDto {
        game_id: game_id.value(),
        message: "Game generated successfully".to_string(),
    }))
}

/// List all live games
pub async fn list_games(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<GameResponseDto>>, ApiError> {
    let games = state.game_service.list_games().await?;
    Ok(Json(games.into_iter().map(GameResponseDto::from).collect()))
}

/// Get a game with its cards and counters
pub async fn get_game(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<GameDetailResponseDto>, ApiError> {
    let Path(id) = id?;
    let detail = state
        .game_service
        .get_game_detail(GameId::new(id))
        .await?
        .ok_or_else(|| ApiError::NotFound("Game not found".to_string()))?;

    Ok(Json(GameDetailResponseDto::from(detail)))
}

/// Soft-delete a game and its cards
pub async fn delete_game(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    if !state.game_service.delete_game(GameId::new(id)).await? {
        return Err(ApiError::NotFound("Game not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Soft-delete a single card
pub async fn delete_card(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    if !state.game_service.delete_card(CardId::new(id)).await? {
        return Err(ApiError::NotFound("Card not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Render the printable card sheet, store it under the files directory and
/// return it
pub async fn render_card_sheet(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Html<String>, ApiError> {
    let Path(id) = id?;
    let game_id = GameId::new(id);
    let detail = state
        .game_service
        .get_game_detail(game_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Game not found".to_string()))?;

    let document = state
        .card_sheet_renderer
        .render(&detail.game.theme, &detail.cards);
    state.card_sheet_writer.write(game_id, &document).await?;

    Ok(Html(document))
}
