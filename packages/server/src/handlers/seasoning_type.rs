use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::DomainError;
use common::seasoning::validate_name;
use sea_orm::*;
use tracing::instrument;

use crate::entity::seasoning_type;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::seasoning_type::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Seasoning Types",
    operation_id = "listSeasoningTypes",
    summary = "List seasoning types",
    responses(
        (status = 200, description = "All seasoning types ordered by ID", body = Vec<SeasoningTypeResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_seasoning_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<SeasoningTypeResponse>>, AppError> {
    let types = seasoning_type::Entity::find()
        .order_by_asc(seasoning_type::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(types.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Seasoning Types",
    operation_id = "createSeasoningType",
    summary = "Create a seasoning type",
    request_body = CreateSeasoningTypeRequest,
    responses(
        (status = 201, description = "Seasoning type created", body = SeasoningTypeResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Name already taken (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_seasoning_type(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateSeasoningTypeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = validate_name("Name", &payload.name)?;

    let new_type = seasoning_type::ActiveModel {
        name: Set(name),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    match new_type.insert(&state.db).await {
        Ok(model) => Ok((
            StatusCode::CREATED,
            Json(SeasoningTypeResponse::from(model)),
        )),
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            Err(DomainError::Duplicate("Seasoning type".into()).into())
        }
        Err(e) => Err(e.into()),
    }
}
