use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use common::mapper::{SeasoningDto, to_seasoning_dto};
use common::repository::{NewSeasoning, SeasoningChanges};
use common::{
    DomainError, ListSeasoningsParams, ListSeasoningsQuery, ListSeasoningsUseCase,
    SeasoningListResponse,
};
use sea_orm::*;
use tracing::instrument;

use crate::entity::seasoning_type;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::query::AppQuery;
use crate::models::seasoning::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Seasonings",
    operation_id = "listSeasonings",
    summary = "List seasonings with expiry status",
    description = "Returns a page of seasonings, each annotated with `daysUntilExpiry` and `expiryStatus` computed against a single request-time instant. Filters apply in order type, name search, expiry window, then sort. Without `sort` the storage order (by id) is kept. Seasonings with no known expiry date sort last in both expiry directions.",
    params(ListSeasoningsParams),
    responses(
        (status = 200, description = "Page of seasonings", body = SeasoningListResponse),
        (status = 400, description = "Invalid query parameter (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, params))]
pub async fn list_seasonings(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListSeasoningsParams>,
) -> Result<Json<SeasoningListResponse>, AppError> {
    let query = ListSeasoningsQuery::from_params(params)?;
    let response = ListSeasoningsUseCase::new(state.seasonings.clone())
        .execute(&query, Utc::now())
        .await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Seasonings",
    operation_id = "createSeasoning",
    summary = "Register a seasoning",
    request_body = CreateSeasoningRequest,
    responses(
        (status = 201, description = "Seasoning created", body = SeasoningDto),
        (status = 400, description = "Validation error or unknown typeId (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_seasoning(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateSeasoningRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new = NewSeasoning::from(payload).validate()?;
    ensure_type_exists(&state.db, new.type_id).await?;

    let created = state.seasonings.create(new).await?;
    Ok((
        StatusCode::CREATED,
        Json(to_seasoning_dto(&created, Utc::now())),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Seasonings",
    operation_id = "getSeasoning",
    summary = "Get a seasoning by ID",
    params(("id" = i32, Path, description = "Seasoning ID")),
    responses(
        (status = 200, description = "Seasoning details", body = SeasoningDto),
        (status = 404, description = "Seasoning not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_seasoning(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SeasoningDto>, AppError> {
    let seasoning = state
        .seasonings
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(to_seasoning_dto(&seasoning, Utc::now())))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Seasonings",
    operation_id = "updateSeasoning",
    summary = "Update a seasoning",
    description = "Partially updates a seasoning. Omitted fields are kept and `null` clears a nullable field. An empty payload returns the current resource unchanged.",
    params(("id" = i32, Path, description = "Seasoning ID")),
    request_body = UpdateSeasoningRequest,
    responses(
        (status = 200, description = "Seasoning updated", body = SeasoningDto),
        (status = 400, description = "Validation error or unknown typeId (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Seasoning not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_seasoning(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateSeasoningRequest>,
) -> Result<Json<SeasoningDto>, AppError> {
    let changes = SeasoningChanges::from(payload).validate()?;

    let existing = state
        .seasonings
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    if changes.is_empty() {
        return Ok(Json(to_seasoning_dto(&existing, Utc::now())));
    }

    if let Some(type_id) = changes.type_id {
        ensure_type_exists(&state.db, type_id).await?;
    }
    let updated = state
        .seasonings
        .update(id, changes)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(to_seasoning_dto(&updated, Utc::now())))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Seasonings",
    operation_id = "deleteSeasoning",
    summary = "Delete a seasoning",
    description = "Deletes the seasoning and removes it from every template.",
    params(("id" = i32, Path, description = "Seasoning ID")),
    responses(
        (status = 204, description = "Seasoning deleted"),
        (status = 404, description = "Seasoning not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_seasoning(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    if !state.seasonings.delete(id).await? {
        return Err(not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: i32) -> AppError {
    DomainError::NotFound {
        resource: "Seasoning",
        id,
    }
    .into()
}

async fn ensure_type_exists<C: ConnectionTrait>(db: &C, type_id: i32) -> Result<(), AppError> {
    let exists = seasoning_type::Entity::find_by_id(type_id)
        .count(db)
        .await?
        > 0;
    if !exists {
        return Err(AppError::Validation(format!(
            "Seasoning type {type_id} does not exist"
        )));
    }
    Ok(())
}
