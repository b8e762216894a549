use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use common::DomainError;
use common::mapper::to_list_item_dto;
use common::pagination::{PaginationMeta, calculate_offset, validate_page_request};
use common::query::normalize_search;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{seasoning, seasoning_template, template_seasoning};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::query::AppQuery;
use crate::models::shared::escape_like;
use crate::models::template::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Templates",
    operation_id = "listTemplates",
    summary = "List seasoning templates",
    description = "Returns a page of templates ordered by name, each with the number of member seasonings. `search` is a substring match on the name, case-insensitive for ASCII letters on every backend and for all letters where the database `LOWER` folds Unicode (PostgreSQL).",
    params(TemplateListParams),
    responses(
        (status = 200, description = "Page of templates", body = TemplateListResponse),
        (status = 400, description = "Invalid query parameter (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, params))]
pub async fn list_templates(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<TemplateListParams>,
) -> Result<Json<TemplateListResponse>, AppError> {
    let (page, page_size) =
        validate_page_request(params.page, params.page_size, DEFAULT_TEMPLATE_PAGE_SIZE)?;

    let mut select = seasoning_template::Entity::find();
    if let Some(search) = normalize_search(params.search)? {
        let term = escape_like(&search);
        // LOWER folds ASCII only on SQLite; the verbatim arm keeps non-ASCII
        // names findable by their exact spelling there.
        select = select.filter(
            Condition::any()
                .add(
                    Expr::expr(Func::lower(Expr::col(seasoning_template::Column::Name)))
                        .like(LikeExpr::new(format!("%{}%", term.to_lowercase())).escape('\\')),
                )
                .add(
                    Expr::col(seasoning_template::Column::Name)
                        .like(LikeExpr::new(format!("%{term}%")).escape('\\')),
                ),
        );
    }

    let total = select
        .clone()
        .paginate(&state.db, page_size)
        .num_items()
        .await?;

    let templates = select
        .order_by_asc(seasoning_template::Column::Name)
        .order_by_asc(seasoning_template::Column::Id)
        .offset(Some(calculate_offset(page, page_size)))
        .limit(Some(page_size))
        .all(&state.db)
        .await?;

    let template_ids: Vec<i32> = templates.iter().map(|t| t.id).collect();
    let mut counts: HashMap<i32, u64> = HashMap::new();
    if !template_ids.is_empty() {
        let members: Vec<i32> = template_seasoning::Entity::find()
            .filter(template_seasoning::Column::TemplateId.is_in(template_ids))
            .select_only()
            .column(template_seasoning::Column::TemplateId)
            .into_tuple()
            .all(&state.db)
            .await?;
        for template_id in members {
            *counts.entry(template_id).or_default() += 1;
        }
    }

    let data = templates
        .into_iter()
        .map(|t| {
            let count = counts.get(&t.id).copied().unwrap_or(0);
            TemplateListItem::new(t, count)
        })
        .collect();

    Ok(Json(TemplateListResponse {
        data,
        meta: PaginationMeta::new(page, page_size, total),
    }))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Templates",
    operation_id = "createTemplate",
    summary = "Create a seasoning template",
    description = "Creates a named group of seasonings. `seasoningIds` must be unique (at most 100) and every ID must refer to an existing seasoning. Their order is kept.",
    request_body = CreateTemplateRequest,
    responses(
        (status = 201, description = "Template created", body = TemplateDetail),
        (status = 400, description = "Validation error or unknown seasoning (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Name already taken (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_template(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateTemplateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let payload = payload.validate()?;

    let txn = state.db.begin().await?;

    if !payload.seasoning_ids.is_empty() {
        let existing: Vec<i32> = seasoning::Entity::find()
            .filter(seasoning::Column::Id.is_in(payload.seasoning_ids.clone()))
            .select_only()
            .column(seasoning::Column::Id)
            .into_tuple()
            .all(&txn)
            .await?;
        if let Some(missing) = payload
            .seasoning_ids
            .iter()
            .find(|id| !existing.contains(id))
        {
            return Err(AppError::Validation(format!(
                "Seasoning {missing} does not exist"
            )));
        }
    }

    let now = Utc::now();
    let new_template = seasoning_template::ActiveModel {
        name: Set(payload.name),
        description: Set(payload.description),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let template = match new_template.insert(&txn).await {
        Ok(model) => model,
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            return Err(DomainError::Duplicate("Template".into()).into());
        }
        Err(e) => return Err(e.into()),
    };

    if !payload.seasoning_ids.is_empty() {
        let members = payload
            .seasoning_ids
            .iter()
            .zip(0..)
            .map(|(&seasoning_id, position)| template_seasoning::ActiveModel {
                template_id: Set(template.id),
                seasoning_id: Set(seasoning_id),
                position: Set(position),
            });
        template_seasoning::Entity::insert_many(members)
            .exec_without_returning(&txn)
            .await?;
    }

    txn.commit().await?;

    let detail = load_detail(&state, template).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Templates",
    operation_id = "getTemplate",
    summary = "Get a template with its seasonings",
    description = "Returns the template with its member seasonings in template order. Expiry fields of every member are computed against the same request-time instant.",
    params(("id" = i32, Path, description = "Template ID")),
    responses(
        (status = 200, description = "Template details", body = TemplateDetail),
        (status = 404, description = "Template not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TemplateDetail>, AppError> {
    let template = find_template(&state.db, id).await?;
    Ok(Json(load_detail(&state, template).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Templates",
    operation_id = "deleteTemplate",
    summary = "Delete a template",
    description = "Deletes the template and its memberships. Member seasonings are kept.",
    params(("id" = i32, Path, description = "Template ID")),
    responses(
        (status = 204, description = "Template deleted"),
        (status = 404, description = "Template not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_template(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    find_template(&txn, id).await?;

    template_seasoning::Entity::delete_many()
        .filter(template_seasoning::Column::TemplateId.eq(id))
        .exec(&txn)
        .await?;
    seasoning_template::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn find_template<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<seasoning_template::Model, AppError> {
    seasoning_template::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Template not found".into()))
}

/// Resolve members in template order and evaluate them at one instant.
async fn load_detail(
    state: &AppState,
    template: seasoning_template::Model,
) -> Result<TemplateDetail, AppError> {
    let member_ids: Vec<i32> = template_seasoning::Entity::find()
        .filter(template_seasoning::Column::TemplateId.eq(template.id))
        .order_by_asc(template_seasoning::Column::Position)
        .order_by_asc(template_seasoning::Column::SeasoningId)
        .select_only()
        .column(template_seasoning::Column::SeasoningId)
        .into_tuple()
        .all(&state.db)
        .await?;

    let mut by_id: HashMap<i32, _> = state
        .seasonings
        .find_by_ids(&member_ids)
        .await?
        .into_iter()
        .map(|s| (s.id(), s))
        .collect();

    let as_of = Utc::now();
    let seasonings = member_ids
        .iter()
        .filter_map(|id| by_id.remove(id))
        .map(|s| to_list_item_dto(&s, as_of))
        .collect();

    Ok(TemplateDetail::new(template, seasonings))
}
