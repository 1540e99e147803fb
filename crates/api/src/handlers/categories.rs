//! Handlers for the `/event-type-categories` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hostwatch_core::error::CoreError;
use hostwatch_core::types::DbId;
use hostwatch_db::models::event::{
    CreateEventTypeCategory, EventTypeCategory, UpdateEventTypeCategory,
};
use hostwatch_db::repositories::EventTypeCategoryRepo;
use hostwatch_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::FormOrJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum length of a category name.
const MAX_CATEGORY_NAME_LEN: usize = 50;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "EventTypeCategory",
        id,
    })
}

fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("name: This field is required.".into()));
    }
    if name.chars().count() > MAX_CATEGORY_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "name: Ensure this value has at most {MAX_CATEGORY_NAME_LEN} characters."
        )));
    }
    Ok(())
}

/// A parent must be another category of the same user that does not sit
/// below the category being moved.
async fn check_parent(
    pool: &DbPool,
    user_id: DbId,
    id: Option<DbId>,
    parent_id: Option<DbId>,
) -> AppResult<()> {
    let Some(parent_id) = parent_id else {
        return Ok(());
    };
    if Some(parent_id) == id {
        return Err(CoreError::Validation("A category cannot be its own parent.".into()).into());
    }
    EventTypeCategoryRepo::find_for_user(pool, parent_id, user_id)
        .await?
        .ok_or_else(|| not_found(parent_id))?;
    if let Some(id) = id {
        if EventTypeCategoryRepo::chain_ids(pool, parent_id)
            .await?
            .contains(&id)
        {
            return Err(CoreError::Validation(
                "A category cannot be placed under one of its own subcategories.".into(),
            )
            .into());
        }
    }
    Ok(())
}

/// GET /api/v1/event-type-categories
pub async fn list_categories(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<EventTypeCategory>>>> {
    let categories = EventTypeCategoryRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/v1/event-type-categories
pub async fn create_category(
    auth: AuthUser,
    State(state): State<AppState>,
    FormOrJson(input): FormOrJson<CreateEventTypeCategory>,
) -> AppResult<(StatusCode, Json<DataResponse<EventTypeCategory>>)> {
    validate_name(&input.name)?;
    check_parent(&state.pool, auth.user_id, None, input.parent_id).await?;

    let category = EventTypeCategoryRepo::create(&state.pool, auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /api/v1/event-type-categories/{id}
///
/// Renaming keeps the original slug.
pub async fn update_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    FormOrJson(input): FormOrJson<UpdateEventTypeCategory>,
) -> AppResult<Json<DataResponse<EventTypeCategory>>> {
    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    check_parent(&state.pool, auth.user_id, Some(id), input.parent_id).await?;

    let category = EventTypeCategoryRepo::update(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/event-type-categories/{id}
pub async fn delete_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !EventTypeCategoryRepo::delete(&state.pool, id, auth.user_id).await? {
        return Err(not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}
