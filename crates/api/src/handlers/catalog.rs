//! Handlers for the disease and goal catalogs.

use axum::extract::{Query, State};
use axum::Json;
use vitaplan_core::paging::Paging;
use vitaplan_db::models::disease::Disease;
use vitaplan_db::models::goal::Goal;
use vitaplan_db::repositories::{DiseaseRepo, GoalRepo};

use crate::error::AppResult;
use crate::response::PagedResponse;
use crate::state::AppState;

/// GET /api/v1/catalog/diseases
pub async fn list_diseases(
    State(state): State<AppState>,
    Query(mut paging): Query<Paging>,
) -> AppResult<Json<PagedResponse<Vec<Disease>>>> {
    let diseases = DiseaseRepo::list(&state.pool, &mut paging).await?;
    Ok(Json(PagedResponse { data: diseases, paging }))
}

/// GET /api/v1/catalog/goals
pub async fn list_goals(
    State(state): State<AppState>,
    Query(mut paging): Query<Paging>,
) -> AppResult<Json<PagedResponse<Vec<Goal>>>> {
    let goals = GoalRepo::list(&state.pool, &mut paging).await?;
    Ok(Json(PagedResponse { data: goals, paging }))
}
