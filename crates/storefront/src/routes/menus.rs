//! Menu route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use mr_daebak_core::MenuStyle;

use crate::catalog::{MenuDetail, MenuRow};
use crate::error::{AppError, Result};
use crate::pricing::{self, MenuQuote};
use crate::state::AppState;

/// Query parameters for a price quote. Absent values use the menu defaults.
#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    pub bread: Option<u32>,
    pub wine: Option<u32>,
    pub style: Option<MenuStyle>,
}

/// List every menu in catalog order.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<Vec<MenuRow>> {
    Json(state.catalog().all_menus().to_vec())
}

/// Show the joined detail of one menu.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(menu_id): Path<String>,
) -> Result<Json<MenuDetail>> {
    let detail = lookup(&state, &menu_id)?;
    Ok(Json(detail))
}

/// Price a configuration of one menu.
#[instrument(skip(state))]
pub async fn quote(
    State(state): State<AppState>,
    Path(menu_id): Path<String>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<MenuQuote>> {
    let detail = lookup(&state, &menu_id)?;
    let quote = pricing::quote_menu(
        &detail,
        state.limits(),
        query.bread,
        query.wine,
        query.style,
    )
    .map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok(Json(quote))
}

fn lookup(state: &AppState, menu_id: &str) -> Result<MenuDetail> {
    state
        .catalog()
        .menu_detail(menu_id)
        .ok_or_else(|| AppError::NotFound(format!("menu {menu_id}")))
}
