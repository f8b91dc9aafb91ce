//! Order history route handlers.
//!
//! Listing, viewing and editing are scoped to the session owner. The lookup
//! route is public and matches guest orders by token or trailing phone
//! digits.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use mr_daebak_core::OrderId;

use crate::error::{AppError, Result};
use crate::identity::Owner;
use crate::middleware::RequireUser;
use crate::models::{AppUser, Order, OrderEdit};
use crate::state::AppState;

/// Query parameters for the guest lookup.
#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    #[serde(default)]
    pub token: String,
}

/// Orders of the session owner, newest first.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<Order>>> {
    let owner = owner_of(&user)?;
    Ok(Json(state.orders().list_for(&owner)?))
}

/// Guest orders matching a token or its trailing digits.
#[instrument(skip_all)]
pub async fn lookup(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<Vec<Order>>> {
    Ok(Json(state.orders().lookup_guest(&query.token)?))
}

/// One order of the session owner.
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(order_id): Path<OrderId>,
) -> Result<Json<Order>> {
    let owner = owner_of(&user)?;
    Ok(Json(state.orders().view(&owner, &order_id)?))
}

/// Rewrite the customer fields of a requested order.
#[instrument(skip(state, user, edit))]
pub async fn update(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(order_id): Path<OrderId>,
    Json(edit): Json<OrderEdit>,
) -> Result<Json<Order>> {
    let owner = owner_of(&user)?;
    Ok(Json(state.orders().edit(&owner, &order_id, edit)?))
}

fn owner_of(user: &AppUser) -> Result<Owner> {
    Owner::resolve(user).map_err(|e| AppError::Unauthorized(e.to_string()))
}
