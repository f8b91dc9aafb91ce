//! Checkout route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::middleware::{OptionalUser, RequireUser, load_draft, save_draft};
use crate::models::{AppUser, Order};
use crate::services::{CheckoutContact, CheckoutSummary};
use crate::state::AppState;

/// Checkout preview plus the identity whose details prefill the form.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    #[serde(flatten)]
    pub summary: CheckoutSummary,
    pub customer: Option<AppUser>,
}

/// Price the session draft as it would be ordered.
#[instrument(skip_all)]
pub async fn preview(
    State(state): State<AppState>,
    session: Session,
    OptionalUser(customer): OptionalUser,
) -> Result<Json<PreviewResponse>> {
    let draft = load_draft(&session).await?;
    let summary = state.checkout().preview(&draft)?;
    Ok(Json(PreviewResponse { summary, customer }))
}

/// Place the session draft as an order.
///
/// The draft is reset only when the order was recorded.
#[instrument(skip_all)]
pub async fn place(
    State(state): State<AppState>,
    session: Session,
    RequireUser(user): RequireUser,
    Json(contact): Json<CheckoutContact>,
) -> Result<(StatusCode, Json<Order>)> {
    let mut draft = load_draft(&session).await?;
    let order = state.checkout().commit(&user, &mut draft, contact)?;
    save_draft(&session, &draft).await?;

    add_breadcrumb(
        "checkout",
        "Placed order",
        Some(&[("order_id", order.order_id.as_str())]),
    );
    Ok((StatusCode::CREATED, Json(order)))
}
