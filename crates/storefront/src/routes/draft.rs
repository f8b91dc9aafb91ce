//! Order draft route handlers.
//!
//! The draft lives in the session. Every handler loads it, works on a copy
//! and saves it back only when the change succeeded.

use axum::{Json, extract::State};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::{load_draft, save_draft};
use crate::models::{DraftPatch, OrderDraft};
use crate::pricing::{self, PriceQuote};
use crate::state::AppState;

/// The draft plus what it currently costs.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftResponse {
    #[serde(flatten)]
    pub draft: OrderDraft,
    /// `None` until a menu is chosen.
    pub quote: Option<PriceQuote>,
    /// Bookable delivery times of a day.
    pub delivery_slots: Vec<String>,
}

impl DraftResponse {
    fn new(state: &AppState, draft: OrderDraft) -> Self {
        let quote = draft
            .dinner_type
            .as_ref()
            .and_then(|id| state.catalog().menu_detail(id.as_str()))
            .map(|detail| pricing::quote(&detail, draft.baguette_count, draft.champagne_count));
        Self {
            draft,
            quote,
            delivery_slots: state.limits().slots(),
        }
    }
}

/// Show the session draft.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<DraftResponse>> {
    let draft = load_draft(&session).await?;
    Ok(Json(DraftResponse::new(&state, draft)))
}

/// Merge a patch into the session draft.
///
/// Choosing a different menu first resets counts and style to that menu's
/// defaults; the rest of the patch is applied on top.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Json(mut patch): Json<DraftPatch>,
) -> Result<Json<DraftResponse>> {
    let mut draft = load_draft(&session).await?;

    if let Some(menu_id) = patch.dinner_type.take() {
        let detail = state
            .catalog()
            .menu_detail(menu_id.as_str())
            .ok_or_else(|| AppError::NotFound(format!("menu {menu_id}")))?;
        if draft.dinner_type.as_ref() != Some(&menu_id) {
            draft.select_menu(&detail);
            add_breadcrumb("draft", "Selected menu", Some(&[("menu_id", menu_id.as_str())]));
        }
    }

    draft.apply(patch, state.limits())?;
    save_draft(&session, &draft).await?;
    Ok(Json(DraftResponse::new(&state, draft)))
}

/// Discard the session draft.
#[instrument(skip(state, session))]
pub async fn reset(State(state): State<AppState>, session: Session) -> Result<Json<DraftResponse>> {
    let mut draft = load_draft(&session).await?;
    draft.reset();
    save_draft(&session, &draft).await?;
    Ok(Json(DraftResponse::new(&state, draft)))
}
