//! Account route handlers.
//!
//! These routes require a session identity; profile edits are members only.

use axum::{Json, extract::State};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::{RequireUser, set_current_user};
use crate::models::{AppUser, MemberProfile};
use crate::state::AppState;

/// Show the session identity.
pub async fn show(RequireUser(user): RequireUser) -> Json<AppUser> {
    Json(user)
}

/// Update the member profile and refresh the session copy.
#[instrument(skip_all)]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    RequireUser(user): RequireUser,
    Json(profile): Json<MemberProfile>,
) -> Result<Json<AppUser>> {
    let updated = state.auth().update_account(&user, profile)?;
    set_current_user(&session, &updated).await?;
    Ok(Json(updated))
}
