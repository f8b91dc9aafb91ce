//! Authentication route handlers.
//!
//! Members sign up and log in; guests identify by phone. Either way the
//! resulting identity is stored in the session.

use axum::{Json, extract::State, http::StatusCode};
use secrecy::SecretString;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::identity::Owner;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::AppUser;
use crate::services::Registration;
use crate::state::AppState;

// =============================================================================
// Request Types
// =============================================================================

/// Signup request.
#[derive(Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
}

/// Login request.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Guest entry request.
#[derive(Deserialize)]
pub struct GuestRequest {
    #[serde(default)]
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Register a member and sign them in.
#[instrument(skip_all)]
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AppUser>)> {
    let user = state.auth().register(Registration {
        name: body.name,
        email: body.email,
        password: SecretString::from(body.password),
        address: body.address,
        phone: body.phone,
    })?;
    sign_in(&session, &user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Sign a member in.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AppUser>> {
    let password = SecretString::from(body.password);
    let user = state.auth().login(&body.email, &password)?;
    sign_in(&session, &user).await?;
    Ok(Json(user))
}

/// Continue as a guest.
#[instrument(skip_all)]
pub async fn guest(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<GuestRequest>,
) -> Result<Json<AppUser>> {
    let user = state
        .auth()
        .start_guest(&body.name, &body.phone, &body.address)?;
    sign_in(&session, &user).await?;
    Ok(Json(user))
}

/// Sign out, dropping the identity and the draft.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    Ok(StatusCode::NO_CONTENT)
}

async fn sign_in(session: &Session, user: &AppUser) -> Result<()> {
    set_current_user(session, user).await?;
    if let Ok(owner) = Owner::resolve(user) {
        let email = match user {
            AppUser::Member { email, .. } => Some(email.as_str()),
            AppUser::Guest { .. } => None,
        };
        set_sentry_user(&owner.owner_key, email);
    }
    Ok(())
}
