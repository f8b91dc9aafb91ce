//! Session middleware configuration.
//!
//! Sessions live in process memory: they hold only the current identity and
//! the order draft, both of which a customer can re-enter.

use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::config::StorefrontConfig;
use crate::models::{OrderDraft, session_keys};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "daebak_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.secure_cookies())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Load the session's draft, or a fresh one if none was saved.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
pub async fn load_draft(session: &Session) -> Result<OrderDraft, tower_sessions::session::Error> {
    Ok(session
        .get::<OrderDraft>(session_keys::ORDER_DRAFT)
        .await?
        .unwrap_or_default())
}

/// Save the session's draft.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_draft(
    session: &Session,
    draft: &OrderDraft,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::ORDER_DRAFT, draft).await
}
