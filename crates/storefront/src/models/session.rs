//! Session-related types.

/// Session keys for storefront state.
pub mod keys {
    /// Key for the current member or guest identity.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the in-progress order draft.
    pub const ORDER_DRAFT: &str = "order_draft";
}
