//! Domain models for the storefront.
//!
//! - [`user`] - Stored members and session identities
//! - [`order`] - Orders, items and patches
//! - [`draft`] - The in-progress order configuration
//! - [`session`] - Session keys

pub mod draft;
pub mod order;
pub mod session;
pub mod user;

pub use draft::{DraftError, DraftLimits, DraftPatch, OrderDraft};
pub use order::{NewOrder, Order, OrderEdit, OrderItem, OrderPatch};
pub use session::keys as session_keys;
pub use user::{AppUser, MemberProfile, StoredUser};
