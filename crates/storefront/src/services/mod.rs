//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Member signup/login/account edits and guest entry
//! - `checkout` - Commits the session draft into the order ledger
//! - `orders` - Owner-scoped order access, customer edits, status transitions
//!
//! Services borrow the store for the length of one call, like the
//! repositories they wrap.

pub mod auth;
pub mod checkout;
pub mod orders;

pub use auth::{AuthError, AuthService, Registration};
pub use checkout::{CheckoutContact, CheckoutError, CheckoutService, CheckoutSummary};
pub use orders::{OrderError, OrderService};
