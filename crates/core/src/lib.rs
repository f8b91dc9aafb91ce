//! Mr. Daebak Core - Shared domain types.
//!
//! This crate provides the types used across all Mr. Daebak components:
//! - `storefront` - Catalog, pricing, identity and order ledger, plus the HTTP service
//! - `cli` - Operator tooling over the same ledger
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for menu/order IDs, money, emails, phones and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
