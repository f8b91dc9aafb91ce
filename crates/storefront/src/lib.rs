//! Mr. Daebak Storefront library.
//!
//! Dinner ordering as a library: the menu catalog and pricing, member and
//! guest identity, the session draft, checkout and the order ledger, plus
//! the HTTP routes over them. The binary and the integration tests both
//! build on [`routes::app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod identity;
pub mod middleware;
pub mod models;
pub mod pricing;
pub mod routes;
pub mod services;
pub mod state;
