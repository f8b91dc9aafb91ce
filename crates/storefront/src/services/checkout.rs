//! Checkout: turning the session draft into an order.
//!
//! The service borrows the draft mutably for the duration of a commit and
//! resets it only once the order is safely in the ledger.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use mr_daebak_core::{MenuId, MenuStyle};

use crate::catalog::{MenuCatalog, MenuRow};
use crate::db::{KeyValueStore, OrderRepository, RepositoryError};
use crate::identity::{IdentityError, Owner};
use crate::models::order::{NewOrder, Order, OrderItem};
use crate::models::{AppUser, OrderDraft};
use crate::pricing::{self, PriceQuote};

/// Why a checkout was refused.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("session cannot own orders: {0}")]
    InvalidOwnership(#[from] IdentityError),

    #[error("no dinner selected")]
    MissingDinner,

    #[error("unknown menu: {0}")]
    UnknownMenu(MenuId),

    #[error("delivery date is required")]
    MissingDeliveryDate,

    #[error("{0} is required")]
    MissingContact(&'static str),

    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Contact details entered on the checkout form.
///
/// Blank fields fall back to the draft and then to the session user.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutContact {
    pub customer_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

/// What the customer is about to order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub menu: MenuRow,
    pub style: MenuStyle,
    pub courses: Vec<String>,
    pub baguette_count: u32,
    pub champagne_count: u32,
    pub delivery_date: String,
    pub quote: PriceQuote,
}

/// Checkout flow controller.
pub struct CheckoutService<'a> {
    catalog: &'a MenuCatalog,
    orders: OrderRepository<'a>,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(catalog: &'a MenuCatalog, store: &'a dyn KeyValueStore) -> Self {
        Self {
            catalog,
            orders: OrderRepository::new(store),
        }
    }

    /// Price the draft without writing anything.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::MissingDinner` or `CheckoutError::UnknownMenu`
    /// if the draft has no valid menu.
    pub fn preview(&self, draft: &OrderDraft) -> Result<CheckoutSummary, CheckoutError> {
        let menu_id = draft
            .dinner_type
            .as_ref()
            .ok_or(CheckoutError::MissingDinner)?;
        let detail = self
            .catalog
            .menu_detail(menu_id.as_str())
            .ok_or_else(|| CheckoutError::UnknownMenu(menu_id.clone()))?;
        let quote = pricing::quote(&detail, draft.baguette_count, draft.champagne_count);

        Ok(CheckoutSummary {
            courses: detail.courses(draft.style).to_vec(),
            menu: detail.menu,
            style: draft.style,
            baguette_count: draft.baguette_count,
            champagne_count: draft.champagne_count,
            delivery_date: draft.delivery_date.clone(),
            quote,
        })
    }

    /// Record the draft as a new order and reset the draft.
    ///
    /// Checks run in a fixed order: ownership, dinner, delivery date, contact.
    /// On any error the draft is left untouched.
    ///
    /// # Errors
    ///
    /// Returns the first failing check as a `CheckoutError`.
    #[instrument(skip_all, fields(dinner = ?draft.dinner_type))]
    pub fn commit(
        &self,
        user: &AppUser,
        draft: &mut OrderDraft,
        contact: CheckoutContact,
    ) -> Result<Order, CheckoutError> {
        let owner = Owner::resolve(user)?;
        let summary = self.preview(draft)?;

        let delivery_date = draft.delivery_date.trim();
        if delivery_date.is_empty() {
            return Err(CheckoutError::MissingDeliveryDate);
        }

        let customer_name = pick(
            contact.customer_name.as_deref(),
            &[draft.customer_name.as_str(), user.name()],
        )
        .ok_or(CheckoutError::MissingContact("customerName"))?;
        let phone = pick(contact.phone.as_deref(), &[user.phone()])
            .ok_or(CheckoutError::MissingContact("phone"))?;
        let address = pick(contact.address.as_deref(), &[user.address()])
            .ok_or(CheckoutError::MissingContact("address"))?;

        let quote = summary.quote;
        let order = self.orders.add(NewOrder {
            owner,
            customer_name,
            address,
            phone,
            delivery_date: delivery_date.to_owned(),
            item: OrderItem {
                dinner_id: summary.menu.id,
                style: summary.style,
                baguette_count: summary.baguette_count,
                champagne_count: summary.champagne_count,
                base_price: quote.base_price,
                extra_price: quote.extra_price,
                total_item_price: quote.total_price,
            },
        })?;

        draft.reset();
        tracing::info!(order_id = %order.order_id, total = %order.total_price, "order placed");
        Ok(order)
    }
}

/// First non-blank value among the entered one and its fallbacks, trimmed.
fn pick(entered: Option<&str>, fallbacks: &[&str]) -> Option<String> {
    entered
        .into_iter()
        .chain(fallbacks.iter().copied())
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_owned)
}
