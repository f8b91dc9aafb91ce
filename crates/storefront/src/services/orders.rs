//! Customer-facing order access, plus the operator status transition.
//!
//! Every customer path checks existence first, then ownership, and only then
//! looks at the order's contents. A customer may rewrite contact and delivery
//! fields while the order is `REQUESTED`; after that it is read-only to them.

use thiserror::Error;
use tracing::instrument;

use mr_daebak_core::{OrderId, OrderStatus};

use crate::db::{KeyValueStore, OrderRepository, RepositoryError};
use crate::identity::Owner;
use crate::models::order::{Order, OrderEdit, OrderPatch};
use crate::models::{DraftError, DraftLimits};

/// Errors from order access.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("order not found")]
    NotFound,

    #[error("order belongs to someone else")]
    NotOwner,

    /// The order left the editable window.
    #[error("order is {} and can no longer be changed", .0.label())]
    Immutable(OrderStatus),

    /// The order reached an end state.
    #[error("order is already {} and closed", .0.label())]
    Closed(OrderStatus),

    #[error("cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error(transparent)]
    InvalidDeliveryDate(#[from] DraftError),

    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Guarded access to the order ledger.
pub struct OrderService<'a> {
    orders: OrderRepository<'a>,
    limits: &'a DraftLimits,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore, limits: &'a DraftLimits) -> Self {
        Self {
            orders: OrderRepository::new(store),
            limits,
        }
    }

    /// Orders of the session owner, newest first.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Repository` if the ledger cannot be read.
    pub fn list_for(&self, owner: &Owner) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.orders.list_by_owner(owner)?;
        orders.reverse();
        Ok(orders)
    }

    /// Guest orders by full token or trailing phone digits, newest first.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Repository` if the ledger cannot be read.
    pub fn lookup_guest(&self, token: &str) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.orders.list_by_guest_token(token)?;
        orders.reverse();
        Ok(orders)
    }

    /// One order, if it belongs to `owner`.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::NotFound` for an unknown id and
    /// `OrderError::NotOwner` for someone else's order.
    pub fn view(&self, owner: &Owner, order_id: &OrderId) -> Result<Order, OrderError> {
        let order = self
            .orders
            .get_by_id(order_id)?
            .ok_or(OrderError::NotFound)?;
        if !order.is_owned_by(owner) {
            return Err(OrderError::NotOwner);
        }
        Ok(order)
    }

    /// Rewrite the customer fields of a `REQUESTED` order.
    ///
    /// Status is never touched.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::NotFound`, `OrderError::NotOwner`,
    /// `OrderError::Immutable` (with the current status), or a validation
    /// error for a blank field or off-slot delivery date.
    #[instrument(skip(self, owner, edit), fields(order_id = %order_id))]
    pub fn edit(
        &self,
        owner: &Owner,
        order_id: &OrderId,
        edit: OrderEdit,
    ) -> Result<Order, OrderError> {
        let order = self.view(owner, order_id)?;
        if !order.status.is_customer_editable() {
            return Err(OrderError::Immutable(order.status));
        }

        let edit = edit.trimmed();
        if let Some(field) = edit.first_missing() {
            return Err(OrderError::MissingField(field));
        }
        self.limits.check_delivery_date(&edit.delivery_date)?;

        let updated = self
            .orders
            .update(order_id, OrderPatch::from(edit))
            .map_err(|e| match e {
                RepositoryError::NotFound => OrderError::NotFound,
                other => OrderError::Repository(other),
            })?;
        tracing::info!("order edited by customer");
        Ok(updated)
    }

    /// Move an order along the status machine. Operator use only.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::NotFound` for an unknown id,
    /// `OrderError::Closed` for a delivered or cancelled order, and
    /// `OrderError::InvalidTransition` for an edge the machine does not have.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub fn transition(&self, order_id: &OrderId, next: OrderStatus) -> Result<Order, OrderError> {
        let order = self
            .orders
            .get_by_id(order_id)?
            .ok_or(OrderError::NotFound)?;
        if order.status.is_terminal() {
            return Err(OrderError::Closed(order.status));
        }
        if !order.status.can_transition_to(next) {
            return Err(OrderError::InvalidTransition {
                from: order.status,
                to: next,
            });
        }

        let updated = self.orders.update(
            order_id,
            OrderPatch {
                status: Some(next),
                ..OrderPatch::default()
            },
        )?;
        tracing::info!(from = %order.status, to = %next, "order status changed");
        Ok(updated)
    }
}
