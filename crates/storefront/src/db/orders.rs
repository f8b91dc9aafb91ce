//! Order repository: the order ledger.
//!
//! The ledger is permissive: it merges whatever patch it is given. The
//! edit window and ownership rules live in
//! [`OrderService`](crate::services::orders::OrderService).

use chrono::Utc;
use rand::Rng;

use mr_daebak_core::{OrderId, OrderStatus, OwnerType};

use super::{KeyValueStore, ORDERS_KEY, RepositoryError, StoredList, load_list};
use crate::identity::{Owner, trailing_fragment};
use crate::models::order::{NewOrder, Order, OrderPatch};

/// Repository for orders.
pub struct OrderRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Append a new order in `REQUESTED` status.
    ///
    /// The id is `ord-{unix millis}-{6 random digits}`, regenerated until it
    /// is unused, unreadable records included.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store cannot be read or written.
    pub fn add(&self, input: NewOrder) -> Result<Order, RepositoryError> {
        let mut orders: StoredList<Order> = StoredList::load(self.store, ORDERS_KEY)?;

        let mut order_id = generate_order_id();
        while orders.iter().any(|o| o.order_id == order_id)
            || orders.raw_field_matches("orderId", order_id.as_str())
        {
            order_id = generate_order_id();
        }

        let items = vec![input.item];
        let order = Order {
            order_id,
            owner_key: input.owner.owner_key,
            owner_type: input.owner.owner_type,
            customer_name: input.customer_name,
            address: input.address,
            phone: input.phone,
            delivery_date: input.delivery_date,
            total_price: items.iter().map(|item| item.total_item_price).sum(),
            items,
            status: OrderStatus::Requested,
            created_at: Utc::now(),
        };

        orders.push(order.clone());
        orders.save(self.store, ORDERS_KEY)?;
        Ok(order)
    }

    /// Merge a patch into an existing order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order has this id.
    /// Returns `RepositoryError::Store` if the store cannot be read or written.
    pub fn update(&self, order_id: &OrderId, patch: OrderPatch) -> Result<Order, RepositoryError> {
        let mut orders: StoredList<Order> = StoredList::load(self.store, ORDERS_KEY)?;
        let order = orders
            .iter_mut()
            .find(|o| o.order_id == *order_id)
            .ok_or(RepositoryError::NotFound)?;

        patch.apply_to(order);
        let updated = order.clone();

        orders.save(self.store, ORDERS_KEY)?;
        Ok(updated)
    }

    /// Get an order by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store cannot be read.
    pub fn get_by_id(&self, order_id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        let orders: Vec<Order> = load_list(self.store, ORDERS_KEY)?;
        Ok(orders.into_iter().find(|o| o.order_id == *order_id))
    }

    /// Orders of one owner, oldest first. Key and kind must both match.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store cannot be read.
    pub fn list_by_owner(&self, owner: &Owner) -> Result<Vec<Order>, RepositoryError> {
        let orders: Vec<Order> = load_list(self.store, ORDERS_KEY)?;
        Ok(orders.into_iter().filter(|o| o.is_owned_by(owner)).collect())
    }

    /// Guest orders matching a token.
    ///
    /// The trimmed token matches either the full owner key or its trailing
    /// `-`-separated fragment (the last phone digits). Member orders never
    /// match.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store cannot be read.
    pub fn list_by_guest_token(&self, token: &str) -> Result<Vec<Order>, RepositoryError> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(Vec::new());
        }

        let orders: Vec<Order> = load_list(self.store, ORDERS_KEY)?;
        Ok(orders
            .into_iter()
            .filter(|o| o.owner_type == OwnerType::Guest)
            .filter(|o| o.owner_key == token || trailing_fragment(&o.owner_key) == token)
            .collect())
    }

    /// Every order in the ledger, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store cannot be read.
    pub fn list_all(&self) -> Result<Vec<Order>, RepositoryError> {
        load_list(self.store, ORDERS_KEY)
    }
}

fn generate_order_id() -> OrderId {
    let millis = Utc::now().timestamp_millis();
    let suffix: u32 = rand::rng().random_range(0..1_000_000);
    OrderId::new(format!("ord-{millis}-{suffix:06}"))
}
