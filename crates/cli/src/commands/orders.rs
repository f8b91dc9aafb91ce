//! Order ledger commands.
//!
//! # Usage
//!
//! ```bash
//! daebak guest-token 010-1234-5678
//! daebak orders list
//! daebak orders list --owner kim@example.com
//! daebak orders list --owner guest-1a2b3c-12345678 --guest
//! daebak orders lookup 12345678
//! daebak orders show ord-1718000000000-004211
//! daebak orders status ord-1718000000000-004211 CONFIRMED
//! ```
//!
//! # Environment Variables
//!
//! - `DAEBAK_DATA_DIR` - Directory holding the JSON ledger

use serde::Serialize;

use mr_daebak_core::{OrderId, OrderStatus, OwnerType, Phone};
use mr_daebak_storefront::db::{KeyValueStore, OrderRepository};
use mr_daebak_storefront::identity::{GuestToken, Owner};
use mr_daebak_storefront::models::{DraftLimits, Order};
use mr_daebak_storefront::services::OrderService;

use super::{CliError, open_store, print_json};

/// A guest token and the code a customer types to look it up.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestTokenView {
    pub token: GuestToken,
    pub lookup_code: String,
}

/// Print the guest token a phone number maps to.
///
/// # Errors
///
/// Returns `CliError::InvalidPhone` if the input holds no digits.
pub fn guest_token(phone: &str) -> Result<(), CliError> {
    print_json(&token_for(phone)?)
}

fn token_for(phone: &str) -> Result<GuestTokenView, CliError> {
    let token = GuestToken::from_phone(&Phone::parse(phone)?);
    Ok(GuestTokenView {
        lookup_code: token.lookup_code().to_owned(),
        token,
    })
}

/// Print orders, all of them or one owner's.
///
/// # Errors
///
/// Returns an error if the ledger cannot be opened or read.
pub fn list(owner: Option<String>, guest: bool) -> Result<(), CliError> {
    let store = open_store()?;
    print_json(&list_in(&store, owner, guest)?)
}

fn list_in(
    store: &dyn KeyValueStore,
    owner: Option<String>,
    guest: bool,
) -> Result<Vec<Order>, CliError> {
    let repo = OrderRepository::new(store);
    let orders = match owner {
        Some(owner_key) => repo.list_by_owner(&Owner {
            owner_key,
            owner_type: if guest {
                OwnerType::Guest
            } else {
                OwnerType::Member
            },
        })?,
        None => repo.list_all()?,
    };
    tracing::info!(count = orders.len(), "Listed orders");
    Ok(orders)
}

/// Print guest orders matching a token or its trailing digits.
///
/// # Errors
///
/// Returns an error if the ledger cannot be opened or read.
pub fn lookup(token: &str) -> Result<(), CliError> {
    let store = open_store()?;
    let limits = DraftLimits::default();
    print_json(&OrderService::new(&store, &limits).lookup_guest(token)?)
}

/// Print one order regardless of owner.
///
/// # Errors
///
/// Returns `CliError::OrderNotFound` for an unknown id.
pub fn show(order_id: &str) -> Result<(), CliError> {
    let store = open_store()?;
    print_json(&find(&store, order_id)?)
}

fn find(store: &dyn KeyValueStore, order_id: &str) -> Result<Order, CliError> {
    OrderRepository::new(store)
        .get_by_id(&OrderId::new(order_id))?
        .ok_or_else(|| CliError::OrderNotFound(order_id.to_owned()))
}

/// Move an order along the status machine and print the result.
///
/// # Errors
///
/// Returns `CliError::Order` for an unknown id or a transition the machine
/// does not allow.
pub fn status(order_id: &str, next: OrderStatus) -> Result<(), CliError> {
    let store = open_store()?;
    print_json(&transition_in(&store, order_id, next)?)
}

fn transition_in(
    store: &dyn KeyValueStore,
    order_id: &str,
    next: OrderStatus,
) -> Result<Order, CliError> {
    let limits = DraftLimits::default();
    let order = OrderService::new(store, &limits).transition(&OrderId::new(order_id), next)?;
    tracing::info!(order_id, status = %order.status, "Order status changed");
    Ok(order)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mr_daebak_core::{MenuId, MenuStyle, Won};
    use mr_daebak_storefront::db::MemoryStore;
    use mr_daebak_storefront::models::{NewOrder, OrderItem};
    use mr_daebak_storefront::services::OrderError;

    use super::*;

    fn place(store: &MemoryStore, owner: Owner) -> Order {
        OrderRepository::new(store)
            .add(NewOrder {
                owner,
                customer_name: "Kim".to_owned(),
                address: "Seoul".to_owned(),
                phone: "010-1234-5678".to_owned(),
                delivery_date: "2026-12-24 19:00".to_owned(),
                item: OrderItem {
                    dinner_id: MenuId::new("valentine"),
                    style: MenuStyle::Simple,
                    baguette_count: 1,
                    champagne_count: 1,
                    base_price: Won::new(79_000),
                    extra_price: Won::ZERO,
                    total_item_price: Won::new(79_000),
                },
            })
            .unwrap()
    }

    fn member(email: &str) -> Owner {
        Owner {
            owner_key: email.to_owned(),
            owner_type: OwnerType::Member,
        }
    }

    #[test]
    fn test_guest_token_view() {
        let view = token_for("010-1234-5678").unwrap();
        assert_eq!(view.lookup_code, "12345678");
        assert!(view.token.as_str().starts_with("guest-"));
        assert!(matches!(token_for("none"), Err(CliError::InvalidPhone(_))));
    }

    #[test]
    fn test_list_filters_by_owner_kind() {
        let store = MemoryStore::new();
        place(&store, member("a@x.com"));
        place(&store, member("b@x.com"));
        place(
            &store,
            Owner {
                owner_key: "a@x.com".to_owned(),
                owner_type: OwnerType::Guest,
            },
        );

        assert_eq!(list_in(&store, None, false).unwrap().len(), 3);
        assert_eq!(
            list_in(&store, Some("a@x.com".to_owned()), false)
                .unwrap()
                .len(),
            1
        );
        assert_eq!(
            list_in(&store, Some("a@x.com".to_owned()), true)
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_status_walks_machine() {
        let store = MemoryStore::new();
        let order = place(&store, member("a@x.com"));
        let id = order.order_id.as_str();

        let confirmed = transition_in(&store, id, OrderStatus::Confirmed).unwrap();
        assert_eq!(confirmed.status, OrderStatus::Confirmed);

        let err = transition_in(&store, id, OrderStatus::Delivered).unwrap_err();
        assert!(matches!(
            err,
            CliError::Order(OrderError::InvalidTransition { .. })
        ));
        assert_eq!(find(&store, id).unwrap().status, OrderStatus::Confirmed);
    }

    #[test]
    fn test_show_unknown() {
        let store = MemoryStore::new();
        assert!(matches!(
            find(&store, "ord-0-000000"),
            Err(CliError::OrderNotFound(_))
        ));
    }
}
