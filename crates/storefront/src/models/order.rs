//! Order domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mr_daebak_core::{MenuId, MenuStyle, OrderId, OrderStatus, OwnerType, Won};

use crate::identity::Owner;

/// The single dinner line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub dinner_id: MenuId,
    pub style: MenuStyle,
    pub baguette_count: u32,
    pub champagne_count: u32,
    pub base_price: Won,
    pub extra_price: Won,
    pub total_item_price: Won,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    /// Member email or guest token.
    pub owner_key: String,
    pub owner_type: OwnerType,
    pub customer_name: String,
    pub address: String,
    pub phone: String,
    /// `YYYY-MM-DD HH:mm`, as chosen by the customer.
    pub delivery_date: String,
    pub items: Vec<OrderItem>,
    pub total_price: Won,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Whether the order belongs to `owner` (both key and kind must match).
    #[must_use]
    pub fn is_owned_by(&self, owner: &Owner) -> bool {
        self.owner_type == owner.owner_type && self.owner_key == owner.owner_key
    }
}

/// Everything the ledger needs to create an order.
///
/// Id, creation time and the initial `REQUESTED` status are assigned by the
/// ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub owner: Owner,
    pub customer_name: String,
    pub address: String,
    pub phone: String,
    pub delivery_date: String,
    pub item: OrderItem,
}

/// Partial update applied by the ledger. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch {
    pub customer_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub delivery_date: Option<String>,
    pub status: Option<OrderStatus>,
}

impl OrderPatch {
    /// Merge the patch into an order.
    pub fn apply_to(self, order: &mut Order) {
        if let Some(v) = self.customer_name {
            order.customer_name = v;
        }
        if let Some(v) = self.address {
            order.address = v;
        }
        if let Some(v) = self.phone {
            order.phone = v;
        }
        if let Some(v) = self.delivery_date {
            order.delivery_date = v;
        }
        if let Some(v) = self.status {
            order.status = v;
        }
    }
}

/// Fields a customer may rewrite while the order is `REQUESTED`.
///
/// Status is deliberately absent: a customer edit can never move an order's
/// status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderEdit {
    pub customer_name: String,
    pub address: String,
    pub phone: String,
    pub delivery_date: String,
}

impl OrderEdit {
    /// Trim every field.
    #[must_use]
    pub fn trimmed(self) -> Self {
        Self {
            customer_name: self.customer_name.trim().to_owned(),
            address: self.address.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            delivery_date: self.delivery_date.trim().to_owned(),
        }
    }

    /// Name of the first empty field, if any.
    #[must_use]
    pub fn first_missing(&self) -> Option<&'static str> {
        [
            ("customerName", &self.customer_name),
            ("address", &self.address),
            ("phone", &self.phone),
            ("deliveryDate", &self.delivery_date),
        ]
        .into_iter()
        .find_map(|(name, value)| value.is_empty().then_some(name))
    }
}

impl From<OrderEdit> for OrderPatch {
    fn from(edit: OrderEdit) -> Self {
        Self {
            customer_name: Some(edit.customer_name),
            address: Some(edit.address),
            phone: Some(edit.phone),
            delivery_date: Some(edit.delivery_date),
            status: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_order() -> Order {
        Order {
            order_id: OrderId::new("ord-1-000001"),
            owner_key: "a@x.com".to_owned(),
            owner_type: OwnerType::Member,
            customer_name: "Kim".to_owned(),
            address: "Seoul".to_owned(),
            phone: "010-1234-5678".to_owned(),
            delivery_date: "2026-02-14 19:00".to_owned(),
            items: vec![OrderItem {
                dinner_id: MenuId::new("valentine"),
                style: MenuStyle::Simple,
                baguette_count: 3,
                champagne_count: 1,
                base_price: Won::new(79_000),
                extra_price: Won::new(6_000),
                total_item_price: Won::new(85_000),
            }],
            total_price: Won::new(85_000),
            status: OrderStatus::Requested,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let json = serde_json::to_value(sample_order()).unwrap();
        assert_eq!(json["orderId"], "ord-1-000001");
        assert_eq!(json["ownerType"], "member");
        assert_eq!(json["status"], "REQUESTED");
        assert_eq!(json["totalPrice"], 85_000);
        assert_eq!(json["items"][0]["dinnerId"], "valentine");
        assert_eq!(json["items"][0]["totalItemPrice"], 85_000);
    }

    #[test]
    fn test_ownership_needs_key_and_type() {
        let order = sample_order();
        let member = Owner {
            owner_key: "a@x.com".to_owned(),
            owner_type: OwnerType::Member,
        };
        let guest_same_key = Owner {
            owner_key: "a@x.com".to_owned(),
            owner_type: OwnerType::Guest,
        };
        assert!(order.is_owned_by(&member));
        assert!(!order.is_owned_by(&guest_same_key));
    }

    #[test]
    fn test_patch_merges_only_present_fields() {
        let mut order = sample_order();
        OrderPatch {
            address: Some("Incheon".to_owned()),
            ..OrderPatch::default()
        }
        .apply_to(&mut order);
        assert_eq!(order.address, "Incheon");
        assert_eq!(order.customer_name, "Kim");
        assert_eq!(order.status, OrderStatus::Requested);
    }

    #[test]
    fn test_edit_never_carries_status() {
        let patch = OrderPatch::from(OrderEdit {
            customer_name: "Park".to_owned(),
            address: "Daegu".to_owned(),
            phone: "010".to_owned(),
            delivery_date: "2026-02-14 20:00".to_owned(),
        });
        assert!(patch.status.is_none());
    }

    #[test]
    fn test_edit_first_missing() {
        let edit = OrderEdit {
            customer_name: " Park ".to_owned(),
            address: "  ".to_owned(),
            phone: "010".to_owned(),
            delivery_date: String::new(),
        }
        .trimmed();
        assert_eq!(edit.customer_name, "Park");
        assert_eq!(edit.first_missing(), Some("address"));
    }
}
