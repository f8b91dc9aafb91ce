//! Closed enumerations: serving style, order status and owner kind.

use serde::{Deserialize, Serialize};

/// Serving style of a dinner.
///
/// Selects which course list is shown for a menu. Style never changes price.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum MenuStyle {
    /// Plain service; the default style.
    #[default]
    Simple,
    /// Grand service.
    Grand,
    /// Deluxe service, the most elaborate.
    Deluxe,
}

impl MenuStyle {
    /// All styles in display order.
    pub const ALL: [Self; 3] = [Self::Simple, Self::Grand, Self::Deluxe];

    /// Lowercase wire name (`simple`, `grand`, `deluxe`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Grand => "grand",
            Self::Deluxe => "deluxe",
        }
    }
}

impl std::fmt::Display for MenuStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MenuStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "grand" => Ok(Self::Grand),
            "deluxe" => Ok(Self::Deluxe),
            _ => Err(format!("invalid menu style: {s}")),
        }
    }
}

/// Order lifecycle status.
///
/// ```text
/// REQUESTED -> CONFIRMED -> COOKING -> DELIVERED
/// REQUESTED -> CANCELLED
/// ```
///
/// Only `Requested` orders can be edited by the customer. Every transition
/// out of `Requested` is made by the back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Placed by the customer; still editable.
    #[default]
    Requested,
    /// Accepted by staff.
    Confirmed,
    /// In the kitchen.
    Cooking,
    /// Handed to the customer.
    Delivered,
    /// Withdrawn before confirmation.
    Cancelled,
}

impl OrderStatus {
    /// Whether the customer may still edit contact and delivery fields.
    #[must_use]
    pub const fn is_customer_editable(self) -> bool {
        matches!(self, Self::Requested)
    }

    /// Whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Whether `self -> next` is an edge of the status machine.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Requested, Self::Confirmed | Self::Cancelled)
                | (Self::Confirmed, Self::Cooking)
                | (Self::Cooking, Self::Delivered)
        )
    }

    /// Human-readable label for customer-facing messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Requested => "order requested",
            Self::Confirmed => "order confirmed",
            Self::Cooking => "cooking",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Wire name (`REQUESTED`, `CONFIRMED`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "REQUESTED",
            Self::Confirmed => "CONFIRMED",
            Self::Cooking => "COOKING",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "REQUESTED" => Ok(Self::Requested),
            "CONFIRMED" => Ok(Self::Confirmed),
            "COOKING" => Ok(Self::Cooking),
            "DELIVERED" => Ok(Self::Delivered),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Which kind of identity owns an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnerType {
    /// Registered member; the owner key is the email.
    Member,
    /// Guest; the owner key is the phone-derived guest token.
    Guest,
}

impl std::fmt::Display for OwnerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Member => write!(f, "member"),
            Self::Guest => write!(f, "guest"),
        }
    }
}
