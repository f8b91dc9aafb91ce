//! The order draft: a dinner configuration in progress.
//!
//! One draft lives in each session. Patches merge into it field by field,
//! checkout consumes it and resets it to [`OrderDraft::default`].

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use mr_daebak_core::{MenuId, MenuStyle};

use crate::catalog::MenuDetail;

/// Format of a delivery date: `YYYY-MM-DD HH:mm`.
pub const DELIVERY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A draft patch that cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("delivery date must look like YYYY-MM-DD HH:mm, got {0:?}")]
    MalformedDeliveryDate(String),

    #[error("deliveries run hourly from {first:02}:00 to {last:02}:00")]
    OutsideDeliverySlots { first: u32, last: u32 },
}

/// Bounds enforced whenever a draft is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftLimits {
    pub max_bread: u32,
    pub max_wine: u32,
    /// First delivery hour (inclusive).
    pub first_slot_hour: u32,
    /// Last delivery hour (inclusive).
    pub last_slot_hour: u32,
}

impl Default for DraftLimits {
    fn default() -> Self {
        Self {
            max_bread: 20,
            max_wine: 20,
            first_slot_hour: 18,
            last_slot_hour: 23,
        }
    }
}

impl DraftLimits {
    /// Check a delivery date against the format and the hourly slots.
    ///
    /// # Errors
    ///
    /// Returns `DraftError` if the date does not parse or is not on a slot.
    pub fn check_delivery_date(&self, value: &str) -> Result<(), DraftError> {
        let at = NaiveDateTime::parse_from_str(value, DELIVERY_DATE_FORMAT)
            .map_err(|_| DraftError::MalformedDeliveryDate(value.to_owned()))?;
        let on_slot = at.minute() == 0
            && (self.first_slot_hour..=self.last_slot_hour).contains(&at.hour());
        if on_slot {
            Ok(())
        } else {
            Err(DraftError::OutsideDeliverySlots {
                first: self.first_slot_hour,
                last: self.last_slot_hour,
            })
        }
    }

    /// Every delivery slot of a day, formatted `HH:mm`.
    #[must_use]
    pub fn slots(&self) -> Vec<String> {
        (self.first_slot_hour..=self.last_slot_hour)
            .map(|h| format!("{h:02}:00"))
            .collect()
    }
}

/// The configuration in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub dinner_type: Option<MenuId>,
    pub style: MenuStyle,
    pub baguette_count: u32,
    pub champagne_count: u32,
    pub delivery_date: String,
    pub customer_name: String,
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self {
            dinner_type: None,
            style: MenuStyle::Simple,
            baguette_count: 1,
            champagne_count: 1,
            delivery_date: String::new(),
            customer_name: String::new(),
        }
    }
}

/// Partial update of a draft. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftPatch {
    pub dinner_type: Option<MenuId>,
    pub style: Option<MenuStyle>,
    pub baguette_count: Option<u32>,
    pub champagne_count: Option<u32>,
    pub delivery_date: Option<String>,
    pub customer_name: Option<String>,
}

impl OrderDraft {
    /// Merge a patch, clamping counts to `limits`.
    ///
    /// The patch is validated before anything is written, so a rejected patch
    /// leaves the draft untouched. An empty delivery date clears the field.
    ///
    /// # Errors
    ///
    /// Returns `DraftError` if the delivery date is malformed or off-slot.
    pub fn apply(&mut self, patch: DraftPatch, limits: &DraftLimits) -> Result<(), DraftError> {
        let delivery_date = patch.delivery_date.map(|d| d.trim().to_owned());
        if let Some(date) = delivery_date.as_deref()
            && !date.is_empty()
        {
            limits.check_delivery_date(date)?;
        }

        if let Some(id) = patch.dinner_type {
            self.dinner_type = Some(id);
        }
        if let Some(style) = patch.style {
            self.style = style;
        }
        if let Some(n) = patch.baguette_count {
            self.baguette_count = n.min(limits.max_bread);
        }
        if let Some(n) = patch.champagne_count {
            self.champagne_count = n.min(limits.max_wine);
        }
        if let Some(date) = delivery_date {
            self.delivery_date = date;
        }
        if let Some(name) = patch.customer_name {
            self.customer_name = name.trim().to_owned();
        }
        Ok(())
    }

    /// Choose a menu and start from its defaults.
    pub fn select_menu(&mut self, detail: &MenuDetail) {
        self.dinner_type = Some(detail.menu.id.clone());
        self.style = detail.defaults.style;
        self.baguette_count = detail.defaults.bread;
        self.champagne_count = detail.defaults.wine;
    }

    /// Back to the initial values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::MenuCatalog;

    #[test]
    fn test_initial_values() {
        let draft = OrderDraft::default();
        assert!(draft.dinner_type.is_none());
        assert_eq!(draft.style, MenuStyle::Simple);
        assert_eq!(draft.baguette_count, 1);
        assert_eq!(draft.champagne_count, 1);
        assert!(draft.delivery_date.is_empty());
        assert!(draft.customer_name.is_empty());
    }

    #[test]
    fn test_patch_without_style_keeps_style() {
        let mut draft = OrderDraft {
            style: MenuStyle::Deluxe,
            ..OrderDraft::default()
        };
        draft
            .apply(
                DraftPatch {
                    baguette_count: Some(4),
                    ..DraftPatch::default()
                },
                &DraftLimits::default(),
            )
            .unwrap();
        assert_eq!(draft.style, MenuStyle::Deluxe);
        assert_eq!(draft.baguette_count, 4);
        assert_eq!(draft.champagne_count, 1);
    }

    #[test]
    fn test_counts_are_clamped() {
        let mut draft = OrderDraft::default();
        let limits = DraftLimits {
            max_bread: 5,
            max_wine: 2,
            ..DraftLimits::default()
        };
        draft
            .apply(
                DraftPatch {
                    baguette_count: Some(99),
                    champagne_count: Some(3),
                    ..DraftPatch::default()
                },
                &limits,
            )
            .unwrap();
        assert_eq!(draft.baguette_count, 5);
        assert_eq!(draft.champagne_count, 2);
    }

    #[test]
    fn test_delivery_date_validation() {
        let limits = DraftLimits::default();
        assert!(limits.check_delivery_date("2026-02-14 18:00").is_ok());
        assert!(limits.check_delivery_date("2026-02-14 23:00").is_ok());
        assert_eq!(
            limits.check_delivery_date("2026-02-14 17:00"),
            Err(DraftError::OutsideDeliverySlots {
                first: 18,
                last: 23
            })
        );
        assert!(matches!(
            limits.check_delivery_date("2026-02-14 19:30"),
            Err(DraftError::OutsideDeliverySlots { .. })
        ));
        assert!(matches!(
            limits.check_delivery_date("tomorrow evening"),
            Err(DraftError::MalformedDeliveryDate(_))
        ));
    }

    #[test]
    fn test_rejected_patch_changes_nothing() {
        let mut draft = OrderDraft::default();
        let before = draft.clone();
        let result = draft.apply(
            DraftPatch {
                baguette_count: Some(7),
                delivery_date: Some("2026-02-14 09:00".to_owned()),
                ..DraftPatch::default()
            },
            &DraftLimits::default(),
        );
        assert!(result.is_err());
        assert_eq!(draft, before);
    }

    #[test]
    fn test_select_menu_uses_defaults() {
        let detail = MenuCatalog::seeded().menu_detail("champagne").unwrap();
        let mut draft = OrderDraft::default();
        draft.select_menu(&detail);
        assert_eq!(draft.dinner_type, Some(MenuId::new("champagne")));
        assert_eq!(draft.style, MenuStyle::Grand);
        assert_eq!(draft.baguette_count, 2);
        assert_eq!(draft.champagne_count, 1);
    }

    #[test]
    fn test_reset() {
        let mut draft = OrderDraft {
            dinner_type: Some(MenuId::new("french")),
            baguette_count: 9,
            delivery_date: "2026-02-14 19:00".to_owned(),
            ..OrderDraft::default()
        };
        draft.reset();
        assert_eq!(draft, OrderDraft::default());
    }

    #[test]
    fn test_slots() {
        let slots = DraftLimits::default().slots();
        assert_eq!(slots.first().map(String::as_str), Some("18:00"));
        assert_eq!(slots.len(), 6);
    }
}
