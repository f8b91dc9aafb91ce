//! Normalized catalog tables.
//!
//! The catalog is stored as five flat tables keyed by menu id, the way a
//! relational seed would ship them. [`super::MenuCatalog`] joins them into a
//! [`super::MenuDetail`] on demand.

use serde::{Deserialize, Serialize};

use mr_daebak_core::{MenuId, MenuStyle, Won};

/// Menu master row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuRow {
    pub id: MenuId,
    /// Localized (Korean) display name.
    pub name: String,
    /// English display name.
    pub eng: String,
    /// Image path relative to the static root.
    pub image: String,
    pub base_price: Won,
    pub description: String,
}

/// Default configuration of a menu. Exactly one per menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuOptionRow {
    pub menu_id: MenuId,
    pub default_bread: u32,
    pub default_wine: u32,
    pub default_style: MenuStyle,
}

/// Label and description of one serving style of a menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuStyleRow {
    pub menu_id: MenuId,
    pub style: MenuStyle,
    /// Button label (`SIMPLE`, `GRAND`, ...).
    pub label: String,
    pub description: String,
}

/// One course line of a (menu, style) group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCourseRow {
    pub menu_id: MenuId,
    pub style: MenuStyle,
    /// Position within the group, 1-based.
    pub order: u32,
    pub text: String,
}

/// Per-unit surcharges above the menu defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuExtraPriceRow {
    pub menu_id: MenuId,
    /// Price of one baguette beyond the default count.
    pub extra_bread_price: Won,
    /// Price of one bottle of wine/champagne beyond the default count.
    pub extra_wine_price: Won,
}

/// The five catalog tables, as loaded at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogTables {
    pub menus: Vec<MenuRow>,
    pub options: Vec<MenuOptionRow>,
    pub styles: Vec<MenuStyleRow>,
    pub courses: Vec<MenuCourseRow>,
    pub extra_prices: Vec<MenuExtraPriceRow>,
}
