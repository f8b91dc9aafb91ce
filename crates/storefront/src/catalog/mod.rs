//! Menu catalog resolution.
//!
//! The catalog is immutable after startup. [`MenuCatalog::menu_detail`] joins
//! the five normalized tables into the per-menu view the rest of the
//! storefront works with; the joined view is never stored.

pub mod schema;
pub mod seed;

use std::collections::BTreeMap;

use serde::Serialize;

use mr_daebak_core::{MenuStyle, Won};

pub use schema::{
    CatalogTables, MenuCourseRow, MenuExtraPriceRow, MenuOptionRow, MenuRow, MenuStyleRow,
};

/// Defaults used when a menu has no option row.
const FALLBACK_BREAD: u32 = 1;
const FALLBACK_WINE: u32 = 0;

/// Default configuration of a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuDefaults {
    pub bread: u32,
    pub wine: u32,
    pub style: MenuStyle,
}

/// Display information for one style of a menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleInfo {
    pub style: MenuStyle,
    pub label: String,
    pub description: String,
}

/// Per-unit surcharges of a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraPrices {
    pub extra_bread_price: Won,
    pub extra_wine_price: Won,
}

/// Joined view of one menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuDetail {
    pub menu: MenuRow,
    pub defaults: MenuDefaults,
    pub styles: Vec<StyleInfo>,
    /// Course lines per style. Always holds all three styles, possibly empty.
    pub courses_by_style: BTreeMap<MenuStyle, Vec<String>>,
    pub extra_prices: ExtraPrices,
}

impl MenuDetail {
    /// Course lines for a style, in serving order.
    #[must_use]
    pub fn courses(&self, style: MenuStyle) -> &[String] {
        self.courses_by_style
            .get(&style)
            .map_or(&[][..], Vec::as_slice)
    }
}

/// In-memory menu catalog.
#[derive(Debug, Clone)]
pub struct MenuCatalog {
    tables: CatalogTables,
}

impl MenuCatalog {
    /// Create a catalog over caller-supplied tables.
    #[must_use]
    pub const fn new(tables: CatalogTables) -> Self {
        Self { tables }
    }

    /// Create the catalog the storefront ships with.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(seed::tables())
    }

    /// All menus in declaration order.
    #[must_use]
    pub fn all_menus(&self) -> &[MenuRow] {
        &self.tables.menus
    }

    /// Resolve the joined detail view of a menu.
    ///
    /// Returns `None` for an id that is not in the catalog.
    #[must_use]
    pub fn menu_detail(&self, menu_id: &str) -> Option<MenuDetail> {
        let tables = &self.tables;
        let menu = tables.menus.iter().find(|m| m.id.as_str() == menu_id)?;

        let defaults = tables
            .options
            .iter()
            .find(|o| o.menu_id.as_str() == menu_id)
            .map_or(
                MenuDefaults {
                    bread: FALLBACK_BREAD,
                    wine: FALLBACK_WINE,
                    style: MenuStyle::Simple,
                },
                |o| MenuDefaults {
                    bread: o.default_bread,
                    wine: o.default_wine,
                    style: o.default_style,
                },
            );

        let styles = tables
            .styles
            .iter()
            .filter(|s| s.menu_id.as_str() == menu_id)
            .map(|s| StyleInfo {
                style: s.style,
                label: s.label.clone(),
                description: s.description.clone(),
            })
            .collect();

        let mut courses: Vec<&MenuCourseRow> = tables
            .courses
            .iter()
            .filter(|c| c.menu_id.as_str() == menu_id)
            .collect();
        // Stable: equal order indexes keep seed order.
        courses.sort_by_key(|c| c.order);

        let mut courses_by_style: BTreeMap<MenuStyle, Vec<String>> =
            MenuStyle::ALL.into_iter().map(|s| (s, Vec::new())).collect();
        for course in courses {
            courses_by_style
                .entry(course.style)
                .or_default()
                .push(course.text.clone());
        }

        let extra_prices = tables
            .extra_prices
            .iter()
            .find(|p| p.menu_id.as_str() == menu_id)
            .map_or(
                ExtraPrices {
                    extra_bread_price: Won::ZERO,
                    extra_wine_price: Won::ZERO,
                },
                |p| ExtraPrices {
                    extra_bread_price: p.extra_bread_price,
                    extra_wine_price: p.extra_wine_price,
                },
            );

        Some(MenuDetail {
            menu: menu.clone(),
            defaults,
            styles,
            courses_by_style,
            extra_prices,
        })
    }
}

impl Default for MenuCatalog {
    fn default() -> Self {
        Self::seeded()
    }
}
