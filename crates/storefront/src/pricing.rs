//! Order pricing.
//!
//! A dinner is priced from its base price plus per-unit surcharges for bread
//! and wine above the menu's default allotment. Serving style only selects
//! the course list and never changes the price.

use serde::Serialize;
use thiserror::Error;

use mr_daebak_core::{MenuStyle, Won};

use crate::catalog::MenuDetail;
use crate::models::DraftLimits;

/// Price breakdown of one configured dinner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub base_price: Won,
    pub extra_bread_count: u32,
    pub extra_wine_count: u32,
    pub extra_bread_price: Won,
    pub extra_wine_price: Won,
    /// `extra_bread_price + extra_wine_price`.
    pub extra_price: Won,
    pub total_price: Won,
}

/// Price a dinner configuration against its menu.
///
/// Counts at or below the defaults contribute nothing; extras are never
/// negative.
#[must_use]
pub fn quote(detail: &MenuDetail, bread: u32, wine: u32) -> PriceQuote {
    let base_price = detail.menu.base_price;
    let extra_bread_count = bread.saturating_sub(detail.defaults.bread);
    let extra_wine_count = wine.saturating_sub(detail.defaults.wine);

    let extra_bread_price = detail
        .extra_prices
        .extra_bread_price
        .times(extra_bread_count);
    let extra_wine_price = detail.extra_prices.extra_wine_price.times(extra_wine_count);
    let extra_price = extra_bread_price + extra_wine_price;

    PriceQuote {
        base_price,
        extra_bread_count,
        extra_wine_count,
        extra_bread_price,
        extra_wine_price,
        extra_price,
        total_price: base_price + extra_price,
    }
}

/// A priced configuration with the courses it serves.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuQuote {
    pub menu_id: String,
    pub style: MenuStyle,
    pub bread: u32,
    pub wine: u32,
    pub courses: Vec<String>,
    #[serde(flatten)]
    pub quote: PriceQuote,
}

/// Requested counts above the per-order maxima.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("at most {max_bread} baguettes and {max_wine} bottles per order")]
pub struct OverLimit {
    pub max_bread: u32,
    pub max_wine: u32,
}

/// Price a menu with optional overrides.
///
/// Absent counts and style fall back to the menu defaults. Counts are
/// rejected, not clamped, above the limits.
///
/// # Errors
///
/// Returns `OverLimit` if bread or wine exceeds its maximum.
pub fn quote_menu(
    detail: &MenuDetail,
    limits: &DraftLimits,
    bread: Option<u32>,
    wine: Option<u32>,
    style: Option<MenuStyle>,
) -> Result<MenuQuote, OverLimit> {
    let bread = bread.unwrap_or(detail.defaults.bread);
    let wine = wine.unwrap_or(detail.defaults.wine);
    let style = style.unwrap_or(detail.defaults.style);

    if bread > limits.max_bread || wine > limits.max_wine {
        return Err(OverLimit {
            max_bread: limits.max_bread,
            max_wine: limits.max_wine,
        });
    }

    Ok(MenuQuote {
        menu_id: detail.menu.id.as_str().to_owned(),
        style,
        bread,
        wine,
        courses: detail.courses(style).to_vec(),
        quote: quote(detail, bread, wine),
    })
}
