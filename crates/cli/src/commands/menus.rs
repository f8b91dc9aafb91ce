//! Catalog commands.
//!
//! # Usage
//!
//! ```bash
//! daebak menus list
//! daebak menus show valentine
//! daebak quote valentine --bread 3 --wine 1 --style grand
//! ```

use mr_daebak_core::MenuStyle;
use mr_daebak_storefront::catalog::{MenuCatalog, MenuDetail};
use mr_daebak_storefront::models::DraftLimits;
use mr_daebak_storefront::pricing::{self, MenuQuote};

use super::{CliError, print_json};

/// Print every menu in catalog order.
///
/// # Errors
///
/// Returns `CliError::Json` if output fails.
pub fn list() -> Result<(), CliError> {
    print_json(&MenuCatalog::seeded().all_menus())
}

/// Print the joined detail of one menu.
///
/// # Errors
///
/// Returns `CliError::UnknownMenu` for an id the catalog does not have.
pub fn show(menu_id: &str) -> Result<(), CliError> {
    print_json(&detail(&MenuCatalog::seeded(), menu_id)?)
}

/// Price a configuration of one menu.
///
/// # Errors
///
/// Returns `CliError::UnknownMenu` or `CliError::OutOfRange`.
pub fn quote(
    menu_id: &str,
    bread: Option<u32>,
    wine: Option<u32>,
    style: Option<MenuStyle>,
) -> Result<(), CliError> {
    print_json(&build_quote(
        &MenuCatalog::seeded(),
        &DraftLimits::default(),
        menu_id,
        bread,
        wine,
        style,
    )?)
}

fn build_quote(
    catalog: &MenuCatalog,
    limits: &DraftLimits,
    menu_id: &str,
    bread: Option<u32>,
    wine: Option<u32>,
    style: Option<MenuStyle>,
) -> Result<MenuQuote, CliError> {
    let detail = detail(catalog, menu_id)?;
    Ok(pricing::quote_menu(&detail, limits, bread, wine, style)?)
}

fn detail(catalog: &MenuCatalog, menu_id: &str) -> Result<MenuDetail, CliError> {
    catalog
        .menu_detail(menu_id)
        .ok_or_else(|| CliError::UnknownMenu(menu_id.to_owned()))
}
