//! Built-in dinner catalog.

use mr_daebak_core::{MenuId, MenuStyle, Won};

use super::schema::{
    CatalogTables, MenuCourseRow, MenuExtraPriceRow, MenuOptionRow, MenuRow, MenuStyleRow,
};

use MenuStyle::{Deluxe, Grand, Simple};

const EXTRA_BREAD_PRICE: u64 = 3_000;
const EXTRA_WINE_PRICE: u64 = 35_000;

/// (id, name, eng, image, base price, description)
const MENUS: &[(&str, &str, &str, &str, u64, &str)] = &[
    (
        "valentine",
        "발렌타인 디너",
        "Valentine Dinner",
        "/menu/valentine.jpg",
        79_000,
        "A premium dinner set for a romantic Valentine's Day evening.",
    ),
    (
        "french",
        "프렌치 디너",
        "French Dinner",
        "/menu/french.webp",
        89_000,
        "A classic French dinner with a rich steak and a bottle of wine.",
    ),
    (
        "english",
        "잉글리시 디너",
        "English Dinner",
        "/menu/english.jpg",
        85_000,
        "A traditional English dinner set built around meat and bread.",
    ),
    (
        "champagne",
        "샴페인 축제 디너",
        "Champagne Festival Dinner",
        "/menu/champagne.png",
        129_000,
        "Our finest champagne course for special events and anniversaries.",
    ),
];

/// (menu id, default bread, default wine, default style)
const OPTIONS: &[(&str, u32, u32, MenuStyle)] = &[
    ("valentine", 1, 1, Simple),
    ("french", 2, 1, Simple),
    ("english", 2, 0, Simple),
    ("champagne", 2, 1, Grand),
];

/// (menu id, style, description); labels are the uppercase style name.
const STYLES: &[(&str, MenuStyle, &str)] = &[
    ("valentine", Simple, "The standard dinner set"),
    ("valentine", Grand, "Table decoration and an upgraded wine"),
    ("valentine", Deluxe, "Full table setting with a premium wine"),
    ("french", Simple, "The standard French dinner set"),
    ("french", Grand, "Premium soup added and the wine upgraded one tier"),
    ("french", Deluxe, "Every course upgraded, with an extra dessert"),
    ("english", Simple, "The classic English set"),
    ("english", Grand, "Upgraded dessert and drinks"),
    ("english", Deluxe, "Full-course upgrade with a premium tea set"),
    ("champagne", Simple, "The standard set with one bottle of champagne"),
    ("champagne", Grand, "Champagne and an upgraded steak"),
    ("champagne", Deluxe, "A VIP dinner with every item at its finest"),
];

/// (menu id, style, courses in serving order)
const COURSES: &[(&str, MenuStyle, &[&str])] = &[
    (
        "valentine",
        Simple,
        &[
            "Appetizer: signature salad",
            "Main: steak & baguette",
            "Dessert: mini cake",
        ],
    ),
    (
        "valentine",
        Grand,
        &[
            "Welcome drink: sparkling wine",
            "Appetizer: salmon carpaccio",
            "Main: steak & truffle mashed potatoes",
            "Dessert: heart-shaped cake",
        ],
    ),
    (
        "valentine",
        Deluxe,
        &[
            "A glass of champagne with finger food",
            "Appetizer: foie gras & salad",
            "Main: premium steak full course",
            "Dessert: chef's special dessert plate",
        ],
    ),
    (
        "french",
        Simple,
        &[
            "Appetizer: French onion soup",
            "Main: French steak & baguette",
            "Dessert: crème brûlée",
        ],
    ),
    (
        "french",
        Grand,
        &[
            "Welcome wine service",
            "Appetizer: French onion soup with a cheese plate",
            "Main: premium steak & baguette",
            "Dessert: macaron set",
        ],
    ),
    (
        "french",
        Deluxe,
        &[
            "Champagne or a premium wine of your choice",
            "Appetizer: canapés & soup",
            "Main: full-course French dinner",
            "Dessert: platter of two desserts",
        ],
    ),
    (
        "english",
        Simple,
        &[
            "Main: English-style steak",
            "Side: roast potatoes",
            "Dessert: black tea dessert",
        ],
    ),
    (
        "english",
        Grand,
        &[
            "Appetizer: tomato soup",
            "Main: English-style steak & roast potatoes",
            "Dessert: scones & tea set",
        ],
    ),
    (
        "english",
        Deluxe,
        &[
            "Appetizer: cheese platter & soup",
            "Main: premium English full course",
            "Dessert: dessert & tea set",
        ],
    ),
    (
        "champagne",
        Simple,
        &[
            "One bottle of champagne",
            "Main: steak & baguette",
            "Dessert: truffle dessert",
        ],
    ),
    (
        "champagne",
        Grand,
        &[
            "One bottle of champagne (upgraded)",
            "Appetizer: signature starter",
            "Main: premium steak & baguette",
            "Dessert: truffle dessert plate",
        ],
    ),
    (
        "champagne",
        Deluxe,
        &[
            "Two bottles of champagne or an equivalent wine",
            "Appetizer: two chef's specials",
            "Main: top-grade steak full course",
            "Dessert: two premium desserts",
        ],
    ),
];

/// Build the catalog tables the storefront ships with.
#[must_use]
pub fn tables() -> CatalogTables {
    let menus = MENUS
        .iter()
        .map(|&(id, name, eng, image, price, description)| MenuRow {
            id: MenuId::new(id),
            name: name.to_owned(),
            eng: eng.to_owned(),
            image: image.to_owned(),
            base_price: Won::new(price),
            description: description.to_owned(),
        })
        .collect();

    let options = OPTIONS
        .iter()
        .map(|&(id, bread, wine, style)| MenuOptionRow {
            menu_id: MenuId::new(id),
            default_bread: bread,
            default_wine: wine,
            default_style: style,
        })
        .collect();

    let styles = STYLES
        .iter()
        .map(|&(id, style, description)| MenuStyleRow {
            menu_id: MenuId::new(id),
            style,
            label: style.as_str().to_ascii_uppercase(),
            description: description.to_owned(),
        })
        .collect();

    let courses = COURSES
        .iter()
        .flat_map(|&(id, style, lines)| {
            (1_u32..).zip(lines.iter()).map(move |(order, text)| MenuCourseRow {
                menu_id: MenuId::new(id),
                style,
                order,
                text: (*text).to_owned(),
            })
        })
        .collect();

    let extra_prices = MENUS
        .iter()
        .map(|&(id, ..)| MenuExtraPriceRow {
            menu_id: MenuId::new(id),
            extra_bread_price: Won::new(EXTRA_BREAD_PRICE),
            extra_wine_price: Won::new(EXTRA_WINE_PRICE),
        })
        .collect();

    CatalogTables {
        menus,
        options,
        styles,
        courses,
        extra_prices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_menu_has_one_option_and_extra_price_row() {
        let tables = tables();
        for menu in &tables.menus {
            let options = tables.options.iter().filter(|o| o.menu_id == menu.id);
            assert_eq!(options.count(), 1, "option rows for {}", menu.id);
            let extras = tables.extra_prices.iter().filter(|p| p.menu_id == menu.id);
            assert_eq!(extras.count(), 1, "extra price rows for {}", menu.id);
        }
    }

    #[test]
    fn test_every_menu_has_all_three_styles() {
        let tables = tables();
        for menu in &tables.menus {
            for style in MenuStyle::ALL {
                assert!(
                    tables
                        .styles
                        .iter()
                        .any(|s| s.menu_id == menu.id && s.style == style),
                    "{} is missing {style}",
                    menu.id
                );
            }
        }
    }

    #[test]
    fn test_course_orders_start_at_one() {
        let tables = tables();
        let first = tables.courses.first().map(|c| c.order);
        assert_eq!(first, Some(1));
    }
}
