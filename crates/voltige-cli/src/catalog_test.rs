use chrono::Utc;
use rust_decimal::Decimal;

use voltige_core::{CatalogSource, SortOrder};
use voltige_storefront::fallback_catalog;

use super::{build_browser, truncate_title, CatalogArgs};

fn base_args() -> CatalogArgs {
    CatalogArgs {
        query: None,
        tag: Vec::new(),
        category: Vec::new(),
        min_price: None,
        max_price: None,
        in_stock: false,
        sort: SortOrder::Featured,
        page: 1,
        per_page: None,
        load_more: false,
        json: false,
    }
}

fn browser_for(args: &CatalogArgs) -> voltige_core::CatalogBrowser {
    build_browser(fallback_catalog(Utc::now()), CatalogSource::Live, args, 9)
}

#[test]
fn default_page_uses_the_configured_grid_size() {
    let browser = browser_for(&base_args());
    assert_eq!(browser.displayed().len(), 9);
    assert_eq!(browser.total_filtered(), 10);
    assert!(browser.has_more());
}

#[test]
fn tag_filter_and_price_sort_combine() {
    let mut args = base_args();
    args.tag = vec!["Xiaomi".to_string()];
    args.sort = SortOrder::PriceAsc;
    let browser = browser_for(&args);

    let handles: Vec<String> = browser
        .displayed()
        .iter()
        .map(|p| p.handle.clone())
        .collect();
    assert_eq!(
        handles,
        [
            "accelerateur-xiaomi",
            "chargeur-rapide-xiaomi-42v",
            "trottinette-xiaomi-mi-pro-2",
        ]
    );
}

#[test]
fn price_window_keeps_the_mid_range() {
    let mut args = base_args();
    args.min_price = Some(Decimal::from(100));
    args.max_price = Some(Decimal::from(1000));
    assert_eq!(browser_for(&args).total_filtered(), 4);

    // Without an upper bound the ceiling stays wide open.
    args.max_price = None;
    assert_eq!(browser_for(&args).total_filtered(), 5);
}

#[test]
fn load_more_accumulates_earlier_pages() {
    let mut args = base_args();
    args.per_page = Some(4);
    args.page = 2;
    args.load_more = true;
    let browser = browser_for(&args);

    assert_eq!(browser.displayed().len(), 8);
    assert_eq!(browser.current_page(), 2);
    assert!(browser.has_more());
}

#[test]
fn out_of_range_page_is_clamped() {
    let mut args = base_args();
    args.per_page = Some(4);
    args.page = 99;
    let browser = browser_for(&args);

    assert_eq!(browser.current_page(), 3);
    assert_eq!(browser.displayed().len(), 2);
}

#[test]
fn long_titles_are_shortened_for_the_table() {
    let long = "x".repeat(60);
    let shortened = truncate_title(&long, 48);
    assert!(shortened.ends_with("..."));
    assert_eq!(shortened.chars().count(), 51);

    assert_eq!(truncate_title("Casque urbain LED", 48), "Casque urbain LED");
}
