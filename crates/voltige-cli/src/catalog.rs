//! Catalog browsing command.
//!
//! Runs the same load/filter/paginate pipeline the gateway serves: loads
//! the storefront catalog (or the bundled demo catalog when no shop is
//! configured), applies the requested filters, and prints one page.

use chrono::Utc;
use clap::Args;
use rust_decimal::Decimal;

use voltige_core::{full_price_range, AppConfig, CatalogBrowser, CatalogSource, Product, SortOrder};
use voltige_storefront::{load_catalog, CatalogOutcome, StorefrontClient};

/// Widest page size the command accepts.
const MAX_PER_PAGE: usize = 100;

/// Arguments for `catalog`.
#[derive(Debug, Args)]
pub(crate) struct CatalogArgs {
    /// Free-text search over titles, descriptions, vendors and tags
    #[arg(long)]
    query: Option<String>,

    /// Keep products carrying this tag (repeatable, any matches)
    #[arg(long)]
    tag: Vec<String>,

    /// Keep products in this collection (repeatable, any matches)
    #[arg(long)]
    category: Vec<String>,

    /// Lowest unit price to keep, in euros
    #[arg(long)]
    min_price: Option<Decimal>,

    /// Highest unit price to keep, in euros
    #[arg(long)]
    max_price: Option<Decimal>,

    /// Keep only products with an available variant
    #[arg(long)]
    in_stock: bool,

    /// Sort order: featured, price-asc, price-desc or newest
    #[arg(long, default_value = "featured")]
    sort: SortOrder,

    /// Page to show (1-based)
    #[arg(long, default_value = "1")]
    page: usize,

    /// Products per page (defaults to the configured grid size)
    #[arg(long)]
    per_page: Option<usize>,

    /// Accumulate pages 1 through --page instead of showing one page alone
    #[arg(long)]
    load_more: bool,

    /// Print the page as JSON instead of a table
    #[arg(long)]
    json: bool,
}

/// Loads the catalog and prints one page of results.
///
/// # Errors
///
/// Returns an error when the storefront client cannot be constructed, or
/// when a search query is given and the live fetch fails.
pub(crate) async fn run_catalog(config: &AppConfig, args: &CatalogArgs) -> anyhow::Result<()> {
    let client = StorefrontClient::from_config(config)?;
    let term = args.query.as_deref().unwrap_or("");
    let outcome = load_catalog(
        client.as_ref(),
        term,
        config.catalog_page_size,
        config.catalog_max_pages,
    )
    .await?;

    if let CatalogOutcome::Degraded { reason, .. } = &outcome {
        eprintln!("note: showing the demo catalog ({reason})");
    }

    let (products, source) = outcome.into_parts();
    let browser = build_browser(products, source, args, config.products_per_page);

    if args.json {
        print_json(&browser)?;
    } else {
        print_table(&browser);
    }
    Ok(())
}

/// Applies the command's filters, sort and pagination on top of a loaded
/// catalog.
fn build_browser(
    products: Vec<Product>,
    source: CatalogSource,
    args: &CatalogArgs,
    default_per_page: usize,
) -> CatalogBrowser {
    let mut browser = CatalogBrowser::new(products, source, Utc::now());
    browser.set_per_page(args.per_page.unwrap_or(default_per_page).min(MAX_PER_PAGE));

    if let Some(query) = &args.query {
        browser.set_query(query.clone());
    }
    if !args.tag.is_empty() {
        browser.set_tags(args.tag.clone());
    }
    if !args.category.is_empty() {
        browser.set_categories(args.category.clone());
    }
    if args.min_price.is_some() || args.max_price.is_some() {
        let (floor, ceiling) = full_price_range();
        browser.set_price_range(
            args.min_price.unwrap_or(floor),
            args.max_price.unwrap_or(ceiling),
        );
    }
    if args.in_stock {
        browser.set_in_stock_only(true);
    }
    if args.sort != SortOrder::Featured {
        browser.set_sort(args.sort);
    }

    if args.load_more {
        for _ in 1..args.page {
            if !browser.load_more() {
                break;
            }
        }
    } else if args.page > 1 {
        browser.go_to_page(args.page);
    }
    browser
}

fn print_json(browser: &CatalogBrowser) -> anyhow::Result<()> {
    let page = serde_json::json!({
        "products": browser.displayed(),
        "page": browser.current_page(),
        "perPage": browser.per_page(),
        "totalEntries": browser.total_filtered(),
        "totalPages": browser.total_pages(),
        "hasMore": browser.has_more(),
        "source": browser.source().label(),
    });
    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}

fn print_table(browser: &CatalogBrowser) {
    let shown = browser.displayed();
    if shown.is_empty() {
        println!("no products match the current filters");
        return;
    }

    let header = format!("{:<42}{:>12}  {:<7}TITLE", "HANDLE", "PRICE", "STOCK");
    println!("{header}");
    for product in &shown {
        let price = product
            .min_price()
            .map_or_else(|| "\u{2014}".to_string(), |p| format!("{p} €"));
        let stock = if product.in_stock() { "yes" } else { "out" };
        println!(
            "{:<42}{:>12}  {:<7}{}",
            product.handle,
            price,
            stock,
            truncate_title(&product.title, 48)
        );
    }

    println!();
    println!(
        "page {}/{}, {} of {} products ({} catalog)",
        browser.current_page(),
        browser.total_pages(),
        shown.len(),
        browser.total_filtered(),
        browser.source().label()
    );
    if browser.has_more() {
        println!(
            "run again with --load-more --page {} to extend the grid",
            browser.current_page() + 1
        );
    }
}

/// Shortens a title to at most `max` characters for column display.
fn truncate_title(title: &str, max: usize) -> String {
    if title.chars().count() > max {
        format!("{}...", title.chars().take(max).collect::<String>())
    } else {
        title.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
