//! Catalog command handlers for the CLI.
//!
//! Handlers only dispatch intents into the storefront and print the state
//! that results. A failed fetch channel is turned into a command error.

use maison_core::{FetchStatus, FilterPatch, Product, SortBy};
use maison_engine::{CatalogState, Storefront};
use maison_gateway::FakeStoreClient;
use rust_decimal::Decimal;

/// Filter options collected from `products` flags.
#[derive(Debug, Default)]
pub(crate) struct ProductQuery {
    pub category: Option<String>,
    pub price_range: Option<(Decimal, Decimal)>,
    pub sort: Option<SortBy>,
}

impl ProductQuery {
    fn filter_patch(&self) -> FilterPatch {
        let mut patch = FilterPatch::new();
        if let Some((min, max)) = self.price_range {
            patch = patch.price_range(min, max);
        }
        if let Some(sort) = self.sort {
            patch = patch.sort_by(sort);
        }
        patch
    }
}

/// List products, fetching either the whole catalog or one category and
/// applying price and sort filters locally.
///
/// # Errors
///
/// Returns an error if the catalog fetch fails or JSON encoding fails.
pub(crate) async fn run_products(
    storefront: &Storefront<FakeStoreClient>,
    query: ProductQuery,
    json: bool,
) -> anyhow::Result<()> {
    tracing::info!(category = ?query.category, "loading catalog");
    match query.category.as_deref() {
        Some(category) => storefront.catalog.load_by_category(category).await,
        None => storefront.catalog.load_all().await,
    };
    storefront
        .catalog
        .read(|s| ensure_succeeded(s.list_status(), "catalog"))?;

    storefront.catalog.set_filters(query.filter_patch());
    let products = storefront.catalog.read(|s| s.filtered_items().to_vec());
    tracing::info!(count = products.len(), "catalog view ready");

    if json {
        println!("{}", serde_json::to_string_pretty(&products)?);
        return Ok(());
    }

    if products.is_empty() {
        println!("no products match the given filters");
        return Ok(());
    }
    print_product_table(&products);
    println!();
    println!("{} products", products.len());
    Ok(())
}

/// Show one product, and optionally the products related to it.
///
/// # Errors
///
/// Returns an error if the product or its category cannot be fetched.
pub(crate) async fn run_product(
    storefront: &Storefront<FakeStoreClient>,
    id: &str,
    related: bool,
) -> anyhow::Result<()> {
    tracing::info!(product_id = id, related, "loading product");
    storefront.catalog.load_by_id(id).await;
    let product = storefront.catalog.read(|s| {
        ensure_succeeded(s.detail_status(), "product")?;
        s.selected_product()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("product '{id}' not found"))
    })?;

    print_product_detail(&product);

    if related {
        storefront.catalog.load_by_category(&product.category).await;
        storefront
            .catalog
            .read(|s| ensure_succeeded(s.list_status(), "related products"))?;

        let related = storefront.related_products();
        tracing::info!(
            category = %product.category,
            count = related.len(),
            "related products ready"
        );
        println!();
        if related.is_empty() {
            println!("no related products in '{}'", product.category);
        } else {
            println!("Related products:");
            print_product_table(&related);
        }
    }

    Ok(())
}

/// List the catalog's category names.
///
/// # Errors
///
/// Returns an error if the categories fetch fails.
pub(crate) async fn run_categories(storefront: &Storefront<FakeStoreClient>) -> anyhow::Result<()> {
    tracing::info!("loading categories");
    storefront.catalog.load_categories().await;
    let names = storefront.catalog.read(|s: &CatalogState| {
        ensure_succeeded(s.categories_status(), "categories")?;
        Ok::<_, anyhow::Error>(s.categories().to_vec())
    })?;

    for name in names {
        println!("{name}");
    }
    Ok(())
}

fn ensure_succeeded<T>(status: &FetchStatus<T>, what: &str) -> anyhow::Result<()> {
    match status {
        FetchStatus::Succeeded(_) => Ok(()),
        FetchStatus::Failed(message) => Err(anyhow::anyhow!("failed to load {what}: {message}")),
        FetchStatus::Idle | FetchStatus::Loading => {
            Err(anyhow::anyhow!("{what} fetch did not complete"))
        }
    }
}

fn print_product_table(products: &[Product]) {
    println!("{:<6}{:<44}{:>10}  {:<8}CATEGORY", "ID", "NAME", "PRICE", "RATING");
    for product in products {
        println!(
            "{:<6}{:<44}{:>10}  {:<8.1}{}",
            product.id,
            truncate(&product.name, 42),
            product.price,
            product.rating,
            product.category
        );
    }
}

fn print_product_detail(product: &Product) {
    println!("{} (#{})", product.name, product.id);
    println!("price:    {}", product.price);
    println!("category: {}", product.category);
    println!("rating:   {:.1}", product.rating);
    if let Some(image) = product.primary_image() {
        println!("image:    {image}");
    }
    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
