//! Product browsing command handlers.

use std::path::PathBuf;

use clap::Subcommand;
use phonestore_client::ProductDetailView;
use phonestore_core::{CompareField, CoreError, Notice, Product, ReviewDraft};

use crate::{fmt_vnd, report, Context};

/// Sub-commands available under `product`.
#[derive(Debug, Subcommand)]
pub enum ProductCommands {
    /// Show one product with its specifications
    Show {
        /// Product detail slug (e.g. iphone-15-128gb)
        slug: String,
    },
    /// List the storage variants of a product line
    Variants {
        /// Detail slug of any variant in the line
        slug: String,
        /// Resolve this storage tier (e.g. 256GB)
        #[arg(long)]
        storage: Option<String>,
    },
    /// Search products by name
    Search {
        /// Search text
        query: String,
    },
    /// List featured products
    Hot,
}

pub(crate) async fn run(ctx: &Context, command: ProductCommands) -> anyhow::Result<()> {
    match command {
        ProductCommands::Show { slug } => run_show(ctx, &slug).await,
        ProductCommands::Variants { slug, storage } => {
            run_variants(ctx, &slug, storage.as_deref()).await
        }
        ProductCommands::Search { query } => {
            let products = ctx.client.search_products(&query).await?;
            print_listing(&products, &format!("no products match \"{query}\""));
            Ok(())
        }
        ProductCommands::Hot => {
            let products = ctx.client.hot_products().await?;
            print_listing(&products, "no featured products right now");
            Ok(())
        }
    }
}

fn print_listing(products: &[Product], empty: &str) {
    if products.is_empty() {
        println!("{empty}");
        return;
    }
    println!("{:<36}{:>18}  SLUG", "NAME", "PRICE");
    for p in products {
        println!(
            "{:<36}{:>18}  {}",
            p.name,
            fmt_vnd(p.effective_discount_price()),
            p.link
        );
    }
}

async fn run_show(ctx: &Context, slug: &str) -> anyhow::Result<()> {
    let product = ctx.client.get_product_detail(slug).await?;

    println!("{}", product.name);
    println!("  brand:     {}", product.trademark);
    println!("  price:     {}", fmt_vnd(product.effective_discount_price()));
    if !product.discount.is_zero() {
        println!(
            "  was:       {} (-{}%)",
            fmt_vnd(product.original_price),
            product.discount
        );
    }
    if product.rating.count > 0 {
        println!(
            "  rating:    {:.1} ({} reviews)",
            product.rating.average, product.rating.count
        );
    }
    for field in CompareField::ALL.into_iter().skip(1) {
        let value = field.value(&product);
        if !value.is_empty() {
            println!("  {:<10} {value}", format!("{}:", field.label()));
        }
    }
    for url in product.image_urls() {
        println!("  image:     {url}");
    }
    Ok(())
}

async fn run_variants(ctx: &Context, slug: &str, storage: Option<&str>) -> anyhow::Result<()> {
    let mut view = ProductDetailView::load(&ctx.client, slug, ctx.rules.clone()).await?;

    if let Some(storage) = storage {
        if let Err(e) = view.select_storage(storage) {
            report(&Notice::from(&e))?;
        }
    }

    let current = view.current();
    println!("{}", view.group().base_product_name());
    for option in view.storage_options() {
        let marker = if option == current.storage { "*" } else { " " };
        println!("  {marker} {option}");
    }
    println!();
    println!("selected:  {}", current.display_name);
    println!("price:     {}", fmt_vnd(current.price));
    println!("route:     {}", current.navigate_to);
    Ok(())
}

/// Reviews for the product behind `slug`, with a per-star breakdown.
pub(crate) async fn run_reviews(ctx: &Context, slug: &str) -> anyhow::Result<()> {
    let product = ctx.client.get_product_detail(slug).await?;
    let reviews = ctx.client.product_reviews(&product.id).await?;
    let stats = &reviews.stats;

    println!(
        "{}: {} / 5 from {} reviews",
        product.name,
        stats.average_display(),
        stats.total
    );
    for star in (1..=5).rev() {
        println!(
            "  {star}\u{2605} {:>4} ({:.0}%)",
            stats.count(star),
            stats.percentage(star)
        );
    }
    for review in &reviews.reviews {
        let date = review
            .created_at
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        println!();
        println!("{} \u{00b7} {}\u{2605} {date}", review.author, review.rating);
        if !review.comment.trim().is_empty() {
            println!("  {}", review.comment.trim());
        }
    }
    Ok(())
}

/// Builds a review draft from command-line input and validates it.
fn review_draft(
    rating: u8,
    name: &str,
    phone: &str,
    comment: &str,
    images: &[PathBuf],
) -> Result<ReviewDraft, CoreError> {
    let mut draft = ReviewDraft {
        rating,
        comment: comment.trim().to_string(),
        name: name.trim().to_string(),
        images: images.iter().map(|p| p.display().to_string()).collect(),
        ..ReviewDraft::default()
    };
    draft.set_phone(phone);
    draft.validate()?;
    Ok(draft)
}

/// Checks a review for the product behind `slug` and acknowledges it.
///
/// The storefront has no review submission endpoint, so nothing is sent
/// beyond the product lookup.
pub(crate) async fn run_rate(
    ctx: &Context,
    slug: &str,
    rating: u8,
    name: &str,
    phone: &str,
    comment: &str,
    images: &[PathBuf],
) -> anyhow::Result<()> {
    let draft = match review_draft(rating, name, phone, comment, images) {
        Ok(draft) => draft,
        Err(e) => return report(&Notice::from(&e)),
    };
    let product = ctx.client.get_product_detail(slug).await?;
    tracing::info!(
        product_id = %product.id,
        rating = draft.rating,
        images = draft.images.len(),
        "review recorded locally"
    );
    report(&Notice::success(
        "Thank you",
        format!("Your {}\u{2605} review of {} was recorded", draft.rating, product.name),
    ))
}
