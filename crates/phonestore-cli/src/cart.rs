use clap::Subcommand;
use phonestore_client::ProductDetailView;
use phonestore_core::Notice;

use crate::{report, Context};

/// Sub-commands available under `cart`.
#[derive(Debug, Subcommand)]
pub enum CartCommands {
    /// Add one unit of a product variant to the cart
    Add {
        /// Product detail slug
        slug: String,
        /// Storage tier to add instead of the listing's own
        #[arg(long)]
        storage: Option<String>,
        /// Print the cart route after a successful add
        #[arg(long)]
        buy_now: bool,
    },
}

pub(crate) async fn run(ctx: &Context, command: CartCommands) -> anyhow::Result<()> {
    match command {
        CartCommands::Add {
            slug,
            storage,
            buy_now,
        } => run_add(ctx, &slug, storage.as_deref(), buy_now).await,
    }
}

async fn run_add(
    ctx: &Context,
    slug: &str,
    storage: Option<&str>,
    buy_now: bool,
) -> anyhow::Result<()> {
    let mut view = ProductDetailView::load(&ctx.client, slug, ctx.rules.clone()).await?;

    if let Some(storage) = storage {
        // Adding a tier that does not exist would put the wrong phone in the cart.
        if let Err(e) = view.select_storage(storage) {
            return report(&Notice::from(&e));
        }
    }

    if buy_now {
        let (notice, route) = view.buy_now(&ctx.client, &ctx.session).await;
        report(&notice)?;
        if let Some(route) = route {
            println!("continue at {route}");
        }
        Ok(())
    } else {
        report(&view.add_to_cart(&ctx.client, &ctx.session).await)
    }
}
