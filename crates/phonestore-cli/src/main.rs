mod address;
mod cart;
mod compare;
mod news;
mod product;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use phonestore_client::StorefrontClient;
use phonestore_core::{AppConfig, CatalogRules, CompareField, Notice, Session, Severity};
use tracing_subscriber::EnvFilter;

use crate::address::AddressCommands;
use crate::cart::CartCommands;
use crate::compare::CompareEdits;
use crate::news::NewsCommands;
use crate::product::ProductCommands;

#[derive(Debug, Parser)]
#[command(name = "phonestore")]
#[command(about = "Phone storefront command line client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse products and their storage variants
    Product {
        #[command(subcommand)]
        command: ProductCommands,
    },
    /// Compare up to three products side by side
    Compare {
        /// Comparison path, e.g. `iphone-15-128gb-vs-galaxy-s24-8gb-256gb`
        #[arg(default_value = "")]
        path: String,
        /// Add the product behind this detail slug
        #[arg(long = "add", value_name = "SLUG")]
        add: Vec<String>,
        /// Take the product with this id out of the comparison
        #[arg(long = "remove", value_name = "ID")]
        remove: Vec<String>,
        /// Only print these rows (e.g. `rearCamera`, `refresh_rate`)
        #[arg(long = "field", value_name = "KEY")]
        fields: Vec<CompareField>,
        /// Only show rows where the products differ
        #[arg(long)]
        diff_only: bool,
    },
    /// Shopping cart actions
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    /// Look up address levels and update the shipping address
    Address {
        #[command(subcommand)]
        command: AddressCommands,
    },
    /// Manage news and promotion entries (admin)
    News {
        #[command(subcommand)]
        command: NewsCommands,
    },
    /// Show reviews and rating breakdown for a product
    Reviews {
        /// Product detail slug
        slug: String,
    },
    /// Write a review for a product
    Rate {
        /// Product detail slug
        slug: String,
        /// Stars, 1 to 5
        #[arg(long)]
        rating: u8,
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        comment: String,
        /// Photo to attach (up to three)
        #[arg(long = "image", value_name = "FILE")]
        images: Vec<PathBuf>,
    },
}

/// Everything a command handler needs: the API client, the caller's
/// session, and the catalog naming rules.
pub(crate) struct Context {
    pub config: AppConfig,
    pub client: StorefrontClient,
    pub session: Session,
    pub rules: CatalogRules,
}

impl Context {
    fn new(config: AppConfig) -> anyhow::Result<Self> {
        let client = StorefrontClient::new(&config)
            .map_err(|e| anyhow::anyhow!("failed to build storefront client: {e}"))?;
        let rules = phonestore_core::load_catalog_rules(&config.catalog_path)?;
        let session = Session::from_config(&config);
        Ok(Self {
            config,
            client,
            session,
            rules,
        })
    }
}

/// Prints `notice` and turns an error-severity notice into a failed exit.
pub(crate) fn report(notice: &Notice) -> anyhow::Result<()> {
    match notice.severity {
        Severity::Success | Severity::Info => println!("{notice}"),
        Severity::Warn => eprintln!("{notice}"),
        Severity::Error => anyhow::bail!("{}: {}", notice.summary, notice.detail),
    }
    Ok(())
}

/// Formats a VND amount with `.` thousands separators, e.g. `20.690.000 ₫`.
pub(crate) fn fmt_vnd(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{grouped} \u{20ab}")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = phonestore_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("phonestore: no command given; run `phonestore --help`");
        return Ok(());
    };

    let ctx = Context::new(config)?;
    tracing::debug!(api_url = %ctx.config.api_url, env = %ctx.config.env, "starting");

    match command {
        Commands::Product { command } => product::run(&ctx, command).await,
        Commands::Compare {
            path,
            add,
            remove,
            fields,
            diff_only,
        } => {
            let edits = CompareEdits { remove, add };
            compare::run(&ctx, &path, &edits, &fields, diff_only).await
        }
        Commands::Cart { command } => cart::run(&ctx, command).await,
        Commands::Address { command } => address::run(&ctx, command).await,
        Commands::News { command } => news::run(&ctx, command).await,
        Commands::Reviews { slug } => product::run_reviews(&ctx, &slug).await,
        Commands::Rate {
            slug,
            rating,
            name,
            phone,
            comment,
            images,
        } => product::run_rate(&ctx, &slug, rating, &name, &phone, &comment, &images).await,
    }
}

#[cfg(test)]
mod tests;
