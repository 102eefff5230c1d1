//! Admin news command handlers. All of them need `PHONESTORE_ADMIN_TOKEN`.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Subcommand;
use phonestore_client::NewsManager;
use phonestore_core::{NewsDraft, NewsItem, Notice};

use crate::{report, Context};

/// Sub-commands available under `news`.
#[derive(Debug, Subcommand)]
pub enum NewsCommands {
    /// List news items, optionally filtered by a search term
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Create a news item, or update one when `--id` is given
    Save {
        /// Existing item to update
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        title: String,
        #[arg(long)]
        subtitle: String,
        /// Target of the banner (internal route or external URL)
        #[arg(long)]
        link: String,
        /// Image file to upload and attach
        #[arg(long)]
        image: Option<PathBuf>,
        #[arg(long, default_value = "")]
        meta: String,
        /// Mark `--link` as pointing outside the storefront
        #[arg(long)]
        external: bool,
        /// Entry kind shown to shoppers
        #[arg(long, default_value = "promotion")]
        kind: String,
        /// Save the entry hidden
        #[arg(long)]
        inactive: bool,
    },
    /// Delete a news item
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn manager(ctx: &Context) -> NewsManager {
    NewsManager::new(
        ctx.client.clone(),
        ctx.session.clone(),
        Duration::from_millis(ctx.config.search_debounce_ms),
    )
}

fn print_items(items: &[NewsItem]) {
    if items.is_empty() {
        println!("no news items");
        return;
    }
    println!("{:<26}{:<12}{:<40}LINK", "ID", "CREATED", "TITLE");
    for item in items {
        let created = item
            .created_at
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "\u{2014}".to_string());
        println!("{:<26}{created:<12}{:<40}{}", item.id, item.title, item.link);
    }
}

/// Asks on stdin; anything but `y`/`yes` declines.
fn confirm_on_stdin(id: &str) -> bool {
    print!("Delete news item {id}? [y/N] ");
    if std::io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

async fn attach_image_file(
    manager: &NewsManager,
    draft: &mut NewsDraft,
    path: &Path,
) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| anyhow::anyhow!("failed to read image {}: {e}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image");
    manager.attach_image(draft, file_name, bytes).await?;
    Ok(())
}

pub(crate) async fn run(ctx: &Context, command: NewsCommands) -> anyhow::Result<()> {
    let manager = manager(ctx);

    match command {
        NewsCommands::List { search } => {
            manager.refresh().await;
            if let Some(text) = search.as_deref() {
                if manager.last_notice().is_none() {
                    manager.search_now(text).await;
                }
            }
            if let Some(notice) = manager.last_notice() {
                return report(&notice);
            }
            print_items(&manager.items());
        }
        NewsCommands::Save {
            id,
            title,
            subtitle,
            link,
            image,
            meta,
            external,
            kind,
            inactive,
        } => {
            let mut draft = NewsDraft {
                id,
                title,
                subtitle,
                link,
                meta,
                is_external_link: external,
                kind,
                status: (!inactive).to_string(),
                ..NewsDraft::default()
            };
            // Reject an incomplete draft before spending an upload on it.
            if let Err(e) = draft.validate() {
                return report(&Notice::from(&e));
            }
            if let Some(path) = image {
                attach_image_file(&manager, &mut draft, &path).await?;
            }
            report(&manager.save(&draft).await)?;
        }
        NewsCommands::Delete { id, yes } => {
            let outcome = manager
                .delete(&id, |id| yes || confirm_on_stdin(id))
                .await;
            match outcome {
                Some(notice) => report(&notice)?,
                None => println!("cancelled"),
            }
        }
    }
    Ok(())
}
