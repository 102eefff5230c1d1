//! `compare` command: rebuilds a comparison from its route, applies any
//! additions and removals, and prints a table.

use phonestore_client::{add_to_comparison, resolve_comparison};
use phonestore_core::{CompareField, ComparisonSet, ComparisonState, Notice, Severity};

use crate::{report, Context};

const LABEL_WIDTH: usize = 16;
const COLUMN_WIDTH: usize = 28;

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() > width {
        let cut: String = value.chars().take(width - 3).collect();
        format!("{cut}...")
    } else {
        value.to_string()
    }
}

/// Edits applied to the resolved comparison before it is printed.
#[derive(Debug, Default)]
pub(crate) struct CompareEdits {
    /// Product ids to take out, applied first.
    pub remove: Vec<String>,
    /// Detail slugs to bring in.
    pub add: Vec<String>,
}

pub(crate) async fn run(
    ctx: &Context,
    path: &str,
    edits: &CompareEdits,
    fields: &[CompareField],
    diff_only: bool,
) -> anyhow::Result<()> {
    let mut resolved = resolve_comparison(&ctx.client, path, ctx.rules.clone()).await;

    for slug in &resolved.dropped {
        report(&Notice::warn(
            "Product not found",
            format!("{slug} could not be loaded and was left out"),
        ))?;
    }
    for notice in &resolved.notices {
        report(notice)?;
    }

    for id in &edits.remove {
        if !resolved.set.contains(id) {
            report(&Notice::warn(
                "Not in comparison",
                format!("no product with id {id} is being compared"),
            ))?;
            continue;
        }
        if let Some(notice) = resolved.set.remove(id) {
            report(&notice)?;
        }
    }
    for slug in &edits.add {
        let notice = add_to_comparison(&ctx.client, &mut resolved.set, slug).await;
        if notice.severity == Severity::Error {
            // A failed lookup leaves the rest of the comparison usable.
            eprintln!("{notice}");
        } else {
            report(&notice)?;
        }
    }

    let set = &resolved.set;
    match set.state() {
        ComparisonState::Empty => {
            println!("nothing to compare; none of the products could be loaded");
            return Ok(());
        }
        ComparisonState::Partial(1) => {
            report(&Notice::info(
                "Add another product",
                "Add at least one more product to compare",
            ))?;
        }
        ComparisonState::Partial(_) | ComparisonState::Full => {}
    }

    let mut header = format!("{:<LABEL_WIDTH$}", "");
    for product in set.products() {
        header.push_str(&format!("{:<COLUMN_WIDTH$}", truncate(&product.name, COLUMN_WIDTH - 2)));
    }
    println!("{}", header.trim_end());

    for field in rows(set, fields, diff_only) {
        let marker = if set.differs(field) { "*" } else { " " };
        let mut row = format!("{marker}{:<width$}", field.label(), width = LABEL_WIDTH - 1);
        for product in set.products() {
            let value = field.value(product);
            let value = if value.is_empty() { "-".to_string() } else { value };
            row.push_str(&format!("{:<COLUMN_WIDTH$}", truncate(&value, COLUMN_WIDTH - 2)));
        }
        println!("{}", row.trim_end());
    }

    println!();
    println!("route: {}", set.compare_route());
    Ok(())
}

/// Rows to print: the requested fields (or all of them), narrowed to the
/// differing ones under `diff_only`.
fn rows(set: &ComparisonSet, fields: &[CompareField], diff_only: bool) -> Vec<CompareField> {
    let requested: Vec<CompareField> = if fields.is_empty() {
        CompareField::ALL.to_vec()
    } else {
        CompareField::ALL
            .into_iter()
            .filter(|f| fields.contains(f))
            .collect()
    };
    if diff_only {
        requested.into_iter().filter(|f| set.differs(*f)).collect()
    } else {
        requested
    }
}
