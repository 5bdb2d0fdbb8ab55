//! Headless entry point: bring up the store and print the open checklist
//! entries. A store that cannot be created is logged, not fatal.
use anyhow::Context;
use checklist_store::{OrReportEmpty, Store};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let store = Store::from_env().context("failed to resolve checklist store path")?;
    if let Err(err) = store.ensure_store() {
        tracing::error!(error = %err, "checklist store could not be initialized");
    }

    let entries = store.list_active().or_report_empty();
    tracing::info!(count = entries.len(), path = %store.path().display(), "active checklist entries");
    for entry in &entries {
        println!("{entry}");
    }

    Ok(())
}
