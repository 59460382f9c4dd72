//! CLI subcommands.

pub mod admin;
pub mod seed;

use std::path::PathBuf;

use boostline_store::JsonStore;

/// Open the store configured via `BOOSTLINE_DATA_DIR`.
pub(crate) async fn open_store() -> Result<JsonStore, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let dir = std::env::var("BOOSTLINE_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
    let store = JsonStore::open(PathBuf::from(&dir)).await?;
    tracing::info!(dir, "store opened");
    Ok(store)
}
