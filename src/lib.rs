//! Library API application
//!
//! Wires the catalog, the API modules and the HTTP server together.

pub mod modules;

use anyhow::Context;
use library_db::Catalog;
use library_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Build a registry holding every API module over `catalog`
pub fn build_registry(catalog: Catalog, settings: &Settings) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, catalog, settings)?;
    Ok(registry)
}

/// Open the catalog, run the module lifecycle and serve until shutdown
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let catalog = library_db::open(&settings.database)
        .await
        .context("failed to open catalog")?;

    let registry = build_registry(catalog, &settings)?;
    let ctx = InitCtx::new(&settings);

    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    let served =
        library_http::start_server(&registry, &settings, library_http::shutdown_signal()).await;

    registry.stop_all().await?;
    served
}
