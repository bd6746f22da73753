pub mod books;
pub mod taxonomies;

#[cfg(test)]
pub(crate) mod test_support;

use library_db::Catalog;
use library_kernel::{settings::Settings, ModuleRegistry};

/// Register all API modules with the registry
pub fn register_all(
    registry: &mut ModuleRegistry,
    catalog: Catalog,
    settings: &Settings,
) -> anyhow::Result<()> {
    registry.register(books::create_module(
        catalog.clone(),
        settings.library.clone(),
    ))?;
    registry.register(taxonomies::create_module(catalog))?;
    Ok(())
}
