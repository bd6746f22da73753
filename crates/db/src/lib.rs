//! Read-only catalog storage for the library API.
//!
//! Queries are described by immutable specifications ([`BookQuery`],
//! [`TermQuery`]) and executed by a [`LibraryStore`] backend: MySQL against
//! the CMS tables, or an in-memory fixture.

use std::sync::Arc;

pub mod catalog;
pub mod error;
pub mod memory;
pub mod model;
pub mod mysql;
pub mod query;
pub mod settings;
pub mod sql;
pub mod store;

pub use catalog::Catalog;
pub use error::StoreError;
pub use model::{Author, Book, TaxonomyKind, Term, TermSummary};
pub use query::{BookQuery, TermQuery};
pub use settings::{Backend, DatabaseSettings};
pub use store::LibraryStore;

/// Open the catalog backend selected by `settings`.
pub async fn open(settings: &DatabaseSettings) -> Result<Catalog, StoreError> {
    let store: Arc<dyn LibraryStore> = match settings.backend {
        Backend::Mysql => Arc::new(mysql::MySqlStore::connect(settings).await?),
        Backend::Memory => {
            let path = settings
                .fixture_path
                .as_deref()
                .ok_or(StoreError::MissingFixture)?;
            Arc::new(memory::MemoryStore::load(path)?)
        }
    };

    tracing::info!(backend = store.name(), "catalog backend ready");
    Ok(Catalog::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../fixtures/library.json");

    #[tokio::test]
    async fn opens_memory_backend_from_fixture() {
        let catalog = open(&DatabaseSettings::memory(FIXTURE)).await.unwrap();
        assert_eq!(catalog.backend(), "memory");

        let books = catalog.list_books(&BookQuery::default()).await.unwrap();
        assert!(!books.is_empty());
    }

    #[tokio::test]
    async fn memory_backend_requires_fixture_path() {
        let settings = DatabaseSettings {
            backend: Backend::Memory,
            ..DatabaseSettings::default()
        };
        let err = open(&settings).await.err().unwrap();
        assert!(matches!(err, StoreError::MissingFixture));
    }
}
