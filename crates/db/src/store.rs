use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::{AuthorLink, BookRow, Term, ThumbnailRow};
use crate::query::{BookQuery, TermQuery};

/// Read-only access to the catalog tables.
///
/// Each method is one query; relation merging happens in [`crate::Catalog`].
#[async_trait]
pub trait LibraryStore: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Published books matching `query`, ordered by id descending.
    async fn books(&self, query: &BookQuery) -> Result<Vec<BookRow>, StoreError>;

    /// Author terms linked to any of `book_ids`, ordered by term id.
    async fn authors_for(&self, book_ids: &[u64]) -> Result<Vec<AuthorLink>, StoreError>;

    /// Attachments parented to any of `book_ids`, ordered by attachment id.
    async fn thumbnails_for(&self, book_ids: &[u64]) -> Result<Vec<ThumbnailRow>, StoreError>;

    /// In-use terms matching `query`, ordered by name.
    async fn terms(&self, query: &TermQuery) -> Result<Vec<Term>, StoreError>;

    /// A single term of any taxonomy.
    async fn term(&self, id: u64) -> Result<Option<Term>, StoreError>;
}
