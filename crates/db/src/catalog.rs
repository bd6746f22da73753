use std::collections::HashMap;
use std::sync::Arc;

use crate::error::StoreError;
use crate::model::{Author, Book, Term};
use crate::query::{BookQuery, TermQuery};
use crate::store::LibraryStore;

/// Book and taxonomy composers over a shared store.
#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn LibraryStore>,
}

impl Catalog {
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        Self { store }
    }

    pub fn backend(&self) -> &'static str {
        self.store.name()
    }

    /// Run the book listing and attach authors and thumbnails.
    ///
    /// Relations come from two secondary queries keyed by book id; they are
    /// skipped when the primary query returns nothing.
    pub async fn list_books(&self, query: &BookQuery) -> Result<Vec<Book>, StoreError> {
        let rows = self.store.books(query).await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<u64> = rows.iter().map(|row| row.id).collect();
        let (author_links, thumbnails) = tokio::try_join!(
            self.store.authors_for(&ids),
            self.store.thumbnails_for(&ids),
        )?;

        let mut authors: HashMap<u64, Vec<Author>> = HashMap::new();
        for link in author_links {
            authors.entry(link.book_id).or_default().push(Author {
                id: link.id,
                name: link.name,
            });
        }

        // Rows arrive ordered by attachment id; the first one per book wins.
        let mut covers: HashMap<u64, String> = HashMap::new();
        for thumbnail in thumbnails {
            covers.entry(thumbnail.book_id).or_insert(thumbnail.url);
        }

        Ok(rows
            .into_iter()
            .map(|row| Book {
                authors: authors.remove(&row.id).unwrap_or_default(),
                thumbnail: covers.remove(&row.id),
                id: row.id,
                title: row.title,
            })
            .collect())
    }

    pub async fn list_terms(&self, query: &TermQuery) -> Result<Vec<Term>, StoreError> {
        self.store.terms(query).await
    }

    /// Fetch one term; `None` means no such term exists.
    pub async fn get_term(&self, id: u64) -> Result<Option<Term>, StoreError> {
        if id == 0 {
            return Ok(None);
        }
        self.store.term(id).await
    }
}
