//! In-memory catalog loaded from a JSON fixture.
//!
//! The fixture mirrors the CMS tables (`posts`, `terms`, `term_taxonomy`,
//! `term_relationships`) and is never modified after loading.

use std::collections::HashSet;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::StoreError;
use crate::model::{AuthorLink, BookRow, TaxonomyKind, Term, ThumbnailRow};
use crate::query::{
    BookClause, BookQuery, TermClause, TermQuery, ATTACHMENT_POST_TYPE, BOOK_POST_TYPE,
    PUBLISHED_STATUS,
};
use crate::store::LibraryStore;

#[derive(Debug, Clone, Deserialize)]
pub struct PostRecord {
    pub id: u64,
    #[serde(default)]
    pub post_title: String,
    pub post_type: String,
    #[serde(default = "PostRecord::default_status")]
    pub post_status: String,
    #[serde(default)]
    pub post_parent: u64,
    #[serde(default)]
    pub guid: String,
}

impl PostRecord {
    fn default_status() -> String {
        PUBLISHED_STATUS.to_string()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TermRecord {
    pub term_id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TermTaxonomyRecord {
    pub term_taxonomy_id: u64,
    pub term_id: u64,
    pub taxonomy: String,
    #[serde(default)]
    pub count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TermRelationshipRecord {
    pub object_id: u64,
    pub term_taxonomy_id: u64,
}

/// Table contents of a memory catalog.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub posts: Vec<PostRecord>,
    #[serde(default)]
    pub terms: Vec<TermRecord>,
    #[serde(default)]
    pub term_taxonomy: Vec<TermTaxonomyRecord>,
    #[serde(default)]
    pub term_relationships: Vec<TermRelationshipRecord>,
}

pub struct MemoryStore {
    tables: Fixture,
}

impl MemoryStore {
    pub fn new(tables: Fixture) -> Self {
        Self { tables }
    }

    /// Read a JSON fixture from disk.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path).map_err(|source| StoreError::FixtureIo {
            path: path.to_path_buf(),
            source,
        })?;
        let tables: Fixture =
            serde_json::from_str(&raw).map_err(|source| StoreError::FixtureFormat {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!(
            path = %path.display(),
            posts = tables.posts.len(),
            terms = tables.terms.len(),
            "loaded memory catalog"
        );

        Ok(Self::new(tables))
    }

    fn term_record(&self, term_id: u64) -> Option<&TermRecord> {
        self.tables.terms.iter().find(|t| t.term_id == term_id)
    }

    fn taxonomy_record(&self, term_taxonomy_id: u64) -> Option<&TermTaxonomyRecord> {
        self.tables
            .term_taxonomy
            .iter()
            .find(|tt| tt.term_taxonomy_id == term_taxonomy_id)
    }

    fn is_linked(&self, post_id: u64, term_id: u64) -> bool {
        self.tables.term_relationships.iter().any(|rel| {
            rel.object_id == post_id
                && self
                    .taxonomy_record(rel.term_taxonomy_id)
                    .is_some_and(|tt| tt.term_id == term_id)
        })
    }

    fn book_matches(&self, post: &PostRecord, clause: &BookClause) -> bool {
        match clause {
            BookClause::TitleContains(search) => contains_ignore_case(&post.post_title, search),
            BookClause::InTerm(term_id) => self.is_linked(post.id, *term_id),
            BookClause::Before(last_id) => post.id < *last_id,
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl LibraryStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn books(&self, query: &BookQuery) -> Result<Vec<BookRow>, StoreError> {
        let mut posts: Vec<&PostRecord> = self
            .tables
            .posts
            .iter()
            .filter(|p| p.post_type == BOOK_POST_TYPE && p.post_status == PUBLISHED_STATUS)
            .filter(|p| query.clauses().iter().all(|c| self.book_matches(p, c)))
            .collect();
        posts.sort_by(|a, b| b.id.cmp(&a.id));
        posts.dedup_by_key(|p| p.id);

        Ok(posts
            .into_iter()
            .take(usize::try_from(query.limit()).unwrap_or(usize::MAX))
            .map(|p| BookRow {
                id: p.id,
                title: p.post_title.clone(),
            })
            .collect())
    }

    async fn authors_for(&self, book_ids: &[u64]) -> Result<Vec<AuthorLink>, StoreError> {
        let wanted: HashSet<u64> = book_ids.iter().copied().collect();
        let author = TaxonomyKind::Author.as_str();

        let mut links: Vec<AuthorLink> = self
            .tables
            .term_relationships
            .iter()
            .filter(|rel| wanted.contains(&rel.object_id))
            .filter_map(|rel| {
                let tt = self
                    .taxonomy_record(rel.term_taxonomy_id)
                    .filter(|tt| tt.taxonomy == author)?;
                let term = self.term_record(tt.term_id)?;
                Some(AuthorLink {
                    book_id: rel.object_id,
                    id: term.term_id,
                    name: term.name.clone(),
                })
            })
            .collect();
        links.sort_by_key(|link| (link.id, link.book_id));
        Ok(links)
    }

    async fn thumbnails_for(&self, book_ids: &[u64]) -> Result<Vec<ThumbnailRow>, StoreError> {
        let wanted: HashSet<u64> = book_ids.iter().copied().collect();

        let mut rows: Vec<ThumbnailRow> = self
            .tables
            .posts
            .iter()
            .filter(|p| p.post_type == ATTACHMENT_POST_TYPE && wanted.contains(&p.post_parent))
            .map(|p| ThumbnailRow {
                book_id: p.post_parent,
                id: p.id,
                url: p.guid.clone(),
            })
            .collect();
        rows.sort_by_key(|row| row.id);
        Ok(rows)
    }

    async fn terms(&self, query: &TermQuery) -> Result<Vec<Term>, StoreError> {
        let kind = query.kind().as_str();

        let mut terms: Vec<Term> = self
            .tables
            .term_taxonomy
            .iter()
            .filter(|tt| tt.taxonomy == kind && tt.count > 0)
            .filter_map(|tt| {
                let term = self.term_record(tt.term_id)?;
                Some(Term {
                    id: term.term_id,
                    name: term.name.clone(),
                    slug: term.slug.clone(),
                    count: tt.count,
                })
            })
            .filter(|term| {
                query.clauses().iter().all(|clause| match clause {
                    TermClause::NameContains(search) => contains_ignore_case(&term.name, search),
                    TermClause::Id(id) => term.id == *id,
                })
            })
            .collect();
        terms.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then(a.id.cmp(&b.id))
        });
        Ok(terms)
    }

    async fn term(&self, id: u64) -> Result<Option<Term>, StoreError> {
        Ok(self.term_record(id).map(|term| {
            let count = self
                .tables
                .term_taxonomy
                .iter()
                .find(|tt| tt.term_id == id)
                .map_or(0, |tt| tt.count);
            Term {
                id: term.term_id,
                name: term.name.clone(),
                slug: term.slug.clone(),
                count,
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> MemoryStore {
        let fixture: Fixture = serde_json::from_value(json!({
            "posts": [
                {"id": 1, "post_title": "Draft", "post_type": "book", "post_status": "draft"},
                {"id": 2, "post_title": "Page", "post_type": "page"},
                {"id": 3, "post_title": "Foundation", "post_type": "book"},
                {"id": 4, "post_type": "attachment", "post_parent": 3, "guid": "http://x/f.jpg"}
            ],
            "terms": [
                {"term_id": 10, "name": "Asimov", "slug": "asimov"},
                {"term_id": 11, "name": "Unused", "slug": "unused"}
            ],
            "term_taxonomy": [
                {"term_taxonomy_id": 20, "term_id": 10, "taxonomy": "author", "count": 1},
                {"term_taxonomy_id": 21, "term_id": 11, "taxonomy": "author", "count": 0}
            ],
            "term_relationships": [
                {"object_id": 3, "term_taxonomy_id": 20}
            ]
        }))
        .unwrap();
        MemoryStore::new(fixture)
    }

    #[tokio::test]
    async fn only_published_books_are_listed() {
        let rows = store().books(&BookQuery::default()).await.unwrap();
        assert_eq!(
            rows,
            vec![BookRow {
                id: 3,
                title: "Foundation".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn unused_terms_are_hidden() {
        let terms = store()
            .terms(&TermQuery::new(TaxonomyKind::Author))
            .await
            .unwrap();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].name, "Asimov");
    }

    #[tokio::test]
    async fn single_lookup_ignores_usage() {
        let term = store().term(11).await.unwrap().unwrap();
        assert_eq!(term.count, 0);
        assert!(store().term(99).await.unwrap().is_none());
    }

    #[test]
    fn missing_fixture_file_is_reported() {
        let err = MemoryStore::load(Path::new("/nonexistent/library.json"))
            .err()
            .unwrap();
        assert!(matches!(err, StoreError::FixtureIo { .. }));
    }
}
