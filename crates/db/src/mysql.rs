use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use crate::error::StoreError;
use crate::model::{AuthorLink, BookRow, Term, ThumbnailRow};
use crate::query::{BookQuery, TermQuery};
use crate::settings::DatabaseSettings;
use crate::sql::SqlComposer;
use crate::store::LibraryStore;

/// Catalog backed by the CMS MySQL database.
pub struct MySqlStore {
    pool: MySqlPool,
    sql: SqlComposer,
}

impl MySqlStore {
    /// Open a connection pool to the configured database.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, StoreError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect(&settings.url)
            .await?;

        tracing::info!(
            table_prefix = %settings.table_prefix,
            max_connections = settings.max_connections,
            "connected to MySQL catalog"
        );

        Ok(Self::with_pool(pool, &settings.table_prefix))
    }

    pub fn with_pool(pool: MySqlPool, table_prefix: &str) -> Self {
        Self {
            pool,
            sql: SqlComposer::new(table_prefix),
        }
    }
}

#[async_trait]
impl LibraryStore for MySqlStore {
    fn name(&self) -> &'static str {
        "mysql"
    }

    async fn books(&self, query: &BookQuery) -> Result<Vec<BookRow>, StoreError> {
        let sql = self.sql.books(query);
        tracing::debug!(%sql, "listing books");
        let rows = sqlx::query_as::<_, BookRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn authors_for(&self, book_ids: &[u64]) -> Result<Vec<AuthorLink>, StoreError> {
        if book_ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = self.sql.authors_for(book_ids);
        let rows = sqlx::query_as::<_, AuthorLink>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn thumbnails_for(&self, book_ids: &[u64]) -> Result<Vec<ThumbnailRow>, StoreError> {
        if book_ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = self.sql.thumbnails_for(book_ids);
        let rows = sqlx::query_as::<_, ThumbnailRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn terms(&self, query: &TermQuery) -> Result<Vec<Term>, StoreError> {
        let sql = self.sql.terms(query);
        tracing::debug!(%sql, kind = query.kind().as_str(), "listing terms");
        let rows = sqlx::query_as::<_, Term>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn term(&self, id: u64) -> Result<Option<Term>, StoreError> {
        let sql = self.sql.term(id);
        let row = sqlx::query_as::<_, Term>(&sql)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}
