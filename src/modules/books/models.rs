use library_db::BookQuery;
use library_http::params::lenient_id;
use library_kernel::settings::LibrarySettings;
use serde::Deserialize;

/// Query parameters accepted by `GET /books`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListBooksParams {
    /// Title substring
    #[serde(default)]
    pub s: Option<String>,
    /// Taxonomy term the books must be related to
    #[serde(default, rename = "termId", deserialize_with = "lenient_id")]
    pub term_id: Option<u64>,
    /// Page size
    #[serde(default, deserialize_with = "lenient_id")]
    pub limit: Option<u64>,
    /// Id of the last book on the previous page
    #[serde(default, rename = "lastId", deserialize_with = "lenient_id")]
    pub last_id: Option<u64>,
}

impl ListBooksParams {
    pub fn to_query(&self, library: &LibrarySettings) -> BookQuery {
        BookQuery::new(library.page_size(self.limit))
            .with_search(self.s.as_deref())
            .with_term(self.term_id)
            .with_cursor(self.last_id)
    }
}
