use serde::{Deserialize, Serialize};

/// A published book with its resolved relations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    pub id: u64,
    pub title: String,
    pub authors: Vec<Author>,
    /// URL of the attachment parented to this book, if any
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    pub id: u64,
    pub name: String,
}

/// A taxonomy term as listed by `/authors` and `/categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Term {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub count: i64,
}

/// Shape returned by single-term lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermSummary {
    pub id: u64,
    pub name: String,
    pub slug: String,
}

impl From<Term> for TermSummary {
    fn from(term: Term) -> Self {
        Self {
            id: term.id,
            name: term.name,
            slug: term.slug,
        }
    }
}

/// Taxonomies exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxonomyKind {
    Author,
    Category,
}

impl TaxonomyKind {
    /// Value stored in the `taxonomy` column.
    pub fn as_str(self) -> &'static str {
        match self {
            TaxonomyKind::Author => "author",
            TaxonomyKind::Category => "category",
        }
    }

    /// Resolve the plural collection name used in routes (`authors`, `categories`).
    pub fn from_collection(collection: &str) -> Option<Self> {
        match collection {
            "authors" => Some(TaxonomyKind::Author),
            "categories" => Some(TaxonomyKind::Category),
            _ => None,
        }
    }
}

/// Primary row of a book query, before relations are attached.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct BookRow {
    pub id: u64,
    pub title: String,
}

/// An author term linked to a book.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct AuthorLink {
    pub book_id: u64,
    pub id: u64,
    pub name: String,
}

/// An attachment parented to a book.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ThumbnailRow {
    pub book_id: u64,
    pub id: u64,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_names_map_to_kinds() {
        assert_eq!(
            TaxonomyKind::from_collection("authors"),
            Some(TaxonomyKind::Author)
        );
        assert_eq!(
            TaxonomyKind::from_collection("categories"),
            Some(TaxonomyKind::Category)
        );
        assert_eq!(TaxonomyKind::from_collection("tags"), None);
    }

    #[test]
    fn book_serializes_null_thumbnail() {
        let book = Book {
            id: 1,
            title: "Solaris".to_string(),
            authors: vec![],
            thumbnail: None,
        };
        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": 1, "title": "Solaris", "authors": [], "thumbnail": null})
        );
    }
}
