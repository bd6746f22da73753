//! Immutable query specifications.
//!
//! A query starts from its base predicate and accumulates clauses through
//! `with_*` steps that only add a clause when the input is present. Backends
//! interpret the finished value in a single execution call.

use crate::model::TaxonomyKind;

/// Post type of book records.
pub const BOOK_POST_TYPE: &str = "book";
/// Post type of media attachments.
pub const ATTACHMENT_POST_TYPE: &str = "attachment";
/// Post status of published records.
pub const PUBLISHED_STATUS: &str = "publish";

/// Row limit used when a caller does not supply one.
pub const DEFAULT_LIMIT: u64 = 10;

/// A filter added on top of the `type = book AND status = publish` base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookClause {
    /// Case-insensitive substring match on the title.
    TitleContains(String),
    /// Book is related to this taxonomy term id.
    InTerm(u64),
    /// Cursor boundary: `id < last_id`.
    Before(u64),
}

/// Specification of a book listing, ordered by id descending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookQuery {
    clauses: Vec<BookClause>,
    limit: u64,
}

impl BookQuery {
    pub fn new(limit: u64) -> Self {
        Self {
            clauses: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Add a title match when `search` is present and non-empty; the needle
    /// is matched as given, whitespace included.
    pub fn with_search(self, search: Option<&str>) -> Self {
        match search.filter(|s| !s.is_empty()) {
            Some(s) => self.with_clause(BookClause::TitleContains(s.to_string())),
            None => self,
        }
    }

    /// Restrict to books related to `term_id` when present.
    pub fn with_term(self, term_id: Option<u64>) -> Self {
        match term_id.filter(|id| *id > 0) {
            Some(id) => self.with_clause(BookClause::InTerm(id)),
            None => self,
        }
    }

    /// Continue after `last_id` when present.
    pub fn with_cursor(self, last_id: Option<u64>) -> Self {
        match last_id.filter(|id| *id > 0) {
            Some(id) => self.with_clause(BookClause::Before(id)),
            None => self,
        }
    }

    fn with_clause(mut self, clause: BookClause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn clauses(&self) -> &[BookClause] {
        &self.clauses
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl Default for BookQuery {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

/// A filter added on top of the `taxonomy = kind AND count > 0` base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermClause {
    NameContains(String),
    Id(u64),
}

/// Specification of a term listing, ordered by name ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermQuery {
    kind: TaxonomyKind,
    clauses: Vec<TermClause>,
}

impl TermQuery {
    pub fn new(kind: TaxonomyKind) -> Self {
        Self {
            kind,
            clauses: Vec::new(),
        }
    }

    pub fn with_search(mut self, search: Option<&str>) -> Self {
        if let Some(s) = search.filter(|s| !s.is_empty()) {
            self.clauses.push(TermClause::NameContains(s.to_string()));
        }
        self
    }

    pub fn with_id(mut self, id: Option<u64>) -> Self {
        if let Some(id) = id.filter(|id| *id > 0) {
            self.clauses.push(TermClause::Id(id));
        }
        self
    }

    pub fn kind(&self) -> TaxonomyKind {
        self.kind
    }

    pub fn clauses(&self) -> &[TermClause] {
        &self.clauses
    }

    /// Whether the query was narrowed to a single term id.
    pub fn is_single(&self) -> bool {
        self.clauses
            .iter()
            .any(|clause| matches!(clause, TermClause::Id(_)))
    }
}
