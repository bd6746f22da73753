//! SQL composition for the catalog tables using SeaQuery.
//!
//! Table names carry the CMS prefix (`wp_` by default); every query aliases
//! its tables so clauses stay independent of the prefix.

use sea_query::{
    Alias, Cond, Expr, Func, JoinType, MysqlQueryBuilder, Order, Query,
    SelectStatement, SimpleExpr,
};

use crate::model::TaxonomyKind;
use crate::query::{
    BookClause, BookQuery, TermClause, TermQuery, ATTACHMENT_POST_TYPE, BOOK_POST_TYPE,
    PUBLISHED_STATUS,
};

const POSTS: &str = "p";
const ATTACHMENTS: &str = "a";
const RELATIONSHIPS: &str = "tr";
const TAXONOMY: &str = "tt";
const TERMS: &str = "t";

/// Renders catalog queries for a given table prefix.
#[derive(Debug, Clone)]
pub struct SqlComposer {
    prefix: String,
}

impl SqlComposer {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn table(&self, name: &str) -> Alias {
        Alias::new(format!("{}{}", self.prefix, name))
    }

    /// Primary book listing.
    pub fn books(&self, query: &BookQuery) -> String {
        let mut select = Query::select();
        select
            .expr_as(col(POSTS, "ID"), Alias::new("id"))
            .expr_as(col(POSTS, "post_title"), Alias::new("title"))
            .from_as(self.table("posts"), Alias::new(POSTS))
            .and_where(col(POSTS, "post_type").eq(BOOK_POST_TYPE))
            .and_where(col(POSTS, "post_status").eq(PUBLISHED_STATUS));

        for clause in query.clauses() {
            match clause {
                BookClause::TitleContains(search) => {
                    select.and_where(contains(col(POSTS, "post_title"), search));
                }
                BookClause::InTerm(term_id) => self.join_term(&mut select, *term_id),
                BookClause::Before(last_id) => {
                    select.and_where(col(POSTS, "ID").lt(*last_id));
                }
            }
        }

        select
            .order_by((Alias::new(POSTS), Alias::new("ID")), Order::Desc)
            .limit(query.limit());

        select.to_string(MysqlQueryBuilder)
    }

    /// Join through the term relationship tables, keeping rows linked to `term_id`.
    fn join_term(&self, select: &mut SelectStatement, term_id: u64) {
        select
            .distinct()
            .join_as(
                JoinType::InnerJoin,
                self.table("term_relationships"),
                Alias::new(RELATIONSHIPS),
                col(POSTS, "ID").equals((Alias::new(RELATIONSHIPS), Alias::new("object_id"))),
            )
            .join_as(
                JoinType::InnerJoin,
                self.table("term_taxonomy"),
                Alias::new(TAXONOMY),
                Cond::all()
                    .add(col(RELATIONSHIPS, "term_taxonomy_id").equals((
                        Alias::new(TAXONOMY),
                        Alias::new("term_taxonomy_id"),
                    )))
                    .add(col(TAXONOMY, "term_id").eq(term_id)),
            );
    }

    /// Author terms for a page of books.
    pub fn authors_for(&self, book_ids: &[u64]) -> String {
        Query::select()
            .expr_as(col(RELATIONSHIPS, "object_id"), Alias::new("book_id"))
            .expr_as(col(TERMS, "term_id"), Alias::new("id"))
            .expr_as(col(TERMS, "name"), Alias::new("name"))
            .from_as(self.table("term_relationships"), Alias::new(RELATIONSHIPS))
            .join_as(
                JoinType::InnerJoin,
                self.table("term_taxonomy"),
                Alias::new(TAXONOMY),
                col(RELATIONSHIPS, "term_taxonomy_id")
                    .equals((Alias::new(TAXONOMY), Alias::new("term_taxonomy_id"))),
            )
            .join_as(
                JoinType::InnerJoin,
                self.table("terms"),
                Alias::new(TERMS),
                col(TAXONOMY, "term_id").equals((Alias::new(TERMS), Alias::new("term_id"))),
            )
            .and_where(col(TAXONOMY, "taxonomy").eq(TaxonomyKind::Author.as_str()))
            .and_where(col(RELATIONSHIPS, "object_id").is_in(book_ids.iter().copied()))
            .order_by((Alias::new(TERMS), Alias::new("term_id")), Order::Asc)
            .to_string(MysqlQueryBuilder)
    }

    /// Attachments parented to a page of books.
    pub fn thumbnails_for(&self, book_ids: &[u64]) -> String {
        Query::select()
            .expr_as(col(ATTACHMENTS, "post_parent"), Alias::new("book_id"))
            .expr_as(col(ATTACHMENTS, "ID"), Alias::new("id"))
            .expr_as(col(ATTACHMENTS, "guid"), Alias::new("url"))
            .from_as(self.table("posts"), Alias::new(ATTACHMENTS))
            .and_where(col(ATTACHMENTS, "post_type").eq(ATTACHMENT_POST_TYPE))
            .and_where(col(ATTACHMENTS, "post_parent").is_in(book_ids.iter().copied()))
            .order_by((Alias::new(ATTACHMENTS), Alias::new("ID")), Order::Asc)
            .to_string(MysqlQueryBuilder)
    }

    /// In-use terms of one taxonomy.
    pub fn terms(&self, query: &TermQuery) -> String {
        let mut select = Query::select();
        select
            .expr_as(col(TERMS, "term_id"), Alias::new("id"))
            .expr_as(col(TERMS, "name"), Alias::new("name"))
            .expr_as(col(TERMS, "slug"), Alias::new("slug"))
            .expr_as(col(TAXONOMY, "count"), Alias::new("count"))
            .from_as(self.table("term_taxonomy"), Alias::new(TAXONOMY))
            .join_as(
                JoinType::InnerJoin,
                self.table("terms"),
                Alias::new(TERMS),
                col(TAXONOMY, "term_id").equals((Alias::new(TERMS), Alias::new("term_id"))),
            )
            .and_where(col(TAXONOMY, "taxonomy").eq(query.kind().as_str()))
            .and_where(col(TAXONOMY, "count").gt(0));

        for clause in query.clauses() {
            match clause {
                TermClause::NameContains(search) => {
                    select.and_where(contains(col(TERMS, "name"), search));
                }
                TermClause::Id(id) => {
                    select.and_where(col(TERMS, "term_id").eq(*id));
                }
            }
        }

        select
            .order_by((Alias::new(TERMS), Alias::new("name")), Order::Asc)
            .order_by((Alias::new(TERMS), Alias::new("term_id")), Order::Asc)
            .to_string(MysqlQueryBuilder)
    }

    /// One term by id, whatever its taxonomy.
    pub fn term(&self, id: u64) -> String {
        Query::select()
            .expr_as(col(TERMS, "term_id"), Alias::new("id"))
            .expr_as(col(TERMS, "name"), Alias::new("name"))
            .expr_as(col(TERMS, "slug"), Alias::new("slug"))
            .expr_as(
                Func::coalesce([
                    SimpleExpr::from(col(TAXONOMY, "count")),
                    SimpleExpr::from(Expr::val(0)),
                ]),
                Alias::new("count"),
            )
            .from_as(self.table("terms"), Alias::new(TERMS))
            .join_as(
                JoinType::LeftJoin,
                self.table("term_taxonomy"),
                Alias::new(TAXONOMY),
                col(TERMS, "term_id").equals((Alias::new(TAXONOMY), Alias::new("term_id"))),
            )
            .and_where(col(TERMS, "term_id").eq(id))
            .limit(1)
            .to_string(MysqlQueryBuilder)
    }
}

fn col(table: &str, column: &str) -> Expr {
    Expr::col((Alias::new(table), Alias::new(column)))
}

/// Case-insensitive `LIKE '%needle%'` with wildcards in the needle escaped.
fn contains(column: Expr, needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like_wildcards(&needle.to_lowercase()));
    Expr::expr(Func::lower(column)).like(pattern)
}

/// Escape LIKE metacharacters so user input matches literally.
pub(crate) fn escape_like_wildcards(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
