use anyhow::Context;
use axum::extract::State;
use library_db::Book;
use library_http::{params::LenientQuery, AppError, Envelope};

use super::models::ListBooksParams;
use super::BooksState;

/// `GET /books`: published books, newest first, with authors and thumbnail.
pub(super) async fn list_books(
    State(state): State<BooksState>,
    LenientQuery(params): LenientQuery<ListBooksParams>,
) -> Result<Envelope<Vec<Book>>, AppError> {
    let query = params.to_query(&state.library);

    let books = state
        .catalog
        .list_books(&query)
        .await
        .context("failed to list books")?;

    tracing::debug!(
        target: "library.books",
        count = books.len(),
        limit = query.limit(),
        "books listed"
    );

    Ok(Envelope::new(books))
}
