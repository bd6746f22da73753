use anyhow::Context;
use axum::extract::{Path, State};
use library_db::{TaxonomyKind, TermSummary};
use library_http::{
    params::{parse_id, LenientQuery},
    AppError, Envelope,
};

use super::models::{ListTermsParams, TermPayload};
use super::TaxonomiesState;

/// Message of the 404 returned by single-term lookups.
pub const TERM_NOT_FOUND: &str = "No term found!";

/// `GET /authors`
pub(super) async fn list_authors(
    state: State<TaxonomiesState>,
    params: LenientQuery<ListTermsParams>,
) -> Result<Envelope<TermPayload>, AppError> {
    list_terms(TaxonomyKind::Author, state, params).await
}

/// `GET /categories`
pub(super) async fn list_categories(
    state: State<TaxonomiesState>,
    params: LenientQuery<ListTermsParams>,
) -> Result<Envelope<TermPayload>, AppError> {
    list_terms(TaxonomyKind::Category, state, params).await
}

async fn list_terms(
    kind: TaxonomyKind,
    State(state): State<TaxonomiesState>,
    LenientQuery(params): LenientQuery<ListTermsParams>,
) -> Result<Envelope<TermPayload>, AppError> {
    let query = params.to_query(kind);

    let terms = state
        .catalog
        .list_terms(&query)
        .await
        .with_context(|| format!("failed to list {} terms", kind.as_str()))?;

    Ok(Envelope::new(TermPayload::from_results(&query, terms)))
}

/// `GET /taxonomies/{id}`
pub(super) async fn get_term(
    State(state): State<TaxonomiesState>,
    Path(raw_id): Path<String>,
) -> Result<Envelope<TermSummary>, AppError> {
    let Some(id) = parse_id(&raw_id) else {
        return Err(AppError::not_found(TERM_NOT_FOUND));
    };

    let term = state
        .catalog
        .get_term(id)
        .await
        .with_context(|| format!("failed to look up term {}", id))?
        .ok_or_else(|| AppError::not_found(TERM_NOT_FOUND))?;

    Ok(Envelope::new(TermSummary::from(term)))
}
