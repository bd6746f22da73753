use library_db::{TaxonomyKind, Term, TermQuery};
use library_http::params::lenient_id;
use serde::{Deserialize, Serialize};

/// Query parameters accepted by `GET /authors` and `GET /categories`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTermsParams {
    /// Name substring
    #[serde(default)]
    pub s: Option<String>,
    /// Narrow the listing to one term
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<u64>,
}

impl ListTermsParams {
    pub fn to_query(&self, kind: TaxonomyKind) -> TermQuery {
        TermQuery::new(kind)
            .with_search(self.s.as_deref())
            .with_id(self.id)
    }
}

/// `data` of a term listing: a list, or the single term when an `id` matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TermPayload {
    One(Term),
    Many(Vec<Term>),
}

impl TermPayload {
    pub fn from_results(query: &TermQuery, mut terms: Vec<Term>) -> Self {
        if query.is_single() && !terms.is_empty() {
            TermPayload::One(terms.swap_remove(0))
        } else {
            TermPayload::Many(terms)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(id: u64) -> Term {
        Term {
            id,
            name: format!("term-{id}"),
            slug: format!("term-{id}"),
            count: 1,
        }
    }

    #[test]
    fn listing_stays_a_list() {
        let query = ListTermsParams::default().to_query(TaxonomyKind::Author);
        let payload = TermPayload::from_results(&query, vec![term(1), term(2)]);
        assert!(matches!(payload, TermPayload::Many(ref terms) if terms.len() == 2));
    }

    #[test]
    fn id_match_unwraps_single_term() {
        let params = ListTermsParams {
            s: None,
            id: Some(2),
        };
        let query = params.to_query(TaxonomyKind::Author);
        let payload = TermPayload::from_results(&query, vec![term(2)]);

        assert_eq!(payload, TermPayload::One(term(2)));
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({"id": 2, "name": "term-2", "slug": "term-2", "count": 1})
        );
    }

    #[test]
    fn id_without_match_is_empty_list() {
        let params = ListTermsParams {
            s: None,
            id: Some(99),
        };
        let query = params.to_query(TaxonomyKind::Category);
        let payload = TermPayload::from_results(&query, Vec::new());
        assert_eq!(serde_json::to_value(&payload).unwrap(), serde_json::json!([]));
    }
}
