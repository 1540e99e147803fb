//! Repository for host and network search.
//!
//! Names and descriptions are matched by word prefix through
//! `to_tsvector('simple', ...)`; addresses are matched by string prefix.
//! Each query term is matched on its own, so one term may hit the name and
//! another an address.

use sqlx::PgPool;
use hostwatch_core::search::{
    build_prefix_tsquery, clamp_limit, clamp_offset, prefix_terms, SearchKind,
    DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT,
};
use hostwatch_core::types::DbId;

use crate::models::search::{SearchResponse, SearchResultRow};

/// Every term must prefix a word of the name or description, or one of the
/// addresses. `$3` and `$4` are the terms' tsqueries and `LIKE` patterns.
const HOST_SQL: &str = "\
    SELECT 'host'::text AS kind, id, name, description, \
           ts_rank(to_tsvector('simple', name || ' ' || description), \
                   to_tsquery('simple', $2))::real AS rank \
    FROM hosts \
    WHERE user_id = $1 \
      AND NOT EXISTS ( \
          SELECT 1 FROM unnest($3::text[], $4::text[]) AS term(tsquery, pattern) \
          WHERE NOT (to_tsvector('simple', name || ' ' || description) \
                         @@ to_tsquery('simple', term.tsquery) \
                     OR ipv4 LIKE term.pattern \
                     OR lower(ipv6) LIKE lower(term.pattern)))";

const NETWORK_SQL: &str = "\
    SELECT 'network'::text AS kind, id, name, description, \
           ts_rank(to_tsvector('simple', name || ' ' || description), \
                   to_tsquery('simple', $2))::real AS rank \
    FROM networks \
    WHERE user_id = $1 \
      AND to_tsvector('simple', name || ' ' || description) @@ to_tsquery('simple', $2)";

/// Provides search over a user's hosts and networks.
pub struct SearchRepo;

impl SearchRepo {
    /// Search the given kinds for `q`, merging results by rank.
    ///
    /// A query with no usable terms yields an empty response.
    pub async fn search(
        pool: &PgPool,
        user_id: DbId,
        q: &str,
        kinds: &[SearchKind],
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<SearchResponse, sqlx::Error> {
        let Some(tsquery) = build_prefix_tsquery(q) else {
            return Ok(SearchResponse {
                total_count: 0,
                results: Vec::new(),
            });
        };

        let (term_queries, term_patterns): (Vec<String>, Vec<String>) = prefix_terms(q)
            .into_iter()
            .map(|t| (t.tsquery, t.pattern))
            .unzip();

        let limit = clamp_limit(limit, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT);
        let offset = clamp_offset(offset);

        let mut all_results: Vec<SearchResultRow> = Vec::new();

        for kind in kinds {
            let rows = match kind {
                SearchKind::Host => {
                    sqlx::query_as::<_, SearchResultRow>(HOST_SQL)
                        .bind(user_id)
                        .bind(&tsquery)
                        .bind(&term_queries)
                        .bind(&term_patterns)
                        .fetch_all(pool)
                        .await?
                }
                SearchKind::Network => {
                    sqlx::query_as::<_, SearchResultRow>(NETWORK_SQL)
                        .bind(user_id)
                        .bind(&tsquery)
                        .fetch_all(pool)
                        .await?
                }
            };
            all_results.extend(rows);
        }

        // Sort merged results by rank descending, then name for stability.
        all_results.sort_by(|a, b| {
            b.rank
                .partial_cmp(&a.rank)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.id.cmp(&b.id))
        });

        let total_count = all_results.len() as i64;
        let results = all_results
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();

        Ok(SearchResponse {
            total_count,
            results,
        })
    }
}
