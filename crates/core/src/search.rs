//! Host and network search helpers.
//!
//! Search matches word prefixes: every term the user types must begin some
//! word of an indexed field. Hosts index name, description and both
//! addresses; networks index name and description.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of search results per page.
pub const DEFAULT_SEARCH_LIMIT: i64 = 20;

/// Maximum number of search results per page.
pub const MAX_SEARCH_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Searchable kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    Host,
    Network,
}

impl SearchKind {
    pub const ALL: [SearchKind; 2] = [SearchKind::Host, SearchKind::Network];

    pub fn as_str(self) -> &'static str {
        match self {
            SearchKind::Host => "host",
            SearchKind::Network => "network",
        }
    }

    /// Columns that make up the search document for this kind.
    pub fn indexed_fields(self) -> &'static [&'static str] {
        match self {
            SearchKind::Host => &["name", "description", "ipv4", "ipv6"],
            SearchKind::Network => &["name", "description"],
        }
    }
}

/// Parse a comma-separated list of kinds. `None` or blank means all kinds.
pub fn parse_kinds(raw: Option<&str>) -> Result<Vec<SearchKind>, CoreError> {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return Ok(SearchKind::ALL.to_vec());
    };

    let mut kinds = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let kind = match part {
            "host" => SearchKind::Host,
            "network" => SearchKind::Network,
            other => {
                return Err(CoreError::Validation(format!(
                    "Invalid search kind '{other}'. Valid kinds: host, network"
                )))
            }
        };
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    Ok(kinds)
}

// ---------------------------------------------------------------------------
// Query builder helpers
// ---------------------------------------------------------------------------

/// Sanitize user input into a list of terms suitable for tsquery construction.
///
/// Keeps alphanumerics plus `_`, `.` and `:` inside a term so addresses such
/// as `10.0.0.1` or `fe80::1` survive.
fn sanitize_terms(query: &str) -> Option<Vec<&str>> {
    let terms: Vec<&str> = query
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric() && c != '_'))
        .filter(|t| !t.is_empty())
        .filter(|t| t.chars().all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | ':')))
        .collect();

    if terms.is_empty() {
        None
    } else {
        Some(terms)
    }
}

/// Build a prefix tsquery where every term is prefix-matched.
///
/// Terms are quoted so that `.` and `:` inside addresses are taken literally.
///
/// ```
/// use hostwatch_core::search::build_prefix_tsquery;
/// assert_eq!(build_prefix_tsquery("web"), Some("'web':*".to_string()));
/// assert_eq!(build_prefix_tsquery("web db"), Some("'web':* & 'db':*".to_string()));
/// assert_eq!(build_prefix_tsquery(""), None);
/// ```
pub fn build_prefix_tsquery(query: &str) -> Option<String> {
    let terms = sanitize_terms(query)?;
    Some(
        terms
            .iter()
            .map(|t| format!("'{}':*", t.to_lowercase()))
            .collect::<Vec<_>>()
            .join(" & "),
    )
}

/// Build a `LIKE` pattern matching values that start with `query`.
///
/// Used for address fields, which the text parser would split apart.
///
/// ```
/// use hostwatch_core::search::like_prefix_pattern;
/// assert_eq!(like_prefix_pattern(" 10.0 "), Some("10.0%".to_string()));
/// assert_eq!(like_prefix_pattern("50%_off"), Some("50\\%\\_off%".to_string()));
/// ```
pub fn like_prefix_pattern(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut pattern = String::with_capacity(trimmed.len() + 1);
    for c in trimmed.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Some(pattern)
}

/// One search term in both of its matching forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixTerm {
    /// Prefix tsquery for text fields, e.g. `'web':*`.
    pub tsquery: String,
    /// `LIKE` pattern for address fields, e.g. `10.0%`.
    pub pattern: String,
}

/// Split a query into terms that must each match some indexed field.
///
/// A host matches `"db 10.0"` when `db` prefixes a word of its name or
/// description and `10.0` prefixes one of its addresses, or any other mix.
pub fn prefix_terms(query: &str) -> Vec<PrefixTerm> {
    sanitize_terms(query)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|term| {
            Some(PrefixTerm {
                tsquery: format!("'{}':*", term.to_lowercase()),
                pattern: like_prefix_pattern(term)?,
            })
        })
        .collect()
}

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
