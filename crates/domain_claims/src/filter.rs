//! Read-side claim queries
//!
//! Everything here is a pure function of the claims passed in. Filters never
//! reorder: results keep the collection's insertion order.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::claim::{Claim, ClaimStatus};
use crate::saved_view::{SavedView, SavedViewCatalog};
use crate::store::ClaimStore;

/// Default number of search suggestions
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Ad hoc field filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldFilters {
    /// Empty means every status
    pub status: BTreeSet<ClaimStatus>,
    /// Case-insensitive substring of the claim type
    #[serde(rename = "type")]
    pub claim_type: Option<String>,
}

impl FieldFilters {
    /// Builds filters from query-string values
    ///
    /// `status` is a comma-separated list of status names. Tokens that do
    /// not name a status are ignored, so garbage degrades to no filter.
    pub fn from_raw(status: Option<&str>, claim_type: Option<&str>) -> Self {
        let status = status
            .unwrap_or_default()
            .split(',')
            .filter_map(|token| token.parse::<ClaimStatus>().ok())
            .collect();
        let claim_type = claim_type
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        Self { status, claim_type }
    }

    pub fn matches(&self, claim: &Claim) -> bool {
        matches_status(&self.status, claim) && matches_type(self.claim_type.as_deref(), claim)
    }
}

/// A complete visible-claims query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClaimQuery {
    pub search: Option<String>,
    pub filters: FieldFilters,
    pub saved_view: Option<String>,
}

impl ClaimQuery {
    /// Runs the query against the store's current contents
    pub fn run(&self, store: &ClaimStore, views: &SavedViewCatalog) -> Vec<Claim> {
        visible_claims(
            &store.list(),
            self.search.as_deref(),
            &self.filters,
            views.resolve(self.saved_view.as_deref()),
        )
    }
}

/// Derives the visible subset of `claims`
///
/// Search, field filters and the saved view's criteria are combined with
/// AND; the saved view narrows the field filters, it does not replace them.
pub fn visible_claims(
    claims: &[Claim],
    search_term: Option<&str>,
    filters: &FieldFilters,
    active_view: Option<&SavedView>,
) -> Vec<Claim> {
    let term = normalized_term(search_term);
    claims
        .iter()
        .filter(|claim| term.as_deref().map_or(true, |t| matches_search(t, claim)))
        .filter(|claim| filters.matches(claim))
        .filter(|claim| active_view.map_or(true, |view| view.criteria.matches(claim)))
        .cloned()
        .collect()
}

/// Quick-search entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSuggestion {
    pub id: String,
    pub label: String,
}

/// Up to `limit` claims matching `term`, labelled for a search dropdown
pub fn search_suggestions(claims: &[Claim], term: &str, limit: usize) -> Vec<SearchSuggestion> {
    let Some(term) = normalized_term(Some(term)) else {
        return Vec::new();
    };
    claims
        .iter()
        .filter(|claim| matches_search(&term, claim))
        .take(limit)
        .map(|claim| SearchSuggestion {
            id: claim.id.to_string(),
            label: format!("{} - {} ({})", claim.id, claim.policyholder, claim.claim_type),
        })
        .collect()
}

/// Claim counts for a dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimSummary {
    pub total: usize,
    /// Every status is present, zero when no claim has it
    pub by_status: BTreeMap<ClaimStatus, usize>,
}

pub fn summarize(claims: &[Claim]) -> ClaimSummary {
    let mut by_status: BTreeMap<ClaimStatus, usize> =
        ClaimStatus::ALL.into_iter().map(|s| (s, 0)).collect();
    for claim in claims {
        *by_status.entry(claim.status).or_insert(0) += 1;
    }
    ClaimSummary { total: claims.len(), by_status }
}

fn normalized_term(term: Option<&str>) -> Option<String> {
    term.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

fn matches_search(term: &str, claim: &Claim) -> bool {
    claim.id.to_string().to_lowercase().contains(term)
        || claim.policy_number.to_lowercase().contains(term)
        || claim.policyholder.to_lowercase().contains(term)
        || claim.claim_type.to_lowercase().contains(term)
}

pub(crate) fn matches_status(statuses: &BTreeSet<ClaimStatus>, claim: &Claim) -> bool {
    statuses.is_empty() || statuses.contains(&claim.status)
}

pub(crate) fn matches_type(claim_type: Option<&str>, claim: &Claim) -> bool {
    match claim_type.map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => claim.claim_type.to_lowercase().contains(&t.to_lowercase()),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_drops_unknown_statuses() {
        let filters = FieldFilters::from_raw(Some("APPROVED,bogus, settled"), Some("  "));
        assert_eq!(
            filters.status,
            BTreeSet::from([ClaimStatus::Approved, ClaimStatus::Settled])
        );
        assert_eq!(filters.claim_type, None);
    }

    #[test]
    fn test_from_raw_all_garbage_is_no_filter() {
        let filters = FieldFilters::from_raw(Some("nope,,"), None);
        assert_eq!(filters, FieldFilters::default());
    }
}
