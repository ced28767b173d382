//! Cheaper-part substitution advice.

use crate::catalog::normalize::MatchPolicy;
use crate::catalog::{Catalog, CatalogEntry, Tier};
use crate::parser::schema::ComponentRecord;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubstitutionSuggestion {
    pub from_reference: String,
    pub from_identifier: String,
    pub from_tier: Tier,
    pub suggested_identifier: String,
    pub suggested_tier: Tier,
}

impl fmt::Display for SubstitutionSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] Part {} ({}) could replace {} ({})",
            self.from_reference,
            self.suggested_identifier,
            self.suggested_tier,
            self.from_identifier,
            self.from_tier
        )
    }
}

/// Finds cheapest-tier catalog parts equivalent to a more expensive one.
pub struct SubstitutionAdvisor<'a> {
    policy: MatchPolicy,
    /// Cheapest-tier entries in natural identifier order.
    candidates: Vec<&'a CatalogEntry>,
}

impl<'a> SubstitutionAdvisor<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        let mut candidates: Vec<&CatalogEntry> = catalog
            .entries()
            .iter()
            .filter(|e| e.tier.is_cheapest())
            .collect();
        candidates.sort_by(|a, b| natord::compare(&a.identifier, &b.identifier));
        Self {
            policy: MatchPolicy::default(),
            candidates,
        }
    }

    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Suggest a replacement for `component`, whose catalog entry is `entry`.
    ///
    /// Only called after a successful lookup; parts already in the cheapest
    /// tier never get a suggestion.
    pub fn suggest(
        &self,
        component: &ComponentRecord,
        entry: &CatalogEntry,
    ) -> Option<SubstitutionSuggestion> {
        if entry.tier.is_cheapest() {
            return None;
        }

        let candidate = self.candidates.iter().find(|c| {
            c.identifier != entry.identifier
                && self.policy.values_match(&component.value, &c.expected_value)
                && self
                    .policy
                    .footprints_match(&component.footprint, &c.expected_footprint)
        })?;

        tracing::debug!(
            "{}: {} could replace {}",
            component.reference,
            candidate.identifier,
            entry.identifier
        );
        Some(SubstitutionSuggestion {
            from_reference: component.reference.clone(),
            from_identifier: entry.identifier.clone(),
            from_tier: entry.tier,
            suggested_identifier: candidate.identifier.clone(),
            suggested_tier: candidate.tier,
        })
    }
}
