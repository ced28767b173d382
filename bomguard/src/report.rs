//! Report aggregation
//!
//! Collects the outcome of every stage into one ordered structure. The
//! builder only appends; warnings keep the order in which they were emitted.

use crate::bom::classifier::MultipleDistributorWarning;
use crate::bom::distributor::{Bucket, Distributor};
use crate::bom::grouping::InconsistentGroupWarning;
use crate::catalog::advisor::SubstitutionSuggestion;
use crate::catalog::checker::{SanityStats, SanityVerdict};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketSummary {
    pub bucket: Bucket,
    pub name: String,
    pub components: usize,
    pub rows: usize,
    pub present: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogResults {
    pub distributor: Distributor,
    pub entries: usize,
    pub last_update: Option<NaiveDate>,
    pub stats: SanityStats,
    /// Non-PASS verdicts only.
    pub verdicts: Vec<SanityVerdict>,
    pub suggestions: Vec<SubstitutionSuggestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CatalogSection {
    /// No catalog was supplied.
    Missing,
    /// The catalog failed to load; catalog checks were skipped.
    Invalid { reason: String },
    Checked(CatalogResults),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub total_components: usize,
    pub buckets: Vec<BucketSummary>,
    pub multiple_distributor_warnings: Vec<MultipleDistributorWarning>,
    pub inconsistent_group_warnings: Vec<InconsistentGroupWarning>,
    pub catalog: CatalogSection,
}

impl Report {
    pub fn warning_count(&self) -> usize {
        self.multiple_distributor_warnings.len() + self.inconsistent_group_warnings.len()
    }

    /// Catalog results, if the catalog check ran.
    pub fn catalog_results(&self) -> Option<&CatalogResults> {
        match &self.catalog {
            CatalogSection::Checked(results) => Some(results),
            _ => None,
        }
    }

    /// True when anything needs a human to look at it.
    pub fn has_findings(&self) -> bool {
        self.warning_count() > 0
            || matches!(self.catalog, CatalogSection::Invalid { .. })
            || self
                .catalog_results()
                .map(|r| !r.verdicts.is_empty())
                .unwrap_or(false)
    }

    pub fn bucket(&self, bucket: Bucket) -> Option<&BucketSummary> {
        self.buckets.iter().find(|b| b.bucket == bucket)
    }
}

pub struct ReportBuilder {
    report: Report,
}

impl ReportBuilder {
    pub fn new(total_components: usize) -> Self {
        Self {
            report: Report {
                total_components,
                buckets: Vec::new(),
                multiple_distributor_warnings: Vec::new(),
                inconsistent_group_warnings: Vec::new(),
                catalog: CatalogSection::Missing,
            },
        }
    }

    pub fn bucket(&mut self, bucket: Bucket, components: usize, rows: usize) -> &mut Self {
        self.report.buckets.push(BucketSummary {
            bucket,
            name: bucket.name().to_string(),
            components,
            rows,
            present: rows > 0,
        });
        self
    }

    pub fn multiple_distributors(
        &mut self,
        warnings: impl IntoIterator<Item = MultipleDistributorWarning>,
    ) -> &mut Self {
        self.report.multiple_distributor_warnings.extend(warnings);
        self
    }

    pub fn inconsistent_groups(
        &mut self,
        warnings: impl IntoIterator<Item = InconsistentGroupWarning>,
    ) -> &mut Self {
        self.report.inconsistent_group_warnings.extend(warnings);
        self
    }

    pub fn catalog_invalid(&mut self, reason: impl Into<String>) -> &mut Self {
        self.report.catalog = CatalogSection::Invalid {
            reason: reason.into(),
        };
        self
    }

    pub fn catalog_checked(
        &mut self,
        distributor: Distributor,
        entries: usize,
        last_update: Option<NaiveDate>,
    ) -> &mut Self {
        self.report.catalog = CatalogSection::Checked(CatalogResults {
            distributor,
            entries,
            last_update,
            stats: SanityStats::default(),
            verdicts: Vec::new(),
            suggestions: Vec::new(),
        });
        self
    }

    /// Count a verdict; PASS verdicts are only counted.
    pub fn verdict(&mut self, verdict: SanityVerdict) -> &mut Self {
        if let CatalogSection::Checked(results) = &mut self.report.catalog {
            results.stats.record(&verdict.verdict);
            if !verdict.is_pass() {
                results.verdicts.push(verdict);
            }
        }
        self
    }

    pub fn suggestion(&mut self, suggestion: SubstitutionSuggestion) -> &mut Self {
        if let CatalogSection::Checked(results) = &mut self.report.catalog {
            results.suggestions.push(suggestion);
        }
        self
    }

    pub fn build(self) -> Report {
        self.report
    }
}
