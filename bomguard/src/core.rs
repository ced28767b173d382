//! Core BoM pipeline shared by the CLI and library users.
//! No file writing; outputs are structured rows and a report.

use std::path::Path;

use crate::bom::classifier::Classifier;
use crate::bom::distributor::{Bucket, Distributor};
use crate::bom::grouping::GroupingEngine;
use crate::bom::rows::{build_row_sets, RowSet};
use crate::catalog::advisor::SubstitutionAdvisor;
use crate::catalog::checker::SanityChecker;
use crate::catalog::normalize::MatchPolicy;
use crate::catalog::{Catalog, CatalogError};
use crate::parser::records::load_components;
use crate::parser::schema::ComponentRecord;
use crate::report::{Report, ReportBuilder};

#[derive(Debug, thiserror::Error)]
pub enum BomGuardError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Other(String),
}

/// Options for a BoM run. Passed explicitly; there is no global state.
#[derive(Clone, Debug)]
pub struct BomOptions {
    /// Distributors in the order they are tried on each symbol.
    pub priority: Vec<Distributor>,
    pub match_policy: MatchPolicy,
    /// Compare designator letters against the catalog `Type` column.
    pub check_part_type: bool,
    pub suggest_substitutes: bool,
}

impl Default for BomOptions {
    fn default() -> Self {
        Self {
            priority: Distributor::PRIORITY.to_vec(),
            match_policy: MatchPolicy::Strict,
            check_part_type: false,
            suggest_substitutes: true,
        }
    }
}

/// Availability of the reference catalog for one run.
#[derive(Debug, Clone, Copy)]
pub enum CatalogState<'a> {
    Missing,
    Invalid(&'a CatalogError),
    Ready(&'a Catalog),
}

impl<'a> CatalogState<'a> {
    pub fn from_result(result: &'a Result<Catalog, CatalogError>) -> Self {
        match result {
            Ok(catalog) => CatalogState::Ready(catalog),
            Err(e) => CatalogState::Invalid(e),
        }
    }
}

impl<'a> From<Option<&'a Catalog>> for CatalogState<'a> {
    fn from(catalog: Option<&'a Catalog>) -> Self {
        catalog.map_or(CatalogState::Missing, CatalogState::Ready)
    }
}

/// Everything a run produces, ready for the writers.
#[derive(Debug, Clone)]
pub struct BomOutput {
    /// Non-empty row-sets only.
    pub row_sets: Vec<RowSet>,
    pub report: Report,
}

impl BomOutput {
    pub fn row_set(&self, bucket: Bucket) -> Option<&RowSet> {
        self.row_sets.iter().find(|s| s.bucket == bucket)
    }
}

/// Core BoM API used by the CLI.
pub struct BomGuardCore;

impl BomGuardCore {
    /// Classify, group and (when a catalog is available) sanity-check a
    /// component list. Never fails: catalog problems are reported, not raised.
    pub fn process(
        components: &[ComponentRecord],
        catalog: CatalogState<'_>,
        options: &BomOptions,
    ) -> BomOutput {
        let classifier = Classifier::new(options.priority.clone());
        let priority = classifier.priority();
        let classification = classifier.classify_all(components);
        let assignments = &classification.assignments;

        let groups = GroupingEngine::group(components, assignments, priority);
        let inconsistencies = GroupingEngine::inconsistencies(&groups, components, assignments);
        let row_sets = build_row_sets(&groups, components, assignments, priority);

        let mut report = ReportBuilder::new(components.len());
        let buckets = priority
            .iter()
            .map(|&d| Bucket::Distributor(d))
            .chain(std::iter::once(Bucket::Orphan));
        for bucket in buckets {
            let rows = row_sets
                .iter()
                .find(|s| s.bucket == bucket)
                .map_or(0, |s| s.rows.len());
            report.bucket(bucket, classification.count(bucket), rows);
        }
        report
            .multiple_distributors(classification.warnings.iter().cloned())
            .inconsistent_groups(inconsistencies);

        match catalog {
            CatalogState::Missing => {}
            CatalogState::Invalid(e) => {
                tracing::warn!("Catalog unavailable, skipping sanity check: {}", e);
                report.catalog_invalid(e.to_string());
            }
            CatalogState::Ready(catalog) => {
                report.catalog_checked(
                    catalog.distributor(),
                    catalog.len(),
                    catalog.last_update(),
                );
                let checker = SanityChecker::new(catalog)
                    .with_policy(options.match_policy)
                    .with_part_type_check(options.check_part_type);
                let advisor = SubstitutionAdvisor::new(catalog).with_policy(options.match_policy);

                for &i in classification.members(Bucket::Distributor(catalog.distributor())) {
                    let component = &components[i];
                    let Some(identifier) = assignments[i].identifier.as_deref() else {
                        continue;
                    };
                    report.verdict(checker.check(component, identifier));

                    if !options.suggest_substitutes {
                        continue;
                    }
                    if let Some(suggestion) = catalog
                        .get(identifier)
                        .and_then(|entry| advisor.suggest(component, entry))
                    {
                        report.suggestion(suggestion);
                    }
                }
            }
        }

        BomOutput {
            row_sets,
            report: report.build(),
        }
    }

    /// Load the component list and optional catalog from disk and run.
    ///
    /// A component list that cannot be read is fatal; a catalog that cannot
    /// be read only disables the catalog checks.
    pub fn process_files(
        components_path: &Path,
        catalog_path: Option<&Path>,
        options: &BomOptions,
    ) -> Result<BomOutput, BomGuardError> {
        let components = load_components(components_path)?;
        let catalog = catalog_path.map(Catalog::load);
        let state = match &catalog {
            None => CatalogState::Missing,
            Some(result) => CatalogState::from_result(result),
        };
        Ok(Self::process(&components, state, options))
    }
}
