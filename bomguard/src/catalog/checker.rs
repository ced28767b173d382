//! Catalog Sanity Checker
//!
//! Compares the value and footprint typed on a symbol against the catalog
//! entry for its part number. Footprints are compared without their
//! `Library:` prefix. Comparison is done on normalized text, but
//! mismatches are reported with the original text so a reviewer sees what
//! was actually entered. False positives are expected for exotic
//! formatting; false negatives are what this check exists to avoid.

use crate::catalog::normalize::{bare_footprint, normalize, MatchPolicy};
use crate::catalog::{Catalog, CatalogEntry};
use crate::parser::schema::ComponentRecord;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Type,
    Value,
    Footprint,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Type => write!(f, "type"),
            Field::Value => write!(f, "value"),
            Field::Footprint => write!(f, "footprint"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MismatchReason {
    pub field: Field,
    pub actual: String,
    pub expected: String,
}

impl fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is \"{}\", expected \"{}\"",
            self.field, self.actual, self.expected
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    Pass,
    Suspect { reasons: Vec<MismatchReason> },
    NotInDatabase,
}

/// Outcome of checking one component. Never mutates the component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SanityVerdict {
    pub reference: String,
    pub identifier: String,
    #[serde(flatten)]
    pub verdict: Verdict,
}

impl SanityVerdict {
    pub fn is_pass(&self) -> bool {
        matches!(self.verdict, Verdict::Pass)
    }
}

impl fmt::Display for SanityVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.verdict {
            Verdict::Pass => write!(
                f,
                "[{}] {} matches the catalog",
                self.reference, self.identifier
            ),
            Verdict::Suspect { reasons } => {
                let reasons: Vec<String> = reasons.iter().map(|r| r.to_string()).collect();
                write!(
                    f,
                    "[{}] {}: {}",
                    self.reference,
                    self.identifier,
                    reasons.join("; ")
                )
            }
            Verdict::NotInDatabase => {
                write!(f, "{} ({}) not in database", self.identifier, self.reference)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SanityStats {
    pub pass: usize,
    pub suspect: usize,
    pub not_found: usize,
}

impl SanityStats {
    pub fn record(&mut self, verdict: &Verdict) {
        match verdict {
            Verdict::Pass => self.pass += 1,
            Verdict::Suspect { .. } => self.suspect += 1,
            Verdict::NotInDatabase => self.not_found += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.pass + self.suspect + self.not_found
    }
}

/// Checker bound to one catalog.
pub struct SanityChecker<'a> {
    catalog: &'a Catalog,
    policy: MatchPolicy,
    check_part_type: bool,
}

impl<'a> SanityChecker<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            policy: MatchPolicy::default(),
            check_part_type: false,
        }
    }

    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Also compare the designator letters against the catalog `Type` column.
    pub fn with_part_type_check(mut self, enabled: bool) -> Self {
        self.check_part_type = enabled;
        self
    }

    /// Check `component`, whose chosen part number is `identifier`.
    pub fn check(&self, component: &ComponentRecord, identifier: &str) -> SanityVerdict {
        let verdict = match self.catalog.get(identifier) {
            None => Verdict::NotInDatabase,
            Some(entry) => {
                let reasons = self.mismatches(component, entry);
                if reasons.is_empty() {
                    Verdict::Pass
                } else {
                    Verdict::Suspect { reasons }
                }
            }
        };

        SanityVerdict {
            reference: component.reference.clone(),
            identifier: identifier.to_string(),
            verdict,
        }
    }

    /// Field mismatches between a component and its catalog entry.
    pub fn mismatches(
        &self,
        component: &ComponentRecord,
        entry: &CatalogEntry,
    ) -> Vec<MismatchReason> {
        let mut reasons = Vec::new();

        if self.check_part_type {
            if let Some(expected) = &entry.part_type {
                let actual = component.reference_prefix();
                if actual.to_lowercase() != expected.to_lowercase() {
                    reasons.push(MismatchReason {
                        field: Field::Type,
                        actual,
                        expected: expected.clone(),
                    });
                }
            }
        }

        // empty catalog fields carry no expectation
        if !normalize(&entry.expected_value).is_empty()
            && !self.policy.values_match(&component.value, &entry.expected_value)
        {
            reasons.push(MismatchReason {
                field: Field::Value,
                actual: component.value.clone(),
                expected: entry.expected_value.clone(),
            });
        }

        if !normalize(bare_footprint(&entry.expected_footprint)).is_empty()
            && !self
                .policy
                .footprints_match(&component.footprint, &entry.expected_footprint)
        {
            reasons.push(MismatchReason {
                field: Field::Footprint,
                actual: component.footprint.clone(),
                expected: entry.expected_footprint.clone(),
            });
        }

        reasons
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom::distributor::Distributor;
    use crate::catalog::tests::row;
    use crate::catalog::CatalogRow;

    fn catalog(rows: Vec<CatalogRow>) -> Catalog {
        Catalog::from_rows(Distributor::Jlcpcb, rows).unwrap()
    }

    #[test]
    fn test_case_insensitive_pass() {
        let catalog = catalog(vec![row("C25744", "10K", "0402", "1")]);
        let checker = SanityChecker::new(&catalog);
        let component = ComponentRecord::new("R1", "10k", "0402");
        assert_eq!(checker.check(&component, "C25744").verdict, Verdict::Pass);
    }

    #[test]
    fn test_value_mismatch_keeps_original_text() {
        let catalog = catalog(vec![row("C15849", "1uF", "0603", "1")]);
        let checker = SanityChecker::new(&catalog);
        let component = ComponentRecord::new("C3", "100nF", "0603");
        let verdict = checker.check(&component, "C15849");
        match &verdict.verdict {
            Verdict::Suspect { reasons } => {
                assert_eq!(reasons.len(), 1);
                assert_eq!(reasons[0].field, Field::Value);
                assert_eq!(reasons[0].to_string(), "value is \"100nF\", expected \"1uF\"");
            }
            other => panic!("expected suspect, got {other:?}"),
        }
        assert_eq!(
            verdict.to_string(),
            "[C3] C15849: value is \"100nF\", expected \"1uF\""
        );
    }

    #[test]
    fn test_both_fields_mismatch() {
        let catalog = catalog(vec![row("C1", "1k", "0805", "1")]);
        let component = ComponentRecord::new("R1", "2k", "0402");
        let verdict = SanityChecker::new(&catalog).check(&component, "C1");
        let Verdict::Suspect { reasons } = verdict.verdict else {
            panic!("expected suspect");
        };
        let fields: Vec<Field> = reasons.iter().map(|r| r.field).collect();
        assert_eq!(fields, vec![Field::Value, Field::Footprint]);
    }

    #[test]
    fn test_formatting_differences_pass() {
        let catalog = catalog(vec![row("C1", "4.7 uF", "C_0603-1608", "1")]);
        let component = ComponentRecord::new("C9", "4.7uF", "c_0603_1608");
        assert!(SanityChecker::new(&catalog).check(&component, "C1").is_pass());
    }

    #[test]
    fn test_library_prefix_is_ignored() {
        let catalog = catalog(vec![row("C1", "10k", "R_0402", "1")]);
        let component = ComponentRecord::new("R1", "10k", "Resistor_SMD:R_0402");
        assert!(SanityChecker::new(&catalog).check(&component, "C1").is_pass());

        let component = ComponentRecord::new("R1", "10k", "Resistor_SMD:R_0603");
        let verdict = SanityChecker::new(&catalog).check(&component, "C1");
        assert_eq!(
            verdict.to_string(),
            "[R1] C1: footprint is \"Resistor_SMD:R_0603\", expected \"R_0402\""
        );
    }

    #[test]
    fn test_library_qualified_catalog_footprint() {
        let catalog = catalog(vec![row("C1", "10k", "Resistor_SMD:R_0402", "1")]);
        let component = ComponentRecord::new("R1", "10k", "Resistor_SMD:R_0402");
        assert!(SanityChecker::new(&catalog).check(&component, "C1").is_pass());

        let component = ComponentRecord::new("R2", "10k", "R_0402");
        assert!(SanityChecker::new(&catalog).check(&component, "C1").is_pass());

        let component = ComponentRecord::new("R3", "10k", "Resistor_SMD:R_0603");
        let verdict = SanityChecker::new(&catalog).check(&component, "C1");
        assert_eq!(
            verdict.to_string(),
            "[R3] C1: footprint is \"Resistor_SMD:R_0603\", expected \"Resistor_SMD:R_0402\""
        );
    }

    #[test]
    fn test_not_in_database() {
        let catalog = catalog(vec![]);
        let component = ComponentRecord::new("U1", "NE555", "SOIC-8");
        let verdict = SanityChecker::new(&catalog).check(&component, "C404");
        assert_eq!(verdict.verdict, Verdict::NotInDatabase);
        assert_eq!(verdict.to_string(), "C404 (U1) not in database");
    }

    #[test]
    fn test_empty_catalog_fields_are_skipped() {
        let catalog = catalog(vec![row("C1", "", "", "1")]);
        let component = ComponentRecord::new("R1", "anything", "whatever");
        assert!(SanityChecker::new(&catalog).check(&component, "C1").is_pass());
    }

    #[test]
    fn test_lenient_policy() {
        let catalog = catalog(vec![row("C1", "4.7k", "0402", "1")]);
        let component = ComponentRecord::new("R1", "4k7", "Resistor_SMD:R_0402_1005Metric");
        let strict = SanityChecker::new(&catalog);
        assert!(!strict.check(&component, "C1").is_pass());
        let lenient = SanityChecker::new(&catalog).with_policy(MatchPolicy::Lenient);
        assert!(lenient.check(&component, "C1").is_pass());
    }

    #[test]
    fn test_part_type_check_is_opt_in() {
        let mut r = row("C1", "10k", "0402", "1");
        r.part_type = "R".to_string();
        let catalog = catalog(vec![r]);
        let component = ComponentRecord::new("C7", "10k", "0402");

        assert!(SanityChecker::new(&catalog).check(&component, "C1").is_pass());

        let verdict = SanityChecker::new(&catalog)
            .with_part_type_check(true)
            .check(&component, "C1");
        let Verdict::Suspect { reasons } = verdict.verdict else {
            panic!("expected suspect");
        };
        assert_eq!(reasons[0].to_string(), "type is \"C\", expected \"R\"");
    }

    #[test]
    fn test_stats() {
        let mut stats = SanityStats::default();
        stats.record(&Verdict::Pass);
        stats.record(&Verdict::Pass);
        stats.record(&Verdict::NotInDatabase);
        stats.record(&Verdict::Suspect { reasons: vec![] });
        assert_eq!(stats, SanityStats { pass: 2, suspect: 1, not_found: 1 });
        assert_eq!(stats.total(), 4);
    }
}
