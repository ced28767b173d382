//! Distributor classifier
//!
//! Every component is assigned to exactly one bucket. Distributors are tried
//! in priority order and the first one with a part number wins; the rest
//! are still checked so that symbols carrying several distributor fields
//! can be reported. Nothing is removed from the component's fields.

use crate::bom::distributor::{extract_identifier, Bucket, Distributor};
use crate::parser::schema::ComponentRecord;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Result of classifying one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributorAssignment {
    pub distributor: Option<Distributor>,
    pub identifier: Option<String>,
    pub had_multiple_distributors: bool,
    /// Lower-priority distributors that also had a part number.
    pub ignored: Vec<(Distributor, String)>,
}

impl DistributorAssignment {
    pub fn unassigned() -> Self {
        Self {
            distributor: None,
            identifier: None,
            had_multiple_distributors: false,
            ignored: Vec::new(),
        }
    }

    pub fn bucket(&self) -> Bucket {
        match self.distributor {
            Some(d) => Bucket::Distributor(d),
            None => Bucket::Orphan,
        }
    }

    /// Chosen part number if this component was assigned to `distributor`.
    pub fn identifier_for(&self, distributor: Distributor) -> Option<&str> {
        match self.distributor {
            Some(d) if d == distributor => self.identifier.as_deref(),
            _ => None,
        }
    }
}

/// A symbol that carries part numbers for more than one distributor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultipleDistributorWarning {
    pub reference: String,
    pub chosen: Distributor,
    pub ignored: Vec<Distributor>,
}

impl fmt::Display for MultipleDistributorWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ignored: Vec<&str> = self.ignored.iter().map(|d| d.name()).collect();
        write!(
            f,
            "[{}] has multiple distributors defined (using {}, ignoring {})",
            self.reference,
            self.chosen,
            ignored.join(", ")
        )
    }
}

/// Assignments for a whole component list, in input order.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub assignments: Vec<DistributorAssignment>,
    /// Indices into the component list, per bucket, in input order.
    pub buckets: BTreeMap<Bucket, Vec<usize>>,
    pub warnings: Vec<MultipleDistributorWarning>,
}

impl Classification {
    pub fn members(&self, bucket: Bucket) -> &[usize] {
        self.buckets.get(&bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, bucket: Bucket) -> usize {
        self.members(bucket).len()
    }
}

pub struct Classifier {
    priority: Vec<Distributor>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(Distributor::PRIORITY.to_vec())
    }
}

impl Classifier {
    /// Create a classifier. Duplicate entries in `priority` are ignored.
    pub fn new(priority: Vec<Distributor>) -> Self {
        let mut deduped = Vec::with_capacity(priority.len());
        for d in priority {
            if !deduped.contains(&d) {
                deduped.push(d);
            }
        }
        Self { priority: deduped }
    }

    pub fn priority(&self) -> &[Distributor] {
        &self.priority
    }

    pub fn classify(&self, component: &ComponentRecord) -> DistributorAssignment {
        let mut assignment = DistributorAssignment::unassigned();

        for &distributor in &self.priority {
            let Some(identifier) = extract_identifier(&component.fields, distributor) else {
                continue;
            };
            if assignment.distributor.is_none() {
                assignment.distributor = Some(distributor);
                assignment.identifier = Some(identifier);
            } else {
                assignment.had_multiple_distributors = true;
                assignment.ignored.push((distributor, identifier));
            }
        }

        tracing::debug!(
            "{} -> {} {}",
            component.reference,
            assignment.bucket(),
            assignment.identifier.as_deref().unwrap_or("-")
        );
        assignment
    }

    pub fn classify_all(&self, components: &[ComponentRecord]) -> Classification {
        let mut classification = Classification::default();

        for (i, component) in components.iter().enumerate() {
            let assignment = self.classify(component);

            if let (true, Some(chosen)) =
                (assignment.had_multiple_distributors, assignment.distributor)
            {
                classification.warnings.push(MultipleDistributorWarning {
                    reference: component.reference.clone(),
                    chosen,
                    ignored: assignment.ignored.iter().map(|(d, _)| *d).collect(),
                });
            }

            classification
                .buckets
                .entry(assignment.bucket())
                .or_default()
                .push(i);
            classification.assignments.push(assignment);
        }

        classification
    }
}
