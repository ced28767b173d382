//! Identical-component grouping
//!
//! Components with the same raw `(value, footprint)` are treated as the same
//! logical part. A group whose members disagree on their part number is
//! reported; bucket membership is never changed here.

use crate::bom::classifier::DistributorAssignment;
use crate::bom::distributor::Distributor;
use crate::parser::schema::ComponentRecord;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdenticalGroup {
    pub value: String,
    pub footprint: String,
    /// Indices into the component list, in input order.
    #[serde(skip)]
    pub indices: Vec<usize>,
    pub members: Vec<String>,
    /// Distributor most members are assigned to, if any.
    pub distributor: Option<Distributor>,
    /// Distinct part numbers chosen for `distributor`, in first-seen order.
    pub distinct_identifiers: Vec<String>,
}

impl IdenticalGroup {
    pub fn is_consistent(&self) -> bool {
        self.distinct_identifiers.len() <= 1
    }
}

/// One part number used inside an inconsistent group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentifierUsage {
    pub identifier: String,
    pub references: Vec<String>,
}

/// Identical symbols that carry different part numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InconsistentGroupWarning {
    pub value: String,
    pub footprint: String,
    pub distributor: Distributor,
    pub members: Vec<String>,
    pub usages: Vec<IdentifierUsage>,
}

impl fmt::Display for InconsistentGroupWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let usages: Vec<String> = self
            .usages
            .iter()
            .map(|u| format!("{} = {}", u.identifier, u.references.join(", ")))
            .collect();
        write!(
            f,
            "Symbols [{}] are identical ({}, {}) but have different {} part numbers: {}",
            self.members.join(", "),
            self.value,
            self.footprint,
            self.distributor,
            usages.join("; ")
        )
    }
}

pub struct GroupingEngine;

impl GroupingEngine {
    /// Partition components by exact `(value, footprint)`, in first-seen order.
    pub fn group(
        components: &[ComponentRecord],
        assignments: &[DistributorAssignment],
        priority: &[Distributor],
    ) -> Vec<IdenticalGroup> {
        let mut order: Vec<IdenticalGroup> = Vec::new();
        let mut by_key: HashMap<(&str, &str), usize> = HashMap::new();

        for (i, component) in components.iter().enumerate() {
            let key = (component.value.as_str(), component.footprint.as_str());
            let slot = *by_key.entry(key).or_insert_with(|| {
                order.push(IdenticalGroup {
                    value: component.value.clone(),
                    footprint: component.footprint.clone(),
                    indices: Vec::new(),
                    members: Vec::new(),
                    distributor: None,
                    distinct_identifiers: Vec::new(),
                });
                order.len() - 1
            });
            order[slot].indices.push(i);
            order[slot].members.push(component.reference.clone());
        }

        for group in &mut order {
            group.distributor = dominant_distributor(&group.indices, assignments, priority);
            if let Some(d) = group.distributor {
                for &i in &group.indices {
                    if let Some(id) = assignments[i].identifier_for(d) {
                        if !group.distinct_identifiers.iter().any(|x| x == id) {
                            group.distinct_identifiers.push(id.to_string());
                        }
                    }
                }
            }
        }

        order
    }

    /// One warning per group whose members chose different part numbers.
    pub fn inconsistencies(
        groups: &[IdenticalGroup],
        components: &[ComponentRecord],
        assignments: &[DistributorAssignment],
    ) -> Vec<InconsistentGroupWarning> {
        let mut warnings = Vec::new();

        for group in groups {
            if group.indices.len() < 2 || group.is_consistent() {
                continue;
            }
            let Some(distributor) = group.distributor else {
                continue;
            };

            let usages = group
                .distinct_identifiers
                .iter()
                .map(|id| IdentifierUsage {
                    identifier: id.clone(),
                    references: group
                        .indices
                        .iter()
                        .filter(|&&i| {
                            assignments[i].identifier_for(distributor) == Some(id.as_str())
                        })
                        .map(|&i| components[i].reference.clone())
                        .collect(),
                })
                .collect();

            warnings.push(InconsistentGroupWarning {
                value: group.value.clone(),
                footprint: group.footprint.clone(),
                distributor,
                members: group.members.clone(),
                usages,
            });
        }

        warnings
    }
}

/// Distributor with the most members; ties go to the higher priority.
fn dominant_distributor(
    indices: &[usize],
    assignments: &[DistributorAssignment],
    priority: &[Distributor],
) -> Option<Distributor> {
    let mut best: Option<(Distributor, usize)> = None;
    for &d in priority {
        let count = indices
            .iter()
            .filter(|&&i| assignments[i].distributor == Some(d))
            .count();
        if count > 0 && best.map_or(true, |(_, n)| count > n) {
            best = Some((d, count));
        }
    }
    best.map(|(d, _)| d)
}
