//! Procurement row-sets
//!
//! Structured rows for the per-distributor BoM files. Formatting and file
//! creation belong to the writer; this module only decides what goes in
//! each row.

use crate::bom::classifier::DistributorAssignment;
use crate::bom::distributor::{Bucket, Distributor};
use crate::bom::grouping::IdenticalGroup;
use crate::parser::schema::ComponentRecord;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowSet {
    pub bucket: Bucket,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RowSet {
    fn new(bucket: Bucket) -> Self {
        Self {
            bucket,
            headers: bucket.columns().iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.bucket.name()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Build one row-set per populated bucket, in priority order, orphans last.
pub fn build_row_sets(
    groups: &[IdenticalGroup],
    components: &[ComponentRecord],
    assignments: &[DistributorAssignment],
    priority: &[Distributor],
) -> Vec<RowSet> {
    let mut sets: Vec<RowSet> = priority
        .iter()
        .map(|&d| RowSet::new(Bucket::Distributor(d)))
        .collect();
    let mut orphans = RowSet::new(Bucket::Orphan);

    for group in groups {
        let Some(&first) = group.indices.first() else {
            continue;
        };
        let sample = &components[first];
        let comment = comment(sample);
        let footprint = sample.footprint_name().to_string();

        for (set, &distributor) in sets.iter_mut().zip(priority) {
            let used = refs_by_identifier(group, components, assignments, distributor);
            for (identifier, refs) in used {
                let quantity = refs.len().to_string();
                let designators = join_designators(refs);
                let row = match distributor {
                    Distributor::Jlcpcb => vec![
                        comment.clone(),
                        designators,
                        footprint.clone(),
                        identifier,
                    ],
                    Distributor::Digikey => vec![
                        sample.value.clone(),
                        sample.description.clone(),
                        designators,
                        footprint.clone(),
                        identifier,
                        quantity,
                    ],
                };
                set.rows.push(row);
            }
        }

        let unassigned: Vec<&str> = group
            .indices
            .iter()
            .filter(|&&i| assignments[i].distributor.is_none())
            .map(|&i| components[i].reference.as_str())
            .collect();
        if !unassigned.is_empty() {
            orphans.rows.push(vec![
                comment.clone(),
                join_designators(unassigned),
                footprint.clone(),
            ]);
        }
    }

    sets.push(orphans);
    sets.retain(|s| !s.is_empty());
    sets
}

/// Part numbers used by a group for one distributor, with their designators.
fn refs_by_identifier<'a>(
    group: &IdenticalGroup,
    components: &'a [ComponentRecord],
    assignments: &'a [DistributorAssignment],
    distributor: Distributor,
) -> Vec<(String, Vec<&'a str>)> {
    let mut out: Vec<(String, Vec<&'a str>)> = Vec::new();
    for &i in &group.indices {
        let Some(id) = assignments[i].identifier_for(distributor) else {
            continue;
        };
        let reference = components[i].reference.as_str();
        match out.iter_mut().find(|(existing, _)| existing == id) {
            Some((_, refs)) => refs.push(reference),
            None => out.push((id.to_string(), vec![reference])),
        }
    }
    out
}

fn comment(component: &ComponentRecord) -> String {
    if component.description.is_empty() {
        component.value.clone()
    } else {
        format!("{} {}", component.value, component.description)
    }
}

fn join_designators(mut refs: Vec<&str>) -> String {
    refs.sort_by(|a, b| natord::compare(a, b));
    refs.join(",")
}
