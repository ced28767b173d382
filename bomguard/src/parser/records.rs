//! Component record ingestion
//!
//! Reads component lists that an external netlist or schematic exporter has
//! already produced. Two formats are accepted:
//!
//! - JSON: an array of `{ "reference", "value", "footprint", "description"?, "fields"? }`
//! - CSV: a KiCad-style BoM export with a header row. `Reference`, `Value`
//!   and `Footprint` columns are required, `Description` is optional and
//!   every other column becomes an attribute field.

use crate::core::BomGuardError;
use crate::parser::schema::{ComponentRecord, FieldMap};
use std::collections::HashSet;
use std::path::Path;

const REFERENCE_COLUMNS: &[&str] = &["reference", "ref", "references", "designator"];
const VALUE_COLUMNS: &[&str] = &["value", "val"];
const FOOTPRINT_COLUMNS: &[&str] = &["footprint", "package"];
const DESCRIPTION_COLUMNS: &[&str] = &["description", "desc"];

/// Load components from a `.json` or `.csv` file.
pub fn load_components(path: &Path) -> Result<Vec<ComponentRecord>, BomGuardError> {
    let content = std::fs::read_to_string(path)?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());

    let components = match ext.as_deref() {
        Some("json") => parse_components_json(&content)?,
        Some("csv") => parse_components_csv(&content)?,
        _ => {
            return Err(BomGuardError::Parse(format!(
                "{}: component list must be a .json or .csv file",
                path.display()
            )))
        }
    };

    tracing::info!(
        "Loaded {} components from {}",
        components.len(),
        path.display()
    );
    Ok(components)
}

/// Parse a JSON array of component records.
pub fn parse_components_json(content: &str) -> Result<Vec<ComponentRecord>, BomGuardError> {
    let components: Vec<ComponentRecord> = serde_json::from_str(content)?;
    for (i, component) in components.iter().enumerate() {
        if component.reference.trim().is_empty() {
            return Err(BomGuardError::Parse(format!(
                "component #{} has an empty reference",
                i + 1
            )));
        }
    }
    warn_duplicate_references(&components);
    Ok(components)
}

/// Parse a CSV BoM export into component records.
pub fn parse_components_csv(content: &str) -> Result<Vec<ComponentRecord>, BomGuardError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());
    let headers = reader.headers()?.clone();

    let find = |names: &[&str]| {
        headers
            .iter()
            .position(|h| names.contains(&h.trim().to_lowercase().as_str()))
    };
    let missing =
        |column: &str| BomGuardError::Parse(format!("CSV header has no {} column", column));

    let ref_col = find(REFERENCE_COLUMNS).ok_or_else(|| missing("Reference"))?;
    let value_col = find(VALUE_COLUMNS).ok_or_else(|| missing("Value"))?;
    let footprint_col = find(FOOTPRINT_COLUMNS).ok_or_else(|| missing("Footprint"))?;
    let description_col = find(DESCRIPTION_COLUMNS);

    let mut components = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let cell = |col: usize| record.get(col).unwrap_or("").trim();
        let references: Vec<&str> = cell(ref_col)
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|r| !r.is_empty())
            .collect();
        if references.is_empty() {
            return Err(BomGuardError::Parse(format!(
                "CSV row {} has an empty reference",
                i + 1
            )));
        }

        let mut fields = FieldMap::new();
        for (col, name) in headers.iter().enumerate() {
            let is_known = col == ref_col
                || col == value_col
                || col == footprint_col
                || Some(col) == description_col;
            if !is_known && !name.trim().is_empty() {
                fields.insert(name.trim(), cell(col));
            }
        }

        for reference in references {
            components.push(ComponentRecord {
                reference: reference.to_string(),
                value: cell(value_col).to_string(),
                footprint: cell(footprint_col).to_string(),
                description: description_col.map(cell).unwrap_or("").to_string(),
                fields: fields.clone(),
            });
        }
    }

    warn_duplicate_references(&components);
    Ok(components)
}

fn warn_duplicate_references(components: &[ComponentRecord]) {
    let mut seen = HashSet::new();
    for c in components {
        if !seen.insert(c.reference.as_str()) {
            tracing::warn!("Duplicate reference {} in component list", c.reference);
        }
    }
}
