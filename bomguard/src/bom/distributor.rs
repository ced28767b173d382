//! Distributors and the field extractor.

use crate::parser::schema::FieldMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parts supplier recognised through symbol fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distributor {
    Jlcpcb,
    Digikey,
}

impl Distributor {
    /// Default priority: the first distributor found on a symbol is used.
    pub const PRIORITY: [Distributor; 2] = [Distributor::Jlcpcb, Distributor::Digikey];

    /// Accepted field names, compared case-insensitively, in lookup order.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Distributor::Jlcpcb => &["LCSC", "LCSC Part", "JLCPCB"],
            Distributor::Digikey => &["Digikey", "Digi-Key", "Digi-Key_PN"],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Distributor::Jlcpcb => "JLCPCB",
            Distributor::Digikey => "Digikey",
        }
    }

    /// Column headers of this distributor's BoM upload format.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            // JLCPCB PCBA upload
            Distributor::Jlcpcb => &["Comment", "Designator", "Footprint", "LCSC Part #"],
            // Digi-Key Parts List Manager
            Distributor::Digikey => &[
                "Customer Reference",
                "Note",
                "Reference Designator",
                "Footprint",
                "Digi-Key Part Number",
                "Quantity",
            ],
        }
    }

    pub fn from_name(name: &str) -> Option<Distributor> {
        let folded = name.trim().to_lowercase();
        Distributor::PRIORITY.into_iter().find(|d| {
            d.name().to_lowercase() == folded
                || d.aliases().iter().any(|a| a.to_lowercase() == folded)
        })
    }
}

impl fmt::Display for Distributor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a component lands in the generated BoM files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Distributor(Distributor),
    Orphan,
}

/// Columns of the orphaned-parts file.
pub const ORPHAN_COLUMNS: &[&str] = &["Comment", "Designator", "Footprint"];

impl Bucket {
    pub fn name(&self) -> &'static str {
        match self {
            Bucket::Distributor(d) => d.name(),
            Bucket::Orphan => "Orphaned",
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Bucket::Distributor(d) => d.columns(),
            Bucket::Orphan => ORPHAN_COLUMNS,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Part number for `distributor`, taken from the first matching alias field.
pub fn extract_identifier(fields: &FieldMap, distributor: Distributor) -> Option<String> {
    fields.first_of(distributor.aliases()).map(str::to_string)
}
