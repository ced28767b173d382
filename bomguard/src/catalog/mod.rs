//! Reference Parts Catalog
//!
//! An immutable table of known distributor parts used to sanity-check the
//! values and footprints entered on schematic symbols, and to find cheaper
//! equivalents.
//!
//! The catalog is read from a CSV file with the columns
//!
//! | Column      | Meaning                                   |
//! |-------------|-------------------------------------------|
//! | `Number`    | Distributor part number (unique)          |
//! | `Type`      | Designator letters, e.g. `R`, `C` (opt.)  |
//! | `Value`     | Nominal value                             |
//! | `Footprint` | Package / footprint                       |
//! | `Basic`     | Tier: `1`/`basic` or `0`/`extended`       |
//! | `Edited`    | Last edit date, `YYYYMMDD` (optional)     |
//!
//! # Usage
//!
//! ```rust,ignore
//! use bomguard::catalog::{Catalog, SanityChecker};
//!
//! let catalog = Catalog::load(Path::new("JLCPCB_Part_Database.csv"))?;
//! let checker = SanityChecker::new(&catalog);
//! let verdict = checker.check(&component, "C25744");
//! ```

pub mod advisor;
pub mod checker;
pub mod normalize;

use crate::bom::distributor::Distributor;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

// Re-exports for convenience
pub use advisor::{SubstitutionAdvisor, SubstitutionSuggestion};
pub use checker::{Field, MismatchReason, SanityChecker, SanityStats, SanityVerdict, Verdict};
pub use normalize::{normalize, resolve_value, MatchPolicy};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Catalog row {row} ({identifier}): {reason}")]
    MalformedRow {
        row: usize,
        identifier: String,
        reason: String,
    },
    #[error("Catalog row {row}: part number {identifier} already defined on row {first_row}")]
    DuplicateIdentifier {
        identifier: String,
        first_row: usize,
        row: usize,
    },
}

/// Cost class of a catalog part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Standard stock, no extra loading fee.
    Basic,
    Extended,
}

impl Tier {
    pub const CHEAPEST: Tier = Tier::Basic;

    pub fn is_cheapest(&self) -> bool {
        *self == Tier::CHEAPEST
    }

    /// Parse a tier label (`1`, `basic`, `true`, `yes` / `0`, `extended`, `false`, `no`).
    pub fn parse(label: &str) -> Option<Tier> {
        match label.trim().to_lowercase().as_str() {
            "1" | "basic" | "true" | "yes" => Some(Tier::Basic),
            "0" | "extended" | "false" | "no" => Some(Tier::Extended),
            _ => None,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Basic => write!(f, "Basic"),
            Tier::Extended => write!(f, "Extended"),
        }
    }
}

/// A raw, unvalidated catalog row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRow {
    #[serde(rename = "Number")]
    pub identifier: String,
    #[serde(rename = "Type", default)]
    pub part_type: String,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "Footprint")]
    pub footprint: String,
    #[serde(rename = "Basic")]
    pub tier: String,
    #[serde(rename = "Edited", default)]
    pub edited: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub identifier: String,
    pub part_type: Option<String>,
    pub expected_value: String,
    pub expected_footprint: String,
    pub tier: Tier,
    pub edited: Option<NaiveDate>,
}

impl CatalogEntry {
    fn from_row(row: CatalogRow, index: usize) -> Result<Self, CatalogError> {
        let identifier = row.identifier.trim().to_string();
        let malformed = |reason: String| CatalogError::MalformedRow {
            row: index,
            identifier: identifier.clone(),
            reason,
        };

        if identifier.is_empty() {
            return Err(malformed("missing part number".to_string()));
        }
        let tier = Tier::parse(&row.tier)
            .ok_or_else(|| malformed(format!("unknown tier label {:?}", row.tier)))?;
        let edited = match row.edited.trim() {
            "" => None,
            date => Some(
                NaiveDate::parse_from_str(date, "%Y%m%d")
                    .map_err(|e| malformed(format!("bad Edited date {:?}: {}", date, e)))?,
            ),
        };
        let part_type = Some(row.part_type.trim().to_string()).filter(|t| !t.is_empty());

        Ok(Self {
            identifier,
            part_type,
            expected_value: row.value.trim().to_string(),
            expected_footprint: row.footprint.trim().to_string(),
            tier,
            edited,
        })
    }
}

/// Lookup table of distributor part numbers, immutable once built.
#[derive(Debug, Clone)]
pub struct Catalog {
    distributor: Distributor,
    entries: Vec<CatalogEntry>,
    by_identifier: HashMap<String, usize>,
    last_update: Option<NaiveDate>,
}

impl Catalog {
    /// Build a catalog from raw rows. Any malformed row or repeated part
    /// number invalidates the whole catalog.
    pub fn from_rows<I>(distributor: Distributor, rows: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = CatalogRow>,
    {
        let mut entries = Vec::new();
        let mut by_identifier = HashMap::new();

        for (i, row) in rows.into_iter().enumerate() {
            let row_number = i + 1;
            let entry = CatalogEntry::from_row(row, row_number)?;
            if let Some(&first) = by_identifier.get(&entry.identifier) {
                return Err(CatalogError::DuplicateIdentifier {
                    identifier: entry.identifier,
                    first_row: first + 1,
                    row: row_number,
                });
            }
            by_identifier.insert(entry.identifier.clone(), entries.len());
            entries.push(entry);
        }

        let last_update = entries.iter().filter_map(|e| e.edited).max();
        Ok(Self {
            distributor,
            entries,
            by_identifier,
            last_update,
        })
    }

    /// Read a JLCPCB catalog from CSV.
    pub fn from_csv_reader<R: std::io::Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let rows = csv
            .deserialize::<CatalogRow>()
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_rows(Distributor::Jlcpcb, rows)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        let catalog = Self::from_csv_reader(std::io::BufReader::new(file))?;
        tracing::info!(
            "Loaded {} catalog parts from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Distributor whose part numbers this catalog describes.
    pub fn distributor(&self) -> Distributor {
        self.distributor
    }

    pub fn get(&self, identifier: &str) -> Option<&CatalogEntry> {
        self.by_identifier
            .get(identifier.trim())
            .map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in source order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Most recent `Edited` date across all entries.
    pub fn last_update(&self) -> Option<NaiveDate> {
        self.last_update
    }
}
