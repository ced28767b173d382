//! BomGuard - multi-distributor BoM generation for KiCad projects
//!
//! This library sorts schematic symbols into per-distributor procurement
//! lists based on their part-number fields, flags symbols that look
//! inconsistent, and cross-checks JLCPCB parts against a reference parts
//! catalog to catch value/footprint typos and suggest cheaper Basic parts.
//!
//! # Quick Start
//!
//! ```no_run
//! use bomguard::{BomGuardCore, BomOptions};
//! use std::path::Path;
//!
//! let output = BomGuardCore::process_files(
//!     Path::new("board_components.json"),
//!     Some(Path::new("JLCPCB_Part_Database.csv")),
//!     &BomOptions::default(),
//! ).unwrap();
//!
//! for set in &output.row_sets {
//!     println!("{}: {} rows", set.name(), set.rows.len());
//! }
//! for warning in &output.report.multiple_distributor_warnings {
//!     println!("WARN: {}", warning);
//! }
//! ```
//!
//! # Features
//!
//! - **Classification**: JLCPCB and Digikey part-number fields, orphans for the rest
//! - **Grouping**: identical symbols with different part numbers are reported
//! - **Sanity check**: value and footprint compared against the catalog
//! - **Substitution**: Extended parts with an equivalent Basic part are flagged

pub mod bom;
pub mod catalog;
pub mod core;
pub mod parser;
pub mod report;

// Re-export main types
pub use bom::{Bucket, Distributor, DistributorAssignment, RowSet};
pub use catalog::{Catalog, CatalogError, MatchPolicy, Tier};
pub use core::{BomGuardCore, BomGuardError, BomOptions, BomOutput, CatalogState};
pub use parser::schema::{ComponentRecord, FieldMap};
pub use report::{CatalogSection, Report};

/// Load a component list (convenience wrapper).
pub fn load_components(path: &std::path::Path) -> Result<Vec<ComponentRecord>, BomGuardError> {
    parser::load_components(path)
}

/// Load a reference catalog (convenience wrapper).
pub fn load_catalog(path: &std::path::Path) -> Result<Catalog, CatalogError> {
    Catalog::load(path)
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        BomGuardCore, BomGuardError, BomOptions, BomOutput, Bucket, Catalog, CatalogSection,
        CatalogState, ComponentRecord, Distributor, MatchPolicy, Report, RowSet,
    };
}
