//! Distributor Classification and Grouping
//!
//! Splits a component list into per-distributor procurement buckets.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │  Component   │───▶│    Field     │───▶│  Classifier  │──▶ multi-distributor
//! │   Records    │    │  Extractor   │    │              │    warnings
//! └──────────────┘    └──────────────┘    └──────┬───────┘
//!                                                │
//!                                                ▼
//!                                        ┌──────────────┐
//!                                        │   Grouping   │──▶ inconsistent-group
//!                                        │    Engine    │    warnings
//!                                        └──────┬───────┘
//!                                               │
//!                                               ▼
//!                                        ┌──────────────┐
//!                                        │   Row-sets   │
//!                                        └──────────────┘
//! ```
//!
//! # Supported distributors
//!
//! 1. **JLCPCB** - `LCSC`, `LCSC Part` or `JLCPCB` fields
//! 2. **Digikey** - `Digikey`, `Digi-Key` or `Digi-Key_PN` fields
//!
//! Symbols without any of these fields end up in the orphaned bucket.

pub mod classifier;
pub mod distributor;
pub mod grouping;
pub mod rows;

// Re-exports for convenience
pub use classifier::{Classification, Classifier, DistributorAssignment, MultipleDistributorWarning};
pub use distributor::{extract_identifier, Bucket, Distributor};
pub use grouping::{GroupingEngine, IdenticalGroup, IdentifierUsage, InconsistentGroupWarning};
pub use rows::{build_row_sets, RowSet};
