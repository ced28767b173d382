pub mod records;
pub mod schema;

// Re-export for convenience
pub use records::{load_components, parse_components_csv, parse_components_json};
pub use schema::*;
