//! Simple report example: classify a component list and print the findings.

use bomguard::prelude::*;
use std::path::Path;

fn main() -> Result<(), BomGuardError> {
    let mut args = std::env::args().skip(1);
    let input = args
        .next()
        .unwrap_or_else(|| "tests/fixtures/board.json".to_string());
    let catalog = args.next();
    let input = Path::new(&input);

    if !input.exists() {
        eprintln!("File not found: {}", input.display());
        eprintln!("Usage: cargo run --example simple_report [components.json] [catalog.csv]");
        std::process::exit(1);
    }

    let output = BomGuardCore::process_files(
        input,
        catalog.as_deref().map(Path::new),
        &BomOptions::default(),
    )?;
    let report = &output.report;

    println!("BoM for: {} ({} symbols)", input.display(), report.total_components);
    println!();
    for set in &output.row_sets {
        println!("{} ({} rows):", set.name(), set.rows.len());
        for row in &set.rows {
            println!("  {}", row.join(" | "));
        }
    }

    if report.warning_count() > 0 {
        println!("\nWarnings:");
        for warning in &report.multiple_distributor_warnings {
            println!("  - {}", warning);
        }
        for warning in &report.inconsistent_group_warnings {
            println!("  - {}", warning);
        }
    }

    match &report.catalog {
        CatalogSection::Missing => println!("\nNo catalog given, sanity check skipped."),
        CatalogSection::Invalid { reason } => println!("\nCatalog rejected: {}", reason),
        CatalogSection::Checked(results) => {
            println!(
                "\nSanity check: {} pass, {} suspect, {} not in database",
                results.stats.pass, results.stats.suspect, results.stats.not_found
            );
            for verdict in &results.verdicts {
                println!("  - {}", verdict);
            }
            for suggestion in &results.suggestions {
                println!("  - {}", suggestion);
            }
        }
    }

    Ok(())
}
