//! File writers and report rendering for the CLI.

use bomguard::bom::distributor::Bucket;
use bomguard::catalog::checker::Verdict;
use bomguard::report::{CatalogSection, Report};
use bomguard::{BomOutput, Distributor, RowSet};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

const DIVIDER: &str = "- - - - - - - - - - - - - - - - - - - - - - - - - ";

/// Every bucket that can produce a file, in report order.
const BUCKETS: [Bucket; 3] = [
    Bucket::Distributor(Distributor::Jlcpcb),
    Bucket::Distributor(Distributor::Digikey),
    Bucket::Orphan,
];

pub fn row_set_path(dir: &Path, project: &str, bucket: Bucket) -> PathBuf {
    dir.join(format!("{}_BOM_{}.csv", project, bucket.name()))
}

pub fn report_path(dir: &Path, project: &str) -> PathBuf {
    dir.join(format!("{}_BOM_Report.txt", project))
}

/// Remove files left over from a previous run so a bucket that is now
/// empty does not leave a stale BoM behind.
pub fn remove_stale(dir: &Path, project: &str) -> std::io::Result<()> {
    let paths = BUCKETS
        .iter()
        .map(|&b| row_set_path(dir, project, b))
        .chain(std::iter::once(report_path(dir, project)));
    for path in paths {
        match std::fs::remove_file(&path) {
            Ok(()) => tracing::debug!("Removed stale {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

pub fn write_row_set(path: &Path, set: &RowSet) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&set.headers)?;
    for row in &set.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    tracing::info!("Wrote {} rows to {}", set.rows.len(), path.display());
    Ok(())
}

/// Write every non-empty row-set plus the text report. Returns the
/// written paths.
pub fn write_all(
    dir: &Path,
    project: &str,
    output: &BomOutput,
    report_text: &str,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(dir)?;
    remove_stale(dir, project)?;

    let mut written = Vec::new();
    for set in output.row_sets.iter().filter(|s| !s.is_empty()) {
        let path = row_set_path(dir, project, set.bucket);
        write_row_set(&path, set)?;
        written.push(path);
    }

    let path = report_path(dir, project);
    std::fs::write(&path, report_text)?;
    written.push(path);
    Ok(written)
}

/// Render the plain-text report.
pub fn render_report(project: &str, report: &Report) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    write_report(&mut out, project, report)?;
    Ok(out)
}

fn write_report(out: &mut String, project: &str, report: &Report) -> std::fmt::Result {
    writeln!(out, "# Multi-Distributor BoM Report #")?;
    writeln!(out)?;
    writeln!(
        out,
        "Project Name: {} (has {} symbols)",
        project, report.total_components
    )?;
    writeln!(out, "Tool Version: bomguard {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out)?;
    writeln!(out, "{}", DIVIDER)?;
    writeln!(out)?;

    for summary in &report.buckets {
        if summary.present {
            writeln!(out, "{} BoM: True ({} rows)", summary.name, summary.rows)?;
        } else {
            writeln!(out, "{} BoM: False", summary.name)?;
        }
    }
    writeln!(out)?;
    writeln!(out, "{}", DIVIDER)?;
    writeln!(out)?;

    writeln!(out, "BoM Generation Notes:")?;
    if report.warning_count() == 0 {
        writeln!(out, "(none)")?;
    }
    for warning in &report.multiple_distributor_warnings {
        writeln!(out, "- WARN: {}", warning)?;
    }
    for warning in &report.inconsistent_group_warnings {
        writeln!(out, "- WARN: {}", warning)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", DIVIDER)?;
    writeln!(out)?;

    match &report.catalog {
        CatalogSection::Missing => {
            writeln!(out, "JLCPCB Parts Database File Present: False")?;
            writeln!(out, "Pass --catalog <FILE> to enable the parts sanity check.")?;
        }
        CatalogSection::Invalid { reason } => {
            writeln!(out, "JLCPCB Parts Database File Present: Invalid")?;
            writeln!(out, "- WARN: {}", reason)?;
        }
        CatalogSection::Checked(results) => {
            let updated = results
                .last_update
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "unknown".to_string());
            writeln!(
                out,
                "{} Parts Database File Present: True ({} parts, updated {})",
                results.distributor, results.entries, updated
            )?;
            writeln!(
                out,
                "{} Parts Sanity-Checker Results ({} pass, {} suspect, {} not in database):",
                results.distributor,
                results.stats.pass,
                results.stats.suspect,
                results.stats.not_found
            )?;
            if results.verdicts.is_empty() && results.suggestions.is_empty() {
                writeln!(out, "(no notes)")?;
            }
            // suspects first, then suggestions, then unknown parts
            let (missing, suspect): (Vec<_>, Vec<_>) = results
                .verdicts
                .iter()
                .partition(|v| v.verdict == Verdict::NotInDatabase);
            for verdict in suspect {
                writeln!(out, "- {}", verdict)?;
            }
            for suggestion in &results.suggestions {
                writeln!(out, "- ALT: {}", suggestion)?;
            }
            for verdict in missing {
                writeln!(out, "- {}", verdict)?;
            }
        }
    }
    Ok(())
}
