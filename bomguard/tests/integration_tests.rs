//! Integration tests for the BomGuard pipeline

use bomguard::catalog::Verdict;
use bomguard::prelude::*;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn run(input: &str, catalog: Option<&str>, options: &BomOptions) -> BomOutput {
    let catalog = catalog.map(fixture_path);
    BomGuardCore::process_files(&fixture_path(input), catalog.as_deref(), options)
        .expect("fixture should load")
}

const JLCPCB: Bucket = Bucket::Distributor(Distributor::Jlcpcb);
const DIGIKEY: Bucket = Bucket::Distributor(Distributor::Digikey);

#[test]
fn test_buckets_without_catalog() {
    let output = run("board.json", None, &BomOptions::default());
    let report = &output.report;

    assert_eq!(report.total_components, 9);
    assert_eq!(report.bucket(JLCPCB).unwrap().components, 6);
    assert_eq!(report.bucket(DIGIKEY).unwrap().components, 1);
    assert_eq!(report.bucket(Bucket::Orphan).unwrap().components, 2);
    assert_eq!(report.catalog, CatalogSection::Missing);

    let names: Vec<&str> = output.row_sets.iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["JLCPCB", "Digikey", "Orphaned"]);
}

#[test]
fn test_jlcpcb_rows() {
    let output = run("board.json", None, &BomOptions::default());
    let set = output.row_set(JLCPCB).unwrap();

    assert_eq!(set.headers, vec!["Comment", "Designator", "Footprint", "LCSC Part #"]);
    assert_eq!(
        set.rows,
        vec![
            vec!["10k", "R1,R2", "R_0402_1005Metric", "C25744"],
            vec!["10k", "R3", "R_0402_1005Metric", "C25741"],
            vec!["100nF", "C1", "C_0402_1005Metric", "C1525"],
            vec!["10uF", "C2", "C_0603_1608Metric", "C19702"],
            vec!["LM358", "U2", "SOIC-8_3.9x4.9mm_P1.27mm", "C7950"],
        ]
    );
}

#[test]
fn test_digikey_and_orphan_rows() {
    let output = run("board.json", None, &BomOptions::default());

    let digikey = output.row_set(DIGIKEY).unwrap();
    assert_eq!(
        digikey.rows,
        vec![vec![
            "NE555",
            "Timer",
            "U1",
            "SOIC-8_3.9x4.9mm_P1.27mm",
            "296-1411-5-ND",
            "1"
        ]]
    );

    let orphans = output.row_set(Bucket::Orphan).unwrap();
    assert_eq!(orphans.headers, vec!["Comment", "Designator", "Footprint"]);
    assert_eq!(orphans.rows, vec![vec!["Conn_01x04", "J1,J2", "PinHeader_1x04"]]);
}

#[test]
fn test_generation_warnings() {
    let output = run("board.json", None, &BomOptions::default());
    let report = &output.report;

    assert_eq!(report.multiple_distributor_warnings.len(), 1);
    assert_eq!(
        report.multiple_distributor_warnings[0].to_string(),
        "[U2] has multiple distributors defined (using JLCPCB, ignoring Digikey)"
    );

    assert_eq!(report.inconsistent_group_warnings.len(), 1);
    assert_eq!(
        report.inconsistent_group_warnings[0].to_string(),
        "Symbols [R1, R2, R3] are identical (10k, Resistor_SMD:R_0402_1005Metric) \
         but have different JLCPCB part numbers: C25744 = R1, R2; C25741 = R3"
    );
    assert!(report.has_findings());
}

#[test]
fn test_catalog_checks() {
    let output = run("board.json", Some("jlcpcb_parts.csv"), &BomOptions::default());
    let results = output.report.catalog_results().expect("catalog was checked");

    assert_eq!(results.entries, 5);
    assert_eq!(results.last_update.unwrap().to_string(), "2023-03-01");
    assert_eq!(results.stats.pass, 3);
    assert_eq!(results.stats.suspect, 2);
    assert_eq!(results.stats.not_found, 1);

    let notes: Vec<String> = results.verdicts.iter().map(|v| v.to_string()).collect();
    assert_eq!(
        notes,
        vec![
            "[R3] C25741: value is \"10k\", expected \"100k\"",
            "[C2] C19702: footprint is \"Capacitor_SMD:C_0603_1608Metric\", expected \"0603\"",
            "C7950 (U2) not in database",
        ]
    );

    assert_eq!(results.suggestions.len(), 1);
    assert_eq!(
        results.suggestions[0].to_string(),
        "[C1] Part C307331 (Basic) could replace C1525 (Extended)"
    );
}

#[test]
fn test_lenient_policy_accepts_package_footprint() {
    let options = BomOptions {
        match_policy: MatchPolicy::Lenient,
        ..Default::default()
    };
    let output = run("board.json", Some("jlcpcb_parts.csv"), &options);
    let results = output.report.catalog_results().unwrap();

    assert_eq!(results.stats.pass, 4);
    assert_eq!(results.stats.suspect, 1);
    assert!(results
        .verdicts
        .iter()
        .all(|v| v.reference != "C2"));
}

#[test]
fn test_part_type_check_on_consistent_catalog() {
    let options = BomOptions {
        check_part_type: true,
        ..Default::default()
    };
    let output = run("board.json", Some("jlcpcb_parts.csv"), &options);
    assert_eq!(output.report.catalog_results().unwrap().stats.pass, 3);
}

#[test]
fn test_duplicate_catalog_keeps_buckets() {
    let without = run("board.json", None, &BomOptions::default());
    let with_bad = run("board.json", Some("duplicate_parts.csv"), &BomOptions::default());

    match &with_bad.report.catalog {
        CatalogSection::Invalid { reason } => {
            assert!(reason.contains("C25744"), "reason: {}", reason);
            assert!(reason.contains("already defined"), "reason: {}", reason);
        }
        other => panic!("expected invalid catalog, got {:?}", other),
    }
    assert_eq!(with_bad.row_sets, without.row_sets);
    assert_eq!(with_bad.report.buckets, without.report.buckets);
    assert_eq!(
        with_bad.report.inconsistent_group_warnings,
        without.report.inconsistent_group_warnings
    );
}

#[test]
fn test_missing_catalog_file_is_not_fatal() {
    let output = run("board.json", Some("no_such_catalog.csv"), &BomOptions::default());
    assert!(matches!(output.report.catalog, CatalogSection::Invalid { .. }));
    assert_eq!(output.row_sets.len(), 3);
}

#[test]
fn test_missing_components_file_is_fatal() {
    let result = BomGuardCore::process_files(
        &fixture_path("no_such_board.json"),
        None,
        &BomOptions::default(),
    );
    assert!(matches!(result, Err(BomGuardError::Io(_))));
}

#[test]
fn test_csv_export_matches_json() {
    let options = BomOptions::default();
    let json = run("board.json", Some("jlcpcb_parts.csv"), &options);
    let csv = run("board.csv", Some("jlcpcb_parts.csv"), &options);

    assert_eq!(csv.row_sets, json.row_sets);
    assert_eq!(csv.report, json.report);
}

#[test]
fn test_report_is_deterministic() {
    let options = BomOptions::default();
    let first = run("board.json", Some("jlcpcb_parts.csv"), &options);
    let second = run("board.json", Some("jlcpcb_parts.csv"), &options);

    let a = serde_json::to_string(&first.report).unwrap();
    let b = serde_json::to_string(&second.report).unwrap();
    assert_eq!(a, b);
    assert_eq!(first.row_sets, second.row_sets);
}

#[test]
fn test_report_json_shape() {
    let output = run("board.json", Some("jlcpcb_parts.csv"), &BomOptions::default());
    let json = serde_json::to_value(&output.report).unwrap();

    assert_eq!(json["total_components"], 9);
    assert_eq!(json["catalog"]["status"], "checked");
    assert_eq!(json["catalog"]["stats"]["not_found"], 1);
    assert_eq!(json["catalog"]["verdicts"][2]["status"], "not_in_database");
    assert_eq!(json["catalog"]["verdicts"][2]["reference"], "U2");
}

#[test]
fn test_classification_keeps_ignored_identifiers() {
    let components = bomguard::load_components(&fixture_path("board.json")).unwrap();
    let u2 = components.iter().find(|c| c.reference == "U2").unwrap();

    let assignment = bomguard::bom::Classifier::default().classify(u2);
    assert_eq!(assignment.distributor, Some(Distributor::Jlcpcb));
    assert!(assignment.had_multiple_distributors);
    assert_eq!(
        assignment.ignored,
        vec![(Distributor::Digikey, "296-1395-5-ND".to_string())]
    );
    // attribute data is untouched
    assert_eq!(u2.fields.get("digi-key_pn"), Some("296-1395-5-ND"));
    assert_eq!(u2.fields.get("LCSC"), Some("C7950"));

    let orphans_unflagged = components
        .iter()
        .filter(|c| c.reference.starts_with('J'))
        .map(|c| bomguard::bom::Classifier::default().classify(c))
        .all(|a| a.bucket() == Bucket::Orphan && !a.had_multiple_distributors);
    assert!(orphans_unflagged);
}

#[test]
fn test_verdict_kinds_are_listed_in_check_order() {
    let output = run("board.json", Some("jlcpcb_parts.csv"), &BomOptions::default());
    let kinds: Vec<bool> = output
        .report
        .catalog_results()
        .unwrap()
        .verdicts
        .iter()
        .map(|v| matches!(v.verdict, Verdict::NotInDatabase))
        .collect();
    assert_eq!(kinds, vec![false, false, true]);
}
