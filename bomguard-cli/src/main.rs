//! BomGuard CLI - multi-distributor BoM generation from the command line.

mod output;

use bomguard::{BomGuardCore, BomOptions, BomOutput, Bucket, Distributor, MatchPolicy};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "bomguard")]
#[command(about = "Multi-distributor BoM generator with JLCPCB catalog checks", long_about = None)]
#[command(version)]
struct Cli {
    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write per-distributor BoM files and the text report
    Generate {
        #[command(flatten)]
        run: RunArgs,

        /// Directory for the generated files (defaults to the input's directory)
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Print the report without writing any files
    Report {
        #[command(flatten)]
        run: RunArgs,
    },

    /// List supported distributors and their part-number fields
    Distributors {
        /// Show output columns as well
        #[arg(short = 'l', long)]
        long: bool,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Component list (.json or KiCad-style .csv BoM export)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// JLCPCB parts catalog CSV (Number, Type, Value, Footprint, Basic, Edited)
    #[arg(short, long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Project name used in file names (defaults to the input file stem)
    #[arg(short, long)]
    project: Option<String>,

    /// Accept engineering-notation values and footprints containing the catalog package
    #[arg(long)]
    lenient: bool,

    /// Also compare designator letters against the catalog part type
    #[arg(long)]
    check_type: bool,

    /// Do not suggest cheaper substitute parts
    #[arg(long)]
    no_suggest: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Exit with error code if any warning or catalog finding is reported
    #[arg(long)]
    fail_on_warnings: bool,
}

impl RunArgs {
    fn options(&self) -> BomOptions {
        BomOptions {
            match_policy: if self.lenient {
                MatchPolicy::Lenient
            } else {
                MatchPolicy::Strict
            },
            check_part_type: self.check_type,
            suggest_substitutes: !self.no_suggest,
            ..Default::default()
        }
    }

    fn project(&self) -> String {
        self.project.clone().unwrap_or_else(|| {
            self.input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("bom")
                .to_string()
        })
    }
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable report
    Human,
    /// JSON output for CI/CD
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match cli.command {
        Commands::Generate { run, output_dir } => {
            let dir = output_dir.unwrap_or_else(|| input_dir(&run.input));
            handle_run(&run, Some(&dir))
        }
        Commands::Report { run } => handle_run(&run, None),
        Commands::Distributors { long } => {
            handle_distributors(long);
            0
        }
    };

    process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn input_dir(input: &Path) -> PathBuf {
    match input.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn handle_run(run: &RunArgs, output_dir: Option<&Path>) -> i32 {
    let options = run.options();
    let output = match BomGuardCore::process_files(&run.input, run.catalog.as_deref(), &options) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let project = run.project();
    let report_text = match output::render_report(&project, &output.report) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: failed to render report: {}", e);
            return 1;
        }
    };

    let written = match output_dir {
        Some(dir) => match output::write_all(dir, &project, &output, &report_text) {
            Ok(paths) => paths,
            Err(e) => {
                eprintln!("Error: failed to write BoM files: {}", e);
                return 1;
            }
        },
        None => Vec::new(),
    };

    match run.format {
        OutputFormat::Human => output_human(&project, &report_text, &written),
        OutputFormat::Json => {
            if let Err(e) = output_json(&project, &output, &written) {
                eprintln!("Error: {}", e);
                return 1;
            }
        }
    }

    if run.fail_on_warnings && output.report.has_findings() {
        return 1;
    }
    0
}

fn output_human(project: &str, report_text: &str, written: &[PathBuf]) {
    if !written.is_empty() {
        println!("Generated files for {}:", project);
        for path in written {
            println!("  {}", path.display());
        }
        println!();
    }
    print!("{}", report_text);
}

fn output_json(
    project: &str,
    output: &BomOutput,
    written: &[PathBuf],
) -> Result<(), serde_json::Error> {
    let json = serde_json::json!({
        "project": project,
        "files": written.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
        "row_sets": output.row_sets,
        "report": output.report,
        "summary": {
            "total_components": output.report.total_components,
            "warnings": output.report.warning_count(),
            "has_findings": output.report.has_findings(),
        }
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn handle_distributors(long: bool) {
    println!("Supported distributors (in priority order):\n");

    for distributor in Distributor::PRIORITY {
        println!("  {}", distributor);
        println!("    Fields: {}", distributor.aliases().join(", "));
        if long {
            let columns = Bucket::Distributor(distributor).columns();
            println!("    Columns: {}", columns.join(", "));
        }
        println!();
    }

    println!("  Orphaned");
    println!("    Symbols with none of the fields above");
    if long {
        println!("    Columns: {}", Bucket::Orphan.columns().join(", "));
    }
}
