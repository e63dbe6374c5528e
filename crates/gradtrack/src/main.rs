use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use tracing::info;

use gradtrack::audit::{GraduationRequirements, LanguageTrack, RequirementEngine};
use gradtrack::catalog::CourseCatalog;
use gradtrack::export;
use gradtrack::store::RecordsSnapshot;

const USAGE: &str = "\
Usage: gradtrack [OPTIONS] <catalog.json> <requirements.json> [records.json]

Evaluates a student's course records against graduation requirements and
prints the credit summary as JSON. Without a records file, evaluates an
empty selection.

Options:
  --track-b      Evaluate the Language B track (default is Language A)
  --csv          Print the course list with record statuses as CSV instead
  --recommend    Print course recommendations instead of the summary
  -h, --help     Show this message";

enum OutputMode {
    Summary,
    Csv,
    Recommend,
}

struct Args {
    catalog: PathBuf,
    requirements: PathBuf,
    records: Option<PathBuf>,
    track: LanguageTrack,
    output: OutputMode,
}

fn parse_args(argv: &[String]) -> Result<Option<Args>> {
    let mut positional: Vec<PathBuf> = Vec::new();
    let mut track = LanguageTrack::TrackA;
    let mut output = OutputMode::Summary;

    for arg in argv {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--track-a" => track = LanguageTrack::TrackA,
            "--track-b" => track = LanguageTrack::TrackB,
            "--csv" => output = OutputMode::Csv,
            "--recommend" => output = OutputMode::Recommend,
            other if other.starts_with('-') => bail!("unknown option {other}\n\n{USAGE}"),
            other => positional.push(PathBuf::from(other)),
        }
    }

    if positional.len() > 3 {
        bail!("too many file arguments\n\n{USAGE}");
    }

    let mut files = positional.into_iter();
    match (files.next(), files.next(), files.next()) {
        (Some(catalog), Some(requirements), records) => Ok(Some(Args {
            catalog,
            requirements,
            records,
            track,
            output,
        })),
        _ => bail!("expected catalog and requirements files\n\n{USAGE}"),
    }
}

fn run(args: Args) -> Result<()> {
    let catalog = CourseCatalog::load_from_file(&args.catalog)
        .with_context(|| format!("loading catalog from {}", args.catalog.display()))?;
    let requirements = GraduationRequirements::load_from_file(&args.requirements)
        .with_context(|| format!("loading requirements from {}", args.requirements.display()))?;

    let records = match &args.records {
        Some(path) => {
            RecordsSnapshot::load_from_file(path)
                .with_context(|| format!("loading records from {}", path.display()))?
                .records
        }
        None => Vec::new(),
    };

    let engine = RequirementEngine::new(catalog, requirements);

    match args.output {
        OutputMode::Csv => {
            print!("{}", export::records_to_csv(engine.catalog(), &records));
        }
        OutputMode::Recommend => {
            let recommendations = engine.recommend_courses(&records, args.track);
            println!("{}", serde_json::to_string_pretty(&recommendations)?);
        }
        OutputMode::Summary => {
            let summary = engine.evaluate(&records, args.track);
            info!(
                "Evaluation finished: {}/{} credits completed, can_graduate={}",
                summary.total_completed, summary.total_required, summary.can_graduate
            );
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    match parse_args(&argv) {
        Ok(Some(args)) => {
            if let Err(e) = run(args) {
                eprintln!("error: {e:#}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("{USAGE}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
