use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gloss_recognizer::config::AppConfig;
use gloss_recognizer::context::{GlossService, TranslationOutcome};
use gloss_recognizer::fixtures::{ExpectationDiff, FixtureCatalog};
use gloss_recognizer::signatures::SignatureDatabase;
use gloss_recognizer::telemetry::{self, DiagnosticError};
use serde::Serialize;

/// Bundled store used when the configured relative path does not resolve from the cwd
const BUNDLED_SIGNATURES_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/gestures.json");

#[derive(Parser, Debug)]
#[command(
    name = "gloss_cli",
    about = "Deterministic fixture harness for the sign gloss recognizer"
)]
struct Cli {
    /// Override directory containing fixture assets (defaults to ./fixtures in the crate)
    #[arg(long, global = true)]
    fixtures_dir: Option<PathBuf>,
    /// Signature store to match against (defaults to the configured store)
    #[arg(long, global = true)]
    signatures: Option<PathBuf>,
    /// JSON configuration file (defaults to assets/gloss_config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Recognize a fixture and optionally compare against expectations
    Recognize {
        #[arg(long)]
        fixture: String,
        #[arg(long)]
        expect: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print every considered window of a fixture as one JSON line
    Windows {
        #[arg(long)]
        fixture: String,
    },
    /// List available fixtures on disk
    DumpFixtures,
    /// List signatures in store order
    Signatures,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = cli
        .config
        .as_deref()
        .map(AppConfig::load_from_file)
        .unwrap_or_else(AppConfig::load);
    let signatures = cli
        .signatures
        .unwrap_or_else(|| resolve_store_path(&config.store.signatures_path));
    let catalog = cli
        .fixtures_dir
        .map(FixtureCatalog::new)
        .unwrap_or_default();

    match cli.command {
        Commands::Recognize {
            fixture,
            expect,
            output,
        } => {
            let service = GlossService::from_parts(&signatures, &config)?;
            run_recognize(&service, &catalog, &fixture, expect, output)
        }
        Commands::Windows { fixture } => {
            let service = GlossService::from_parts(&signatures, &config)?;
            run_windows(&service, &catalog, &fixture)
        }
        Commands::DumpFixtures => run_dump(&catalog),
        Commands::Signatures => run_signatures(&signatures),
    }
}

fn resolve_store_path(configured: &Path) -> PathBuf {
    if configured.is_absolute() || configured.exists() {
        configured.to_path_buf()
    } else {
        PathBuf::from(BUNDLED_SIGNATURES_PATH)
    }
}

fn run_recognize(
    service: &GlossService,
    catalog: &FixtureCatalog,
    fixture: &str,
    override_expect: Option<PathBuf>,
    output_path: Option<PathBuf>,
) -> Result<ExitCode> {
    let data = catalog.load(fixture, override_expect).map_err(|err| {
        telemetry::hub().record_error(DiagnosticError::FixtureLoad, format!("{err:#}"));
        err
    })?;
    let outcome = service.translate_frames(&data.frames);

    emit_report(&data.metadata.name, &outcome, output_path)?;

    if let Some(expectations) = data.expectations {
        match expectations.verify(&outcome.words) {
            Ok(()) => Ok(ExitCode::from(0)),
            Err(diff) => {
                emit_diff(&diff)?;
                Ok(ExitCode::from(2))
            }
        }
    } else {
        Ok(ExitCode::from(0))
    }
}

fn run_windows(service: &GlossService, catalog: &FixtureCatalog, fixture: &str) -> Result<ExitCode> {
    let data = catalog.load(fixture, None)?;
    let report = service.recognize(&data.frames);

    for window in &report.windows {
        println!("{}", serde_json::to_string(window)?);
    }

    Ok(ExitCode::from(0))
}

fn run_dump(catalog: &FixtureCatalog) -> Result<ExitCode> {
    let fixtures = catalog.discover()?;
    if fixtures.is_empty() {
        println!("No fixtures found under {}", catalog.root().display());
        return Ok(ExitCode::from(0));
    }

    for metadata in fixtures {
        if let Some(expect) = metadata.expect_path {
            println!("{} -> {}", metadata.name, expect.display());
        } else {
            println!("{}", metadata.name);
        }
    }
    Ok(ExitCode::from(0))
}

fn run_signatures(path: &Path) -> Result<ExitCode> {
    let database = SignatureDatabase::load_from_file(path)
        .with_context(|| format!("loading signatures from {}", path.display()))?;
    if database.is_empty() {
        println!("No signatures found in {}", path.display());
        return Ok(ExitCode::from(0));
    }

    for signature in &database {
        println!(
            "{} {}",
            signature.name,
            serde_json::to_string(&signature.features)?
        );
    }
    Ok(ExitCode::from(0))
}

fn emit_report(
    fixture: &str,
    outcome: &TranslationOutcome,
    output_path: Option<PathBuf>,
) -> Result<()> {
    let report = FixtureReportPayload { fixture, outcome };
    let json = serde_json::to_string_pretty(&report)?;

    if let Some(path) = output_path {
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    } else {
        println!("{json}");
    }

    Ok(())
}

fn emit_diff(diff: &ExpectationDiff) -> Result<()> {
    let json = serde_json::to_string_pretty(&diff.to_json())?;
    eprintln!("{json}");
    Ok(())
}

#[derive(Serialize)]
struct FixtureReportPayload<'a> {
    fixture: &'a str,
    #[serde(flatten)]
    outcome: &'a TranslationOutcome,
}
