use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use mhtml_language_server::config::ConfigArgs;
use mhtml_language_server::core::collect_diagnostics;
use mhtml_language_server::validation::Severity;
use mhtml_language_server::Config;

/// Validate MHTML documents from the command line
#[derive(Debug, Parser)]
#[command(name = "mhtml-check")]
#[command(about = "Check MHTML documents against the structural grammar")]
#[command(version)]
struct CheckArgs {
    /// Documents to validate
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Print one JSON diagnostic batch per document
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    config: ConfigArgs,
}

fn main() -> Result<ExitCode> {
    let args = CheckArgs::parse();
    let config = Config::from_args(args.config)?;
    config.init_logging();
    let options = config.validation_options();

    let mut clean = true;
    for path in &args.paths {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let batch = collect_diagnostics(&path.display().to_string(), 0, &text, &options);
        clean &= batch.diagnostics.is_empty();

        if args.json {
            println!("{}", serde_json::to_string(&batch)?);
            continue;
        }

        for diagnostic in &batch.diagnostics {
            let severity = match diagnostic.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
                Severity::Info => "info",
                Severity::Hint => "hint",
            };
            println!(
                "{}:{}:{}: {}: {}",
                path.display(),
                diagnostic.range.start.line + 1,
                diagnostic.range.start.character + 1,
                severity,
                diagnostic.message
            );
        }
    }

    Ok(if clean {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
