use serde_json::Value;
use sqlhint::{ErrorLevel, FormatType, LintRequest, LintResult, Result, config, lint_results, render};
use std::{io::Read, process::ExitCode};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Lint the SQL file named by the first argument, or stdin, and print the
/// report. With `SQLHINT_FIX` in stylish mode the fixed text goes to stdout
/// and the report to stderr.
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(results) if has_errors(&results) => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<Vec<LintResult>> {
    let settings = config();
    let format: FormatType = settings.format.parse()?;

    let path = std::env::args().nth(1);
    let text = match &path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    let raw_config = match &settings.config_file {
        Some(file) => {
            debug!("Reading lint configuration from {}", file.display());
            Some(serde_json::from_str::<Value>(&std::fs::read_to_string(file)?)?)
        }
        None => None,
    };

    let request = LintRequest {
        path,
        text: Some(text),
        format_type: format.to_string(),
        fix: settings.fix,
        config: raw_config,
        max_autofix_loop: Some(settings.max_autofix_loop),
    };
    let results = lint_results(&request)?;
    let report = render(&results, format)?;

    let fixed = results.first().and_then(|r| r.fixed_text.as_deref());
    match (format, fixed) {
        (FormatType::Stylish, Some(fixed)) => {
            print!("{fixed}");
            eprintln!("{report}");
        }
        _ => println!("{report}"),
    }
    Ok(results)
}

fn has_errors(results: &[LintResult]) -> bool {
    results.iter().any(|r| r.count(ErrorLevel::Error) > 0)
}
