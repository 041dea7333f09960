use crate::{
    Autofix, Diagnostic, Error, ErrorLevel, LintConfig, MAX_AUTOFIX_LOOP, Result, debug, execute,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt::Write as _, str::FromStr};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_more::Display)]
pub enum FormatType {
    #[default]
    #[display("stylish")]
    Stylish,
    #[display("json")]
    Json,
}

impl FromStr for FormatType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "stylish" => Ok(FormatType::Stylish),
            "json" => Ok(FormatType::Json),
            other => Err(Error::Input(format!("unsupported formatType: {other}"))),
        }
    }
}

/// One call of the programmatic lint entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LintRequest {
    /// Reported as the file path of the result; `text` when absent.
    pub path: Option<String>,
    pub text: Option<String>,
    pub format_type: String,
    pub fix: bool,
    /// Raw `{ "rules": { ... } }` configuration; the default rules when absent.
    pub config: Option<Value>,
    pub max_autofix_loop: Option<usize>,
}

impl LintRequest {
    pub fn new(text: impl Into<String>, format_type: FormatType) -> Self {
        Self {
            text: Some(text.into()),
            format_type: format_type.to_string(),
            ..Default::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_fix(mut self, fix: bool) -> Self {
        self.fix = fix;
        self
    }

    pub fn with_config(mut self, config: Value) -> Self {
        self.config = Some(config);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LintResult {
    pub filepath: String,
    pub diagnostics: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_text: Option<String>,
}

impl LintResult {
    pub fn count(&self, level: ErrorLevel) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.error_level == level)
            .count()
    }
}

/// Lint the request's text and render the report in its format.
pub fn lint(request: &LintRequest) -> Result<String> {
    let format: FormatType = request.format_type.parse()?;
    render(&lint_results(request)?, format)
}

pub fn render(results: &[LintResult], format: FormatType) -> Result<String> {
    match format {
        FormatType::Stylish => Ok(format_stylish(results)),
        FormatType::Json => Ok(serde_json::to_string(results)?),
    }
}

/// Lint the request's text without rendering.
pub fn lint_results(request: &LintRequest) -> Result<Vec<LintResult>> {
    let filepath = request.path.clone().unwrap_or_else(|| "text".to_string());
    let text = request
        .text
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::Input(format!("no text to lint, path: {filepath}")))?;
    let config = match &request.config {
        Some(raw) => LintConfig::from_raw(raw)?,
        None => LintConfig::default(),
    };
    debug!("Linting {filepath} with {} configured rule(s)", config.rules.len());

    let result = if request.fix {
        let budget = request.max_autofix_loop.unwrap_or(MAX_AUTOFIX_LOOP);
        let fixed = Autofix::new(&config, budget).run(text).text;
        LintResult {
            filepath,
            diagnostics: execute(&fixed, &config),
            fixed_text: Some(fixed),
        }
    } else {
        LintResult {
            filepath,
            diagnostics: execute(text, &config),
            fixed_text: None,
        }
    };
    Ok(vec![result])
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

/// Human-readable report: diagnostics grouped under their file path with a
/// 1-based `line:column`, then a problem count.
pub fn format_stylish(results: &[LintResult]) -> String {
    let mut out = String::from("\n");
    let reported: Vec<&LintResult> = results.iter().filter(|r| !r.diagnostics.is_empty()).collect();
    if reported.is_empty() {
        return out;
    }

    let (mut errors, mut warnings) = (0, 0);
    for result in reported {
        let _ = writeln!(out, "{}", result.filepath);
        for d in &result.diagnostics {
            let _ = writeln!(
                out,
                "  {}:{} {} {} {}",
                d.location.start.line + 1,
                d.location.start.column + 1,
                d.error_level,
                d.message,
                d.rulename
            );
        }
        errors += result.count(ErrorLevel::Error);
        warnings += result.count(ErrorLevel::Warn);
    }
    let total = errors + warnings;
    let _ = write!(
        out,
        "\n\u{2716} {total} {} ({errors} {}, {warnings} {})",
        pluralize("problem", total),
        pluralize("error", errors),
        pluralize("warning", warnings)
    );
    out
}
