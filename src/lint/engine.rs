use crate::{
    Diagnostic, ErrorLevel, LintConfig,
    lint::{Finding, RULES, Rule, RuleContext},
    sql::{Location, parse_all, tokenize},
    trace, warn,
};
use serde_json::Value;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Run every enabled rule over `text`.
///
/// Rules run in registry order. A rule that rejects its option, panics, or
/// proposes a fix outside the text contributes a single warning naming it
/// instead of its findings. The result is stably sorted by start offset.
pub fn execute(text: &str, config: &LintConfig) -> Vec<Diagnostic> {
    let tokens = tokenize(text);
    let statements = parse_all(&tokens);
    let ctx = RuleContext::new(text, &tokens, &statements);

    let mut diagnostics = Vec::new();
    for rule in &RULES {
        let Some(setting) = config.rule(rule.name).filter(|r| !r.level.is_off()) else {
            continue;
        };
        match run_isolated(rule, &ctx, &setting.option) {
            Ok(findings) => {
                trace!("{} reported {} finding(s)", rule.name, findings.len());
                diagnostics.extend(
                    findings
                        .into_iter()
                        .map(|f| Diagnostic::from_finding(rule.name, setting.level, f)),
                );
            }
            Err(reason) => {
                warn!("Rule {} failed: {reason}", rule.name);
                diagnostics.push(rule_fault(rule.name, &reason));
            }
        }
    }
    diagnostics.sort_by_key(|d| d.location.start.offset);
    diagnostics
}

fn run_isolated(
    rule: &Rule,
    ctx: &RuleContext,
    option: &Value,
) -> std::result::Result<Vec<Finding>, String> {
    let findings = match catch_unwind(AssertUnwindSafe(|| (rule.check)(ctx, option))) {
        Ok(Ok(findings)) => findings,
        Ok(Err(e)) => return Err(e.to_string()),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            return Err(format!("panicked: {message}"));
        }
    };
    let len = ctx.text.len();
    let bad = findings
        .iter()
        .filter_map(|f| f.fix.as_ref())
        .flat_map(|fix| fix.descriptions())
        .find(|d| {
            d.start() > d.end()
                || d.end() > len
                || !ctx.text.is_char_boundary(d.start())
                || !ctx.text.is_char_boundary(d.end())
        });
    match bad {
        Some(d) => Err(format!("fix {}..{} is outside the text", d.start(), d.end())),
        None => Ok(findings),
    }
}

fn rule_fault(rule: &str, reason: &str) -> Diagnostic {
    Diagnostic {
        rulename: rule.to_string(),
        message: format!("rule {rule} could not be evaluated: {reason}"),
        error_level: ErrorLevel::Warn,
        location: Location::default(),
        fix: None,
    }
}
