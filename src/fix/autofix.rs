use crate::{LintConfig, apply_fixes, collect_fixes, debug, execute, warn};

/// Default number of rule-engine evaluations one autofix may spend.
pub const MAX_AUTOFIX_LOOP: usize = 3;

/// Result of one autofix run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutofixOutcome {
    pub text: String,
    /// Rule-engine evaluations spent, never more than the budget.
    pub evaluations: usize,
    /// Fix passes that changed the text.
    pub passes: usize,
    /// True when the last evaluation found nothing left to fix.
    pub converged: bool,
}

/// Apply-then-relint loop with a fixed evaluation budget.
#[derive(Debug, Clone, Copy)]
pub struct Autofix<'a> {
    config: &'a LintConfig,
    budget: usize,
}

impl<'a> Autofix<'a> {
    pub fn new(config: &'a LintConfig, budget: usize) -> Self {
        Self { config, budget }
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn run(&self, text: &str) -> AutofixOutcome {
        let mut outcome = AutofixOutcome {
            text: text.to_string(),
            evaluations: 0,
            passes: 0,
            converged: false,
        };
        for _ in 0..self.budget {
            let diagnostics = execute(&outcome.text, self.config);
            outcome.evaluations += 1;
            let fixes = collect_fixes(&diagnostics);
            if fixes.is_empty() {
                outcome.converged = true;
                break;
            }
            match apply_fixes(&outcome.text, &fixes) {
                Ok(next) if next == outcome.text => {
                    outcome.converged = true;
                    break;
                }
                Ok(next) => {
                    outcome.text = next;
                    outcome.passes += 1;
                }
                Err(e) => {
                    warn!("Stopping autofix after {} pass(es): {e}", outcome.passes);
                    break;
                }
            }
        }
        debug!(
            "Autofix finished: {} evaluation(s), {} pass(es), converged: {}",
            outcome.evaluations, outcome.passes, outcome.converged
        );
        outcome
    }
}

/// Fix `text` until no rule proposes a change or `max_iterations` rule-engine
/// evaluations have been spent.
pub fn autofix(text: &str, config: &LintConfig, max_iterations: usize) -> String {
    Autofix::new(config, max_iterations).run(text).text
}
