use crate::{
    CandidateKind, CompletionCandidate, Cursor, Diagnostic, ErrorLevel, FixDescription,
    LintConfig, MAX_AUTOFIX_LOOP, Schema, autofix, complete,
    sql::{Location, Position},
};
use lsp_types::{
    CompletionItem, CompletionItemKind, DiagnosticSeverity, NumberOrString, Range, TextEdit,
};

/// Characters that open a completion request on their own.
pub const TRIGGER_CHARACTERS: [&str; 1] = ["."];

/// Name reported as the source of every diagnostic.
pub const DIAGNOSTIC_SOURCE: &str = "sqlhint";

/// Byte offset to a protocol position with a UTF-16 character column.
pub fn offset_to_position(text: &str, offset: usize) -> lsp_types::Position {
    let position = Position::locate(text, offset);
    lsp_types::Position::new(position.line, position.column)
}

/// Protocol position to a byte offset, clamped to the line and the text.
pub fn position_to_offset(text: &str, position: lsp_types::Position) -> usize {
    Position::resolve(text, position.line, position.character)
}

pub fn to_lsp_range(location: &Location) -> Range {
    Range::new(
        lsp_types::Position::new(location.start.line, location.start.column),
        lsp_types::Position::new(location.end.line, location.end.column),
    )
}

/// Offsets of a protocol range in `text`.
pub fn to_location(text: &str, range: Range) -> Location {
    Location::from_offsets(
        text,
        position_to_offset(text, range.start),
        position_to_offset(text, range.end),
    )
}

pub fn to_lsp_diagnostic(diagnostic: &Diagnostic) -> lsp_types::Diagnostic {
    let severity = match diagnostic.error_level {
        ErrorLevel::Error => Some(DiagnosticSeverity::ERROR),
        ErrorLevel::Warn => Some(DiagnosticSeverity::WARNING),
        ErrorLevel::Off => None,
    };
    lsp_types::Diagnostic {
        range: to_lsp_range(&diagnostic.location),
        severity,
        code: Some(NumberOrString::String(diagnostic.rulename.clone())),
        source: Some(DIAGNOSTIC_SOURCE.to_string()),
        message: diagnostic.message.clone(),
        ..Default::default()
    }
}

pub fn to_completion_item(candidate: &CompletionCandidate) -> CompletionItem {
    let kind = match candidate.kind {
        CandidateKind::Keyword => CompletionItemKind::KEYWORD,
        CandidateKind::Table => CompletionItemKind::CLASS,
        CandidateKind::Column => CompletionItemKind::FIELD,
    };
    CompletionItem {
        label: candidate.label.clone(),
        kind: Some(kind),
        detail: candidate.detail.clone(),
        ..Default::default()
    }
}

/// Completion items at a protocol position.
pub fn completion_items(
    text: &str,
    position: lsp_types::Position,
    schema: &Schema,
) -> Vec<CompletionItem> {
    complete(text, Cursor::new(position.line, position.character), schema)
        .iter()
        .map(to_completion_item)
        .collect()
}

/// The offset edit as a protocol edit against `text`.
pub fn to_text_edit(text: &str, fix: &FixDescription) -> TextEdit {
    TextEdit::new(
        Range::new(
            offset_to_position(text, fix.start()),
            offset_to_position(text, fix.end()),
        ),
        fix.text.clone(),
    )
}

/// A code action that applies one diagnostic's fix.
#[derive(Debug, Clone, PartialEq)]
pub struct QuickFix {
    pub title: String,
    pub edits: Vec<TextEdit>,
}

/// Quick fix for `diagnostic`, computed against the text it was reported on.
/// `None` when the diagnostic carries no fix.
pub fn quick_fix(text: &str, diagnostic: &Diagnostic) -> Option<QuickFix> {
    let fixes = diagnostic.fixes();
    if fixes.is_empty() {
        return None;
    }
    Some(QuickFix {
        title: format!("fix: {}", diagnostic.message),
        edits: fixes.iter().map(|f| to_text_edit(text, f)).collect(),
    })
}

/// One edit replacing the whole document with its autofixed form.
/// `None` when autofix leaves the text unchanged.
pub fn fix_all(text: &str, config: &LintConfig) -> Option<TextEdit> {
    let fixed = autofix(text, config, MAX_AUTOFIX_LOOP);
    (fixed != text).then(|| {
        TextEdit::new(
            Range::new(
                lsp_types::Position::new(0, 0),
                offset_to_position(text, text.len()),
            ),
            fixed,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Table, execute, testing::*};
    use serde_json::json;

    fn pos(line: u32, character: u32) -> lsp_types::Position {
        lsp_types::Position::new(line, character)
    }

    #[rstest]
    #[case("SELECT\n  id", 9, pos(1, 2))]
    #[case("'𝄞' x", 7, pos(0, 5))]
    #[case("é\nb", 3, pos(1, 0))]
    #[case("ab", 2, pos(0, 2))]
    fn converts_offsets_both_ways(
        #[case] text: &str,
        #[case] offset: usize,
        #[case] position: lsp_types::Position,
    ) {
        assert_eq!(offset_to_position(text, offset), position);
        assert_eq!(position_to_offset(text, position), offset);
    }

    #[test]
    fn position_past_line_end_clamps() {
        assert_eq!(position_to_offset("ab\ncd", pos(0, 40)), 2);
        assert_eq!(position_to_offset("ab\ncd", pos(9, 0)), 5);
    }

    #[test]
    fn diagnostics_carry_rule_and_severity() {
        let config = LintConfig::from_raw(&json!({
            "rules": { "reserved-word-case": "warning" }
        }))
        .expect("config");
        let diagnostics = execute("select 1", &config);
        let lsp = to_lsp_diagnostic(&diagnostics[0]);
        assert_eq!(lsp.range, Range::new(pos(0, 0), pos(0, 6)));
        assert_eq!(lsp.severity, Some(DiagnosticSeverity::WARNING));
        assert_eq!(
            lsp.code,
            Some(NumberOrString::String("reserved-word-case".into()))
        );
        assert_eq!(lsp.source.as_deref(), Some("sqlhint"));
        assert_eq!(lsp.message, "reserved word must be uppercase");
    }

    #[rstest]
    fn completion_items_map_kinds(analysis_schema: Schema) {
        let items = completion_items("SELECT * FROM ", pos(0, 14), &analysis_schema);
        let users = items
            .iter()
            .find(|i| i.label == "users")
            .expect("users table");
        assert_eq!(users.kind, Some(CompletionItemKind::CLASS));

        let table = Table::new("users");
        let column = CompletionCandidate::column(&table, &crate::Column::new("id", ""));
        assert_eq!(
            to_completion_item(&column).kind,
            Some(CompletionItemKind::FIELD)
        );
    }

    #[test]
    fn quick_fix_translates_offsets() {
        let text = "-- é\nselect 1";
        let config = LintConfig::empty().with_rule(
            "reserved-word-case",
            crate::RuleConfig::new(ErrorLevel::Error),
        );
        let diagnostics = execute(text, &config);
        let fix = quick_fix(text, &diagnostics[0]).expect("fixable");
        assert_eq!(fix.title, "fix: reserved word must be uppercase");
        assert_eq!(
            fix.edits,
            vec![TextEdit::new(Range::new(pos(1, 0), pos(1, 6)), "SELECT".into())]
        );
    }

    #[test]
    fn fix_all_replaces_the_whole_document() {
        let config = LintConfig::from_raw(&json!({
            "rules": { "reserved-word-case": "error" }
        }))
        .expect("config");
        let edit = fix_all("select\n1", &config).expect("changes");
        assert_eq!(edit.range, Range::new(pos(0, 0), pos(1, 1)));
        assert_eq!(edit.new_text, "SELECT\n1");
        assert!(fix_all("SELECT 1", &config).is_none());
    }
}
