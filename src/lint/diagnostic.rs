use crate::{ErrorLevel, sql::Location};
use serde::{Deserialize, Serialize};

/// Half-open byte range `[start_offset, end_offset)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixRange {
    pub start_offset: usize,
    pub end_offset: usize,
}

/// Replace `range` with `text`; an empty range inserts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixDescription {
    pub range: FixRange,
    pub text: String,
}

impl FixDescription {
    pub fn replace(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            range: FixRange {
                start_offset: start,
                end_offset: end,
            },
            text: text.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::replace(at, at, text)
    }

    pub fn start(&self) -> usize {
        self.range.start_offset
    }

    pub fn end(&self) -> usize {
        self.range.end_offset
    }

    pub fn is_insertion(&self) -> bool {
        self.start() == self.end()
    }
}

/// The fix field of a diagnostic: one edit or several applied together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Fix {
    Single(FixDescription),
    Multiple(Vec<FixDescription>),
}

impl Fix {
    pub fn descriptions(&self) -> &[FixDescription] {
        match self {
            Fix::Single(fix) => std::slice::from_ref(fix),
            Fix::Multiple(fixes) => fixes,
        }
    }
}

impl From<FixDescription> for Fix {
    fn from(fix: FixDescription) -> Self {
        Fix::Single(fix)
    }
}

impl From<Vec<FixDescription>> for Fix {
    fn from(mut fixes: Vec<FixDescription>) -> Self {
        match fixes.len() {
            1 => Fix::Single(fixes.remove(0)),
            _ => Fix::Multiple(fixes),
        }
    }
}

/// What a rule reports before the engine attaches its name and level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub message: String,
    pub location: Location,
    pub fix: Option<Fix>,
}

impl Finding {
    pub fn new(message: impl Into<String>, location: Location) -> Self {
        Self {
            message: message.into(),
            location,
            fix: None,
        }
    }

    pub fn with_fix(mut self, fix: impl Into<Fix>) -> Self {
        self.fix = Some(fix.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub rulename: String,
    pub message: String,
    pub error_level: ErrorLevel,
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
}

impl Diagnostic {
    pub fn from_finding(rulename: &str, error_level: ErrorLevel, finding: Finding) -> Self {
        Self {
            rulename: rulename.to_string(),
            message: finding.message,
            error_level,
            location: finding.location,
            fix: finding.fix,
        }
    }

    /// Fix descriptions of this diagnostic, possibly none.
    pub fn fixes(&self) -> &[FixDescription] {
        self.fix.as_ref().map(Fix::descriptions).unwrap_or_default()
    }
}

/// Flatten the fixes of all diagnostics into one list, in diagnostic order.
pub fn collect_fixes(diagnostics: &[Diagnostic]) -> Vec<FixDescription> {
    diagnostics
        .iter()
        .flat_map(|d| d.fixes().iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::Position;
    use serde_json::json;

    fn diagnostic(fix: Option<Fix>) -> Diagnostic {
        Diagnostic {
            rulename: "reserved-word-case".into(),
            message: "reserved word must be uppercase".into(),
            error_level: ErrorLevel::Error,
            location: Location::new(Position::new(0, 0, 0), Position::new(0, 6, 6)),
            fix,
        }
    }

    #[test]
    fn serializes_in_the_editor_shape() {
        let d = diagnostic(Some(FixDescription::replace(0, 6, "SELECT").into()));
        assert_eq!(
            serde_json::to_value(&d).expect("serialize"),
            json!({
                "rulename": "reserved-word-case",
                "message": "reserved word must be uppercase",
                "errorLevel": 2,
                "location": {
                    "start": { "line": 0, "column": 0, "offset": 0 },
                    "end": { "line": 0, "column": 6, "offset": 6 }
                },
                "fix": { "range": { "startOffset": 0, "endOffset": 6 }, "text": "SELECT" }
            })
        );
        let bare = serde_json::to_value(diagnostic(None)).expect("serialize");
        assert!(bare.get("fix").is_none());
    }

    #[test]
    fn fix_array_round_trips_untagged() {
        let fix: Fix = vec![FixDescription::insert(1, " "), FixDescription::insert(2, " ")].into();
        let value = serde_json::to_value(&fix).expect("serialize");
        assert!(value.is_array());
        assert_eq!(serde_json::from_value::<Fix>(value).expect("deserialize"), fix);
    }

    #[test]
    fn collects_single_and_multiple_fixes_in_order() {
        let diagnostics = [
            diagnostic(Some(FixDescription::insert(3, "a").into())),
            diagnostic(None),
            diagnostic(Some(Fix::Multiple(vec![
                FixDescription::insert(1, "b"),
                FixDescription::insert(0, "c"),
            ]))),
        ];
        let texts: Vec<_> = collect_fixes(&diagnostics)
            .into_iter()
            .map(|f| f.text)
            .collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }
}
