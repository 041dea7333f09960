use crate::{
    metadata::{Column, Table},
    sql::Keyword,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum CandidateKind {
    #[display("keyword")]
    Keyword,
    #[display("table")]
    Table,
    #[display("column")]
    Column,
}

/// One completion proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_more::Display)]
#[display("{label}")]
pub struct CompletionCandidate {
    pub label: String,
    pub kind: CandidateKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl CompletionCandidate {
    pub fn keyword(keyword: Keyword) -> Self {
        Self {
            label: keyword.upper(),
            kind: CandidateKind::Keyword,
            detail: None,
        }
    }

    /// Tables living in a database carry `database.table` as detail.
    pub fn table(table: &Table) -> Self {
        Self {
            label: table.table_name.clone(),
            kind: CandidateKind::Table,
            detail: table.database.as_ref().map(|_| table.qualified_name()),
        }
    }

    /// Columns carry their description, or the owning table when there is none.
    pub fn column(table: &Table, column: &Column) -> Self {
        Self {
            label: column.column_name.clone(),
            kind: CandidateKind::Column,
            detail: Some(
                column
                    .detail()
                    .map(str::to_string)
                    .unwrap_or_else(|| table.qualified_name()),
            ),
        }
    }

    /// Case-insensitive prefix match; an empty prefix matches everything.
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        self.label
            .to_lowercase()
            .starts_with(&prefix.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_candidates_from_schema_items() {
        let users = Table::new("users")
            .in_database("app")
            .with_column(Column::new("id", ""))
            .with_column(Column::new("email", "login address"));

        let table = CompletionCandidate::table(&users);
        assert_eq!(table.detail.as_deref(), Some("app.users"));
        assert_eq!(table.to_string(), "users");

        let id = CompletionCandidate::column(&users, &users.columns[0]);
        assert_eq!(id.detail.as_deref(), Some("app.users"));
        let email = CompletionCandidate::column(&users, &users.columns[1]);
        assert_eq!(email.detail.as_deref(), Some("login address"));

        let kw = CompletionCandidate::keyword(Keyword::Select);
        assert_eq!((kw.label.as_str(), kw.kind), ("SELECT", CandidateKind::Keyword));
        assert!(kw.matches_prefix("sel"));
        assert!(kw.matches_prefix(""));
        assert!(!kw.matches_prefix("fr"));
    }

    #[test]
    fn table_without_database_has_no_detail() {
        assert_eq!(CompletionCandidate::table(&Table::new("t")).detail, None);
    }
}
