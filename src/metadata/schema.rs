use super::*;
use crate::Result;

/// Ordered list of tables, deserializable from
/// `[{ "database": ..., "tableName": ..., "columns": [{ "columnName": ..., "description": ... }] }]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    pub tables: Vec<Table>,
}

impl Schema {
    pub fn new(tables: impl IntoIterator<Item = Table>) -> Self {
        Self {
            tables: tables.into_iter().collect(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Tables with the given name (case-insensitive) across all databases,
    /// in schema order. An optional database narrows the match.
    pub fn find_tables<'a>(
        &'a self,
        database: Option<&str>,
        name: &str,
    ) -> impl Iterator<Item = &'a Table> {
        self.tables.iter().filter(move |t| {
            t.is_named(name)
                && database.is_none_or(|db| {
                    t.database
                        .as_deref()
                        .is_some_and(|d| d.eq_ignore_ascii_case(db))
                })
        })
    }

    /// True if some table lives in a database with this name.
    pub fn has_database(&self, database: &str) -> bool {
        self.tables.iter().any(|t| {
            t.database
                .as_deref()
                .is_some_and(|d| d.eq_ignore_ascii_case(database))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_the_editor_schema_shape() {
        let schema = Schema::from_json(
            r#"[{
                "database": "deepnote",
                "tableName": "users",
                "columns": [
                    { "columnName": "id", "description": "" },
                    { "columnName": "email", "description": "users email" }
                ]
            }, { "tableName": "orders" }]"#,
        )
        .expect("valid schema json");

        assert_eq!(schema.tables.len(), 2);
        let users = &schema.tables[0];
        assert_eq!(users.qualified_name(), "deepnote.users");
        assert_eq!(users.columns[1].detail(), Some("users email"));
        assert_eq!(users.columns[0].detail(), None);
        assert_eq!(schema.tables[1].database, None);
        assert!(schema.tables[1].columns.is_empty());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            Schema::from_json("{\"tableName\": 1}"),
            Err(crate::Error::Json(_))
        ));
    }

    #[test]
    fn finds_tables_case_insensitively() {
        let schema = Schema::new([
            Table::new_with_ordered("Users", ["id"]).in_database("app"),
            Table::new_with_ordered("users", ["uid"]).in_database("audit"),
        ]);
        assert_eq!(schema.find_tables(None, "USERS").count(), 2);
        let audit: Vec<_> = schema.find_tables(Some("AUDIT"), "users").collect();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].columns[0].column_name, "uid");
        assert!(schema.has_database("app"));
        assert!(!schema.has_database("nope"));
    }
}
