use super::*;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    #[serde(default)]
    pub database: Option<String>,
    pub table_name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            database: None,
            table_name: table_name.into(),
            columns: Vec::new(),
        }
    }

    /// Construct a table with an explicit ordered list of column names.
    /// This preserves the ordering exactly as provided.
    pub fn new_with_ordered(
        table_name: impl Into<String>,
        columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            database: None,
            table_name: table_name.into(),
            columns: columns.into_iter().map(|c| Column::new(c, "")).collect(),
        }
    }

    pub fn in_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// `database.table` when a database is set, else the bare table name.
    pub fn qualified_name(&self) -> String {
        match &self.database {
            Some(db) => format!("{db}.{}", self.table_name),
            None => self.table_name.clone(),
        }
    }

    /// Case-insensitive name match.
    pub fn is_named(&self, name: &str) -> bool {
        self.table_name.eq_ignore_ascii_case(name)
    }
}
