use crate::testing::*;
use crate::{Column, LintConfig, Schema, Table};
use test_context::TestContext;
pub use test_context::test_context;

/// Shared analysis inputs: a small two-table schema and the default lint
/// configuration.
pub struct AnalysisContext {
    pub schema: Schema,
    pub config: LintConfig,
}

/// `app.users(id, email)` followed by `app.orders(id, user_id, total)`.
#[fixture]
pub fn analysis_schema() -> Schema {
    Schema::new([
        Table::new("users")
            .in_database("app")
            .with_column(Column::new("id", ""))
            .with_column(Column::new("email", "")),
        Table::new_with_ordered("orders", ["id", "user_id", "total"]).in_database("app"),
    ])
}

impl TestContext for AnalysisContext {
    fn setup() -> Self {
        crate::testing::common_init();
        Self {
            schema: analysis_schema(),
            config: LintConfig::default(),
        }
    }
}
