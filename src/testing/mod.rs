#![cfg(test)]
crate::reexport!(context);
pub use rstest::*;

pub(in crate::testing) fn common_init() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        // Only initialize once for all tests
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env()) // <- reads RUST_LOG
            .with_test_writer() // ensures it integrates with `cargo test` output
            .init();
    });
}

/// Split `SELECT | FROM t` into the text without the marker and the marker's
/// byte offset. Text without a marker puts the cursor at the end.
pub fn split_cursor(marked: &str) -> (String, usize) {
    match marked.find('|') {
        Some(at) => (format!("{}{}", &marked[..at], &marked[at + 1..]), at),
        None => (marked.to_string(), marked.len()),
    }
}

mod fixture_tests {
    use super::{super::*, *};

    #[test_context(AnalysisContext)]
    #[test]
    fn fixture_schema_is_ordered(ctx: &mut AnalysisContext) {
        let names: Vec<_> = ctx.schema.tables.iter().map(|t| t.table_name.as_str()).collect();
        assert_eq!(names, vec!["users", "orders"]);
        assert_eq!(ctx.config.rules.len(), 7);
    }

    #[rstest]
    #[case("SELECT | FROM t", "SELECT  FROM t", 7)]
    #[case("SELECT", "SELECT", 6)]
    fn splits_cursor_marker(#[case] marked: &str, #[case] text: &str, #[case] offset: usize) {
        assert_eq!(split_cursor(marked), (text.to_string(), offset));
    }
}
