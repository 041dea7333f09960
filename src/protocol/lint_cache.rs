use crate::{Diagnostic, LintConfig, config, execute, sql::Location, to_location, trace};
use moka::sync::Cache;
use std::sync::Arc;

/// Last diagnostics per document, keyed by document URI.
///
/// Code actions are resolved against this cache: the editor asks for a
/// range and gets back the diagnostic it was shown there.
#[derive(Clone)]
pub struct LintCache {
    cache: Cache<String, Arc<Vec<Diagnostic>>>,
}

impl LintCache {
    pub fn new(capacity: u64) -> Self {
        Self {
            cache: Cache::new(capacity),
        }
    }

    /// Cache sized from `SQLHINT_LINT_CACHE_CAPACITY`.
    pub fn from_config() -> Self {
        Self::new(config().lint_cache_capacity)
    }

    pub fn put(&self, uri: impl Into<String>, diagnostics: Vec<Diagnostic>) {
        self.cache.insert(uri.into(), Arc::new(diagnostics));
    }

    pub fn get(&self, uri: &str) -> Option<Arc<Vec<Diagnostic>>> {
        self.cache.get(uri)
    }

    pub fn invalidate(&self, uri: &str) {
        self.cache.invalidate(uri);
    }

    /// Lint `text` and remember the result for `uri`.
    pub fn lint(&self, uri: &str, text: &str, config: &LintConfig) -> Arc<Vec<Diagnostic>> {
        let diagnostics = Arc::new(execute(text, config));
        trace!("Caching {} diagnostic(s) for {uri}", diagnostics.len());
        self.cache.insert(uri.to_string(), diagnostics.clone());
        diagnostics
    }

    /// First cached diagnostic of `uri` whose location intersects `range`.
    pub fn find_by_range(&self, uri: &str, range: &Location) -> Option<Diagnostic> {
        self.get(uri)?
            .iter()
            .find(|d| d.location.intersects(range))
            .cloned()
    }

    /// `find_by_range` for a protocol range over the document's `text`.
    pub fn find_by_lsp_range(
        &self,
        uri: &str,
        text: &str,
        range: lsp_types::Range,
    ) -> Option<Diagnostic> {
        self.find_by_range(uri, &to_location(text, range))
    }
}
