//! Editor-protocol values for diagnostics, completions and fixes.
//!
//! Everything here is transport agnostic: callers own the connection and the
//! document store, and hand in text plus protocol positions.
crate::reexport!(convert);
crate::reexport!(lint_cache);
