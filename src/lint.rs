//! Style diagnostics for SQL text.
//!
//! Modules:
//! - `level`       : Severity of a configured rule.
//! - `rule_config` : Per-rule level and option, parsed from the raw JSON shape.
//! - `diagnostic`  : Diagnostics and the offset-based fixes they carry.
//! - `rules`       : The static rule registry and the seven layout rules.
//! - `engine`      : Runs the enabled rules with per-rule fault isolation.
//! - `report`      : The programmatic lint entry and its stylish / json output.
crate::reexport!(level);
crate::reexport!(rule_config);
crate::reexport!(diagnostic);
crate::reexport!(rules);
crate::reexport!(engine);
crate::reexport!(report);
