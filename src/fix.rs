//! Offset-safe text edits and the bounded autofix loop.
crate::reexport!(applier);
crate::reexport!(autofix);
