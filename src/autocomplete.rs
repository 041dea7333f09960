//! Schema-aware completion at a cursor.
//!
//! A request tokenizes and parses the whole text, derives a `CursorContext`
//! for the cursor offset and turns it into candidates drawn from the schema
//! and the reserved-word set.
crate::reexport!(cursor);
crate::reexport!(candidate);
crate::reexport!(context);
crate::reexport!(suggestion);
crate::reexport!(suggestion_tests, test);
