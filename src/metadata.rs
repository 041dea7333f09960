//! Read-only schema model consumed by completion.
//!
//! The schema is owned by whoever embeds the analyzer (a database
//! introspection layer, a workspace setting, a test fixture); the analyzer only
//! reads it. Tables and columns keep the order they were supplied in, and that
//! order is the primary sort key of completion results.
crate::reexport!(column);
crate::reexport!(table);
crate::reexport!(schema);

use serde::{Deserialize, Serialize};
