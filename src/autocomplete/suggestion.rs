use crate::{
    autocomplete::{CompletionCandidate, Cursor, CursorContext, TableRef},
    debug,
    metadata::{Schema, Table},
    sql::{ClauseKind, Keyword},
};
use itertools::Itertools;

const SELECT_KEYWORDS: &[Keyword] = &[Keyword::Distinct, Keyword::All, Keyword::As, Keyword::From];

const PREDICATE_KEYWORDS: &[Keyword] = &[
    Keyword::And,
    Keyword::Or,
    Keyword::Not,
    Keyword::In,
    Keyword::Exists,
    Keyword::Like,
    Keyword::Contains,
    Keyword::Is,
    Keyword::Null,
    Keyword::True,
    Keyword::False,
    Keyword::Between,
];

const GROUP_BY_KEYWORDS: &[Keyword] = &[Keyword::Having, Keyword::Order, Keyword::Limit];

const ORDER_BY_KEYWORDS: &[Keyword] = &[Keyword::Asc, Keyword::Desc, Keyword::Limit, Keyword::Offset];

/// Keywords that may follow a complete table reference in FROM.
const FROM_FOLLOW_KEYWORDS: &[Keyword] = &[
    Keyword::As,
    Keyword::Join,
    Keyword::Left,
    Keyword::Inner,
    Keyword::Where,
    Keyword::Group,
    Keyword::Order,
    Keyword::Limit,
    Keyword::Union,
];

const JOIN_FOLLOW_KEYWORDS: &[Keyword] = &[Keyword::As, Keyword::On];

/// Completion candidates for a line/column cursor.
pub fn complete(text: &str, cursor: Cursor, schema: &Schema) -> Vec<CompletionCandidate> {
    complete_at_offset(text, cursor.offset_in(text), schema)
}

/// Completion candidates for a byte offset.
///
/// Strategy:
/// 1. Derive the `CursorContext` (enclosing statement, clause, qualifier,
///    partially typed word).
/// 2. Pick candidate sources from the context: statement keywords, schema
///    tables, the columns of one qualified table, or the columns of every
///    referenced table followed by clause keywords.
/// 3. Keep candidates whose label starts with the partial word (ignoring
///    case) and drop repeated labels, first occurrence wins.
pub fn complete_at_offset(text: &str, offset: usize, schema: &Schema) -> Vec<CompletionCandidate> {
    let Some(ctx) = CursorContext::derive(text, offset) else {
        return Vec::new();
    };
    debug!(
        "Completing at {offset}: clause {:?}, qualifier {:?}, partial {:?}",
        ctx.clause, ctx.qualifier, ctx.partial_token
    );

    candidates(&ctx, schema)
        .into_iter()
        .filter(|c| c.matches_prefix(&ctx.partial_token))
        .unique_by(|c| c.label.clone())
        .collect()
}

/// Unfiltered candidates for a context.
pub fn candidates(ctx: &CursorContext, schema: &Schema) -> Vec<CompletionCandidate> {
    if ctx.expects_table_ref {
        return match ctx.qualifier.as_deref() {
            Some(db) => schema
                .tables
                .iter()
                .filter(|t| t.database.as_deref().is_some_and(|d| d.eq_ignore_ascii_case(db)))
                .map(CompletionCandidate::table)
                .collect(),
            None => schema.tables.iter().map(CompletionCandidate::table).collect(),
        };
    }

    if let Some(qualifier) = ctx.qualifier.as_deref() {
        return qualified_tables(ctx, schema, qualifier)
            .into_iter()
            .flat_map(|t| t.columns.iter().map(move |c| CompletionCandidate::column(t, c)))
            .collect();
    }

    if ctx.after_table_ref {
        return keywords(follow_keywords(ctx.clause));
    }

    if ctx.clause.is_none() || ctx.clause == Some(ClauseKind::Explain) {
        return keywords(&Keyword::STATEMENT_HEADS);
    }

    let mut out = Vec::new();
    if ctx.expects_column_ref {
        let referenced = referenced_schema_tables(schema, &ctx.tables);
        let scope = if referenced.is_empty() {
            schema.tables.iter().collect()
        } else {
            referenced
        };
        for table in scope {
            out.extend(table.columns.iter().map(|c| CompletionCandidate::column(table, c)));
        }
    }
    out.extend(keywords(clause_keywords(ctx.clause)));
    out
}

fn keywords(list: &[Keyword]) -> Vec<CompletionCandidate> {
    list.iter().copied().map(CompletionCandidate::keyword).collect()
}

fn clause_keywords(clause: Option<ClauseKind>) -> &'static [Keyword] {
    match clause {
        Some(ClauseKind::Select) => SELECT_KEYWORDS,
        Some(ClauseKind::Where | ClauseKind::On | ClauseKind::Having) => PREDICATE_KEYWORDS,
        Some(ClauseKind::GroupBy) => GROUP_BY_KEYWORDS,
        Some(ClauseKind::OrderBy) => ORDER_BY_KEYWORDS,
        Some(ClauseKind::Limit) => &[Keyword::Offset],
        Some(ClauseKind::Set) => &[Keyword::Where],
        Some(ClauseKind::Insert | ClauseKind::Create) => &[Keyword::Into, Keyword::Table],
        Some(ClauseKind::Delete) => &[Keyword::From],
        Some(ClauseKind::Drop) => &[Keyword::Table],
        Some(ClauseKind::Values) => &[Keyword::Null, Keyword::True, Keyword::False],
        _ => &[],
    }
}

fn follow_keywords(clause: Option<ClauseKind>) -> &'static [Keyword] {
    match clause {
        Some(ClauseKind::From) => FROM_FOLLOW_KEYWORDS,
        Some(ClauseKind::Join) => JOIN_FOLLOW_KEYWORDS,
        Some(ClauseKind::Update) => &[Keyword::Set],
        Some(ClauseKind::Into) => &[Keyword::Values, Keyword::Select],
        _ => &[],
    }
}

/// Schema tables named by any reference, in schema order.
fn referenced_schema_tables<'s>(schema: &'s Schema, refs: &[TableRef]) -> Vec<&'s Table> {
    schema
        .tables
        .iter()
        .filter(|t| refs.iter().any(|r| names(r, t)))
        .collect()
}

fn names(table_ref: &TableRef, table: &Table) -> bool {
    table.is_named(&table_ref.name)
        && table_ref.database.as_deref().is_none_or(|db| {
            table
                .database
                .as_deref()
                .is_some_and(|d| d.eq_ignore_ascii_case(db))
        })
}

/// Resolve `qualifier.` to schema tables. The first rule that matches wins:
/// 1. an alias of a referenced table;
/// 2. a referenced table with exactly that name;
/// 3. a schema table with exactly that name;
/// 4. referenced tables whose name starts with the qualifier;
/// 5. schema tables whose name starts with the qualifier.
fn qualified_tables<'s>(ctx: &CursorContext, schema: &'s Schema, qualifier: &str) -> Vec<&'s Table> {
    let starts_with = |name: &str| {
        name.to_lowercase()
            .starts_with(&qualifier.to_lowercase())
    };

    let by_alias: Vec<TableRef> = ctx
        .tables
        .iter()
        .filter(|r| r.alias.as_deref().is_some_and(|a| a.eq_ignore_ascii_case(qualifier)))
        .cloned()
        .collect();
    let by_name: Vec<TableRef> = ctx
        .tables
        .iter()
        .filter(|r| r.name.eq_ignore_ascii_case(qualifier))
        .cloned()
        .collect();
    let by_prefix: Vec<TableRef> = ctx
        .tables
        .iter()
        .filter(|r| starts_with(&r.name))
        .cloned()
        .collect();

    for refs in [&by_alias, &by_name] {
        let found = referenced_schema_tables(schema, refs);
        if !found.is_empty() {
            return found;
        }
    }
    let exact: Vec<&Table> = schema.find_tables(None, qualifier).collect();
    if !exact.is_empty() {
        return exact;
    }
    let found = referenced_schema_tables(schema, &by_prefix);
    if !found.is_empty() {
        return found;
    }
    schema
        .tables
        .iter()
        .filter(|t| starts_with(&t.table_name))
        .collect()
}
