use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::parser::comments::resolve_description;
use crate::parser::model::{FieldDefinition, TableSchema};
use crate::parser::names::split_qualified_name;

static NEXTVAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)NEXTVAL\('([^']+)'").expect("NEXTVAL pattern is a valid regex")
});

/// Leading tokens of lines that carry no column, such as `(`, `) ;` or `);`.
const STRUCTURAL_TOKENS: &[&str] = &["(", ")", ");"];

/// Parse state threaded through the line scan.
///
/// The table name is resolved mid-scan by the `CREATE` line and read by every later column
/// line, so `CREATE` must precede the column declarations.
#[derive(Debug, Default)]
struct ScanState {
    schema_name: Option<String>,
    table_name: Option<String>,
    sequence_name: Option<String>,
    fields: Vec<FieldDefinition>,
}

impl ScanState {
    fn into_schema(self) -> Result<TableSchema> {
        let (Some(schema_name), Some(table_name)) = (self.schema_name, self.table_name) else {
            return Err(Error::MissingSchema);
        };
        Ok(TableSchema::new(
            schema_name,
            table_name,
            self.sequence_name,
            self.fields,
        ))
    }
}

/// Extract a [`TableSchema`] from the text of a single `CREATE TABLE` definition.
///
/// The grammar is line-oriented: one statement or column per line, whitespace-separated
/// tokens, no quoting-aware tokenization and no joining of continued lines.
///
/// ```
/// let ddl = "CREATE TABLE public.person (\n  id int4 NOT NULL\n);\n";
/// let schema = sql2crud::parser::schema_extractor::extract(ddl).unwrap();
/// assert_eq!(schema.table_name(), "person");
/// assert_eq!(schema.fields()[0].raw_type(), "INT4");
/// ```
pub fn extract(ddl: &str) -> Result<TableSchema> {
    let mut state = ScanState::default();
    for (idx, line) in ddl.lines().enumerate() {
        scan_line(&mut state, idx + 1, line, ddl)?;
    }
    let schema = state.into_schema()?;
    debug!(
        table = %schema.qualified_name(),
        fields = schema.fields().len(),
        sequence = ?schema.sequence_name(),
        "extracted table schema"
    );
    Ok(schema)
}

fn scan_line(state: &mut ScanState, line_number: usize, line: &str, ddl: &str) -> Result<()> {
    let trimmed = line.trim();
    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    let Some(&first) = tokens.first() else {
        return Ok(());
    };

    if first.eq_ignore_ascii_case("COMMENT") {
        return Ok(());
    }
    if first.eq_ignore_ascii_case("CREATE") {
        scan_create(state, line_number, &tokens);
        return Ok(());
    }
    if STRUCTURAL_TOKENS.contains(&first) {
        return Ok(());
    }

    scan_column(state, line_number, trimmed, &tokens, ddl)
}

fn scan_create(state: &mut ScanState, line_number: usize, tokens: &[&str]) {
    let Some((schema, table)) = tokens.get(2).and_then(|name| split_qualified_name(name)) else {
        warn!(line = line_number, "CREATE line without a usable table name");
        return;
    };
    debug!(line = line_number, %schema, %table, "found CREATE TABLE");
    state.schema_name = Some(schema);
    state.table_name = Some(table);
}

fn scan_column(
    state: &mut ScanState,
    line_number: usize,
    line: &str,
    tokens: &[&str],
    ddl: &str,
) -> Result<()> {
    let [name, raw_type, ..] = tokens else {
        return Err(Error::MalformedColumn {
            line: line_number,
            content: line.to_string(),
        });
    };
    let raw_type = raw_type.strip_suffix(',').unwrap_or(*raw_type);
    let not_null = line.to_uppercase().contains("NOT NULL");

    let table_name = match state.table_name.as_deref() {
        Some(table) => table,
        None => {
            warn!(
                line = line_number,
                column = %name,
                "column declared before CREATE TABLE; its description cannot be resolved"
            );
            ""
        }
    };
    let description = resolve_description(table_name, name, ddl);

    if let Some(sequence) = NEXTVAL_RE.captures(line).and_then(|caps| caps.get(1)) {
        state.sequence_name = Some(sequence.as_str().to_string());
    }

    let field = FieldDefinition::new(*name, raw_type, not_null, description);
    debug!(
        line = line_number,
        column = field.name(),
        raw_type = field.raw_type(),
        not_null,
        "parsed column"
    );
    state.fields.push(field);
    Ok(())
}
