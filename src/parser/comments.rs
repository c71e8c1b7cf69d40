use crate::parser::names::unquote_identifier;

/// Resolve the human-readable description of `table.field` from `COMMENT ON COLUMN` lines.
///
/// Every line of `ddl` is re-scanned. A line matches when its first three tokens are
/// `COMMENT ON COLUMN` and its fourth token, with quotes stripped, equals `table.field` or ends
/// with `.table.field` (case-insensitive). Lines with fewer than six tokens are skipped.
/// The first match wins; without one the field name is returned.
pub fn resolve_description(table: &str, field: &str, ddl: &str) -> String {
    if table.is_empty() {
        return field.to_string();
    }
    let wanted = format!("{}.{}", table.to_uppercase(), field.to_uppercase());

    for line in ddl.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 6 {
            continue;
        }
        if !tokens[0].eq_ignore_ascii_case("COMMENT")
            || !tokens[1].eq_ignore_ascii_case("ON")
            || !tokens[2].eq_ignore_ascii_case("COLUMN")
        {
            continue;
        }
        if !target_matches(tokens[3], &wanted) {
            continue;
        }
        if let Some(text) = line.trim().split('\'').nth(1) {
            return text.to_string();
        }
    }

    field.to_string()
}

fn target_matches(target: &str, wanted: &str) -> bool {
    let target = target
        .split('.')
        .map(unquote_identifier)
        .collect::<Vec<_>>()
        .join(".")
        .to_uppercase();
    target == wanted
        || target
            .strip_suffix(wanted)
            .is_some_and(|prefix| prefix.ends_with('.'))
}
