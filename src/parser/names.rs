/// Schema used when a `CREATE TABLE` name carries no schema part.
pub const DEFAULT_SCHEMA: &str = "public";

/// Return the identifier without surrounding double quotes.
pub fn unquote_identifier(ident: &str) -> &str {
    ident
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(ident)
}

/// Split the name token of a `CREATE TABLE` line into `(schema, table)`.
///
/// - `person` -> `("public", "person")`
/// - `person.` -> `("public", "person")`
/// - `"app"."person"` -> `("app", "person")`
/// - `a.b.c` -> `("a", "b")`
///
/// Returns `None` when the table part ends up empty (e.g. `.`).
pub fn split_qualified_name(token: &str) -> Option<(String, String)> {
    let mut parts = token.split('.');
    let first = unquote_identifier(parts.next().unwrap_or_default());
    let second = parts.next().map(unquote_identifier).unwrap_or_default();

    let (schema, table) = if second.is_empty() {
        (DEFAULT_SCHEMA, first)
    } else {
        (first, second)
    };

    if table.is_empty() {
        return None;
    }
    Some((schema.to_string(), table.to_string()))
}

/// Upper-case only the first character, leaving the rest untouched.
pub fn capitalize(stroke: &str) -> String {
    let mut chars = stroke.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert `snake_case` to `camelCase`, or to `PascalCase` when `capitalize_first` is set.
///
/// Each `_` followed by a lower-case ASCII letter is dropped and the letter upper-cased.
/// Other underscores (`field_2`, `a__b`) are kept.
pub fn snake_to_camel(stroke: &str, capitalize_first: bool) -> String {
    let word = if capitalize_first {
        capitalize(stroke)
    } else {
        stroke.to_string()
    };

    let mut out = String::with_capacity(word.len());
    let mut chars = word.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '_' {
            if let Some(&next) = chars.peek() {
                if next.is_ascii_lowercase() {
                    out.push(next.to_ascii_uppercase());
                    chars.next();
                    continue;
                }
            }
        }
        out.push(ch);
    }
    out
}

/// Convert `camelCase`/`PascalCase` to `kebab-case`.
///
/// A hyphen goes before every ASCII upper-case letter except the first character, the result
/// is lower-cased, and leftover underscores become hyphens. Digits never start a segment.
pub fn camel_to_kebab(stroke: &str) -> String {
    let mut out = String::with_capacity(stroke.len() + 4);
    for (idx, ch) in stroke.chars().enumerate() {
        if idx > 0 && ch.is_ascii_uppercase() {
            out.push('-');
        }
        if ch == '_' {
            out.push('-');
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

/// Convert `snake_case` to `dash-case`: lower-case and replace every `_` with `-`.
pub fn snake_to_dash(stroke: &str) -> String {
    stroke.to_lowercase().replace('_', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_qualified_name_defaults_to_public() {
        assert_eq!(
            split_qualified_name("person"),
            Some(("public".to_string(), "person".to_string()))
        );
        assert_eq!(
            split_qualified_name("person."),
            Some(("public".to_string(), "person".to_string()))
        );
    }

    #[test]
    fn split_qualified_name_unquotes_parts() {
        assert_eq!(
            split_qualified_name(r#""hr"."person""#),
            Some(("hr".to_string(), "person".to_string()))
        );
        assert_eq!(
            split_qualified_name("a.b.c"),
            Some(("a".to_string(), "b".to_string()))
        );
    }

    #[test]
    fn split_qualified_name_rejects_empty_table() {
        assert_eq!(split_qualified_name("."), None);
        assert_eq!(split_qualified_name(""), None);
    }

    #[test]
    fn snake_to_camel_switches_between_camel_and_pascal() {
        assert_eq!(snake_to_camel("user_account", true), "UserAccount");
        assert_eq!(snake_to_camel("user_account", false), "userAccount");
        assert_eq!(snake_to_camel("id", true), "Id");
    }

    #[test]
    fn snake_to_camel_keeps_underscore_before_non_letters() {
        assert_eq!(snake_to_camel("field_2", true), "Field_2");
        assert_eq!(snake_to_camel("a__b", false), "a_B");
    }

    #[test]
    fn camel_to_kebab_splits_on_capitals_only() {
        assert_eq!(camel_to_kebab("UserAccount"), "user-account");
        assert_eq!(camel_to_kebab("userAccount"), "user-account");
        assert_eq!(camel_to_kebab("field2Name"), "field2-name");
        assert_eq!(camel_to_kebab("Field_2"), "field-2");
    }

    #[test]
    fn leading_underscore_breaks_the_round_trip() {
        assert_eq!(camel_to_kebab(&snake_to_camel("_a", true)), "a");
        assert_eq!(snake_to_dash("_a"), "-a");
    }

    #[test]
    fn snake_to_dash_lowercases() {
        assert_eq!(snake_to_dash("User_Account"), "user-account");
    }

    #[test]
    fn capitalize_touches_first_char_only() {
        assert_eq!(capitalize("fullName"), "FullName");
        assert_eq!(capitalize("a_b"), "A_b");
        assert_eq!(capitalize(""), "");
    }
}
