use std::fmt::Write;

use crate::classifier::type_classifier::TypeCategory;
use crate::error::{Error, Result};
use crate::generator::GeneratedFile;
use crate::parser::model::{FieldDefinition, TableSchema};

const NOT_FOUND: &str = "json_build_object('error', 'Item not found', 'code', 404)";

/// Generate the `_list`, `_get`, `_save` and `_delete` PostgreSQL functions for `schema`.
///
/// The first field is the key column, so a table without fields is rejected.
pub fn generate_sql(schema: &TableSchema) -> Result<Vec<GeneratedFile>> {
    let key = schema.key_field().ok_or_else(|| Error::NoKeyColumn {
        table: schema.table_name().to_string(),
    })?;

    let functions = [
        ("list", list_function(schema, key)),
        ("get", get_function(schema, key)),
        ("save", save_function(schema, key)),
        ("delete", delete_function(schema, key)),
    ];
    Ok(functions
        .into_iter()
        .map(|(suffix, body)| {
            GeneratedFile::new(format!("sql/{}.sql", schema.function_name(suffix)), body)
        })
        .collect())
}

/// Quote `value` as a SQL string literal.
pub(crate) fn sql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Parameter type of the key column.
fn key_type(key: &FieldDefinition) -> String {
    key.raw_type().to_lowercase()
}

fn header(schema: &TableSchema, suffix: &str, params: &str) -> String {
    format!(
        "CREATE OR REPLACE FUNCTION {}({params})\n\
         RETURNS json\n\
         LANGUAGE plpgsql\n\
         AS $function$\n",
        schema.function_name(suffix)
    )
}

const FOOTER: &str = "END;\n$function$;\n";

fn list_function(schema: &TableSchema, key: &FieldDefinition) -> String {
    let table = schema.qualified_name();
    let allowed = schema
        .fields()
        .iter()
        .map(|f| sql_literal(f.name()))
        .collect::<Vec<_>>()
        .join(", ");
    let default_order = sql_literal(key.name());

    let mut out = header(schema, "list", "p_filter json");
    out.push_str(&format!(
        "DECLARE
  v_where text := '';
  v_order text := '';
  v_direction text := 'ASC';
  v_item json;
  v_sort text;
  v_page_size int := COALESCE((p_filter->>'page_size')::int, 25);
  v_page_index int := COALESCE((p_filter->>'page_index')::int, 0);
  v_cnt bigint;
  v_data json;
BEGIN
  FOR v_item IN SELECT * FROM json_array_elements(COALESCE(p_filter->'filter', '[]'::json)) LOOP
    IF v_item->>'field' IN ({allowed}) THEN
      v_where := v_where || format(' AND %I::text ILIKE %L', v_item->>'field', '%' || (v_item->>'value') || '%');
    END IF;
  END LOOP;

  IF lower(p_filter->>'sort_direction') = 'desc' THEN
    v_direction := 'DESC';
  END IF;
  FOR v_sort IN SELECT json_array_elements_text(COALESCE(p_filter->'sort', '[]'::json)) LOOP
    IF v_sort IN ({allowed}) THEN
      IF v_order <> '' THEN
        v_order := v_order || ', ';
      END IF;
      v_order := v_order || format('%I %s', v_sort, v_direction);
    END IF;
  END LOOP;
  IF v_order = '' THEN
    v_order := quote_ident({default_order});
  END IF;

  EXECUTE 'SELECT count(*) FROM {table} WHERE true' || v_where INTO v_cnt;
  EXECUTE format(
    'SELECT COALESCE(json_agg(t), ''[]''::json) FROM (SELECT * FROM {table} WHERE true%s ORDER BY %s LIMIT %s OFFSET %s) t',
    v_where, v_order, v_page_size, v_page_index * v_page_size
  ) INTO v_data;

  RETURN json_build_object('cnt', v_cnt, 'data', v_data);
"
    ));
    out.push_str(FOOTER);
    out
}

fn get_function(schema: &TableSchema, key: &FieldDefinition) -> String {
    let table = schema.qualified_name();
    let key_name = key.name();
    let mut out = header(schema, "get", &format!("p_id {}", key_type(key)));
    out.push_str(&format!(
        "DECLARE
  v_result json;
BEGIN
  SELECT row_to_json(t) INTO v_result FROM {table} t WHERE t.{key_name} = p_id;
  IF v_result IS NULL THEN
    RETURN {NOT_FOUND};
  END IF;
  RETURN v_result;
"
    ));
    out.push_str(FOOTER);
    out
}

fn save_function(schema: &TableSchema, key: &FieldDefinition) -> String {
    let table = schema.qualified_name();
    let key_name = key.name();
    let others: Vec<&FieldDefinition> = schema.fields().iter().skip(1).collect();

    let is_new = if key.category() == TypeCategory::Numeric {
        format!("v_row.{key_name} IS NULL OR v_row.{key_name} = 0")
    } else {
        format!("v_row.{key_name} IS NULL")
    };
    let key_value = match schema.sequence_name() {
        Some(sequence) => format!("nextval({})", sql_literal(sequence)),
        None => format!("v_row.{key_name}"),
    };

    let columns = schema
        .fields()
        .iter()
        .map(|f| f.name().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let values = std::iter::once(key_value)
        .chain(others.iter().map(|f| format!("v_row.{}", f.name())))
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = header(schema, "save", "p_item json");
    writeln!(
        out,
        "DECLARE
  v_row {table};
  v_id {table}.{key_name}%TYPE;
BEGIN
  v_row := json_populate_record(NULL::{table}, p_item);
  IF {is_new} THEN
    INSERT INTO {table} ({columns})
    VALUES ({values})
    RETURNING {key_name} INTO v_id;
  ELSE"
    )
    .unwrap();

    if others.is_empty() {
        writeln!(
            out,
            "    PERFORM 1 FROM {table} WHERE {key_name} = v_row.{key_name};"
        )
        .unwrap();
    } else {
        let assignments = others
            .iter()
            .map(|f| format!("{0} = v_row.{0}", f.name()))
            .collect::<Vec<_>>()
            .join(",\n      ");
        writeln!(
            out,
            "    UPDATE {table} SET\n      {assignments}\n    WHERE {key_name} = v_row.{key_name};"
        )
        .unwrap();
    }

    writeln!(
        out,
        "    IF NOT FOUND THEN
      RETURN {NOT_FOUND};
    END IF;
    v_id := v_row.{key_name};
  END IF;
  RETURN json_build_object('id', v_id);"
    )
    .unwrap();
    out.push_str(FOOTER);
    out
}

fn delete_function(schema: &TableSchema, key: &FieldDefinition) -> String {
    let table = schema.qualified_name();
    let key_name = key.name();
    let mut out = header(schema, "delete", &format!("p_id {}", key_type(key)));
    out.push_str(&format!(
        "BEGIN
  DELETE FROM {table} WHERE {key_name} = p_id;
  IF NOT FOUND THEN
    RETURN {NOT_FOUND};
  END IF;
  RETURN json_build_object('id', p_id);
"
    ));
    out.push_str(FOOTER);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(sequence: Option<&str>) -> TableSchema {
        TableSchema::new(
            "public",
            "person",
            sequence.map(str::to_string),
            vec![
                FieldDefinition::new("id", "int4", true, "id"),
                FieldDefinition::new("full_name", "varchar", true, "Full legal name"),
                FieldDefinition::new("is_active", "bool", false, "is_active"),
            ],
        )
    }

    #[test]
    fn one_file_per_function() {
        let files = generate_sql(&person(None)).unwrap();
        let paths: Vec<String> = files
            .iter()
            .map(|f| f.path.to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(
            paths,
            vec![
                "sql/public.person_list.sql",
                "sql/public.person_get.sql",
                "sql/public.person_save.sql",
                "sql/public.person_delete.sql",
            ]
        );
        for file in &files {
            assert!(file.contents.starts_with("CREATE OR REPLACE FUNCTION public.person_"));
            assert!(file.contents.ends_with("END;\n$function$;\n"));
        }
    }

    #[test]
    fn save_uses_sequence_for_new_rows() {
        let files = generate_sql(&person(Some("person_id_seq"))).unwrap();
        let save = &files[2].contents;
        assert!(save.contains("VALUES (nextval('person_id_seq'), v_row.full_name, v_row.is_active)"));
        assert!(save.contains("IF v_row.id IS NULL OR v_row.id = 0 THEN"));
        assert!(save.contains("full_name = v_row.full_name,\n      is_active = v_row.is_active"));
    }

    #[test]
    fn save_without_sequence_inserts_given_key() {
        let files = generate_sql(&person(None)).unwrap();
        assert!(files[2]
            .contents
            .contains("VALUES (v_row.id, v_row.full_name, v_row.is_active)"));
    }

    #[test]
    fn key_only_table_checks_existence_instead_of_updating() {
        let schema = TableSchema::new(
            "public",
            "tag",
            None,
            vec![FieldDefinition::new("code", "varchar", true, "code")],
        );
        let files = generate_sql(&schema).unwrap();
        let save = &files[2].contents;
        assert!(save.contains("PERFORM 1 FROM public.tag WHERE code = v_row.code;"));
        assert!(save.contains("IF v_row.code IS NULL THEN"));
        assert!(!save.contains("UPDATE"));
    }

    #[test]
    fn get_and_delete_take_key_type() {
        let files = generate_sql(&person(None)).unwrap();
        assert!(files[1].contents.contains("public.person_get(p_id int4)"));
        assert!(files[3].contents.contains("DELETE FROM public.person WHERE id = p_id;"));
    }

    #[test]
    fn list_whitelists_declared_fields() {
        let files = generate_sql(&person(None)).unwrap();
        let list = &files[0].contents;
        assert!(list.contains("IN ('id', 'full_name', 'is_active')"));
        assert!(list.contains("v_order := quote_ident('id');"));
    }

    #[test]
    fn empty_table_is_rejected() {
        let schema = TableSchema::new("public", "empty", None, Vec::new());
        let err = generate_sql(&schema).unwrap_err();
        assert!(matches!(err, Error::NoKeyColumn { table } if table == "empty"));
    }

    #[test]
    fn sql_literal_doubles_quotes() {
        assert_eq!(sql_literal("o'brien"), "'o''brien'");
    }
}
