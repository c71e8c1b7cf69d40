use serde::Serialize;

use crate::classifier::type_classifier::{self, TypeCategory};

/// One column of a parsed `CREATE TABLE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDefinition {
    name: String,
    #[serde(rename = "type")]
    raw_type: String,
    not_null: bool,
    description: String,
}

impl FieldDefinition {
    /// Build a field. `raw_type` is stored upper-cased.
    pub fn new(
        name: impl Into<String>,
        raw_type: &str,
        not_null: bool,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            raw_type: raw_type.to_uppercase(),
            not_null,
            description: description.into(),
        }
    }

    /// Column name exactly as declared.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Upper-cased SQL type token.
    pub fn raw_type(&self) -> &str {
        &self.raw_type
    }

    /// Whether the declaration line carried `NOT NULL`.
    pub fn not_null(&self) -> bool {
        self.not_null
    }

    /// Resolved `COMMENT ON COLUMN` text, or the column name.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Semantic bucket of [`Self::raw_type`].
    pub fn category(&self) -> TypeCategory {
        type_classifier::classify(&self.raw_type)
    }
}

/// Immutable snapshot of one parsed table, handed by reference to every emitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSchema {
    schema_name: String,
    table_name: String,
    sequence_name: Option<String>,
    fields: Vec<FieldDefinition>,
}

impl TableSchema {
    /// Assemble a schema from already-resolved parts.
    pub fn new(
        schema_name: impl Into<String>,
        table_name: impl Into<String>,
        sequence_name: Option<String>,
        fields: Vec<FieldDefinition>,
    ) -> Self {
        Self {
            schema_name: schema_name.into(),
            table_name: table_name.into(),
            sequence_name,
            fields,
        }
    }

    /// SQL schema (namespace), `public` when the DDL gave none.
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// Table name without schema.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Sequence referenced by a `NEXTVAL('...')` default, if any.
    pub fn sequence_name(&self) -> Option<&str> {
        self.sequence_name.as_deref()
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// The first declared field, used as the key column by the emitters.
    pub fn key_field(&self) -> Option<&FieldDefinition> {
        self.fields.first()
    }

    /// `<schema>.<table>`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema_name, self.table_name)
    }

    /// Name of a backend function following the `<schema>.<table>_<suffix>` convention.
    pub fn function_name(&self, suffix: &str) -> String {
        format!("{}.{}_{suffix}", self.schema_name, self.table_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_type_is_stored_upper_case() {
        let field = FieldDefinition::new("id", "int4", true, "id");
        assert_eq!(field.raw_type(), "INT4");
        assert_eq!(field.category(), TypeCategory::Numeric);
    }

    #[test]
    fn function_names_follow_schema_table_convention() {
        let schema = TableSchema::new("hr", "person", None, Vec::new());
        assert_eq!(schema.qualified_name(), "hr.person");
        assert_eq!(schema.function_name("list"), "hr.person_list");
        assert!(schema.key_field().is_none());
    }
}
