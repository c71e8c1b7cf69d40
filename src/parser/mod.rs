/// `COMMENT ON COLUMN` lookup for column descriptions.
pub mod comments;
/// `FieldDefinition` and `TableSchema`, the parsed table model.
pub mod model;
/// Identifier casing transforms and qualified-name splitting.
pub mod names;
/// Line-oriented `CREATE TABLE` scanner producing a `TableSchema`.
pub mod schema_extractor;
