use std::fmt;
use std::path::PathBuf;

use crate::error::Result;
use crate::parser::model::TableSchema;

/// NestJS controller, service, module and DTOs.
pub mod api;
/// PostgreSQL `_list`, `_get`, `_save` and `_delete` functions.
pub mod sql;
/// Angular module, service, datasource, list and edit components.
pub mod web;

/// One generated artifact, with a path relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output root.
    pub path: PathBuf,
    /// Full file contents.
    pub contents: String,
}

impl GeneratedFile {
    /// Build a file from a relative path and its contents.
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Settings shared by the emitters that are not part of the table schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Placeholder shown in date inputs of the generated edit form.
    pub date_placeholder: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            date_placeholder: "YYYY-MM-DD".to_string(),
        }
    }
}

/// The independent artifact generators fed by a [`TableSchema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emitter {
    /// NestJS backend API.
    Api,
    /// PostgreSQL stored-function layer.
    Sql,
    /// Angular CRUD UI.
    Web,
}

impl Emitter {
    /// All emitters, in the order they run.
    pub const ALL: [Emitter; 3] = [Emitter::Api, Emitter::Sql, Emitter::Web];

    /// Directory under the output root that this emitter writes into.
    pub fn output_subdir(self) -> &'static str {
        match self {
            Emitter::Api => "api",
            Emitter::Sql => "sql",
            Emitter::Web => "www",
        }
    }

    /// Render every artifact of this emitter for `schema`.
    pub fn generate(
        self,
        schema: &TableSchema,
        options: &GenerateOptions,
    ) -> Result<Vec<GeneratedFile>> {
        let files = match self {
            Emitter::Api => api::generate_api(schema),
            Emitter::Sql => sql::generate_sql(schema)?,
            Emitter::Web => web::generate_web(schema, options)?,
        };
        for file in &files {
            tracing::debug!(emitter = %self, path = %file.path.display(), "generated file");
        }
        Ok(files)
    }
}

impl fmt::Display for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Emitter::Api => write!(f, "API"),
            Emitter::Sql => write!(f, "SQL"),
            Emitter::Web => write!(f, "Web"),
        }
    }
}

/// Table-derived identifiers every emitter needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TableNames {
    /// `PascalCase` class prefix, e.g. `UserAccount`.
    pub pascal: String,
    /// `camelCase` variable name, e.g. `userAccount`.
    pub camel: String,
    /// `dash-case` directory/file stem from the snake name, e.g. `user-account`.
    pub dash: String,
    /// `kebab-case` file stem derived from the class name.
    pub kebab: String,
}

impl TableNames {
    pub(crate) fn new(table: &str) -> Self {
        use crate::parser::names::{camel_to_kebab, snake_to_camel, snake_to_dash};
        let pascal = snake_to_camel(table, true);
        Self {
            kebab: camel_to_kebab(&pascal),
            camel: snake_to_camel(table, false),
            dash: snake_to_dash(table),
            pascal,
        }
    }
}
