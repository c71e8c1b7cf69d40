use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Every fatal condition the pipeline can hit, from input validation to file output.
#[derive(Debug, Error)]
pub enum Error {
    /// No input path was given on the command line.
    #[error("add a SQL file with the table definition")]
    MissingInput,

    /// The input path does not exist.
    #[error("input file does not exist: {}", path.display())]
    InputNotFound {
        /// Path as given by the user.
        path: PathBuf,
    },

    /// The input path does not carry a `.sql` extension.
    #[error("input file is not a SQL file: {}", path.display())]
    NotSqlFile {
        /// Path as given by the user.
        path: PathBuf,
    },

    /// The input file exists but could not be read as UTF-8 text.
    #[error("failed to read {}: {source}", path.display())]
    ReadInput {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// No `CREATE` line yielded a schema and table name.
    #[error("table should have a schema defined: no usable CREATE TABLE line found")]
    MissingSchema,

    /// A column declaration line has no type token.
    #[error("malformed column declaration on line {line}: `{content}`")]
    MalformedColumn {
        /// 1-based line number in the DDL source.
        line: usize,
        /// The trimmed offending line.
        content: String,
    },

    /// No emitter or other action was requested.
    #[error("nothing to do: select at least one of --api, --sql, --web or --dump-schema")]
    NoEmitterSelected,

    /// An emitter needs a key column but the table has no fields.
    #[error("table '{table}' has no columns; a key column is required")]
    NoKeyColumn {
        /// Table name of the offending schema.
        table: String,
    },

    /// A generated file path would escape the output root.
    #[error("invalid output path '{}': {reason}", path.display())]
    InvalidOutputPath {
        /// Relative path produced by an emitter.
        path: PathBuf,
        /// Why the path was rejected.
        reason: &'static str,
    },

    /// Writing a generated file (or creating its directory) failed.
    #[error("failed to write {}: {source}", path.display())]
    WriteOutput {
        /// Absolute or root-joined path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// JSON serialization of the schema failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for the input-validation kinds detected before the parser runs.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::MissingInput
                | Error::InputNotFound { .. }
                | Error::NotSqlFile { .. }
                | Error::ReadInput { .. }
        )
    }
}
