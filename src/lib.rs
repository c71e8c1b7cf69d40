//! Turn a single PostgreSQL `CREATE TABLE` definition into CRUD scaffolding: a NestJS API,
//! PostgreSQL stored functions, and an Angular UI.
#![warn(missing_docs)]

/// SQL type classification shared by every emitter.
pub mod classifier;
/// Crate error type.
pub mod error;
/// Emitters that render a `TableSchema` into generated source files.
pub mod generator;
/// Input path validation and DDL loading.
pub mod input;
/// File output.
pub mod output;
/// DDL parsing into the table model.
pub mod parser;

pub use error::{Error, Result};
pub use parser::model::{FieldDefinition, TableSchema};
pub use parser::schema_extractor::extract;
