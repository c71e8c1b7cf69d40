use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Check the command-line input path: present, existing, with a `.sql` extension.
pub fn validate_input_path(input: Option<&Path>) -> Result<&Path> {
    let path = input.ok_or(Error::MissingInput)?;
    if !path.exists() {
        return Err(Error::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    let is_sql = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("sql"));
    if !is_sql {
        return Err(Error::NotSqlFile {
            path: path.to_path_buf(),
        });
    }
    Ok(path)
}

/// Validate `input` and read the DDL text it points to.
pub fn read_ddl(input: Option<&Path>) -> Result<String> {
    let path = validate_input_path(input)?;
    let ddl = std::fs::read_to_string(path).map_err(|source| Error::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = ddl.len(), "read DDL source");
    Ok(ddl)
}
