/// Clears the output root and writes generated files to disk.
pub mod formatter;
