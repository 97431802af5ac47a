//! Error types for upsert compilation and execution.

use std::fmt;

/// The primary error type for upsert operations.
#[derive(Debug)]
pub enum Error {
    /// Statement compilation errors, raised before any I/O occurs
    Compile(CompileError),
    /// Metadata/config resolution errors
    Config(ConfigError),
    /// Errors propagated unmodified from the executor
    Execution(ExecutionError),
}

/// An error detected while compiling a batch into a statement.
///
/// Compilation errors guarantee that no statement with mismatched
/// column/value counts is ever handed to an executor.
#[derive(Debug)]
pub struct CompileError {
    pub kind: CompileErrorKind,
    pub message: String,
    /// Index of the offending record in the batch, where applicable
    pub record: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileErrorKind {
    /// The batch contains no records
    EmptyBatch,
    /// A record supplies no columns
    EmptyColumnSet,
    /// A record's key set differs from the first record's
    InconsistentSchema,
}

impl CompileError {
    /// The batch handed to the compiler was empty.
    pub fn empty_batch() -> Self {
        Self {
            kind: CompileErrorKind::EmptyBatch,
            message: "cannot compile an upsert for an empty batch".to_string(),
            record: None,
        }
    }

    /// A record carries no columns at all.
    pub fn empty_column_set(record: usize) -> Self {
        Self {
            kind: CompileErrorKind::EmptyColumnSet,
            message: format!("record {record} has no columns"),
            record: Some(record),
        }
    }

    /// A record's columns do not match the first record's.
    pub fn inconsistent_schema(record: usize, expected: &[&str], found: &[&str]) -> Self {
        Self {
            kind: CompileErrorKind::InconsistentSchema,
            message: format!(
                "record {record} columns [{}] do not match the batch columns [{}]",
                found.join(", "),
                expected.join(", ")
            ),
            record: Some(record),
        }
    }
}

/// A failure resolving table metadata into an upsert configuration.
#[derive(Debug)]
pub struct ConfigError {
    pub message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// An execution failure reported by the database driver.
#[derive(Debug)]
pub struct ExecutionError {
    pub kind: ExecutionErrorKind,
    /// The SQL that was being executed, if the driver kept it
    pub sql: Option<String>,
    /// SQLSTATE code, if the driver reports one
    pub sqlstate: Option<String>,
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionErrorKind {
    /// Constraint violation (unique, foreign key, check)
    Constraint,
    /// Connection lost or unavailable
    Connectivity,
    /// Any other database error
    Database,
}

impl ExecutionError {
    /// Is this a unique constraint violation?
    pub fn is_unique_violation(&self) -> bool {
        self.sqlstate.as_deref() == Some("23505")
    }
}

impl Error {
    /// Get SQLSTATE if available (e.g., "23505" for unique violation)
    pub fn sqlstate(&self) -> Option<&str> {
        match self {
            Error::Execution(e) => e.sqlstate.as_deref(),
            _ => None,
        }
    }

    /// Get the SQL that caused this error, if available
    pub fn sql(&self) -> Option<&str> {
        match self {
            Error::Execution(e) => e.sql.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Compile(e) => write!(f, "Compile error: {}", e.message),
            Error::Config(e) => write!(f, "Configuration error: {}", e.message),
            Error::Execution(e) => {
                if let Some(sqlstate) = &e.sqlstate {
                    write!(f, "Execution error (SQLSTATE {}): {}", sqlstate, e.message)
                } else {
                    write!(f, "Execution error: {}", e.message)
                }
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Execution(e) => e
                .source
                .as_deref()
                .map(|err| err as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sqlstate) = &self.sqlstate {
            write!(f, "{} (SQLSTATE {})", self.message, sqlstate)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl From<CompileError> for Error {
    fn from(err: CompileError) -> Self {
        Error::Compile(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

impl From<ExecutionError> for Error {
    fn from(err: ExecutionError) -> Self {
        Error::Execution(err)
    }
}

/// Result type alias for upsert operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlstate_helpers() {
        let exec = ExecutionError {
            kind: ExecutionErrorKind::Constraint,
            sql: Some("INSERT INTO t (a) VALUES ($1)".to_string()),
            sqlstate: Some("23505".to_string()),
            message: "unique violation".to_string(),
            source: None,
        };

        assert!(exec.is_unique_violation());

        let err = Error::Execution(exec);
        assert_eq!(err.sqlstate(), Some("23505"));
        assert_eq!(err.sql(), Some("INSERT INTO t (a) VALUES ($1)"));
        assert!(err.to_string().contains("SQLSTATE 23505"));
    }

    #[test]
    fn compile_error_messages_name_the_record() {
        let err = CompileError::inconsistent_schema(2, &["a", "b"], &["a", "c"]);
        assert_eq!(err.kind, CompileErrorKind::InconsistentSchema);
        assert_eq!(err.record, Some(2));
        assert!(err.message.contains("record 2"));
        assert!(err.message.contains("a, c"));

        let err = CompileError::empty_column_set(0);
        assert_eq!(err.kind, CompileErrorKind::EmptyColumnSet);
        assert!(err.message.contains("record 0"));
    }

    #[test]
    fn non_execution_errors_have_no_sqlstate() {
        let err = Error::Compile(CompileError::empty_batch());
        assert_eq!(err.sqlstate(), None);
        assert_eq!(err.sql(), None);
    }
}
