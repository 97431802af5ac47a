//! Builder-style public surface for upserts.

use upsert_core::{Executor, ModelMetadata, Result};

use crate::compile::{CompiledStatement, UpsertConfig, compile};
use crate::dialect::Dialect;
use crate::record::Record;

/// UPSERT statement builder.
///
/// Compiles a batch of records into one multi-row
/// `INSERT ... ON CONFLICT DO UPDATE` statement and optionally runs it
/// through a borrowed [`Executor`].
#[derive(Debug)]
pub struct UpsertBuilder<'a> {
    records: &'a [Record],
    unique: Option<Vec<String>>,
    dialect: Dialect,
}

impl<'a> UpsertBuilder<'a> {
    /// Create a builder for the given batch.
    pub fn new(records: &'a [Record]) -> Self {
        Self {
            records,
            unique: None,
            dialect: Dialect::default(),
        }
    }

    /// Create a builder for a single record.
    pub fn single(record: &'a Record) -> Self {
        Self::new(std::slice::from_ref(record))
    }

    /// Override the conflict key (defaults to the table's primary key).
    pub fn unique(mut self, columns: &[&str]) -> Self {
        self.unique = Some(columns.iter().map(|c| (*c).to_string()).collect());
        self
    }

    /// Set the SQL dialect (defaults to Postgres).
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Build the statement without executing it.
    pub fn build(&self, meta: &dyn ModelMetadata) -> Result<CompiledStatement> {
        let unique = self.unique.as_ref().map(|columns| {
            columns
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
        });
        let config = UpsertConfig::resolve(meta, unique.as_deref())?;
        compile(self.records, &config, self.dialect)
    }

    /// Compile and execute, returning the rows affected.
    ///
    /// An empty batch is the one case recovered locally: it returns
    /// `Ok(0)` without building a statement or touching the executor.
    pub fn execute<E: Executor>(&self, meta: &dyn ModelMetadata, executor: &mut E) -> Result<u64> {
        if self.records.is_empty() {
            tracing::debug!(table = meta.table(), "empty upsert batch, nothing to do");
            return Ok(0);
        }

        let stmt = self.build(meta)?;
        tracing::debug!(
            table = meta.table(),
            rows = self.records.len(),
            params = stmt.params().len(),
            sql = %stmt.sql(),
            "executing upsert"
        );
        executor.affecting_statement(stmt.sql(), stmt.params())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use upsert_core::TableMeta;

    #[test]
    fn build_threads_unique_and_dialect() {
        let rows = vec![Record::new().set("email", "x@y.z").set("name", "x")];
        let stmt = UpsertBuilder::new(&rows)
            .unique(&["email"])
            .dialect(Dialect::Sqlite)
            .build(&TableMeta::new("users"))
            .unwrap();
        assert!(stmt.sql().starts_with("INSERT INTO users"));
        assert!(stmt.sql().contains("ON CONFLICT (email)"));
        assert!(stmt.sql().contains("?1"));
    }

    #[test]
    fn single_wraps_one_record() {
        let row = Record::new().set("id", 1i32).set("name", "a");
        let meta = TableMeta::new("users").no_created_at();
        let stmt = UpsertBuilder::single(&row).build(&meta).unwrap();
        assert_eq!(stmt.params().len(), 2);
    }
}
