//! Upsert statement compilation.

use upsert_core::{CompileError, ConfigError, ModelMetadata, Result, Value};

use crate::dialect::Dialect;
use crate::record::{Record, flatten};

/// Resolved configuration for one upsert statement.
#[derive(Debug, Clone)]
pub struct UpsertConfig {
    /// Prefixed table name, emitted verbatim.
    pub table: String,
    /// Columns whose uniqueness constraint triggers the update branch.
    pub conflict_columns: Vec<String>,
    /// Columns never overwritten by the update branch, e.g. the
    /// creation timestamp of a row that already exists.
    pub protected_columns: Vec<String>,
}

impl UpsertConfig {
    /// Resolve a configuration from table metadata.
    ///
    /// The conflict key is the caller's `unique` list when one is
    /// given, otherwise the table's single primary key column.
    pub fn resolve(meta: &dyn ModelMetadata, unique: Option<&[&str]>) -> Result<Self> {
        let table = meta.qualified_table();
        if table.is_empty() {
            return Err(ConfigError::new("table name resolved to an empty string").into());
        }

        let conflict_columns = match unique {
            Some(columns) if !columns.is_empty() => {
                columns.iter().map(|c| (*c).to_string()).collect()
            }
            _ => {
                let pk = meta.primary_key();
                if pk.is_empty() {
                    return Err(ConfigError::new(format!(
                        "table '{table}' has no primary key and no unique columns were supplied"
                    ))
                    .into());
                }
                vec![pk.to_string()]
            }
        };

        let protected_columns = meta
            .created_at_column()
            .map(|c| vec![c.to_string()])
            .unwrap_or_default();

        Ok(Self {
            table,
            conflict_columns,
            protected_columns,
        })
    }
}

/// A fully compiled statement: SQL text plus its ordered bind values.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledStatement {
    sql: String,
    params: Vec<Value>,
}

impl CompiledStatement {
    /// The statement text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bind values in placeholder order.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Consume the statement, yielding `(sql, params)`.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }
}

/// Compile a batch of records into one multi-row upsert statement.
///
/// The insert column list, the update-branch column set, and the bind
/// order all derive from the first record's canonical column order;
/// every other record must supply exactly the same columns. Compiling
/// the same batch and config twice yields byte-identical SQL.
pub fn compile(
    records: &[Record],
    config: &UpsertConfig,
    dialect: Dialect,
) -> Result<CompiledStatement> {
    let first = records.first().ok_or_else(CompileError::empty_batch)?;
    let columns: Vec<&str> = first.columns().collect();
    if columns.is_empty() {
        return Err(CompileError::empty_column_set(0).into());
    }

    // A record with a diverging key set would silently misalign columns
    // and values; reject it before building anything.
    for (index, record) in records.iter().enumerate().skip(1) {
        let keys: Vec<&str> = record.columns().collect();
        if keys != columns {
            return Err(CompileError::inconsistent_schema(index, &columns, &keys).into());
        }
    }

    let groups: Vec<_> = (0..records.len())
        .map(|row| dialect.parameterize(columns.len(), row * columns.len() + 1))
        .collect();
    let insert = format!(
        "INSERT INTO {} ({}) VALUES {}",
        config.table,
        dialect.columnize(&columns),
        groups.join(", ")
    );

    // Everything except the conflict key and protected columns gets
    // overwritten on conflict.
    let updatable: Vec<&str> = columns
        .iter()
        .copied()
        .filter(|c| {
            !config.conflict_columns.iter().any(|k| k == c)
                && !config.protected_columns.iter().any(|k| k == c)
        })
        .collect();

    let sql = match dialect {
        Dialect::Postgres | Dialect::Sqlite => {
            let conflict = config.conflict_columns.join(", ");
            if updatable.is_empty() {
                // Nothing left to overwrite; DO NOTHING keeps the
                // statement executable where a bare DO UPDATE SET is not.
                format!("{insert} ON CONFLICT ({conflict}) DO NOTHING")
            } else {
                let update = updatable
                    .iter()
                    .map(|c| {
                        let column = dialect.quote_identifier(c);
                        let excluded = dialect.quote_identifier("excluded");
                        format!("{column} = {excluded}.{column}")
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{insert} ON CONFLICT ({conflict}) DO UPDATE SET {update}")
            }
        }
        Dialect::Mysql => {
            // MySQL picks the violated unique key itself; the configured
            // conflict columns cannot be emitted.
            tracing::debug!(
                conflict = ?config.conflict_columns,
                "ON DUPLICATE KEY UPDATE takes no conflict column list"
            );
            if updatable.is_empty() {
                // Conventional MySQL no-op assignment.
                let column = dialect.quote_identifier(columns[0]);
                format!("{insert} ON DUPLICATE KEY UPDATE {column} = {column}")
            } else {
                let update = updatable
                    .iter()
                    .map(|c| {
                        let column = dialect.quote_identifier(c);
                        format!("{column} = VALUES({column})")
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{insert} ON DUPLICATE KEY UPDATE {update}")
            }
        }
    };

    let params = flatten(records, &columns);
    debug_assert_eq!(params.len(), records.len() * columns.len());

    Ok(CompiledStatement { sql, params })
}
