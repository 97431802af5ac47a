//! SQL dialect rules for identifier quoting and parameter placeholders.

/// SQL dialect for generating dialect-specific statement text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dialect {
    /// PostgreSQL dialect (uses $1, $2 placeholders)
    #[default]
    Postgres,
    /// SQLite dialect (uses ?1, ?2 placeholders)
    Sqlite,
    /// MySQL dialect (uses ? placeholders)
    Mysql,
}

impl Dialect {
    /// Generate a placeholder for the given parameter index (1-based).
    pub fn placeholder(self, index: usize) -> String {
        match self {
            Dialect::Postgres => format!("${index}"),
            Dialect::Sqlite => format!("?{index}"),
            Dialect::Mysql => "?".to_string(),
        }
    }

    /// Quote an identifier for this dialect.
    ///
    /// Embedded quote characters are escaped by doubling them:
    /// `"` becomes `""` for Postgres/SQLite, `` ` `` becomes ``` `` ```
    /// for MySQL.
    pub fn quote_identifier(self, name: &str) -> String {
        match self {
            Dialect::Postgres | Dialect::Sqlite => {
                let escaped = name.replace('"', "\"\"");
                format!("\"{}\"", escaped)
            }
            Dialect::Mysql => {
                let escaped = name.replace('`', "``");
                format!("`{}`", escaped)
            }
        }
    }

    /// Render a column list: each name quoted, joined by `", "`.
    pub fn columnize(self, columns: &[&str]) -> String {
        columns
            .iter()
            .map(|c| self.quote_identifier(c))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Render one parenthesized placeholder group of `count` parameters.
    ///
    /// `start` is the 1-based index of the group's first parameter, so
    /// multi-row statements number their placeholders continuously.
    pub fn parameterize(self, count: usize, start: usize) -> String {
        let placeholders: Vec<_> = (start..start + count)
            .map(|i| self.placeholder(i))
            .collect();
        format!("({})", placeholders.join(", "))
    }
}
