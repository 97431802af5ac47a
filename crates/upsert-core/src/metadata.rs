//! Table metadata supplied by the model layer.
//!
//! The compiler never inspects a live database; everything it needs to
//! know about a table (name, prefix, primary key, timestamp column) is
//! injected through [`ModelMetadata`].

/// Metadata about the table an upsert targets.
///
/// ORM layers implement this for their model types; plain callers can
/// use [`TableMeta`] directly.
pub trait ModelMetadata {
    /// The bare table name, without any prefix.
    fn table(&self) -> &str;

    /// Prefix applied to every table name (shared-schema installs).
    fn table_prefix(&self) -> &str {
        ""
    }

    /// The primary key column. Used as the conflict key when the caller
    /// supplies no unique-column override.
    fn primary_key(&self) -> &str;

    /// The creation-timestamp column, if the table has one. Never
    /// overwritten by the update branch of an upsert.
    fn created_at_column(&self) -> Option<&str>;

    /// The prefixed table name used in generated SQL.
    fn qualified_table(&self) -> String {
        format!("{}{}", self.table_prefix(), self.table())
    }
}

/// Plain-data [`ModelMetadata`] implementation with builder-style setup.
///
/// Defaults match common ORM conventions: primary key `id`, creation
/// timestamp `created_at`, no prefix.
///
/// # Example
///
/// ```
/// use upsert_core::{ModelMetadata, TableMeta};
///
/// let meta = TableMeta::new("users").prefix("app_");
/// assert_eq!(meta.qualified_table(), "app_users");
/// assert_eq!(meta.primary_key(), "id");
/// ```
#[derive(Debug, Clone)]
pub struct TableMeta {
    table: String,
    prefix: String,
    primary_key: String,
    created_at: Option<String>,
}

impl TableMeta {
    /// Create metadata for the given table with default key and
    /// timestamp columns.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            prefix: String::new(),
            primary_key: "id".to_string(),
            created_at: Some("created_at".to_string()),
        }
    }

    /// Set the table-name prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the primary key column.
    ///
    /// Named `with_` so the [`ModelMetadata::primary_key`] getter stays
    /// callable on a concrete `TableMeta`.
    pub fn with_primary_key(mut self, column: impl Into<String>) -> Self {
        self.primary_key = column.into();
        self
    }

    /// Set the creation-timestamp column.
    pub fn created_at(mut self, column: impl Into<String>) -> Self {
        self.created_at = Some(column.into());
        self
    }

    /// Declare that the table tracks no creation timestamp.
    pub fn no_created_at(mut self) -> Self {
        self.created_at = None;
        self
    }
}

impl ModelMetadata for TableMeta {
    fn table(&self) -> &str {
        &self.table
    }

    fn table_prefix(&self) -> &str {
        &self.prefix
    }

    fn primary_key(&self) -> &str {
        &self.primary_key
    }

    fn created_at_column(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let meta = TableMeta::new("users");
        assert_eq!(meta.table(), "users");
        assert_eq!(meta.table_prefix(), "");
        assert_eq!(meta.primary_key(), "id");
        assert_eq!(meta.created_at_column(), Some("created_at"));
        assert_eq!(meta.qualified_table(), "users");
    }

    #[test]
    fn builder_overrides() {
        let meta = TableMeta::new("events")
            .prefix("tenant_")
            .with_primary_key("event_id")
            .created_at("inserted_at");
        assert_eq!(meta.qualified_table(), "tenant_events");
        assert_eq!(meta.primary_key(), "event_id");
        assert_eq!(meta.created_at_column(), Some("inserted_at"));
    }

    #[test]
    fn setter_does_not_shadow_the_trait_getter() {
        // Zero-arg getter calls on a concrete TableMeta must resolve to
        // the ModelMetadata accessor, not the builder setter.
        let meta = TableMeta::new("users").with_primary_key("user_id");
        assert_eq!(meta.primary_key(), "user_id");
        assert_eq!(ModelMetadata::primary_key(&meta), "user_id");
    }

    #[test]
    fn no_created_at() {
        let meta = TableMeta::new("lookup").no_created_at();
        assert_eq!(meta.created_at_column(), None);
    }
}
