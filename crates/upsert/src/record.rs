//! Records and bind-value flattening.

use std::collections::BTreeMap;

use upsert_core::Value;

/// One row's worth of column/value pairs.
///
/// Columns are held in a B-tree, so iteration order is always the
/// lexicographic column order regardless of how the record was built.
/// That ordering is what makes statement shape deterministic across
/// calls with differently-ordered input, and it is derived without ever
/// mutating caller data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    columns: BTreeMap<String, Value>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column, builder-style.
    ///
    /// # Example
    ///
    /// ```
    /// use upsert::Record;
    ///
    /// let row = Record::new().set("name", "a").set("id", 1i32);
    /// assert_eq!(row.columns().collect::<Vec<_>>(), vec!["id", "name"]);
    /// ```
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.columns.insert(column.into(), value.into());
        self
    }

    /// Set a column in place.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.columns.insert(column.into(), value.into());
    }

    /// Get a column's value.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    /// Column names in canonical (lexicographic) order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the record has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Flatten a batch into one ordered bind-value list.
///
/// Pure and deterministic: records in batch order, columns in the given
/// order within each record. For a batch with a consistent schema the
/// result length is `records.len() * columns.len()` and the order
/// matches the placeholder order of the generated statement exactly.
///
/// A column absent from a record binds `Value::Null`; `compile`
/// validates key sets before flattening, so that branch is unreachable
/// on the compilation path.
pub fn flatten(records: &[Record], columns: &[&str]) -> Vec<Value> {
    let mut values = Vec::with_capacity(records.len() * columns.len());
    for record in records {
        for column in columns {
            values.push(record.get(column).cloned().unwrap_or(Value::Null));
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_sorted_regardless_of_insertion_order() {
        let a = Record::new().set("name", "x").set("created_at", 0i64).set("id", 1i32);
        let b = Record::new().set("id", 1i32).set("created_at", 0i64).set("name", "x");
        assert_eq!(
            a.columns().collect::<Vec<_>>(),
            vec!["created_at", "id", "name"]
        );
        assert_eq!(a, b);
    }

    #[test]
    fn from_iterator_normalizes_too() {
        let row: Record = vec![("z", 1i32), ("a", 2i32)].into_iter().collect();
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["a", "z"]);
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn flatten_is_batch_order_then_column_order() {
        let rows = vec![
            Record::new().set("a", 1i32).set("b", 2i32),
            Record::new().set("b", 4i32).set("a", 3i32),
        ];
        let values = flatten(&rows, &["a", "b"]);
        assert_eq!(
            values,
            vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)]
        );
    }

    #[test]
    fn flatten_length_is_rows_times_columns() {
        let rows: Vec<Record> = (0..5)
            .map(|i| Record::new().set("a", i).set("b", i).set("c", i))
            .collect();
        assert_eq!(flatten(&rows, &["a", "b", "c"]).len(), 15);
        assert!(flatten(&[], &["a", "b"]).is_empty());
    }

    #[test]
    fn flatten_binds_null_for_missing_columns() {
        let rows = vec![Record::new().set("a", 1i32)];
        assert_eq!(flatten(&rows, &["a", "b"]), vec![Value::Int(1), Value::Null]);
    }
}
