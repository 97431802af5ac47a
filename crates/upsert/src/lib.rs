//! Multi-row upsert statement compilation.
//!
//! `upsert` is the **statement construction layer**. It turns a batch of
//! records plus table metadata into one parameterized
//! `INSERT ... ON CONFLICT DO UPDATE` statement and the flat bind-value
//! list matching its placeholders.
//!
//! # Role In The Architecture
//!
//! - **Records**: [`Record`] normalizes column order so statement shape
//!   is deterministic; [`record::flatten`] produces the bind list.
//! - **Compilation**: [`compile::compile`] builds the statement; all
//!   validation happens here, before any I/O.
//! - **Dialect support**: [`Dialect`] generates SQL for Postgres,
//!   SQLite, and MySQL.
//!
//! Compiled statements execute through the `Executor` trait from
//! `upsert-core`; the caller owns the connection.
//!
//! # Example
//!
//! ```
//! use upsert::{Record, upsert};
//! use upsert_core::TableMeta;
//!
//! let rows = vec![
//!     Record::new().set("id", 1i32).set("name", "a"),
//!     Record::new().set("id", 2i32).set("name", "b"),
//! ];
//! let stmt = upsert!(&rows).build(&TableMeta::new("users")).unwrap();
//! assert!(stmt.sql().contains("ON CONFLICT (id)"));
//! ```

pub mod builder;
pub mod compile;
pub mod dialect;
pub mod record;

pub use builder::UpsertBuilder;
pub use compile::{CompiledStatement, UpsertConfig, compile};
pub use dialect::Dialect;
pub use record::{Record, flatten};

/// Create an upsert for a batch of records.
///
/// # Example
///
/// ```ignore
/// let affected = upsert!(&rows)
///     .unique(&["email"])
///     .execute(&meta, &mut conn)?;
/// ```
#[macro_export]
macro_rules! upsert {
    ($records:expr) => {
        $crate::builder::UpsertBuilder::new($records)
    };
}
