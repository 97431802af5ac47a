//! The executor trait a compiled statement runs through.

use crate::error::Result;
use crate::value::Value;

/// A database client capable of running a write statement.
///
/// The compiler borrows an executor only for the duration of one call;
/// it never acquires, retains, or releases connections itself. Driver
/// failures surface as [`Error::Execution`](crate::Error::Execution)
/// and are not retried.
pub trait Executor {
    /// Execute a write statement with bound parameters and return the
    /// number of rows affected.
    fn affecting_statement(&mut self, sql: &str, params: &[Value]) -> Result<u64>;
}

impl<E: Executor + ?Sized> Executor for &mut E {
    fn affecting_statement(&mut self, sql: &str, params: &[Value]) -> Result<u64> {
        (**self).affecting_statement(sql, params)
    }
}
