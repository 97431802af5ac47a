//! Core types and traits for the upsert statement compiler.
//!
//! This crate provides the shared abstractions the compilation layer is
//! built on:
//!
//! - `Value` - dynamically-typed bind parameter
//! - `Error` / `Result` - the failure taxonomy for compilation and execution
//! - `ModelMetadata` - table name, primary key, and timestamp metadata
//! - `Executor` - the database client that runs a compiled statement

pub mod error;
pub mod executor;
pub mod metadata;
pub mod value;

pub use error::{
    CompileError, CompileErrorKind, ConfigError, Error, ExecutionError, ExecutionErrorKind, Result,
};
pub use executor::Executor;
pub use metadata::{ModelMetadata, TableMeta};
pub use value::Value;
