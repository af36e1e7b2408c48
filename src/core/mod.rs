//! Core types shared by every part of the query builder.
//!
//! - [`Level`] names the four cascade levels and their ordering.
//! - [`QueryError`] is the typed error taxonomy.

pub mod error;
mod level;

pub use error::QueryError;
pub use level::Level;
