//! SQL rendering: dialects, type mapping and statement generation.

pub mod ddl;
mod dialect;
pub mod types;
mod writer;

pub use ddl::SqlError;
pub use dialect::Dialect;
pub use writer::SqlWriter;
