//! Check that a database holds every table and view of a schema.

use tracing::{debug, warn};

use crate::connection::{Connection, DbError};
use crate::schema::DatabaseSchema;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    #[error("Table '{0}' is missing in database.")]
    MissingTable(String),
    #[error("View '{0}' is missing in database.")]
    MissingView(String),
    #[error("Listing database objects failed: {0}")]
    Database(#[from] DbError),
}

/// Verify that every declared table, then every declared view, exists.
///
/// Stops at the first missing object. Columns and constraints are not compared.
pub fn check_schema<C>(schema: &DatabaseSchema, conn: &mut C) -> Result<(), CheckError>
where
    C: Connection + ?Sized,
{
    let existing = conn.object_names()?;

    for table in schema.tables() {
        if !existing.tables.iter().any(|name| *name == table.name) {
            warn!(target: "cableschema::check", "table '{}' is missing", table.name);
            return Err(CheckError::MissingTable(table.name.clone()));
        }
    }
    for view in schema.views() {
        if !existing.views.iter().any(|name| *name == view.name) {
            warn!(target: "cableschema::check", "view '{}' is missing", view.name);
            return Err(CheckError::MissingView(view.name.clone()));
        }
    }

    debug!(
        target: "cableschema::check",
        "schema complete: {} tables, {} views",
        schema.tables().len(),
        schema.views().len()
    );
    Ok(())
}

/// Boolean form of [`check_schema`].
pub fn is_schema_ok<C>(schema: &DatabaseSchema, conn: &mut C) -> bool
where
    C: Connection + ?Sized,
{
    check_schema(schema, conn).is_ok()
}
