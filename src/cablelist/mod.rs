//! Cable list database: vehicle types, articles, units, connectors,
//! connections and the links wiring them together.

mod populations;
mod tables;
mod triggers;
mod views;

use tracing::debug;

use crate::check::{self, CheckError};
use crate::connection::Connection;
use crate::engine::{self, CreationError, CreationHandle};
use crate::population::PopulationError;
use crate::schema::{DatabaseSchema, JoinError};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error("View '{view}': {source}")]
    Join {
        view: String,
        #[source]
        source: JoinError,
    },
    #[error(transparent)]
    Population(#[from] PopulationError),
}

/// Assemble the complete cable list schema.
///
/// Tables come first so that views can infer their joins from the declared
/// foreign keys.
pub fn build() -> Result<DatabaseSchema, BuildError> {
    let mut schema = DatabaseSchema::new();
    for table in tables::TABLES {
        schema.add_table(table());
    }

    for (name, view) in views::VIEWS {
        let view = view(&schema).map_err(|source| BuildError::Join {
            view: name.to_string(),
            source,
        })?;
        schema.add_view(view);
    }

    for population in populations::POPULATIONS {
        schema.add_table_population(population()?);
    }
    schema.add_trigger(triggers::on_link_version_after_insert());

    debug!(
        target: "cableschema::cablelist",
        "cable list schema built: {} tables, {} views",
        schema.tables().len(),
        schema.views().len()
    );
    Ok(schema)
}

/// The cable list schema together with its create and check entry points.
#[derive(Debug, Clone)]
pub struct CableListDatabase {
    schema: DatabaseSchema,
}

impl CableListDatabase {
    pub fn new() -> Result<Self, BuildError> {
        Ok(Self { schema: build()? })
    }

    pub fn schema(&self) -> &DatabaseSchema {
        &self.schema
    }

    /// Create every object on the calling thread.
    pub fn create_schema<C>(&self, conn: &mut C) -> Result<(), CreationError>
    where
        C: Connection + ?Sized,
    {
        engine::create_schema_blocking(&self.schema, conn)
    }

    /// Create every object on a worker thread owning `conn`.
    pub fn spawn_creation<C>(&self, conn: C) -> std::io::Result<CreationHandle<C>>
    where
        C: Connection + 'static,
    {
        engine::spawn(&self.schema, conn)
    }

    pub fn check_schema<C>(&self, conn: &mut C) -> Result<(), CheckError>
    where
        C: Connection + ?Sized,
    {
        check::check_schema(&self.schema, conn)
    }

    pub fn drop_schema<C>(&self, conn: &mut C) -> Result<(), CreationError>
    where
        C: Connection + ?Sized,
    {
        engine::drop_schema(&self.schema, conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::testing::RecordingConnection;
    use crate::sql::Dialect;

    #[test]
    fn test_build_counts() {
        let schema = build().unwrap();
        assert_eq!(schema.tables().len(), 23);
        assert_eq!(schema.views().len(), 17);
        assert_eq!(schema.table_populations().len(), 4);
        assert_eq!(schema.triggers().len(), 1);
        assert_eq!(schema.object_count(), 45);
        assert_eq!(schema.tables()[0].name, "Modification_tbl");
        assert_eq!(schema.tables()[22].name, "Link_tbl");
        assert_eq!(schema.views()[16].name, "LinkBeam_UnitEnd_view");
    }

    #[test]
    fn test_sql_script_renders_for_every_dialect() {
        let schema = build().unwrap();
        for dialect in [Dialect::Sqlite, Dialect::Generic, Dialect::PostgreSQL, Dialect::MySQL] {
            let script = schema.sql_script(dialect).unwrap();
            assert!(script.contains("VehicleType_Unit_view"));
            assert!(script.contains("onLinkVersionAfterInsert"));
        }
    }

    #[test]
    fn test_create_schema_sends_every_object() {
        let db = CableListDatabase::new().unwrap();
        let mut conn = RecordingConnection::default();
        db.create_schema(&mut conn).unwrap();
        let statements = conn.statements();
        assert!(statements[0].starts_with("CREATE TABLE \"Modification_tbl\""));
        assert!(statements.last().unwrap().starts_with("CREATE TRIGGER \"onLinkVersionAfterInsert\""));
    }

    #[test]
    fn test_join_error_names_the_view() {
        let err = BuildError::Join {
            view: "Unit_view".to_string(),
            source: JoinError::TableNotFound("Unit_tbl".to_string()),
        };
        assert!(err.to_string().starts_with("View 'Unit_view': "));
    }
}
