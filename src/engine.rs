//! Schema creation driver.
//!
//! Objects are created phase by phase (tables, seed data, views, triggers),
//! each phase in declaration order. The first failure stops the run. A run
//! can be aborted between two objects.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, error, info, warn};

use crate::connection::{Connection, DbError};
use crate::population::TablePopulationSchema;
use crate::schema::DatabaseSchema;
use crate::sql::{Dialect, SqlError};
use crate::table::TableSchema;
use crate::trigger::TriggerSchema;
use crate::view::ViewSchema;

/// Kind of schema object, in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectCategory {
    Table,
    TablePopulation,
    View,
    Trigger,
}

impl ObjectCategory {
    /// Creation phases, in order.
    pub const PHASES: [ObjectCategory; 4] = [
        ObjectCategory::Table,
        ObjectCategory::TablePopulation,
        ObjectCategory::View,
        ObjectCategory::Trigger,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::TablePopulation => "table population",
            Self::View => "view",
            Self::Trigger => "trigger",
        }
    }
}

impl fmt::Display for ObjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Error,
}

/// Why an object could not be created.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Failure {
    #[error(transparent)]
    Sql(#[from] SqlError),
    #[error(transparent)]
    Database(#[from] DbError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Creating {category} '{name}' failed: {failure}")]
pub struct CreationError {
    pub category: ObjectCategory,
    pub name: String,
    pub failure: Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Aborted,
}

/// Progress notifications of a creation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreationEvent {
    ObjectProgress {
        category: ObjectCategory,
        name: String,
        percent: u8,
    },
    ObjectStatus {
        category: ObjectCategory,
        name: String,
        status: Status,
    },
    ObjectError(CreationError),
    CategoryProgress {
        category: ObjectCategory,
        completed: usize,
        total: usize,
    },
    CategoryStatus {
        category: ObjectCategory,
        status: Status,
    },
    GlobalProgress {
        completed: usize,
        total: usize,
    },
    GlobalError(CreationError),
}

/// One object of the schema, borrowed for a run.
#[derive(Debug, Clone, Copy)]
enum SchemaObject<'a> {
    Table(&'a TableSchema),
    Population(&'a TablePopulationSchema),
    View(&'a ViewSchema),
    Trigger(&'a TriggerSchema),
}

impl SchemaObject<'_> {
    fn name(&self) -> &str {
        match self {
            Self::Table(t) => &t.name,
            Self::Population(p) => &p.name,
            Self::View(v) => &v.name,
            Self::Trigger(t) => &t.name,
        }
    }
}

fn objects_in(schema: &DatabaseSchema, category: ObjectCategory) -> Vec<SchemaObject<'_>> {
    match category {
        ObjectCategory::Table => schema.tables().iter().map(SchemaObject::Table).collect(),
        ObjectCategory::TablePopulation => schema
            .table_populations()
            .iter()
            .map(SchemaObject::Population)
            .collect(),
        ObjectCategory::View => schema.views().iter().map(SchemaObject::View).collect(),
        ObjectCategory::Trigger => schema.triggers().iter().map(SchemaObject::Trigger).collect(),
    }
}

fn execute_all<C: Connection + ?Sized>(conn: &mut C, statements: &[String]) -> Result<(), DbError> {
    for sql in statements {
        debug!(target: "cableschema::engine", "executing: {}", sql);
        conn.execute(sql)?;
    }
    Ok(())
}

/// Insert all rows of a data set in one transaction, rolled back on failure.
fn populate<C: Connection + ?Sized>(
    conn: &mut C,
    sql: &str,
    population: &TablePopulationSchema,
) -> Result<(), DbError> {
    debug!(target: "cableschema::engine", "executing: {} ({} rows)", sql, population.row_count());
    conn.begin()?;
    let result = conn
        .execute_prepared(sql, population.rows())
        .and_then(|()| conn.commit());
    if result.is_err() {
        if let Err(e) = conn.rollback() {
            warn!(target: "cableschema::engine", "rollback of '{}' failed: {}", population.name, e);
        }
    }
    result
}

/// Render every statement of an object first, then run them.
fn create_object<C: Connection + ?Sized>(
    conn: &mut C,
    dialect: Dialect,
    object: SchemaObject<'_>,
) -> Result<(), Failure> {
    match object {
        SchemaObject::Table(table) => {
            let statements = table.sql_for_create(dialect)?;
            execute_all(conn, &statements)?;
        }
        SchemaObject::Population(population) => {
            let sql = population.sql_for_insert(dialect)?;
            populate(conn, &sql, population)?;
        }
        SchemaObject::View(view) => {
            let statements = [view.sql_for_drop(dialect)?, view.sql_for_create(dialect)?];
            execute_all(conn, &statements)?;
        }
        SchemaObject::Trigger(trigger) => {
            let statements = [trigger.sql_for_drop(dialect)?, trigger.sql_for_create(dialect)?];
            execute_all(conn, &statements)?;
        }
    }
    Ok(())
}

/// Create `schema` through `conn`, reporting progress to `emit`.
///
/// `abort` is checked before each object; once set, the run stops with
/// [`RunOutcome::Aborted`] and no further statement is sent.
pub fn create_schema_with<C, F>(
    schema: &DatabaseSchema,
    conn: &mut C,
    abort: &AtomicBool,
    mut emit: F,
) -> Result<RunOutcome, CreationError>
where
    C: Connection + ?Sized,
    F: FnMut(CreationEvent),
{
    let dialect = conn.dialect();
    let total = schema.object_count();
    let mut completed = 0;
    info!(target: "cableschema::engine", "creating schema: {} objects, dialect {}", total, dialect);

    for category in ObjectCategory::PHASES {
        let objects = objects_in(schema, category);
        info!(target: "cableschema::engine", "creating {} {} object(s)", objects.len(), category);
        emit(CreationEvent::CategoryProgress {
            category,
            completed: 0,
            total: objects.len(),
        });

        for (index, object) in objects.iter().enumerate() {
            if abort.load(Ordering::SeqCst) {
                warn!(target: "cableschema::engine", "schema creation aborted before {} '{}'", category, object.name());
                return Ok(RunOutcome::Aborted);
            }

            let name = object.name().to_string();
            emit(CreationEvent::ObjectProgress {
                category,
                name: name.clone(),
                percent: 0,
            });

            if let Err(failure) = create_object(conn, dialect, *object) {
                let err = CreationError {
                    category,
                    name: name.clone(),
                    failure,
                };
                error!(target: "cableschema::engine", "{}", err);
                emit(CreationEvent::ObjectError(err.clone()));
                emit(CreationEvent::ObjectProgress {
                    category,
                    name: name.clone(),
                    percent: 0,
                });
                emit(CreationEvent::ObjectStatus {
                    category,
                    name,
                    status: Status::Error,
                });
                emit(CreationEvent::CategoryStatus {
                    category,
                    status: Status::Error,
                });
                emit(CreationEvent::GlobalError(err.clone()));
                return Err(err);
            }

            debug!(target: "cableschema::engine", "created {} '{}'", category, name);
            completed += 1;
            emit(CreationEvent::ObjectProgress {
                category,
                name: name.clone(),
                percent: 100,
            });
            emit(CreationEvent::ObjectStatus {
                category,
                name,
                status: Status::Ok,
            });
            emit(CreationEvent::CategoryProgress {
                category,
                completed: index + 1,
                total: objects.len(),
            });
            emit(CreationEvent::GlobalProgress { completed, total });
        }

        emit(CreationEvent::CategoryStatus {
            category,
            status: Status::Ok,
        });
    }

    info!(target: "cableschema::engine", "schema created: {} objects", completed);
    Ok(RunOutcome::Completed)
}

/// Create `schema` on the calling thread, without events or abort.
pub fn create_schema_blocking<C>(schema: &DatabaseSchema, conn: &mut C) -> Result<(), CreationError>
where
    C: Connection + ?Sized,
{
    let never = AtomicBool::new(false);
    create_schema_with(schema, conn, &never, |_| {})?;
    Ok(())
}

/// Drop every object of `schema`: triggers, views, then tables in reverse order.
pub fn drop_schema<C>(schema: &DatabaseSchema, conn: &mut C) -> Result<(), CreationError>
where
    C: Connection + ?Sized,
{
    let dialect = conn.dialect();
    let fail = |category, name: &str, failure: Failure| CreationError {
        category,
        name: name.to_string(),
        failure,
    };

    for trigger in schema.triggers() {
        let sql = trigger
            .sql_for_drop(dialect)
            .map_err(|e| fail(ObjectCategory::Trigger, &trigger.name, e.into()))?;
        execute_all(conn, &[sql]).map_err(|e| fail(ObjectCategory::Trigger, &trigger.name, e.into()))?;
    }
    for view in schema.views() {
        let sql = view
            .sql_for_drop(dialect)
            .map_err(|e| fail(ObjectCategory::View, &view.name, e.into()))?;
        execute_all(conn, &[sql]).map_err(|e| fail(ObjectCategory::View, &view.name, e.into()))?;
    }
    for table in schema.tables().iter().rev() {
        let sql = table
            .sql_for_drop(dialect)
            .map_err(|e| fail(ObjectCategory::Table, &table.name, e.into()))?;
        execute_all(conn, &[sql]).map_err(|e| fail(ObjectCategory::Table, &table.name, e.into()))?;
    }
    info!(target: "cableschema::engine", "schema dropped");
    Ok(())
}

#[derive(Debug, thiserror::Error)]
#[error("Schema creation worker panicked")]
pub struct WorkerPanicked;

/// Result of a threaded run: the connection handed back and the run result.
pub struct Finished<C> {
    pub connection: C,
    pub result: Result<RunOutcome, CreationError>,
}

/// Handle on a creation run executing on its own thread.
pub struct CreationHandle<C> {
    abort: Arc<AtomicBool>,
    events: Receiver<CreationEvent>,
    worker: JoinHandle<Finished<C>>,
}

impl<C> CreationHandle<C> {
    /// Request the run to stop before its next object.
    pub fn abort(&self) {
        self.abort.store(true, Ordering::SeqCst);
    }

    pub fn abort_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.abort)
    }

    /// Events of the run; the channel closes when the worker ends.
    pub fn events(&self) -> &Receiver<CreationEvent> {
        &self.events
    }

    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    pub fn join(self) -> Result<Finished<C>, WorkerPanicked> {
        self.worker.join().map_err(|_| WorkerPanicked)
    }
}

/// Run the creation of `schema` on a dedicated thread owning `connection`.
///
/// The worker works on its own copy of the schema.
pub fn spawn<C>(schema: &DatabaseSchema, mut connection: C) -> std::io::Result<CreationHandle<C>>
where
    C: Connection + 'static,
{
    let schema = schema.clone();
    let abort = Arc::new(AtomicBool::new(false));
    let (tx, events) = mpsc::channel();
    let flag = Arc::clone(&abort);

    let worker = thread::Builder::new()
        .name("schema-creation".to_string())
        .spawn(move || {
            let result = create_schema_with(&schema, &mut connection, &flag, |event| {
                // A dropped receiver only means nobody listens anymore
                let _ = tx.send(event);
            });
            Finished { connection, result }
        })?;

    Ok(CreationHandle {
        abort,
        events,
        worker,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::testing::{Call, GatedConnection, RecordingConnection};
    use crate::field::{Field, FieldType};
    use crate::table::ForeignKey;
    use crate::trigger::TriggerEvent;
    use crate::view::Table;

    fn small_schema() -> DatabaseSchema {
        let mut schema = DatabaseSchema::new();

        let mut client = TableSchema::new("Client_tbl");
        client.add_field(Field::new("Id_PK", FieldType::Integer).auto_value(), true);
        client.add_field(Field::varchar("Name", 50), false);
        schema.add_table(client);

        let mut address = TableSchema::new("Address_tbl");
        address.add_field(Field::new("Id_PK", FieldType::Integer).auto_value(), true);
        address.add_field(Field::new("Client_Id_FK", FieldType::Integer).required(), false);
        address.add_foreign_key(
            ForeignKey::new("Client_tbl")
                .add_key_fields("Id_PK", "Client_Id_FK")
                .with_child_index(),
        );
        schema.add_table(address);

        let mut pop = TablePopulationSchema::new("Client_tbl data", "Client_tbl");
        pop.add_field_names(["Name"]);
        pop.current_row_data().add("Alpha");
        pop.commit_current_row_data().unwrap();
        pop.current_row_data().add("Beta");
        pop.commit_current_row_data().unwrap();
        schema.add_table_population(pop);

        let client = Table::with_alias("Client_tbl", "C");
        let address = Table::with_alias("Address_tbl", "A");
        let mut view = ViewSchema::new("Client_address_view", client.clone());
        view.add_select_fields(&client, ["Id_PK", "Name"]);
        view.add_select_fields(&address, ["Id_PK"]);
        view.add_join_clause(schema.join_clause(&client, &address).unwrap());
        schema.add_view(view);

        schema.add_trigger(TriggerSchema::new(
            "onClientAfterInsert",
            TriggerEvent::AfterInsert,
            "Client_tbl",
            "INSERT INTO Address_tbl (Client_Id_FK) VALUES (NEW.Id_PK);",
        ));
        schema
    }

    fn collect_run(
        schema: &DatabaseSchema,
        conn: &mut RecordingConnection,
        abort: &AtomicBool,
    ) -> (Result<RunOutcome, CreationError>, Vec<CreationEvent>) {
        let mut events = Vec::new();
        let result = create_schema_with(schema, conn, abort, |e| events.push(e));
        (result, events)
    }

    #[test]
    fn test_phase_order() {
        let schema = small_schema();
        let mut conn = RecordingConnection::default();
        create_schema_blocking(&schema, &mut conn).unwrap();

        let statements = conn.statements();
        let prefixes: Vec<_> = statements
            .iter()
            .map(|s| s.split('"').next().unwrap_or(""))
            .collect();
        assert_eq!(
            prefixes,
            vec![
                "CREATE TABLE ",
                "CREATE TABLE ",
                "CREATE INDEX ",
                "INSERT INTO ",
                "DROP VIEW IF EXISTS ",
                "CREATE VIEW ",
                "DROP TRIGGER IF EXISTS ",
                "CREATE TRIGGER ",
            ]
        );
    }

    #[test]
    fn test_population_binds_rows_in_transaction() {
        let schema = small_schema();
        let mut conn = RecordingConnection::default();
        create_schema_blocking(&schema, &mut conn).unwrap();

        let begin = conn.calls.iter().position(|c| *c == Call::Begin).unwrap();
        match &conn.calls[begin + 1] {
            Call::Prepared(sql, rows) => {
                assert_eq!(sql, "INSERT INTO \"Client_tbl\" (\"Name\") VALUES (?)");
                assert_eq!(rows.len(), 2);
            }
            other => panic!("unexpected call {:?}", other),
        }
        assert_eq!(conn.calls[begin + 2], Call::Commit);
    }

    #[test]
    fn test_events_on_success() {
        let schema = small_schema();
        let mut conn = RecordingConnection::default();
        let abort = AtomicBool::new(false);
        let (result, events) = collect_run(&schema, &mut conn, &abort);
        assert_eq!(result, Ok(RunOutcome::Completed));

        let last_global = events.iter().rev().find_map(|e| match e {
            CreationEvent::GlobalProgress { completed, total } => Some((*completed, *total)),
            _ => None,
        });
        assert_eq!(last_global, Some((5, 5)));
        let ok_statuses = events
            .iter()
            .filter(|e| matches!(e, CreationEvent::ObjectStatus { status: Status::Ok, .. }))
            .count();
        assert_eq!(ok_statuses, 5);
        assert!(!events.iter().any(|e| matches!(e, CreationEvent::GlobalError(_))));
    }

    #[test]
    fn test_fail_fast_on_view() {
        let schema = small_schema();
        let mut conn = RecordingConnection::failing_on("CREATE VIEW");
        let abort = AtomicBool::new(false);
        let (result, events) = collect_run(&schema, &mut conn, &abort);

        let err = result.unwrap_err();
        assert_eq!(err.category, ObjectCategory::View);
        assert_eq!(err.name, "Client_address_view");
        assert!(matches!(err.failure, Failure::Database(_)));

        assert!(!conn.statements().iter().any(|s| s.contains("TRIGGER")));
        let global_errors = events
            .iter()
            .filter(|e| matches!(e, CreationEvent::GlobalError(_)))
            .count();
        assert_eq!(global_errors, 1);
        assert!(events.iter().any(|e| matches!(
            e,
            CreationEvent::ObjectStatus { category: ObjectCategory::View, status: Status::Error, .. }
        )));
    }

    #[test]
    fn test_failed_object_progress_falls_back_to_zero() {
        let schema = small_schema();
        let mut conn = RecordingConnection::failing_on("CREATE VIEW");
        let abort = AtomicBool::new(false);
        let (_, events) = collect_run(&schema, &mut conn, &abort);

        let error_at = events
            .iter()
            .position(|e| matches!(e, CreationEvent::ObjectError(_)))
            .unwrap();
        assert_eq!(
            events[error_at + 1],
            CreationEvent::ObjectProgress {
                category: ObjectCategory::View,
                name: "Client_address_view".to_string(),
                percent: 0,
            }
        );
    }

    #[test]
    fn test_population_failure_rolls_back() {
        let schema = small_schema();
        let mut conn = RecordingConnection::failing_on("INSERT INTO");
        let err = create_schema_blocking(&schema, &mut conn).unwrap_err();
        assert_eq!(err.category, ObjectCategory::TablePopulation);
        assert_eq!(conn.calls.last(), Some(&Call::Rollback));
        assert!(!conn.calls.contains(&Call::Commit));
    }

    #[test]
    fn test_render_error_stops_before_sending() {
        let mut schema = small_schema();
        schema.add_view(ViewSchema::new("Broken_view", Table::new("Client_tbl")));
        let mut conn = RecordingConnection::default();
        let err = create_schema_blocking(&schema, &mut conn).unwrap_err();
        assert_eq!(err.name, "Broken_view");
        assert!(matches!(err.failure, Failure::Sql(SqlError::NoSelectFields(_))));
        assert!(!conn.statements().iter().any(|s| s.contains("Broken_view")));
        assert!(!conn.statements().iter().any(|s| s.contains("TRIGGER")));
    }

    #[test]
    fn test_abort_before_start() {
        let schema = small_schema();
        let mut conn = RecordingConnection::default();
        let abort = AtomicBool::new(true);
        let (result, _) = collect_run(&schema, &mut conn, &abort);
        assert_eq!(result, Ok(RunOutcome::Aborted));
        assert!(conn.calls.is_empty());
    }

    #[test]
    fn test_abort_during_run() {
        let schema = small_schema();
        let mut conn = RecordingConnection::default();
        let abort = AtomicBool::new(false);
        let mut seen = 0;
        let result = create_schema_with(&schema, &mut conn, &abort, |e| {
            if let CreationEvent::GlobalProgress { completed, .. } = e {
                seen = completed;
                if completed == 2 {
                    abort.store(true, Ordering::SeqCst);
                }
            }
        });
        assert_eq!(result, Ok(RunOutcome::Aborted));
        assert_eq!(seen, 2);
        assert!(!conn.statements().iter().any(|s| s.starts_with("INSERT")));
    }

    #[test]
    fn test_spawn_streams_events() {
        let schema = small_schema();
        let handle = spawn(&schema, RecordingConnection::default()).unwrap();
        let events: Vec<_> = handle.events().iter().collect();
        let finished = handle.join().unwrap();
        assert_eq!(finished.result, Ok(RunOutcome::Completed));
        assert_eq!(finished.connection.statements().len(), 8);
        assert!(events.contains(&CreationEvent::GlobalProgress { completed: 5, total: 5 }));
    }

    #[test]
    fn test_handle_abort_stops_worker() {
        let schema = small_schema();
        let (permit, gate) = mpsc::channel();
        let conn = GatedConnection {
            inner: RecordingConnection::default(),
            gate,
        };
        let handle = spawn(&schema, conn).unwrap();

        // The worker announces the first table, then waits on the gate
        let first = handle
            .events()
            .iter()
            .find(|e| matches!(e, CreationEvent::ObjectProgress { .. }))
            .unwrap();
        assert_eq!(
            first,
            CreationEvent::ObjectProgress {
                category: ObjectCategory::Table,
                name: "Client_tbl".to_string(),
                percent: 0,
            }
        );
        handle.abort();
        permit.send(()).unwrap();

        let events: Vec<_> = handle.events().iter().collect();
        let finished = handle.join().unwrap();
        drop(permit);

        let client_table = schema.tables()[0].sql_for_create(Dialect::Sqlite).unwrap();
        assert_eq!(finished.result, Ok(RunOutcome::Aborted));
        assert_eq!(finished.connection.inner.statements(), vec![client_table[0].as_str()]);
        assert!(events.contains(&CreationEvent::GlobalProgress { completed: 1, total: 5 }));
        assert!(!events.iter().any(|e| matches!(e, CreationEvent::GlobalError(_))));
    }

    #[test]
    fn test_drop_schema_order() {
        let schema = small_schema();
        let mut conn = RecordingConnection::default();
        drop_schema(&schema, &mut conn).unwrap();
        assert_eq!(
            conn.statements(),
            vec![
                "DROP TRIGGER IF EXISTS \"onClientAfterInsert\"",
                "DROP VIEW IF EXISTS \"Client_address_view\"",
                "DROP TABLE IF EXISTS \"Address_tbl\"",
                "DROP TABLE IF EXISTS \"Client_tbl\"",
            ]
        );
    }
}
