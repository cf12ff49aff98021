pub mod cablelist;
pub mod check;
pub mod config;
pub mod connection;
pub mod engine;
pub mod field;
pub mod population;
pub mod schema;
pub mod sql;
#[cfg(not(target_arch = "wasm32"))]
pub mod sqlite;
pub mod table;
pub mod trigger;
pub mod view;

use wasm_bindgen::prelude::*;

pub use cablelist::{BuildError, CableListDatabase};
pub use check::{check_schema, is_schema_ok, CheckError};
pub use connection::{Connection, DbError, ObjectNames};
pub use engine::{
    create_schema_blocking, create_schema_with, drop_schema, spawn, CreationError, CreationEvent,
    CreationHandle, ObjectCategory, RunOutcome, Status,
};
pub use field::{Field, FieldType, Value};
pub use population::{PopulationError, TablePopulationSchema};
pub use schema::{DatabaseSchema, JoinError};
pub use sql::{Dialect, SqlError};
#[cfg(not(target_arch = "wasm32"))]
pub use sqlite::SqliteConnection;
pub use table::{ForeignKey, ForeignKeyAction, TableSchema};
pub use trigger::{TriggerEvent, TriggerSchema};
pub use view::{JoinClause, JoinOperator, SelectField, Table, ViewSchema};

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Render the cable list schema as one SQL script
#[wasm_bindgen(js_name = "cableListSql")]
pub fn cable_list_sql(dialect: Option<String>) -> Result<String, String> {
    let dialect = match dialect.as_deref() {
        Some(name) => Dialect::from_str(name).ok_or_else(|| format!("Unknown SQL dialect '{name}'"))?,
        None => Dialect::default(),
    };
    let schema = cablelist::build().map_err(|e| e.to_string())?;
    schema.sql_script(dialect).map_err(|e| e.to_string())
}
