//! SQLite connection backed by rusqlite.

use std::path::Path;

use rusqlite::types::{ToSqlOutput, Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, ToSql};
use tracing::debug;

use crate::connection::{Connection, DbError, ObjectNames};
use crate::field::Value;
use crate::sql::Dialect;

impl From<rusqlite::Error> for DbError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _) => DbError::with_code(e.extended_code, err.to_string()),
            _ => DbError::new(err.to_string()),
        }
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(SqlValue::Null),
            Value::Integer(v) => ToSqlOutput::Owned(SqlValue::Integer(*v)),
            Value::Double(v) => ToSqlOutput::Owned(SqlValue::Real(*v)),
            Value::Boolean(v) => ToSqlOutput::Owned(SqlValue::Integer(i64::from(*v))),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
        })
    }
}

/// [`Connection`] over a SQLite database file or in-memory database.
pub struct SqliteConnection {
    conn: rusqlite::Connection,
}

impl SqliteConnection {
    /// Open (or create) a database file with foreign key enforcement on.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening SQLite database");
        Self::from_connection(rusqlite::Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, DbError> {
        Self::from_connection(rusqlite::Connection::open_in_memory()?)
    }

    pub fn from_connection(conn: rusqlite::Connection) -> Result<Self, DbError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    pub fn set_foreign_keys(&mut self, enabled: bool) -> Result<(), DbError> {
        let pragma = if enabled {
            "PRAGMA foreign_keys = ON;"
        } else {
            "PRAGMA foreign_keys = OFF;"
        };
        self.conn.execute_batch(pragma)?;
        Ok(())
    }

    pub fn inner(&self) -> &rusqlite::Connection {
        &self.conn
    }

    pub fn into_inner(self) -> rusqlite::Connection {
        self.conn
    }
}

impl Connection for SqliteConnection {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn execute(&mut self, sql: &str) -> Result<(), DbError> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    fn execute_prepared(&mut self, sql: &str, rows: &[Vec<Value>]) -> Result<(), DbError> {
        let mut stmt = self.conn.prepare(sql)?;
        for row in rows {
            stmt.execute(params_from_iter(row.iter()))?;
        }
        Ok(())
    }

    fn begin(&mut self) -> Result<(), DbError> {
        self.conn.execute_batch("BEGIN")?;
        Ok(())
    }

    fn commit(&mut self) -> Result<(), DbError> {
        self.conn.execute_batch("COMMIT")?;
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), DbError> {
        self.conn.execute_batch("ROLLBACK")?;
        Ok(())
    }

    fn object_names(&mut self) -> Result<ObjectNames, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT name, type FROM sqlite_master WHERE type IN ('table', 'view') \
             UNION ALL \
             SELECT name, type FROM sqlite_temp_master WHERE type IN ('table', 'view')",
        )?;
        let entries = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut names = ObjectNames::default();
        for (name, kind) in entries {
            if kind == "view" {
                names.views.push(name);
            } else {
                names.tables.push(name);
            }
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_and_object_names() {
        let mut conn = SqliteConnection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE \"A_tbl\" (\"Id_PK\" INTEGER PRIMARY KEY)").unwrap();
        conn.execute("CREATE VIEW \"A_view\" AS SELECT * FROM \"A_tbl\"").unwrap();
        let names = conn.object_names().unwrap();
        assert!(names.tables.contains(&"A_tbl".to_string()));
        assert_eq!(names.views, vec!["A_view".to_string()]);
    }

    #[test]
    fn test_execute_prepared_binds_values() {
        let mut conn = SqliteConnection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE t (code TEXT, qty INTEGER, r DOUBLE, ok BOOLEAN)").unwrap();
        conn.execute_prepared(
            "INSERT INTO t (code, qty, r, ok) VALUES (?,?,?,?)",
            &[
                vec![Value::from("Ändern"), Value::from(3), Value::from(0.5), Value::from(true)],
                vec![Value::Null, Value::Null, Value::Null, Value::Null],
            ],
        )
        .unwrap();
        let (code, qty): (String, i64) = conn
            .inner()
            .query_row("SELECT code, qty FROM t WHERE code IS NOT NULL", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .unwrap();
        assert_eq!(code, "Ändern");
        assert_eq!(qty, 3);
        let count: i64 = conn
            .inner()
            .query_row("SELECT count(*) FROM t", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_error_carries_code() {
        let mut conn = SqliteConnection::open_in_memory().unwrap();
        let err = conn.execute("CREATE TABLE broken (").unwrap_err();
        assert!(err.code.is_some());
        assert!(!err.text.is_empty());
    }

    #[test]
    fn test_rollback_discards_rows() {
        let mut conn = SqliteConnection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE t (v INTEGER)").unwrap();
        conn.begin().unwrap();
        conn.execute_prepared("INSERT INTO t (v) VALUES (?)", &[vec![Value::from(1)]])
            .unwrap();
        conn.rollback().unwrap();
        let count: i64 = conn
            .inner()
            .query_row("SELECT count(*) FROM t", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
