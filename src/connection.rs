//! Live database connection interface used by the creation and check runs.

use crate::field::Value;
use crate::sql::Dialect;

/// Error reported by the database, with its native code when available.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{text}{}", code_suffix(.code))]
pub struct DbError {
    pub code: Option<i32>,
    pub text: String,
}

fn code_suffix(code: &Option<i32>) -> String {
    code.map(|code| format!(" (code {code})")).unwrap_or_default()
}

impl DbError {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            code: None,
            text: text.into(),
        }
    }

    pub fn with_code(code: i32, text: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            text: text.into(),
        }
    }
}

/// Names of the tables and views present in a database.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectNames {
    pub tables: Vec<String>,
    pub views: Vec<String>,
}

/// A connection able to run schema statements.
///
/// Must be `Send` so a creation run can own it on a worker thread.
pub trait Connection: Send {
    /// Dialect used to render statements for this connection.
    fn dialect(&self) -> Dialect;

    /// Run one statement without parameters.
    fn execute(&mut self, sql: &str) -> Result<(), DbError>;

    /// Prepare `sql` once and run it for each row of bound values.
    fn execute_prepared(&mut self, sql: &str, rows: &[Vec<Value>]) -> Result<(), DbError>;

    fn begin(&mut self) -> Result<(), DbError>;
    fn commit(&mut self) -> Result<(), DbError>;
    fn rollback(&mut self) -> Result<(), DbError>;

    fn object_names(&mut self) -> Result<ObjectNames, DbError>;
}

impl<C: Connection + ?Sized> Connection for Box<C> {
    fn dialect(&self) -> Dialect {
        (**self).dialect()
    }

    fn execute(&mut self, sql: &str) -> Result<(), DbError> {
        (**self).execute(sql)
    }

    fn execute_prepared(&mut self, sql: &str, rows: &[Vec<Value>]) -> Result<(), DbError> {
        (**self).execute_prepared(sql, rows)
    }

    fn begin(&mut self) -> Result<(), DbError> {
        (**self).begin()
    }

    fn commit(&mut self) -> Result<(), DbError> {
        (**self).commit()
    }

    fn rollback(&mut self) -> Result<(), DbError> {
        (**self).rollback()
    }

    fn object_names(&mut self) -> Result<ObjectNames, DbError> {
        (**self).object_names()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording connection for driver tests.

    use super::*;

    /// One call received by a [`RecordingConnection`].
    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Execute(String),
        Prepared(String, Vec<Vec<Value>>),
        Begin,
        Commit,
        Rollback,
        ObjectNames,
    }

    /// Records every call and fails the first statement containing `fail_on`.
    #[derive(Debug, Default)]
    pub struct RecordingConnection {
        pub calls: Vec<Call>,
        pub fail_on: Option<String>,
        pub objects: ObjectNames,
    }

    impl RecordingConnection {
        pub fn failing_on(pattern: &str) -> Self {
            Self {
                fail_on: Some(pattern.to_string()),
                ..Self::default()
            }
        }

        pub fn statements(&self) -> Vec<&str> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Execute(sql) | Call::Prepared(sql, _) => Some(sql.as_str()),
                    _ => None,
                })
                .collect()
        }

        fn check(&self, sql: &str) -> Result<(), DbError> {
            match &self.fail_on {
                Some(pattern) if sql.contains(pattern.as_str()) => {
                    Err(DbError::with_code(1, format!("forced failure on {pattern}")))
                }
                _ => Ok(()),
            }
        }
    }

    impl Connection for RecordingConnection {
        fn dialect(&self) -> Dialect {
            Dialect::Sqlite
        }

        fn execute(&mut self, sql: &str) -> Result<(), DbError> {
            self.calls.push(Call::Execute(sql.to_string()));
            self.check(sql)
        }

        fn execute_prepared(&mut self, sql: &str, rows: &[Vec<Value>]) -> Result<(), DbError> {
            self.calls.push(Call::Prepared(sql.to_string(), rows.to_vec()));
            self.check(sql)
        }

        fn begin(&mut self) -> Result<(), DbError> {
            self.calls.push(Call::Begin);
            Ok(())
        }

        fn commit(&mut self) -> Result<(), DbError> {
            self.calls.push(Call::Commit);
            Ok(())
        }

        fn rollback(&mut self) -> Result<(), DbError> {
            self.calls.push(Call::Rollback);
            Ok(())
        }

        fn object_names(&mut self) -> Result<ObjectNames, DbError> {
            self.calls.push(Call::ObjectNames);
            Ok(self.objects.clone())
        }
    }

    /// Waits for one permit on `gate` before each statement.
    pub struct GatedConnection {
        pub inner: RecordingConnection,
        pub gate: std::sync::mpsc::Receiver<()>,
    }

    impl Connection for GatedConnection {
        fn dialect(&self) -> Dialect {
            self.inner.dialect()
        }

        fn execute(&mut self, sql: &str) -> Result<(), DbError> {
            // A closed gate lets every statement through
            let _ = self.gate.recv();
            self.inner.execute(sql)
        }

        fn execute_prepared(&mut self, sql: &str, rows: &[Vec<Value>]) -> Result<(), DbError> {
            let _ = self.gate.recv();
            self.inner.execute_prepared(sql, rows)
        }

        fn begin(&mut self) -> Result<(), DbError> {
            self.inner.begin()
        }

        fn commit(&mut self) -> Result<(), DbError> {
            self.inner.commit()
        }

        fn rollback(&mut self) -> Result<(), DbError> {
            self.inner.rollback()
        }

        fn object_names(&mut self) -> Result<ObjectNames, DbError> {
            self.inner.object_names()
        }
    }
}
