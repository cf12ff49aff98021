//! Trigger definitions.

use crate::sql::{ddl, Dialect, SqlError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerEvent {
    #[default]
    Unknown,
    AfterInsert,
}

/// A row trigger with a verbatim body script.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TriggerSchema {
    pub name: String,
    pub event: TriggerEvent,
    pub table_name: String,
    /// Statements placed between `BEGIN` and `END`.
    pub script: String,
    pub temporary: bool,
}

impl TriggerSchema {
    pub fn new(
        name: impl Into<String>,
        event: TriggerEvent,
        table_name: impl Into<String>,
        script: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            event,
            table_name: table_name.into(),
            script: script.into(),
            temporary: false,
        }
    }

    pub fn set_temporary(&mut self, temporary: bool) {
        self.temporary = temporary;
    }

    pub fn sql_for_create(&self, dialect: Dialect) -> Result<String, SqlError> {
        ddl::create_trigger(self, dialect)
    }

    pub fn sql_for_drop(&self, dialect: Dialect) -> Result<String, SqlError> {
        ddl::drop_trigger(&self.name, dialect)
    }
}
