//! Field type, referential action and literal mapping per dialect.

use super::Dialect;
use crate::field::{FieldType, Value};
use crate::table::ForeignKeyAction;

/// Map a field type to the SQL type name of the dialect.
pub fn type_name(field_type: FieldType, dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::Sqlite => sqlite_type(field_type),
        Dialect::MySQL => mysql_type(field_type),
        Dialect::PostgreSQL => postgres_type(field_type),
        Dialect::Generic => generic_type(field_type),
    }
}

fn sqlite_type(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Boolean => "BOOLEAN",
        FieldType::Integer => "INTEGER",
        FieldType::Float => "FLOAT",
        FieldType::Double => "DOUBLE",
        FieldType::Varchar => "VARCHAR",
        FieldType::Date => "DATE",
        FieldType::Time => "TIME",
        FieldType::DateTime => "DATETIME",
    }
}

fn mysql_type(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Integer => "INT",
        other => sqlite_type(other),
    }
}

fn postgres_type(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Float => "REAL",
        FieldType::Double => "DOUBLE PRECISION",
        FieldType::DateTime => "TIMESTAMP",
        other => sqlite_type(other),
    }
}

fn generic_type(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Double => "DOUBLE PRECISION",
        FieldType::DateTime => "TIMESTAMP",
        other => sqlite_type(other),
    }
}

/// SQL keyword of a referential action.
pub fn action_keyword(action: ForeignKeyAction) -> &'static str {
    match action {
        ForeignKeyAction::NoAction => "NO ACTION",
        ForeignKeyAction::Restrict => "RESTRICT",
        ForeignKeyAction::SetNull => "SET NULL",
        ForeignKeyAction::Cascade => "CASCADE",
    }
}

/// Render a value as a SQL literal.
pub fn literal(value: &Value, dialect: Dialect) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(v) => v.to_string(),
        Value::Double(v) => {
            if v.is_finite() && v.fract() == 0.0 {
                format!("{v:.1}")
            } else {
                v.to_string()
            }
        }
        Value::Boolean(b) => {
            let text = match (dialect, *b) {
                (Dialect::PostgreSQL | Dialect::Generic, true) => "TRUE",
                (Dialect::PostgreSQL | Dialect::Generic, false) => "FALSE",
                (_, true) => "1",
                (_, false) => "0",
            };
            text.to_string()
        }
        Value::Text(s) => format!("'{}'", s.replace('\'', "''")),
    }
}
