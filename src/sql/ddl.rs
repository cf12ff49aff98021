//! Statement rendering for tables, views, seed data and triggers.

use super::types::{action_keyword, literal, type_name};
use super::{Dialect, SqlWriter};
use crate::field::{Field, FieldType, Value};
use crate::population::TablePopulationSchema;
use crate::table::{ForeignKey, TableSchema};
use crate::trigger::{TriggerEvent, TriggerSchema};
use crate::view::{
    JoinClause, JoinConstraintOperator, JoinFieldOperator, JoinOperator, SelectItem,
    SelectSuffix, ViewSchema,
};

/// A definition that cannot be rendered to SQL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SqlError {
    #[error("{kind} has no name")]
    MissingName { kind: &'static str },
    #[error("Table '{0}' has no fields")]
    NoFields(String),
    #[error("Field '{table}.{field}' is VARCHAR without length")]
    MissingLength { table: String, field: String },
    #[error("Foreign key of table '{table}' referencing '{parent}' has no key fields")]
    EmptyForeignKey { table: String, parent: String },
    #[error("View '{0}' has no base table")]
    MissingBaseTable(String),
    #[error("View '{0}' has no select fields")]
    NoSelectFields(String),
    #[error("Join of '{joined}' in view '{view}' has no keys")]
    EmptyJoin { view: String, joined: String },
    #[error("Population '{0}' has no table name")]
    MissingPopulationTable(String),
    #[error("Population '{0}' has no fields")]
    NoPopulationFields(String),
    #[error("Population '{population}' row {row} has {actual} values, expected {expected}")]
    PopulationRow {
        population: String,
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("Trigger '{0}' has no table name")]
    MissingTriggerTable(String),
    #[error("Trigger '{0}' has an unknown event")]
    UnknownTriggerEvent(String),
}

fn require_name(name: &str, kind: &'static str) -> Result<(), SqlError> {
    if name.trim().is_empty() {
        return Err(SqlError::MissingName { kind });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// The field rendered inline as an auto-increment primary key, if any.
///
/// Only a table whose primary key is a single auto-value integer field gets
/// one; any other primary key is a separate constraint.
fn inline_auto_key(table: &TableSchema) -> Option<&Field> {
    match table.primary_key() {
        [pk] => table
            .field(pk)
            .filter(|f| f.auto_value && f.field_type == FieldType::Integer),
        _ => None,
    }
}

fn write_field(
    w: &mut SqlWriter,
    table: &TableSchema,
    field: &Field,
    inline_auto: bool,
) -> Result<(), SqlError> {
    let dialect = w.dialect();
    w.push("  ").ident(&field.name).push(" ");

    if inline_auto {
        match dialect {
            Dialect::Sqlite => {
                w.push("INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT");
            }
            Dialect::MySQL => {
                w.push("INT NOT NULL AUTO_INCREMENT");
            }
            Dialect::PostgreSQL | Dialect::Generic => {
                w.push("SERIAL NOT NULL");
            }
        }
        return Ok(());
    }

    w.push(type_name(field.field_type, dialect));
    if field.field_type == FieldType::Varchar {
        let length = field.length.ok_or_else(|| SqlError::MissingLength {
            table: table.name.clone(),
            field: field.name.clone(),
        })?;
        w.push(&format!("({length})"));
    }

    let not_null = field.required || table.is_primary_key_field(&field.name);
    if not_null {
        w.push(" NOT NULL");
    }
    match &field.default_value {
        Some(value) if !value.is_null() => {
            w.push(" DEFAULT ").push(&literal(value, dialect));
        }
        _ if !not_null => {
            w.push(" DEFAULT NULL");
        }
        _ => {}
    }
    Ok(())
}

fn write_foreign_key(
    w: &mut SqlWriter,
    table: &TableSchema,
    fk: &ForeignKey,
) -> Result<(), SqlError> {
    if fk.key_pairs.is_empty() {
        return Err(SqlError::EmptyForeignKey {
            table: table.name.clone(),
            parent: fk.parent_table_name.clone(),
        });
    }
    w.push("  FOREIGN KEY (")
        .ident_list(fk.child_table_fields())
        .push(")\n   REFERENCES ")
        .ident(&fk.parent_table_name)
        .push(" (")
        .ident_list(fk.parent_table_fields())
        .push(")\n   ON DELETE ")
        .push(action_keyword(fk.on_delete))
        .push("\n   ON UPDATE ")
        .push(action_keyword(fk.on_update));
    Ok(())
}

/// `CREATE TABLE` statement with primary key and foreign key constraints.
pub fn create_table(table: &TableSchema, dialect: Dialect) -> Result<String, SqlError> {
    require_name(&table.name, "Table")?;
    if table.fields().is_empty() {
        return Err(SqlError::NoFields(table.name.clone()));
    }

    let auto_key = inline_auto_key(table).map(|f| f.name.as_str());
    let mut w = SqlWriter::new(dialect);
    w.push("CREATE ");
    if table.temporary {
        w.push("TEMPORARY ");
    }
    w.push("TABLE ").ident(&table.name).push(" (\n");

    for (i, field) in table.fields().iter().enumerate() {
        if i > 0 {
            w.push(",\n");
        }
        write_field(&mut w, table, field, auto_key == Some(field.name.as_str()))?;
    }

    // SQLite declares the auto-increment key inline
    let key_inline = auto_key.is_some() && dialect == Dialect::Sqlite;
    if !key_inline && !table.primary_key().is_empty() {
        w.push(",\n  PRIMARY KEY (")
            .ident_list(table.primary_key().iter().map(String::as_str))
            .push(")");
    }
    for fk in table.foreign_keys() {
        w.push(",\n");
        write_foreign_key(&mut w, table, fk)?;
    }
    w.push("\n)");

    if dialect == Dialect::MySQL {
        if let Some(encoding) = &table.encoding {
            w.push(" DEFAULT CHARSET=").push(encoding);
        }
    }
    Ok(w.finish())
}

/// Name of the child index created for a foreign key.
pub fn foreign_key_index_name(table: &TableSchema, fk: &ForeignKey) -> String {
    let mut name = table.name.clone();
    for field in fk.child_table_fields() {
        name.push('_');
        name.push_str(field);
    }
    name.push_str("_index");
    name
}

/// `CREATE INDEX` statements for foreign keys flagged with a child index.
pub fn foreign_key_indexes(table: &TableSchema, dialect: Dialect) -> Vec<String> {
    table
        .foreign_keys()
        .iter()
        .filter(|fk| fk.create_child_index && !fk.key_pairs.is_empty())
        .map(|fk| {
            let mut w = SqlWriter::new(dialect);
            w.push("CREATE INDEX ")
                .ident(&foreign_key_index_name(table, fk))
                .push(" ON ")
                .ident(&table.name)
                .push(" (")
                .ident_list(fk.child_table_fields())
                .push(")");
            w.finish()
        })
        .collect()
}

/// All statements creating a table: the table itself, then its indexes.
pub fn table_statements(table: &TableSchema, dialect: Dialect) -> Result<Vec<String>, SqlError> {
    let mut statements = vec![create_table(table, dialect)?];
    statements.extend(foreign_key_indexes(table, dialect));
    Ok(statements)
}

pub fn drop_table(name: &str, dialect: Dialect) -> Result<String, SqlError> {
    drop_object("TABLE", "Table", name, dialect)
}

fn drop_object(
    keyword: &str,
    kind: &'static str,
    name: &str,
    dialect: Dialect,
) -> Result<String, SqlError> {
    require_name(name, kind)?;
    let mut w = SqlWriter::new(dialect);
    w.push("DROP ").push(keyword).push(" IF EXISTS ").ident(name);
    Ok(w.finish())
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

fn write_join(w: &mut SqlWriter, view: &ViewSchema, join: &JoinClause) -> Result<(), SqlError> {
    if join.keys().is_empty() {
        return Err(SqlError::EmptyJoin {
            view: view.name.clone(),
            joined: join.joined_table.table_name.clone(),
        });
    }
    w.push(match join.operator {
        JoinOperator::Join => "\n JOIN ",
        JoinOperator::LeftJoin => "\n LEFT JOIN ",
    });
    w.ident(&join.joined_table.table_name);
    if let Some(alias) = &join.joined_table.alias {
        w.push(" ").ident(alias);
    }

    let main = join.main_table.alias_or_table_name();
    let joined = join.joined_table.alias_or_table_name();
    for key in join.keys() {
        w.push(match key.constraint_operator {
            JoinConstraintOperator::On => "\n  ON ",
            JoinConstraintOperator::And => "\n  AND ",
            JoinConstraintOperator::Or => "\n  OR ",
        });
        w.qualified(main, &key.main_table_field);
        w.push(match key.field_operator {
            JoinFieldOperator::Equal => " = ",
            JoinFieldOperator::LessThan => " < ",
            JoinFieldOperator::GreaterThan => " > ",
        });
        w.qualified(joined, &key.joined_table_field);
    }
    Ok(())
}

pub fn create_view(view: &ViewSchema, dialect: Dialect) -> Result<String, SqlError> {
    require_name(&view.name, "View")?;
    if view.table.table_name.trim().is_empty() {
        return Err(SqlError::MissingBaseTable(view.name.clone()));
    }
    if view.select_items().is_empty() {
        return Err(SqlError::NoSelectFields(view.name.clone()));
    }

    let mut w = SqlWriter::new(dialect);
    w.push("CREATE VIEW ").ident(&view.name).push(" AS\nSELECT");
    match view.select_suffix {
        SelectSuffix::None => {}
        SelectSuffix::All => {
            w.push(" ALL");
        }
        SelectSuffix::Distinct => {
            w.push(" DISTINCT");
        }
    }

    for (i, item) in view.select_items().iter().enumerate() {
        w.push(if i > 0 { ",\n " } else { "\n " });
        match item {
            SelectItem::Field(field) => {
                w.qualified(&field.table, &field.field_name);
                if let Some(alias) = &field.alias {
                    w.push(" AS ").ident(alias);
                }
            }
            SelectItem::Raw(raw) => {
                w.push(raw);
            }
        }
    }

    w.push("\nFROM ").ident(&view.table.table_name);
    if let Some(alias) = &view.table.alias {
        w.push(" ").ident(alias);
    }
    for join in view.join_clauses() {
        write_join(&mut w, view, join)?;
    }
    Ok(w.finish())
}

pub fn drop_view(name: &str, dialect: Dialect) -> Result<String, SqlError> {
    drop_object("VIEW", "View", name, dialect)
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

fn write_insert_head(
    w: &mut SqlWriter,
    population: &TablePopulationSchema,
) -> Result<(), SqlError> {
    require_name(&population.name, "Population")?;
    if population.table_name.trim().is_empty() {
        return Err(SqlError::MissingPopulationTable(population.name.clone()));
    }
    if population.field_names().is_empty() {
        return Err(SqlError::NoPopulationFields(population.name.clone()));
    }
    w.push("INSERT INTO ")
        .ident(&population.table_name)
        .push(" (")
        .ident_list(population.field_names().iter().map(String::as_str))
        .push(") VALUES (");
    Ok(())
}

/// Prepared `INSERT` with one placeholder per field.
pub fn insert(population: &TablePopulationSchema, dialect: Dialect) -> Result<String, SqlError> {
    let mut w = SqlWriter::new(dialect);
    write_insert_head(&mut w, population)?;
    let placeholders = vec!["?"; population.field_names().len()].join(",");
    w.push(&placeholders).push(")");
    Ok(w.finish())
}

/// One `INSERT` per row with the values inlined as literals.
pub fn insert_literals(
    population: &TablePopulationSchema,
    dialect: Dialect,
) -> Result<Vec<String>, SqlError> {
    let expected = population.field_names().len();
    population
        .rows()
        .iter()
        .enumerate()
        .map(|(row, values)| {
            if values.len() != expected {
                return Err(SqlError::PopulationRow {
                    population: population.name.clone(),
                    row,
                    expected,
                    actual: values.len(),
                });
            }
            let mut w = SqlWriter::new(dialect);
            write_insert_head(&mut w, population)?;
            let literals: Vec<String> = values.iter().map(|v: &Value| literal(v, dialect)).collect();
            w.push(&literals.join(",")).push(")");
            Ok(w.finish())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Triggers
// ---------------------------------------------------------------------------

pub fn create_trigger(trigger: &TriggerSchema, dialect: Dialect) -> Result<String, SqlError> {
    require_name(&trigger.name, "Trigger")?;
    if trigger.table_name.trim().is_empty() {
        return Err(SqlError::MissingTriggerTable(trigger.name.clone()));
    }
    let event = match trigger.event {
        TriggerEvent::AfterInsert => "AFTER INSERT",
        TriggerEvent::Unknown => {
            return Err(SqlError::UnknownTriggerEvent(trigger.name.clone()));
        }
    };

    let mut w = SqlWriter::new(dialect);
    w.push("CREATE ");
    if trigger.temporary {
        w.push("TEMPORARY ");
    }
    w.push("TRIGGER ")
        .ident(&trigger.name)
        .push(" ")
        .push(event)
        .push(" ON ")
        .ident(&trigger.table_name)
        .push("\nFOR EACH ROW\nBEGIN\n")
        .push(&trigger.script)
        .push("\nEND");
    Ok(w.finish())
}

pub fn drop_trigger(name: &str, dialect: Dialect) -> Result<String, SqlError> {
    drop_object("TRIGGER", "Trigger", name, dialect)
}
