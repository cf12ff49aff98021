//! Database schema aggregate and foreign key based join inference.

use crate::population::TablePopulationSchema;
use crate::sql::{ddl, Dialect, SqlError};
use crate::table::TableSchema;
use crate::trigger::TriggerSchema;
use crate::view::{JoinClause, Table, ViewSchema};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JoinError {
    #[error("Table '{0}' is not declared in the schema")]
    TableNotFound(String),
    #[error("No foreign key relates '{main}' and '{joined}'")]
    NoRelation { main: String, joined: String },
    #[error("'{main}' and '{joined}' are related by more than one foreign key")]
    Ambiguous { main: String, joined: String },
}

/// Tables, seed data, views and triggers, each kept in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DatabaseSchema {
    tables: Vec<TableSchema>,
    views: Vec<ViewSchema>,
    populations: Vec<TablePopulationSchema>,
    triggers: Vec<TriggerSchema>,
}

impl DatabaseSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_table(&mut self, table: TableSchema) {
        self.tables.push(table);
    }

    pub fn add_view(&mut self, view: ViewSchema) {
        self.views.push(view);
    }

    pub fn add_table_population(&mut self, population: TablePopulationSchema) {
        self.populations.push(population);
    }

    pub fn add_trigger(&mut self, trigger: TriggerSchema) {
        self.triggers.push(trigger);
    }

    pub fn tables(&self) -> &[TableSchema] {
        &self.tables
    }

    pub fn views(&self) -> &[ViewSchema] {
        &self.views
    }

    pub fn table_populations(&self) -> &[TablePopulationSchema] {
        &self.populations
    }

    pub fn triggers(&self) -> &[TriggerSchema] {
        &self.triggers
    }

    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn view(&self, name: &str) -> Option<&ViewSchema> {
        self.views.iter().find(|v| v.name == name)
    }

    /// Number of objects a creation run goes through.
    pub fn object_count(&self) -> usize {
        self.tables.len() + self.populations.len() + self.views.len() + self.triggers.len()
    }

    /// Build the join of `to_join` onto `main` from the foreign key between them.
    ///
    /// A foreign key held by `to_join` (pointing at `main`) is preferred over
    /// one held by `main`. Keys keep their declaration order; the first one is
    /// `ON`, the rest `AND`. The result is an inner join.
    pub fn join_clause(&self, main: &Table, to_join: &Table) -> Result<JoinClause, JoinError> {
        let main_schema = self
            .table(&main.table_name)
            .ok_or_else(|| JoinError::TableNotFound(main.table_name.clone()))?;
        let join_schema = self
            .table(&to_join.table_name)
            .ok_or_else(|| JoinError::TableNotFound(to_join.table_name.clone()))?;

        let ambiguous = || JoinError::Ambiguous {
            main: main.table_name.clone(),
            joined: to_join.table_name.clone(),
        };
        let mut join = JoinClause::new(main.clone(), to_join.clone());

        let forward: Vec<_> = join_schema
            .foreign_keys_referencing(&main.table_name)
            .collect();
        if !forward.is_empty() {
            let [fk] = forward.as_slice() else {
                return Err(ambiguous());
            };
            for (parent_field, child_field) in &fk.key_pairs {
                join.add_key_fields(parent_field.as_str(), child_field.as_str());
            }
        } else {
            let reverse: Vec<_> = main_schema
                .foreign_keys_referencing(&to_join.table_name)
                .collect();
            match reverse.as_slice() {
                [] => {}
                [fk] => {
                    for (parent_field, child_field) in &fk.key_pairs {
                        join.add_key_fields(child_field.as_str(), parent_field.as_str());
                    }
                }
                _ => return Err(ambiguous()),
            }
        }

        if join.keys().is_empty() {
            return Err(JoinError::NoRelation {
                main: main.table_name.clone(),
                joined: to_join.table_name.clone(),
            });
        }
        Ok(join)
    }

    /// The whole schema as one SQL script, in creation order.
    ///
    /// Seed rows are inlined as literal `INSERT` statements.
    pub fn sql_script(&self, dialect: Dialect) -> Result<String, SqlError> {
        let mut statements = Vec::new();
        for table in &self.tables {
            statements.extend(table.sql_for_create(dialect)?);
        }
        for population in &self.populations {
            statements.extend(ddl::insert_literals(population, dialect)?);
        }
        for view in &self.views {
            statements.push(view.sql_for_create(dialect)?);
        }
        for trigger in &self.triggers {
            statements.push(trigger.sql_for_create(dialect)?);
        }

        let mut script = String::new();
        for statement in statements {
            script.push_str(&statement);
            script.push_str(";\n\n");
        }
        Ok(script)
    }
}
