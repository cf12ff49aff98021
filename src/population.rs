//! Seed data sets: rows staged one at a time, then committed.

use crate::field::Value;
use crate::sql::{ddl, Dialect, SqlError};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PopulationError {
    #[error("Row of population '{population}' has {actual} values, expected {expected}")]
    RowLength {
        population: String,
        expected: usize,
        actual: usize,
    },
}

/// Values of the row currently being staged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowBuffer(Vec<Value>);

impl RowBuffer {
    pub fn add(&mut self, value: impl Into<Value>) -> &mut Self {
        self.0.push(value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }
}

/// Named set of rows to insert into one table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TablePopulationSchema {
    pub name: String,
    pub table_name: String,
    field_names: Vec<String>,
    rows: Vec<Vec<Value>>,
    current: RowBuffer,
}

impl TablePopulationSchema {
    pub fn new(name: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table_name: table_name.into(),
            ..Self::default()
        }
    }

    pub fn add_field_name(&mut self, name: impl Into<String>) {
        self.field_names.push(name.into());
    }

    pub fn add_field_names<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        self.field_names.extend(names.into_iter().map(str::to_string));
    }

    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    /// Staging buffer for the next row.
    pub fn current_row_data(&mut self) -> &mut RowBuffer {
        &mut self.current
    }

    /// Move the staged row into the data set.
    ///
    /// The staging buffer is empty afterwards whether or not the commit
    /// succeeded; a rejected row is discarded.
    pub fn commit_current_row_data(&mut self) -> Result<(), PopulationError> {
        let row = std::mem::take(&mut self.current).0;
        if row.len() != self.field_names.len() {
            return Err(PopulationError::RowLength {
                population: self.name.clone(),
                expected: self.field_names.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row_data(&self, index: usize) -> Option<&[Value]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Parameterized INSERT with one `?` per field.
    pub fn sql_for_insert(&self, dialect: Dialect) -> Result<String, SqlError> {
        ddl::insert(self, dialect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_population() -> TablePopulationSchema {
        let mut pop = TablePopulationSchema::new("Client_tbl data", "Client_tbl");
        pop.add_field_names(["Code", "Name"]);
        pop
    }

    #[test]
    fn test_commit_rows() {
        let mut pop = client_population();
        pop.current_row_data().add("A").add("Alpha");
        pop.commit_current_row_data().unwrap();
        pop.current_row_data().add("B").add(None::<&str>);
        pop.commit_current_row_data().unwrap();

        assert_eq!(pop.row_count(), 2);
        assert_eq!(
            pop.row_data(0),
            Some(&[Value::from("A"), Value::from("Alpha")][..])
        );
        assert_eq!(pop.row_data(1).map(|r| r[1].clone()), Some(Value::Null));
        assert!(pop.current_row_data().is_empty());
    }

    #[test]
    fn test_commit_wrong_length_discards_row() {
        let mut pop = client_population();
        pop.current_row_data().add("A");
        let err = pop.commit_current_row_data().unwrap_err();
        assert_eq!(
            err,
            PopulationError::RowLength {
                population: "Client_tbl data".to_string(),
                expected: 2,
                actual: 1,
            }
        );
        assert_eq!(pop.row_count(), 0);
        assert!(pop.current_row_data().is_empty());

        pop.current_row_data().add("A").add("Alpha");
        pop.commit_current_row_data().unwrap();
        assert_eq!(pop.row_count(), 1);
    }

    #[test]
    fn test_sql_for_insert() {
        let sql = client_population().sql_for_insert(Dialect::Sqlite).unwrap();
        assert_eq!(sql, "INSERT INTO \"Client_tbl\" (\"Code\",\"Name\") VALUES (?,?)");
    }

    #[test]
    fn test_insert_without_fields_is_rejected() {
        let pop = TablePopulationSchema::new("Empty data", "Client_tbl");
        assert_eq!(
            pop.sql_for_insert(Dialect::Sqlite),
            Err(SqlError::NoPopulationFields("Empty data".to_string()))
        );
    }
}
