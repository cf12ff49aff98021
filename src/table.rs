//! Table schema and foreign keys.

use crate::field::Field;
use crate::sql::{ddl, Dialect, SqlError};

/// Referential action applied on delete/update of the parent row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForeignKeyAction {
    #[default]
    NoAction,
    Restrict,
    SetNull,
    Cascade,
}

/// Foreign key from a child table to a parent table.
///
/// Key pairs are `(parent_field, child_field)` in declaration order.
/// Nothing is checked against the declared tables.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForeignKey {
    pub parent_table_name: String,
    pub key_pairs: Vec<(String, String)>,
    pub on_delete: ForeignKeyAction,
    pub on_update: ForeignKeyAction,
    pub create_child_index: bool,
}

impl ForeignKey {
    pub fn new(parent_table_name: impl Into<String>) -> Self {
        Self {
            parent_table_name: parent_table_name.into(),
            ..Self::default()
        }
    }

    pub fn add_key_fields(
        mut self,
        parent_field: impl Into<String>,
        child_field: impl Into<String>,
    ) -> Self {
        self.key_pairs.push((parent_field.into(), child_field.into()));
        self
    }

    pub fn with_on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.on_delete = action;
        self
    }

    pub fn with_on_update(mut self, action: ForeignKeyAction) -> Self {
        self.on_update = action;
        self
    }

    pub fn with_child_index(mut self) -> Self {
        self.create_child_index = true;
        self
    }

    pub fn parent_table_fields(&self) -> impl Iterator<Item = &str> {
        self.key_pairs.iter().map(|(p, _)| p.as_str())
    }

    pub fn child_table_fields(&self) -> impl Iterator<Item = &str> {
        self.key_pairs.iter().map(|(_, c)| c.as_str())
    }
}

/// A table definition: ordered fields, primary key and foreign keys.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableSchema {
    pub name: String,
    /// Character set hint, only rendered by dialects that support it.
    pub encoding: Option<String>,
    pub temporary: bool,
    fields: Vec<Field>,
    primary_key: Vec<String>,
    foreign_keys: Vec<ForeignKey>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    pub fn set_temporary(&mut self, temporary: bool) {
        self.temporary = temporary;
    }

    /// Append a field, optionally making it part of the primary key.
    pub fn add_field(&mut self, field: Field, is_part_of_pk: bool) {
        if is_part_of_pk {
            self.primary_key.push(field.name.clone());
        }
        self.fields.push(field);
    }

    pub fn add_foreign_key(&mut self, fk: ForeignKey) {
        self.foreign_keys.push(fk);
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn primary_key(&self) -> &[String] {
        &self.primary_key
    }

    pub fn is_primary_key_field(&self, name: &str) -> bool {
        self.primary_key.iter().any(|pk| pk == name)
    }

    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }

    /// First foreign key whose parent is `parent_table_name`.
    pub fn foreign_key_referencing(&self, parent_table_name: &str) -> Option<&ForeignKey> {
        self.foreign_keys
            .iter()
            .find(|fk| fk.parent_table_name == parent_table_name)
    }

    pub fn foreign_keys_referencing<'a, 'b>(
        &'a self,
        parent_table_name: &'b str,
    ) -> impl Iterator<Item = &'a ForeignKey> + use<'a, 'b> {
        self.foreign_keys
            .iter()
            .filter(move |fk| fk.parent_table_name == parent_table_name)
    }

    /// `CREATE TABLE` followed by the foreign key child indexes.
    pub fn sql_for_create(&self, dialect: Dialect) -> Result<Vec<String>, SqlError> {
        ddl::table_statements(self, dialect)
    }

    pub fn sql_for_drop(&self, dialect: Dialect) -> Result<String, SqlError> {
        ddl::drop_table(&self.name, dialect)
    }
}
