//! View definitions: table references, select items and join clauses.

use crate::sql::{ddl, Dialect, SqlError};

/// A table referenced by a view, optionally under an alias.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    pub table_name: String,
    pub alias: Option<String>,
}

impl Table {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            alias: None,
        }
    }

    pub fn with_alias(table_name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            alias: Some(alias.into()),
        }
    }

    /// Name used to qualify fields of this table inside a statement.
    pub fn alias_or_table_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.table_name)
    }
}

/// A field projected by a view.
///
/// `table` is the qualifier (alias or table name), filled in by
/// [`ViewSchema::add_select_field`]. `field_name` may be `*`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectField {
    pub table: String,
    pub field_name: String,
    pub alias: Option<String>,
}

impl SelectField {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            ..Self::default()
        }
    }

    pub fn with_alias(field_name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            alias: Some(alias.into()),
            ..Self::default()
        }
    }

    pub fn wildcard() -> Self {
        Self::new("*")
    }
}

/// One entry of a SELECT list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectItem {
    Field(SelectField),
    /// Emitted verbatim, never escaped.
    Raw(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinConstraintOperator {
    #[default]
    On,
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinFieldOperator {
    #[default]
    Equal,
    LessThan,
    GreaterThan,
}

/// One comparison of a join condition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JoinKey {
    pub main_table_field: String,
    pub joined_table_field: String,
    pub constraint_operator: JoinConstraintOperator,
    pub field_operator: JoinFieldOperator,
}

impl JoinKey {
    pub fn new(
        main_table_field: impl Into<String>,
        joined_table_field: impl Into<String>,
        constraint_operator: JoinConstraintOperator,
    ) -> Self {
        Self {
            main_table_field: main_table_field.into(),
            joined_table_field: joined_table_field.into(),
            constraint_operator,
            field_operator: JoinFieldOperator::Equal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinOperator {
    #[default]
    Join,
    LeftJoin,
}

/// `JOIN joined_table ON main.x = joined.y AND ...`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JoinClause {
    pub operator: JoinOperator,
    pub main_table: Table,
    pub joined_table: Table,
    keys: Vec<JoinKey>,
}

impl JoinClause {
    pub fn new(main_table: Table, joined_table: Table) -> Self {
        Self {
            operator: JoinOperator::Join,
            main_table,
            joined_table,
            keys: Vec::new(),
        }
    }

    pub fn add_key(&mut self, key: JoinKey) {
        self.keys.push(key);
    }

    /// Append an equality key; the first one opens with `ON`, later ones use `AND`.
    pub fn add_key_fields(
        &mut self,
        main_table_field: impl Into<String>,
        joined_table_field: impl Into<String>,
    ) {
        let op = if self.keys.is_empty() {
            JoinConstraintOperator::On
        } else {
            JoinConstraintOperator::And
        };
        self.keys
            .push(JoinKey::new(main_table_field, joined_table_field, op));
    }

    pub fn set_operator(&mut self, operator: JoinOperator) {
        self.operator = operator;
    }

    pub fn left_join(mut self) -> Self {
        self.operator = JoinOperator::LeftJoin;
        self
    }

    pub fn keys(&self) -> &[JoinKey] {
        &self.keys
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectSuffix {
    #[default]
    None,
    All,
    Distinct,
}

/// A named view: base table, ordered select list and join clauses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewSchema {
    pub name: String,
    pub table: Table,
    pub select_suffix: SelectSuffix,
    items: Vec<SelectItem>,
    join_clauses: Vec<JoinClause>,
}

impl ViewSchema {
    pub fn new(name: impl Into<String>, table: Table) -> Self {
        Self {
            name: name.into(),
            table,
            ..Self::default()
        }
    }

    /// Add a field qualified by `table`'s alias, or its name when unaliased.
    pub fn add_select_field(&mut self, table: &Table, mut field: SelectField) {
        field.table = table.alias_or_table_name().to_string();
        self.items.push(SelectItem::Field(field));
    }

    pub fn add_select_fields<'a>(
        &mut self,
        table: &Table,
        field_names: impl IntoIterator<Item = &'a str>,
    ) {
        for name in field_names {
            self.add_select_field(table, SelectField::new(name));
        }
    }

    /// Add a raw select expression, emitted as-is.
    pub fn add_select_item(&mut self, item: impl Into<String>) {
        self.items.push(SelectItem::Raw(item.into()));
    }

    pub fn set_select_suffix(&mut self, suffix: SelectSuffix) {
        self.select_suffix = suffix;
    }

    pub fn add_join_clause(&mut self, join: JoinClause) {
        self.join_clauses.push(join);
    }

    pub fn select_items(&self) -> &[SelectItem] {
        &self.items
    }

    pub fn join_clauses(&self) -> &[JoinClause] {
        &self.join_clauses
    }

    pub fn sql_for_create(&self, dialect: Dialect) -> Result<String, SqlError> {
        ddl::create_view(self, dialect)
    }

    pub fn sql_for_drop(&self, dialect: Dialect) -> Result<String, SqlError> {
        ddl::drop_view(&self.name, dialect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_address_view() -> ViewSchema {
        let client = Table::with_alias("Client_tbl", "A");
        let address = Table::with_alias("Address_tbl", "B");
        let mut view = ViewSchema::new("Client_address_view", client.clone());
        view.add_select_field(&client, SelectField::new("Id_PK"));
        view.add_select_field(&client, SelectField::with_alias("Name", "ClientName"));
        view.add_select_field(&address, SelectField::new("Street"));
        let mut join = JoinClause::new(client, address);
        join.add_key_fields("Id_PK", "Client_Id_FK");
        view.add_join_clause(join);
        view
    }

    #[test]
    fn test_alias_or_table_name() {
        assert_eq!(Table::new("Unit_tbl").alias_or_table_name(), "Unit_tbl");
        assert_eq!(Table::with_alias("Unit_tbl", "U").alias_or_table_name(), "U");
    }

    #[test]
    fn test_select_field_uses_alias() {
        let view = client_address_view();
        match &view.select_items()[1] {
            SelectItem::Field(f) => {
                assert_eq!(f.table, "A");
                assert_eq!(f.alias.as_deref(), Some("ClientName"));
            }
            other => panic!("unexpected item {:?}", other),
        }
    }

    #[test]
    fn test_join_key_operators() {
        let mut join = JoinClause::new(Table::new("A"), Table::new("B"));
        join.add_key_fields("x", "y");
        join.add_key_fields("z", "w");
        assert_eq!(join.keys()[0].constraint_operator, JoinConstraintOperator::On);
        assert_eq!(join.keys()[1].constraint_operator, JoinConstraintOperator::And);
        assert_eq!(join.operator, JoinOperator::Join);
        assert_eq!(join.left_join().operator, JoinOperator::LeftJoin);
    }

    #[test]
    fn test_sql_for_create() {
        let sql = client_address_view().sql_for_create(Dialect::Sqlite).unwrap();
        assert_eq!(
            sql,
            "CREATE VIEW \"Client_address_view\" AS\n\
             SELECT\n \"A\".\"Id_PK\",\n \"A\".\"Name\" AS \"ClientName\",\n \"B\".\"Street\"\n\
             FROM \"Client_tbl\" \"A\"\n \
             JOIN \"Address_tbl\" \"B\"\n  ON \"A\".\"Id_PK\" = \"B\".\"Client_Id_FK\""
        );
    }

    #[test]
    fn test_sql_for_drop() {
        let sql = client_address_view().sql_for_drop(Dialect::Sqlite).unwrap();
        assert_eq!(sql, "DROP VIEW IF EXISTS \"Client_address_view\"");
    }

    #[test]
    fn test_distinct_raw_and_wildcard() {
        let unit = Table::with_alias("Unit_tbl", "U");
        let mut view = ViewSchema::new("Units_view", unit.clone());
        view.set_select_suffix(SelectSuffix::Distinct);
        view.add_select_field(&unit, SelectField::wildcard());
        view.add_select_item("1 AS One");
        let sql = view.sql_for_create(Dialect::Sqlite).unwrap();
        assert_eq!(
            sql,
            "CREATE VIEW \"Units_view\" AS\nSELECT DISTINCT\n \"U\".*,\n 1 AS One\nFROM \"Unit_tbl\" \"U\""
        );
    }

    #[test]
    fn test_view_without_fields_is_rejected() {
        let view = ViewSchema::new("Empty_view", Table::new("Unit_tbl"));
        assert_eq!(
            view.sql_for_create(Dialect::Sqlite),
            Err(SqlError::NoSelectFields("Empty_view".to_string()))
        );
    }
}
