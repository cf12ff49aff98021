//! Statement builder that owns identifier escaping.

use super::Dialect;

/// Accumulates SQL text for one statement.
///
/// Every table, field, alias and object name goes through [`SqlWriter::ident`];
/// only keywords and verbatim fragments are appended as-is.
pub struct SqlWriter {
    dialect: Dialect,
    buf: String,
}

impl SqlWriter {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            buf: String::new(),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Append raw SQL text.
    pub fn push(&mut self, sql: &str) -> &mut Self {
        self.buf.push_str(sql);
        self
    }

    /// Append a quoted identifier.
    pub fn ident(&mut self, name: &str) -> &mut Self {
        let quoted = self.dialect.quote_identifier(name);
        self.buf.push_str(&quoted);
        self
    }

    /// Append `"table"."field"`, or `"table".*` for the wildcard.
    pub fn qualified(&mut self, table: &str, field: &str) -> &mut Self {
        self.ident(table).push(".");
        if field == "*" {
            self.push("*")
        } else {
            self.ident(field)
        }
    }

    /// Append a comma separated list of quoted identifiers.
    pub fn ident_list<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) -> &mut Self {
        for (i, name) in names.into_iter().enumerate() {
            if i > 0 {
                self.push(",");
            }
            self.ident(name);
        }
        self
    }

    pub fn finish(self) -> String {
        self.buf
    }
}
