//! SQL dialect selection and identifier quoting.

/// SQL dialect variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// SQLite, the default store of the cable list
    #[default]
    Sqlite,
    /// Standard SQL
    Generic,
    /// PostgreSQL
    PostgreSQL,
    /// MySQL / MariaDB
    MySQL,
}

impl Dialect {
    /// Parse dialect from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sqlite" | "sqlite3" => Some(Self::Sqlite),
            "generic" => Some(Self::Generic),
            "postgres" | "postgresql" => Some(Self::PostgreSQL),
            "mysql" | "mariadb" => Some(Self::MySQL),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Generic => "generic",
            Self::PostgreSQL => "postgresql",
            Self::MySQL => "mysql",
        }
    }

    fn quote_char(self) -> char {
        match self {
            Self::MySQL => '`',
            _ => '"',
        }
    }

    /// Quote an identifier, doubling any embedded quote character.
    pub fn quote_identifier(self, ident: &str) -> String {
        let q = self.quote_char();
        let mut out = String::with_capacity(ident.len() + 2);
        out.push(q);
        for c in ident.chars() {
            if c == q {
                out.push(q);
            }
            out.push(c);
        }
        out.push(q);
        out
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(Dialect::from_str("SQLite"), Some(Dialect::Sqlite));
        assert_eq!(Dialect::from_str("postgres"), Some(Dialect::PostgreSQL));
        assert_eq!(Dialect::from_str("mariadb"), Some(Dialect::MySQL));
        assert_eq!(Dialect::from_str("oracle"), None);
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(Dialect::Sqlite.quote_identifier("Unit_tbl"), "\"Unit_tbl\"");
        assert_eq!(Dialect::Sqlite.quote_identifier("a\"b"), "\"a\"\"b\"");
        assert_eq!(Dialect::MySQL.quote_identifier("Unit_tbl"), "`Unit_tbl`");
        assert_eq!(Dialect::MySQL.quote_identifier("a`b"), "`a``b`");
    }
}
