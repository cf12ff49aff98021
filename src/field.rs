//! Table field definitions and SQL values.

/// Abstract field type, mapped to a concrete SQL type per dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Boolean,
    Integer,
    Float,
    Double,
    Varchar,
    Date,
    Time,
    DateTime,
}

/// A SQL value used for field defaults and seed rows.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Double(f64),
    Boolean(bool),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// A named, typed column of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub field_type: FieldType,
    /// Only meaningful for `Varchar`, where it is mandatory.
    pub length: Option<u32>,
    pub required: bool,
    pub auto_value: bool,
    pub default_value: Option<Value>,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            length: None,
            required: false,
            auto_value: false,
            default_value: None,
        }
    }

    /// Shorthand for a `Varchar` field of the given length.
    pub fn varchar(name: impl Into<String>, length: u32) -> Self {
        Self::new(name, FieldType::Varchar).with_length(length)
    }

    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn auto_value(mut self) -> Self {
        self.auto_value = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_builder() {
        let field = Field::varchar("Unit", 10).required().with_default("pce");
        assert_eq!(field.name, "Unit");
        assert_eq!(field.field_type, FieldType::Varchar);
        assert_eq!(field.length, Some(10));
        assert!(field.required);
        assert!(!field.auto_value);
        assert_eq!(field.default_value, Some(Value::Text("pce".to_string())));
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from(3), Value::Integer(3));
        assert_eq!(Value::from(0.5), Value::Double(0.5));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert!(Value::from(None::<&str>).is_null());
        assert_eq!(Value::from(Some("x")), Value::Text("x".to_string()));
    }
}
