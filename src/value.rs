//! Values a user command can hold.
//!
//! Configuration values are scalars (booleans, integers, floats, strings),
//! sequences of values, or `None`. The config text literals for each variant
//! are handled in [`crate::config::parser`].

use serde::{Deserialize, Serialize};

/// Possible values of a configuration keyword.
///
/// # Examples
///
/// ```
/// use simmetis::Value;
///
/// let exptime = Value::from(60);
/// let filter = Value::from("TC_filter_L.dat");
/// let chip = Value::from(vec![2048, 2048]);
///
/// assert!(exptime.is_int());
/// assert!(filter.is_string());
/// assert_eq!(chip.as_list().map(<[Value]>::len), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Null,
}

impl Value {
    pub const fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    pub const fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }

    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float(_))
    }

    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    /// Returns a human-readable type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Null => "null",
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

/// Formats the value as a config text literal.
///
/// The output parses back to an equal value, except for `NaN` floats which
/// never compare equal.
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Int(v) => write!(f, "{v}"),
            // Debug keeps the decimal point so `1.0` does not read back as an int.
            Self::Float(v) => write!(f, "{v:?}"),
            Self::String(v) => f.write_str(&crate::config::parser::quote_if_needed(v)),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Null => f.write_str("None"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<&std::path::Path> for Value {
    fn from(v: &std::path::Path) -> Self {
        Self::String(v.to_string_lossy().into_owned())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_bool() {
        let val = Value::Bool(true);
        assert!(val.is_bool());
        assert_eq!(val.as_bool(), Some(true));
        assert_eq!(val.type_name(), "bool");
    }

    #[test]
    fn test_value_int() {
        let val = Value::Int(42);
        assert!(val.is_int());
        assert_eq!(val.as_int(), Some(42));
        assert_eq!(val.as_float(), Some(42.0)); // Int can be read as float
        assert_eq!(val.type_name(), "int");
    }

    #[test]
    fn test_value_float() {
        let val = Value::Float(0.6);
        assert!(val.is_float());
        assert!((val.as_float().unwrap() - 0.6).abs() < f64::EPSILON);
        assert!(val.as_int().is_none());
        assert_eq!(val.type_name(), "float");
    }

    #[test]
    fn test_value_string() {
        let val = Value::from("PSF_SCAO_L.fits");
        assert!(val.is_string());
        assert_eq!(val.as_str(), Some("PSF_SCAO_L.fits"));
        assert_eq!(val.type_name(), "string");
    }

    #[test]
    fn test_value_list() {
        let val = Value::from(vec![3.4, 3.6, 3.8]);
        assert!(val.is_list());
        assert_eq!(val.as_list().unwrap().len(), 3);
        assert_eq!(val.type_name(), "list");
    }

    #[test]
    fn test_value_null_and_option() {
        assert!(Value::default().is_null());
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(3)), Value::Int(3));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Bool(true).to_string(), "True");
        assert_eq!(Value::Bool(false).to_string(), "False");
        assert_eq!(Value::Int(-190).to_string(), "-190");
        assert_eq!(Value::Float(1.0).to_string(), "1.0");
        assert_eq!(Value::Float(1e-9).to_string(), "1e-9");
        assert_eq!(Value::Float(f64::INFINITY).to_string(), "inf");
        assert_eq!(Value::Float(f64::NEG_INFINITY).to_string(), "-inf");
        assert_eq!(Value::Float(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::Null.to_string(), "None");
        assert_eq!(Value::from("linear").to_string(), "linear");
        assert_eq!(
            Value::from(vec![2048, 2048]).to_string(),
            "[2048, 2048]"
        );
    }

    #[test]
    fn test_value_display_quotes_ambiguous_strings() {
        assert_eq!(Value::from("60").to_string(), "'60'");
        assert_eq!(Value::from("None").to_string(), "'None'");
        assert_eq!(Value::from("").to_string(), "''");
        assert_eq!(Value::from("inf").to_string(), "'inf'");
        assert_eq!(Value::from("a\nb").to_string(), "\"a\\nb\"");
    }

    #[test]
    fn test_value_serialization() {
        let val = Value::from(vec![Value::Int(1), Value::from("a")]);
        let json = serde_json::to_string(&val).unwrap();
        assert!(json.contains("\"type\":\"list\""));
        let deserialized: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(val, deserialized);
    }

    #[test]
    fn test_value_type_mismatch() {
        let val = Value::Bool(true);
        assert!(val.as_int().is_none());
        assert!(val.as_float().is_none());
        assert!(val.as_str().is_none());
        assert!(val.as_list().is_none());
    }
}
