use serde_json::Value as JsonValue;

/// A value bound positionally to one `?` placeholder.
///
/// Only flat JSON scalars are representable; arrays and objects have no
/// column counterpart and are rejected during mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl BindValue {
    /// Convert a JSON scalar. Returns `None` for arrays and objects.
    pub fn from_json(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::Null => Some(Self::Null),
            JsonValue::Bool(b) => Some(Self::Bool(*b)),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Some(Self::Int(i)),
                // u64 beyond i64::MAX and fractional numbers
                None => n.as_f64().map(Self::Float),
            },
            JsonValue::String(s) => Some(Self::Text(s.clone())),
            JsonValue::Array(_) | JsonValue::Object(_) => None,
        }
    }
}

impl From<&str> for BindValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}
