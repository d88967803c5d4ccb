//! Dynamic values exchanged between controls, items and editors.
//!
//! A property sheet displays values of arbitrary types and validators inspect
//! whatever a control currently holds, so both sides speak [`Value`], a small
//! closed set of variants, and dispatch on its [`TypeTag`].

use std::fmt;

use crate::error::CoreError;

/// An RGBA color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    /// Create an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color with an explicit alpha channel.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Identifies the kind of value an item or control carries.
///
/// Editor factories are keyed by this tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeTag {
    Text,
    Integer,
    Float,
    Boolean,
    Color,
    List,
    /// An application-defined type, identified by name.
    Custom(String),
}

impl TypeTag {
    /// Create a custom type tag.
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }

    /// The tag's display name.
    pub fn name(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Color => "color",
            Self::List => "list",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// No value (an unset field, or a selection control with nothing selected).
    #[default]
    None,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Color(Color),
    List(Vec<Value>),
}

impl Value {
    /// Returns `true` for `None`, empty text and empty lists.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::None => true,
            Value::Text(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Returns `true` if this is `Value::None`.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// The type tag matching this value's variant.
    ///
    /// `None` has no intrinsic type and reports [`TypeTag::Text`].
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::None | Value::Text(_) => TypeTag::Text,
            Value::Int(_) => TypeTag::Integer,
            Value::Float(_) => TypeTag::Float,
            Value::Bool(_) => TypeTag::Boolean,
            Value::Color(_) => TypeTag::Color,
            Value::List(_) => TypeTag::List,
        }
    }

    fn variant_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Text(_) => "text",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::Color(_) => "color",
            Value::List(_) => "list",
        }
    }

    /// Borrow the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer. Floats are truncated.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Float(n) => Some(*n as i64),
            _ => None,
        }
    }

    /// Get the value as a float. Integers are widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Get the value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the value as a color.
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Value::Color(c) => Some(*c),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => Ok(()),
            Value::Text(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Color(c) => write!(f, "{c}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Color> for Value {
    fn from(value: Color) -> Self {
        Value::Color(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::None, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}

macro_rules! impl_try_from_value {
    ($ty:ty, $expected:literal, $accessor:ident) => {
        impl TryFrom<Value> for $ty {
            type Error = CoreError;

            fn try_from(value: Value) -> Result<Self, Self::Error> {
                value.$accessor().ok_or(CoreError::TypeMismatch {
                    expected: $expected,
                    got: value.variant_name(),
                })
            }
        }
    };
}

impl_try_from_value!(i64, "integer", as_int);
impl_try_from_value!(f64, "float", as_float);
impl_try_from_value!(bool, "boolean", as_bool);
impl_try_from_value!(Color, "color", as_color);

impl TryFrom<Value> for String {
    type Error = CoreError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(CoreError::TypeMismatch {
                expected: "text",
                got: other.variant_name(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_emptiness() {
        assert!(Value::None.is_empty());
        assert!(Value::from("").is_empty());
        assert!(Value::List(Vec::new()).is_empty());

        assert!(!Value::from("x").is_empty());
        assert!(!Value::from(0).is_empty());
        assert!(!Value::from(false).is_empty());
        assert!(!Value::from(vec![1]).is_empty());
    }

    #[test]
    fn test_value_type_tags() {
        assert_eq!(Value::from("a").type_tag(), TypeTag::Text);
        assert_eq!(Value::from(1).type_tag(), TypeTag::Integer);
        assert_eq!(Value::from(1.5).type_tag(), TypeTag::Float);
        assert_eq!(Value::from(true).type_tag(), TypeTag::Boolean);
        assert_eq!(Value::from(Color::RED).type_tag(), TypeTag::Color);
        assert_eq!(TypeTag::custom("font").name(), "font");
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::None.to_string(), "");
        assert_eq!(Value::from(25).to_string(), "25");
        assert_eq!(Value::from(Color::RED).to_string(), "#FF0000");
        assert_eq!(Value::from(vec!["a", "b"]).to_string(), "[a, b]");
        assert_eq!(Color::rgba(0, 0, 0, 16).to_string(), "#00000010");
    }

    #[test]
    fn test_try_from_value() {
        assert_eq!(i64::try_from(Value::from(25)), Ok(25));
        assert_eq!(f64::try_from(Value::from(2)), Ok(2.0));
        assert_eq!(String::try_from(Value::from("x")), Ok("x".to_string()));
        assert_eq!(
            bool::try_from(Value::from("yes")),
            Err(CoreError::TypeMismatch {
                expected: "boolean",
                got: "text"
            })
        );
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i32>), Value::None);
        assert_eq!(Value::from(Some("Item A")), Value::from("Item A"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_value_serde() {
        let value = Value::from(Color::BLUE);
        let json = serde_json::to_string(&value).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
