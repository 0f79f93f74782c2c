//! Marshaled values
//!
//! Native results cross into the scripting runtime through a deliberately
//! narrow boundary: integer, float, text, or no value at all. A runtime
//! implements [`ValueSink`] once and every reply converts through it.

use heapless::String;

/// Maximum length of a text value in bytes
pub const MAX_TEXT_LEN: usize = 64;

/// A value produced by an entry point
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String<MAX_TEXT_LEN>),
}

impl Value {
    /// Build a text value, truncating at a character boundary if `s`
    /// does not fit in [`MAX_TEXT_LEN`] bytes
    pub fn text(s: &str) -> Self {
        let mut text = String::new();
        for c in s.chars() {
            if text.push(c).is_err() {
                break;
            }
        }
        Value::Text(text)
    }

    /// Integer payload, if this is an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Float payload, if this is a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Text payload, if this is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Result of a successful call
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply {
    /// The call produces no value (the runtime returns its unit/self)
    Unit,
    /// The call produced a value
    Value(Value),
}

impl Reply {
    /// Convert this reply into the runtime's representation
    pub fn marshal<S: ValueSink>(self, sink: S) -> S::Output {
        match self {
            Reply::Unit => sink.unit(),
            Reply::Value(Value::Integer(i)) => sink.integer(i),
            Reply::Value(Value::Float(f)) => sink.float(f),
            Reply::Value(Value::Text(s)) => sink.text(&s),
        }
    }

    /// The carried value, if any
    pub fn value(&self) -> Option<&Value> {
        match self {
            Reply::Unit => None,
            Reply::Value(v) => Some(v),
        }
    }
}

impl From<Value> for Reply {
    fn from(value: Value) -> Self {
        Reply::Value(value)
    }
}

/// Conversion target for replies
///
/// Implemented by the scripting runtime. Each method builds the runtime's
/// value for one case; the set of cases is closed.
pub trait ValueSink {
    /// The runtime's value type (or whatever the sink produces)
    type Output;

    /// No value
    fn unit(self) -> Self::Output;

    /// Integer value
    fn integer(self, value: i64) -> Self::Output;

    /// Double-precision float value
    fn float(self, value: f64) -> Self::Output;

    /// Text value; the sink copies it into runtime-owned storage
    fn text(self, value: &str) -> Self::Output;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::String as StdString;

    /// Sink that renders values the way a REPL would
    struct Inspect;

    impl ValueSink for Inspect {
        type Output = StdString;

        fn unit(self) -> StdString {
            "nil".into()
        }

        fn integer(self, value: i64) -> StdString {
            format!("{}", value)
        }

        fn float(self, value: f64) -> StdString {
            format!("{:?}", value)
        }

        fn text(self, value: &str) -> StdString {
            format!("{:?}", value)
        }
    }

    #[test]
    fn test_marshal_each_case() {
        assert_eq!(Reply::Unit.marshal(Inspect), "nil");
        assert_eq!(Reply::Value(Value::Integer(-7)).marshal(Inspect), "-7");
        assert_eq!(Reply::Value(Value::Float(1.5)).marshal(Inspect), "1.5");
        assert_eq!(Reply::Value(Value::text("v5.1")).marshal(Inspect), "\"v5.1\"");
    }

    #[test]
    fn test_text_truncates_on_char_boundary() {
        let long = "é".repeat(MAX_TEXT_LEN);
        let value = Value::text(&long);
        let text = value.as_text().unwrap();
        assert!(text.len() <= MAX_TEXT_LEN);
        assert_eq!(text.chars().count(), MAX_TEXT_LEN / 2);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Integer(3).as_integer(), Some(3));
        assert_eq!(Value::Integer(3).as_float(), None);
        assert_eq!(Value::Float(2.0).as_float(), Some(2.0));
        assert_eq!(Reply::Unit.value(), None);
    }
}
