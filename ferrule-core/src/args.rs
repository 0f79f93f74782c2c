//! Arguments as seen from the calling convention
//!
//! The scripting runtime converts its own values into [`Argument`] before
//! calling into the bridge. Only integers are accepted by the current entry
//! points; the other kinds exist so that type errors can name what was
//! actually passed.

/// A single argument passed by the scripting runtime
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Argument<'a> {
    Nil,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(&'a str),
}

impl Argument<'_> {
    /// Kind of this argument
    pub fn kind(&self) -> ArgKind {
        match self {
            Argument::Nil => ArgKind::Nil,
            Argument::Boolean(_) => ArgKind::Boolean,
            Argument::Integer(_) => ArgKind::Integer,
            Argument::Float(_) => ArgKind::Float,
            Argument::Text(_) => ArgKind::Text,
        }
    }
}

/// Argument kinds, named the way scripts see them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArgKind {
    Nil,
    Boolean,
    Integer,
    Float,
    Text,
}

impl ArgKind {
    /// Script-facing type name
    pub fn name(self) -> &'static str {
        match self {
            ArgKind::Nil => "nil",
            ArgKind::Boolean => "Boolean",
            ArgKind::Integer => "Integer",
            ArgKind::Float => "Float",
            ArgKind::Text => "String",
        }
    }
}
