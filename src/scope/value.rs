use std::fmt::Display;

use crate::scanner::Literal;

/// Values stored in a scope must have a distinguished null. A context never
/// holds "nothing"; an unset variable holds the null value instead.
pub trait NullValue {
	fn null() -> Self;

	fn is_null(&self) -> bool;
}

/// The default runtime value of the language.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
	#[default]
	Null,
	Boolean(bool),
	Integer(i64),
	Decimal(f64),
	Character(char),
	String(String),
}

impl NullValue for Value {
	fn null() -> Self { Value::Null }

	fn is_null(&self) -> bool { matches!(self, Value::Null) }
}

impl Display for Value {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Null => write!(f, "null"),
			Value::Boolean(b) => write!(f, "{b}"),
			Value::Integer(i) => write!(f, "{i}"),
			Value::Decimal(d) => {
				if d.is_finite() && d.fract() == 0.0 {
					write!(f, "{d:.1}")
				} else {
					write!(f, "{d}")
				}
			}
			Value::Character(c) => write!(f, "'{c}'"),
			Value::String(s) => write!(f, "\"{s}\""),
		}
	}
}

impl From<Literal> for Value {
	fn from(literal: Literal) -> Self {
		match literal {
			Literal::Boolean(b) => Value::Boolean(b),
			Literal::Integer(i) => Value::Integer(i),
			Literal::Decimal(d) => Value::Decimal(d),
			Literal::Character(c) => Value::Character(c),
			Literal::String(s) => Value::String(s),
		}
	}
}

impl From<Option<Literal>> for Value {
	fn from(literal: Option<Literal>) -> Self { literal.map_or(Value::Null, Value::from) }
}

impl From<i64> for Value {
	fn from(i: i64) -> Self { Value::Integer(i) }
}

impl From<bool> for Value {
	fn from(b: bool) -> Self { Value::Boolean(b) }
}

impl From<&str> for Value {
	fn from(s: &str) -> Self { Value::String(s.to_string()) }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display() {
		assert_eq!(Value::Null.to_string(), "null");
		assert_eq!(Value::Decimal(2.0).to_string(), "2.0");
		assert_eq!(Value::Decimal(2.5).to_string(), "2.5");
		assert_eq!(Value::from("hi").to_string(), "\"hi\"");
	}

	#[test]
	fn from_token_literal() {
		assert_eq!(Value::from(Some(Literal::Integer(3))), Value::Integer(3));
		assert!(Value::from(None::<Literal>).is_null());
	}
}
