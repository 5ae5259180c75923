use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A token produced by the scanner
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
	pub kind:   TokenKind,
	pub value:  Option<Literal>,
	/// 1-based line the token starts on.
	pub line:   usize,
	/// 1-based column, counted in characters.
	pub column: usize,
}

impl Token {
	pub fn new(kind: TokenKind, value: Option<Literal>, line: usize, column: usize) -> Self {
		Self { kind, value, line, column }
	}

	/// The textual payload of identifiers, keywords, headers and string literals.
	pub fn text(&self) -> Option<&str> {
		match &self.value {
			Some(Literal::String(s)) => Some(s),
			_ => None,
		}
	}
}

impl Display for Token {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{} {}", self.line, self.column, self.kind)?;
		if let Some(value) = &self.value {
			write!(f, "({value})")?;
		}
		Ok(())
	}
}

/// Literal payload carried by a token.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
	Boolean(bool),
	Integer(i64),
	Decimal(f64),
	Character(char),
	String(String),
}

impl Display for Literal {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Literal::Boolean(b) => write!(f, "{b}"),
			Literal::Integer(i) => write!(f, "{i}"),
			Literal::Decimal(d) => write!(f, "{d:?}"),
			Literal::Character(c) => write!(f, "{c:?}"),
			Literal::String(s) => write!(f, "{s:?}"),
		}
	}
}

/// The closed vocabulary of token kinds. The copying is lightweight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
	/// `!`
	Not,
	/// `=`
	Assign,
	/// `+ - * / % & |`
	Operator,
	/// `+= -= *= /= %= &= |=`
	SetOperator,
	/// `== != < <= > >=`
	Comparator,
	/// `&&`
	And,
	/// `||`
	Or,
	LParen,
	RParen,
	LBracket,
	RBracket,
	LBrace,
	RBrace,
	/// `//`, only emitted when comment markers are requested.
	SingleComment,
	/// `/*`, only emitted when comment markers are requested.
	FlexCommentStart,
	/// `*/`, only emitted when comment markers are requested.
	FlexCommentEnd,
	/// Prefix word of a `#prefix arg...` line.
	Header,
	Keyword,
	Identifier,
	Character,
	String,
	Boolean,
	Integer,
	Decimal,
	Null,
	Dot,
	Colon,
	Comma,
	Indent,
	Dedent,
	Newline,
	Eof,
}

impl TokenKind {
	/// Kinds that never affect line continuation.
	pub fn is_comment(&self) -> bool {
		matches!(self, TokenKind::SingleComment | TokenKind::FlexCommentStart | TokenKind::FlexCommentEnd)
	}
}

impl Display for TokenKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use TokenKind::*;
		let name = match self {
			Not => "NOT",
			Assign => "ASSIGN",
			Operator => "OPERATOR",
			SetOperator => "SET_OPERATOR",
			Comparator => "COMPARATOR",
			And => "AND",
			Or => "OR",
			LParen => "L_PAREN",
			RParen => "R_PAREN",
			LBracket => "L_BRACKET",
			RBracket => "R_BRACKET",
			LBrace => "L_BRACE",
			RBrace => "R_BRACE",
			SingleComment => "SINGLE_COMMENT",
			FlexCommentStart => "FLEX_COMMENT_START",
			FlexCommentEnd => "FLEX_COMMENT_END",
			Header => "HEADER",
			Keyword => "KEYWORD",
			Identifier => "IDENTIFIER",
			Character => "CHARACTER",
			String => "STRING",
			Boolean => "BOOLEAN",
			Integer => "INTEGER",
			Decimal => "DECIMAL",
			Null => "NULL",
			Dot => "DOT",
			Colon => "COLON",
			Comma => "COMMA",
			Indent => "INDENT",
			Dedent => "DEDENT",
			Newline => "NEWLINE",
			Eof => "EOF",
		};
		write!(f, "{name}")
	}
}

/// Reserved words of the language.
pub const KEYWORDS: [&str; 20] = [
	// protection modifiers
	"public",
	"group",
	"directory",
	"private",
	// flow
	"if",
	"elif",
	"else",
	"for",
	"while",
	"continue",
	"break",
	"return",
	"switch",
	"case",
	"default",
	// data types
	"bool",
	"char",
	"int",
	"dec",
	"string",
];

/// A trailing token of one of these kinds joins the next line onto the current
/// statement.
pub const LINE_CONTINUATIONS: [TokenKind; 6] = [
	TokenKind::Operator,
	TokenKind::SetOperator,
	TokenKind::Comparator,
	TokenKind::And,
	TokenKind::Or,
	TokenKind::Assign,
];
