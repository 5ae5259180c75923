/// A specific scanning error with its location and type.
///
/// The first scanning error aborts the whole tokenization.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("line {line}{}: {}", display_column(.column), .r#type)]
pub struct ScanError {
	/// The 1-based line where the error occurred.
	pub line:   usize,
	/// The 1-based column of the offending character, when one exists.
	pub column: Option<usize>,
	/// The type of scanning error.
	pub r#type: ScanErrorType,
}

fn display_column(column: &Option<usize>) -> String { column.map(|c| format!(", column {c}")).unwrap_or_default() }

impl ScanError {
	pub fn new(line: usize, column: Option<usize>, r#type: ScanErrorType) -> Self { Self { line, column, r#type } }
}

/// Types of scanning errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanErrorType {
	/// A character that starts no token.
	IllegalCharacter(char),
	/// Indentation made of something other than spaces and tabs.
	IllegalWhitespace,
	/// A space run that is not a multiple of the learned indent unit.
	InconsistentIndentation { spaces: usize, unit: usize },
	/// A character literal cut off by the end of the line.
	UnterminatedCharacter,
	/// `''`
	EmptyCharacter,
	/// More than one character between single quotes.
	MalformedCharacter,
	/// A string literal cut off by the end of the line.
	UnterminatedString,
	/// A literal glued to a following alphanumeric character.
	IllegalTrailingCharacter(char),
	/// `\u` not followed by four hex digits naming a scalar value.
	MalformedUnicode,
	/// A letter or second dot inside a decimal.
	IllegalDecimal(char),
	/// A numeric run that does not fit its literal type.
	MalformedNumber(String),
	/// `*/` outside of a block comment.
	RogueCommentTerminator,
	/// A block comment still open at the end of input.
	UnterminatedBlockComment,
	/// `#` not immediately followed by a prefix word.
	EmptyHeaderPrefix,
}

impl std::fmt::Display for ScanErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ScanErrorType::*;
		match self {
			IllegalCharacter(c) => write!(f, "Illegal character '{}'", c.escape_default()),
			IllegalWhitespace => write!(f, "Illegal whitespace character in indentation"),
			InconsistentIndentation { spaces, unit } => {
				write!(f, "Inconsistent indentation: {spaces} spaces is not a multiple of {unit}")
			}
			UnterminatedCharacter => write!(f, "Character literal not terminated"),
			EmptyCharacter => write!(f, "Empty character literal"),
			MalformedCharacter => write!(f, "Character literal holds more than one character"),
			UnterminatedString => write!(f, "String literal not terminated"),
			IllegalTrailingCharacter(c) => write!(f, "Illegal character '{c}' after a literal"),
			MalformedUnicode => write!(f, "Malformed unicode escape"),
			IllegalDecimal(c) => write!(f, "Illegal character '{c}' in decimal"),
			MalformedNumber(s) => write!(f, "Malformed number literal '{s}'"),
			RogueCommentTerminator => write!(f, "Rogue multiline comment terminator"),
			UnterminatedBlockComment => write!(f, "Unterminated block comment"),
			EmptyHeaderPrefix => write!(f, "Header prefix must not be empty"),
		}
	}
}
