//! Turns source lines into tokens.
//!
//! The language is line oriented. Statements end at the end of a line unless the
//! line ends in a token that obviously wants more (`=`, `+`, `&&`, ...) or the
//! line break falls inside an open parenthesis or block comment. Blocks are
//! written with indentation, so the scanner also measures the leading
//! whitespace of every line and turns changes in depth into `INDENT` and
//! `DEDENT` tokens.
//!
//! The width of one indent is not fixed by the language: the first indented
//! line of a file decides it, and every later line must be a multiple of that
//! width. Tabs always count as one indent.
//!
//! Like any maximal munch scanner we can't tell a keyword from an identifier,
//! or an integer from a decimal, until we've reached the end of the run of
//! alphanumeric characters, so words and numbers share one scan.
mod token;

pub use token::*;
use tracing::debug;
use TokenKind::*;

use crate::{
	config::LexerConfig,
	error::scanner::{ScanError, ScanErrorType::{self, *}},
};

/// A reusable scanner. Every call starts from fresh state, so scanning the same
/// input twice yields the same tokens.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
	config: LexerConfig,
}

impl Scanner {
	pub fn new(config: LexerConfig) -> Self { Self { config } }

	/// Scan already split source lines. The first error aborts the scan.
	pub fn scan_lines<S: AsRef<str>>(&self, lines: &[S]) -> Result<Vec<Token>, ScanError> {
		let mut lexer = Lexer::new(&self.config);
		for line in lines {
			lexer.scan_line(line.as_ref())?;
		}
		let indent_unit = lexer.indent_unit;
		let tokens = lexer.finish()?;
		debug!(lines = lines.len(), tokens = tokens.len(), ?indent_unit, "scanned source");
		Ok(tokens)
	}

	/// Scan a whole source text, splitting it on line breaks.
	pub fn scan_source(&self, source: &str) -> Result<Vec<Token>, ScanError> {
		let lines: Vec<&str> = source.lines().collect();
		self.scan_lines(&lines)
	}
}

/// Scan lines with the default configuration.
pub fn tokenize<S: AsRef<str>>(lines: &[S]) -> Result<Vec<Token>, ScanError> { Scanner::default().scan_lines(lines) }

/// Letters, digits and `_`.
fn is_alphanumeric(c: char) -> bool { c.is_ascii_alphanumeric() || c == '_' }

fn is_alphabetic(c: char) -> bool { c.is_ascii_alphabetic() || c == '_' }

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommentMode {
	Normal,
	/// Rest of the current line is ignored.
	Line,
	/// Everything up to the next `*/` is ignored, across lines.
	Block,
}

/// Per-scan state.
struct Lexer<'c> {
	config:      &'c LexerConfig,
	tokens:      Vec<Token>,
	/// Characters of the line being scanned
	chars:       Vec<char>,
	/// Index into `chars` of the character currently being considered
	cursor:      usize,
	/// 1-based number of the line in `chars`
	line:        usize,
	/// Spaces per indent
	indent_unit: Option<usize>,
	/// Current indent depth
	indent:      usize,
	comment:     CommentMode,
	paren_depth: usize,
	/// Kind of the last token that was not a comment marker
	last_kind:   Option<TokenKind>,
}

impl<'c> Lexer<'c> {
	fn new(config: &'c LexerConfig) -> Self {
		Self {
			config,
			tokens: Vec::new(),
			chars: Vec::new(),
			cursor: 0,
			line: 0,
			indent_unit: config.indent_width.filter(|&width| width > 0),
			indent: 0,
			comment: CommentMode::Normal,
			paren_depth: 0,
			last_kind: None,
		}
	}

	fn scan_line(&mut self, text: &str) -> Result<(), ScanError> {
		let previous_len = self.chars.len();
		self.chars = text.chars().collect();
		self.cursor = 0;
		self.line += 1;
		if self.comment == CommentMode::Line {
			self.comment = CommentMode::Normal;
		}

		if self.line > 1 && !self.newline_suppressed() {
			self.push_at(Newline, None, self.line - 1, previous_len + 1);
			self.indentation()?;
		}

		while let Some(c) = self.peek() {
			match self.comment {
				CommentMode::Line => break,
				CommentMode::Block => {
					self.block_comment();
					continue;
				}
				CommentMode::Normal => {}
			}
			match c {
				c if c.is_whitespace() => self.cursor += 1,
				'\'' => self.character()?,
				'"' => self.string()?,
				'#' => self.header()?,
				'+' | '-' | '*' | '/' | '%' | '&' | '|' => self.operator_or_comment(c)?,
				c if is_alphanumeric(c) => self.word()?,
				_ => self.punctuation(c)?,
			}
		}
		Ok(())
	}

	/// Close off the scan with the pending dedents and `EOF`.
	fn finish(mut self) -> Result<Vec<Token>, ScanError> {
		if self.comment == CommentMode::Block {
			return Err(ScanError::new(self.line, None, UnterminatedBlockComment));
		}
		let line = self.line.max(1);
		let column = self.chars.len() + 1;
		for _ in 0..self.indent {
			self.push_at(Dedent, None, line, column);
		}
		self.push_at(Eof, None, line, column);
		Ok(self.tokens)
	}

	/// The construct that currently swallows line breaks, if any.
	fn newline_suppressor(&self) -> Option<TokenKind> {
		match self.comment {
			CommentMode::Block => Some(FlexCommentStart),
			_ if self.paren_depth > 0 => Some(LParen),
			_ => None,
		}
	}

	fn newline_suppressed(&self) -> bool {
		self.newline_suppressor().is_some() || self.last_kind.is_some_and(|kind| self.config.is_continuation(kind))
	}

	/// Measure the leading whitespace and emit the change in depth.
	fn indentation(&mut self) -> Result<(), ScanError> {
		if self.chars.iter().all(|c| c.is_whitespace()) {
			return Ok(());
		}

		let (mut tabs, mut spaces) = (0, 0);
		while let Some(c) = self.peek().filter(|c| c.is_whitespace()) {
			match c {
				'\t' => tabs += 1,
				' ' => spaces += 1,
				_ => return Err(self.error(self.cursor, IllegalWhitespace)),
			}
			self.cursor += 1;
		}

		let mut depth = tabs;
		if spaces > 0 {
			let unit = *self.indent_unit.get_or_insert(spaces);
			if spaces % unit != 0 {
				return Err(self.error(self.cursor, InconsistentIndentation { spaces, unit }));
			}
			depth += spaces / unit;
		}

		let kind = if depth > self.indent { Indent } else { Dedent };
		for _ in 0..self.indent.abs_diff(depth) {
			self.push_at(kind, None, self.line, 1);
		}
		self.indent = depth;
		Ok(())
	}

	fn block_comment(&mut self) {
		while let Some(c) = self.peek() {
			self.cursor += 1;
			if c == '*' && self.peek() == Some('/') {
				self.cursor += 1;
				self.comment = CommentMode::Normal;
				if self.config.emit_comments {
					self.push(FlexCommentEnd, None, self.cursor - 2);
				}
				return;
			}
		}
	}

	fn character(&mut self) -> Result<(), ScanError> {
		let start = self.cursor;
		let value = self.character_literal()?;
		self.push(Character, Some(Literal::Character(value)), start);
		Ok(())
	}

	fn string(&mut self) -> Result<(), ScanError> {
		let start = self.cursor;
		let value = self.string_literal()?;
		self.push(String, Some(Literal::String(value)), start);
		Ok(())
	}

	/// Decode a `'c'` literal at the cursor, leaving the cursor past the closing quote.
	fn character_literal(&mut self) -> Result<char, ScanError> {
		let start = self.cursor;
		self.cursor += 1;
		let value = match self.peek() {
			None => return Err(self.error(start, UnterminatedCharacter)),
			Some('\'') => return Err(self.error(start, EmptyCharacter)),
			Some('\\') => self.escape(start, UnterminatedCharacter)?,
			Some(c) => {
				self.cursor += 1;
				c
			}
		};
		match self.peek() {
			Some('\'') => self.cursor += 1,
			None => return Err(self.error(start, UnterminatedCharacter)),
			Some(_) => return Err(self.error(start, MalformedCharacter)),
		}
		self.check_trailing()?;
		Ok(value)
	}

	/// Decode a `"..."` literal at the cursor, leaving the cursor past the closing quote.
	fn string_literal(&mut self) -> Result<std::string::String, ScanError> {
		let start = self.cursor;
		self.cursor += 1;
		let mut value = std::string::String::new();
		loop {
			match self.peek() {
				None => return Err(self.error(start, UnterminatedString)),
				Some('"') => {
					self.cursor += 1;
					break;
				}
				Some('\\') => value.push(self.escape(start, UnterminatedString)?),
				Some(c) => {
					value.push(c);
					self.cursor += 1;
				}
			}
		}
		self.check_trailing()?;
		Ok(value)
	}

	/// Decode the escape sequence whose backslash is under the cursor.
	fn escape(&mut self, literal_start: usize, unterminated: ScanErrorType) -> Result<char, ScanError> {
		let backslash = self.cursor;
		self.cursor += 1;
		let Some(c) = self.peek() else {
			return Err(self.error(literal_start, unterminated));
		};
		self.cursor += 1;
		Ok(match c {
			'n' => '\n',
			'r' => '\r',
			't' => '\t',
			'f' => '\u{000C}',
			'b' => '\u{0008}',
			'u' => self.unicode(backslash)?,
			other => other,
		})
	}

	/// Exactly four hex digits after `\u`.
	fn unicode(&mut self, backslash: usize) -> Result<char, ScanError> {
		let digits: std::string::String =
			self.chars.iter().skip(self.cursor).take(4).take_while(|c| c.is_ascii_hexdigit()).collect();
		if digits.len() != 4 {
			return Err(self.error(backslash, MalformedUnicode));
		}
		self.cursor += 4;
		u32::from_str_radix(&digits, 16)
			.ok()
			.and_then(char::from_u32)
			.ok_or_else(|| self.error(backslash, MalformedUnicode))
	}

	/// A literal may not run straight into a word or number.
	fn check_trailing(&self) -> Result<(), ScanError> {
		match self.peek() {
			Some(c) if is_alphanumeric(c) => Err(self.error(self.cursor, IllegalTrailingCharacter(c))),
			_ => Ok(()),
		}
	}

	/// `#prefix arg "quoted arg" ...`, consuming the rest of the line.
	fn header(&mut self) -> Result<(), ScanError> {
		let start = self.cursor;
		self.cursor += 1;
		let prefix_start = self.cursor;
		while self.peek().is_some_and(|c| !c.is_whitespace() && c != '"' && c != '\'') {
			self.cursor += 1;
		}
		if self.cursor == prefix_start {
			return Err(self.error(start, EmptyHeaderPrefix));
		}
		let prefix = self.text(prefix_start);
		self.push(Header, Some(Literal::String(prefix)), start);

		let mut word_start = None;
		while let Some(c) = self.peek() {
			match c {
				'"' | '\'' => {
					self.header_word(word_start.take());
					let start = self.cursor;
					let value = if c == '"' { self.string_literal()? } else { self.character_literal()?.to_string() };
					self.push(String, Some(Literal::String(value)), start);
				}
				c if c.is_whitespace() => {
					self.header_word(word_start.take());
					self.cursor += 1;
				}
				_ => {
					word_start.get_or_insert(self.cursor);
					self.cursor += 1;
				}
			}
		}
		self.header_word(word_start);
		Ok(())
	}

	fn header_word(&mut self, start: Option<usize>) {
		if let Some(start) = start {
			let word = self.text(start);
			self.push(String, Some(Literal::String(word)), start);
		}
	}

	/// `+ - * / % & |` and everything that starts with them.
	fn operator_or_comment(&mut self, c: char) -> Result<(), ScanError> {
		let start = self.cursor;
		let next = self.peek_at(1);
		self.cursor += 1;
		match (c, next) {
			(_, Some('=')) => {
				self.cursor += 1;
				self.push(SetOperator, Some(Literal::String(format!("{c}="))), start);
			}
			('&', Some('&')) => {
				self.cursor += 1;
				self.push(And, None, start);
			}
			('|', Some('|')) => {
				self.cursor += 1;
				self.push(Or, None, start);
			}
			('/', Some('/')) => {
				self.cursor = self.chars.len();
				self.comment = CommentMode::Line;
				if self.config.emit_comments {
					self.push(SingleComment, None, start);
				}
			}
			('/', Some('*')) => {
				self.cursor += 1;
				self.comment = CommentMode::Block;
				if self.config.emit_comments {
					self.push(FlexCommentStart, None, start);
				}
			}
			('*', Some('/')) => return Err(self.error(start, RogueCommentTerminator)),
			_ => self.push(Operator, Some(Literal::Character(c)), start),
		}
		Ok(())
	}

	/// Scan an identifier, keyword, boolean, integer or decimal.
	fn word(&mut self) -> Result<(), ScanError> {
		let start = self.cursor;
		let mut has_letter = false;
		let mut decimal = false;
		while let Some(c) = self.peek() {
			if !is_alphanumeric(c) && c != '.' {
				break;
			}
			has_letter |= is_alphabetic(c);
			if decimal && (has_letter || c == '.') {
				return Err(self.error(self.cursor, IllegalDecimal(c)));
			}
			if c == '.' {
				// a member access, left for the parser
				if has_letter {
					break;
				}
				decimal = true;
			}
			self.cursor += 1;
		}

		let text = self.text(start);
		let malformed = || self.error(start, MalformedNumber(text.clone()));
		let (kind, value) = match text.as_str() {
			_ if !has_letter && decimal => (Decimal, Some(Literal::Decimal(text.parse().map_err(|_| malformed())?))),
			_ if !has_letter => (Integer, Some(Literal::Integer(text.parse().map_err(|_| malformed())?))),
			"true" => (Boolean, Some(Literal::Boolean(true))),
			"false" => (Boolean, Some(Literal::Boolean(false))),
			"null" => (Null, None),
			word if self.config.is_keyword(word) => (Keyword, Some(Literal::String(text.clone()))),
			_ => (Identifier, Some(Literal::String(text.clone()))),
		};
		self.push(kind, value, start);
		Ok(())
	}

	/// Single or double character punctuation.
	fn punctuation(&mut self, c: char) -> Result<(), ScanError> {
		let start = self.cursor;
		let compound = self.peek_at(1) == Some('=');
		let (kind, value, width) = match c {
			'!' | '=' | '<' | '>' if compound => (Comparator, Some(Literal::String(format!("{c}="))), 2),
			'!' => (Not, None, 1),
			'=' => (Assign, None, 1),
			'<' | '>' => (Comparator, Some(Literal::String(c.to_string())), 1),
			'(' => {
				self.paren_depth += 1;
				(LParen, None, 1)
			}
			')' => {
				self.paren_depth = self.paren_depth.saturating_sub(1);
				(RParen, None, 1)
			}
			'[' => (LBracket, None, 1),
			']' => (RBracket, None, 1),
			'{' => (LBrace, None, 1),
			'}' => (RBrace, None, 1),
			'.' => (Dot, None, 1),
			',' => (Comma, None, 1),
			':' => (Colon, None, 1),
			_ => return Err(self.error(start, IllegalCharacter(c))),
		};
		self.cursor += width;
		self.push(kind, value, start);
		Ok(())
	}

	fn peek(&self) -> Option<char> { self.chars.get(self.cursor).copied() }

	fn peek_at(&self, offset: usize) -> Option<char> { self.chars.get(self.cursor + offset).copied() }

	/// Characters from `start` up to the cursor.
	fn text(&self, start: usize) -> std::string::String { self.chars[start..self.cursor].iter().collect() }

	/// Push a token that starts at index `start` of the current line.
	fn push(&mut self, kind: TokenKind, value: Option<Literal>, start: usize) {
		self.push_at(kind, value, self.line, start + 1);
	}

	fn push_at(&mut self, kind: TokenKind, value: Option<Literal>, line: usize, column: usize) {
		if !kind.is_comment() {
			self.last_kind = Some(kind);
		}
		self.tokens.push(Token::new(kind, value, line, column));
	}

	fn error(&self, index: usize, r#type: ScanErrorType) -> ScanError { ScanError::new(self.line, Some(index + 1), r#type) }
}
