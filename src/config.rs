//! Configuration for the front end, loaded from TOML.

use std::{collections::HashSet, fs, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::scanner::{KEYWORDS, LINE_CONTINUATIONS, TokenKind};

/// Top level configuration file model.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
	pub lexer: LexerConfig,
	pub log:   LogConfig,
}

impl Config {
	/// Load configuration from an explicit path.
	pub fn load(path: &Path) -> anyhow::Result<Self> {
		let data =
			fs::read_to_string(path).with_context(|| format!("reading configuration from {}", path.display()))?;
		Self::parse(&data).with_context(|| format!("parsing configuration {}", path.display()))
	}

	/// Load from `path` when given, otherwise fall back to defaults.
	pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
		path.map(Self::load).unwrap_or_else(|| Ok(Self::default()))
	}

	pub fn parse(data: &str) -> anyhow::Result<Self> { Ok(toml::from_str(data)?) }
}

/// Tokenizer knobs. The built-in keyword and line-continuation sets are always
/// active; this only extends them.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LexerConfig {
	/// Force the indent unit instead of learning it from the first indented line.
	pub indent_width:        Option<usize>,
	/// Emit `SINGLE_COMMENT`, `FLEX_COMMENT_START` and `FLEX_COMMENT_END` markers.
	pub emit_comments:       bool,
	pub extra_keywords:      HashSet<String>,
	pub extra_continuations: HashSet<TokenKind>,
}

impl LexerConfig {
	/// Returns false when the keyword was already known.
	pub fn add_keyword(&mut self, keyword: impl Into<String>) -> bool {
		let keyword = keyword.into();
		!self.is_keyword(&keyword) && self.extra_keywords.insert(keyword)
	}

	pub fn is_keyword(&self, word: &str) -> bool { KEYWORDS.contains(&word) || self.extra_keywords.contains(word) }

	/// Returns false when the kind already continued lines.
	pub fn add_continuation(&mut self, kind: TokenKind) -> bool {
		!self.is_continuation(kind) && self.extra_continuations.insert(kind)
	}

	pub fn is_continuation(&self, kind: TokenKind) -> bool {
		LINE_CONTINUATIONS.contains(&kind) || self.extra_continuations.contains(&kind)
	}
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
	/// Default filter directive when `RUST_LOG` is unset.
	pub level: String,
}

impl Default for LogConfig {
	fn default() -> Self { Self { level: "info".to_string() } }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_full_config() {
		let config = Config::parse(
			r#"
			[lexer]
			indent_width = 2
			emit_comments = true
			extra_keywords = ["import"]
			extra_continuations = ["COMMA"]

			[log]
			level = "debug"
			"#,
		)
		.unwrap();
		assert_eq!(config.lexer.indent_width, Some(2));
		assert!(config.lexer.emit_comments);
		assert!(config.lexer.is_keyword("import"));
		assert!(config.lexer.is_continuation(TokenKind::Comma));
		assert_eq!(config.log.level, "debug");
	}

	#[test]
	fn missing_sections_use_defaults() {
		let config = Config::parse("").unwrap();
		assert_eq!(config.lexer.indent_width, None);
		assert!(!config.lexer.emit_comments);
		assert_eq!(config.log.level, "info");
	}

	#[test]
	fn unknown_token_kind_is_rejected() {
		assert!(Config::parse("[lexer]\nextra_continuations = [\"SEMICOLON\"]").is_err());
	}

	#[test]
	fn builtin_sets_cannot_be_added_twice() {
		let mut lexer = LexerConfig::default();
		assert!(lexer.is_keyword("while"));
		assert!(!lexer.add_keyword("while"));
		assert!(lexer.add_keyword("import"));
		assert!(!lexer.add_keyword("import"));
		assert!(!lexer.add_continuation(TokenKind::Assign));
		assert!(lexer.add_continuation(TokenKind::Comma));
		assert!(!lexer.is_continuation(TokenKind::Dot));
	}
}
