//! # Front end of a small indentation based script language
//!
//! Source: `if count >= 10:` followed by an indented block.

//! ## Tokenizing
//!
//! The [`scanner`] turns source lines into tokens. Layout is significant: the
//! first indented line teaches the scanner its indent unit, deeper lines emit
//! `INDENT` and shallower ones emit one `DEDENT` per level. A line ends with a
//! `NEWLINE` unless it ends in an operator or comma, or sits inside
//! parentheses or a block comment, in which case the statement continues on the
//! next line.
//!
//! ``` markdown
//! KEYWORD(if) IDENTIFIER(count) COMPARATOR(>=) INTEGER(10) COLON NEWLINE
//! INDENT ...
//! ```
//!
//! Comments are `//` and `/* ... */`; a line starting with `#` is a header
//! whose words become `STRING` tokens.

//! ## Scopes
//!
//! At runtime every script, block and function runs inside a context of a
//! [`scope::ContextTree`]. Lookups walk from a context to its parents until a
//! binding is found. Every binding is `public`, `group`, `directory` or
//! `private`, and that decides who may read it.
//!
//! Contexts get re-linked by whoever executes scripts, so chains can break.
//! The [`corrector`] finds contexts with cycles, chains that don't end at the
//! global scope, or null bindings, and repairs them.

pub mod cli;
pub mod config;
pub mod corrector;
pub mod error;
pub mod frontend;
pub mod logging;
pub mod scanner;
pub mod scope;

pub use config::Config;
pub use error::{
	ScriptError,
	scanner::{ScanError, ScanErrorType},
	scope::ScopeError,
};
pub use frontend::Frontend;
pub use scanner::{Token, TokenKind, tokenize};
