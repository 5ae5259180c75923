pub mod scanner;
pub mod scope;

/// ScriptError is the top-level error type of the front end.
#[derive(thiserror::Error, Debug)]
pub enum ScriptError {
	/// I/O and configuration failures
	#[error("{0:#}")]
	Internal(#[from] anyhow::Error),
	/// The tokenizer rejected the input
	#[error("Scan error at {0}")]
	Scan(#[from] scanner::ScanError),
	/// A scope chain lookup failed
	#[error("Scope error: {0}")]
	Scope(#[from] scope::ScopeError),
}
