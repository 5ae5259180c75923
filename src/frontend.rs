use std::{fs::read_to_string, io::Write, path::Path};

use anyhow::Context;

use crate::{
	ScriptError,
	config::Config,
	scanner::{Scanner, Token},
};

/// Drives the tokenizer over files and interactive input.
#[derive(Default)]
pub struct Frontend {
	scanner: Scanner,
}

impl Frontend {
	pub fn new(config: Config) -> Self { Self { scanner: Scanner::new(config.lexer) } }

	/// Tokenize a whole file.
	pub fn tokenize_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Token>, ScriptError> {
		let path = path.as_ref();
		let source = read_to_string(path).with_context(|| format!("Failed open source file {}", path.display()))?;
		Ok(self.scanner.scan_source(&source)?)
	}

	/// Tokenize a file and print one token per line.
	pub fn run_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ScriptError> {
		let tokens = self.tokenize_file(path)?;
		print_tokens(&mut std::io::stdout().lock(), &tokens).context("Failed write token")?;
		Ok(())
	}

	/// Run the REPL prompt. Each line is tokenized on its own.
	pub fn run_prompt(&self) {
		let mut stdout = std::io::stdout();
		let mut lines = std::io::stdin().lines();
		loop {
			if let Err(e) = write!(stdout, "> ").and_then(|()| stdout.flush()) {
				eprintln!("Failed flush: {e}");
			}
			let line = match lines.next() {
				None => {
					println!("\nExited scriptlang repl");
					break;
				}
				Some(Err(e)) => {
					eprintln!("Failed read line: {e}");
					continue;
				}
				Some(Ok(line)) => line,
			};
			let printed = match self.scanner.scan_lines(&[line]) {
				Ok(tokens) => print_tokens(&mut stdout, &tokens).context("Failed write token").map_err(ScriptError::from),
				Err(e) => Err(e.into()),
			};
			if let Err(e) = printed {
				eprintln!("Failed tokenize line: {e}");
			}
		}
	}
}

fn print_tokens(out: &mut impl Write, tokens: &[Token]) -> std::io::Result<()> {
	tokens.iter().try_for_each(|token| writeln!(out, "{token}"))
}
