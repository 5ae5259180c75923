use std::path::PathBuf;

use palc::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "scriptlang", after_long_help = "Tokenizer front end of the script language.")]
pub struct Cli {
	/// TOML configuration file
	#[arg(long)]
	pub config: Option<PathBuf>,
	#[command(subcommand)]
	pub mode:   Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
	/// Tokenize a file
	File { path: PathBuf },
	/// Tokenize lines typed at a prompt
	Repl,
}
