use std::process::ExitCode;

use palc::Parser;
use scriptlang::{Config, Frontend, cli::*, logging};

fn main() -> ExitCode {
	let cli = Cli::parse();
	let config = match Config::load_or_default(cli.config.as_deref()) {
		Ok(config) => config,
		Err(e) => {
			eprintln!("Failed load config: {e:#}");
			return ExitCode::FAILURE;
		}
	};
	logging::init(&config.log.level);
	let frontend = Frontend::new(config);

	match cli.mode {
		Mode::File { path } => {
			if let Err(e) = frontend.run_file(&path) {
				eprintln!("Failed run file: {e}");
				return ExitCode::FAILURE;
			}
		}
		Mode::Repl => frontend.run_prompt(),
	}
	ExitCode::SUCCESS
}
