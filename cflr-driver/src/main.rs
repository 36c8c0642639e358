use std::process::ExitCode;

use cflr_driver::Opt;
use clap::Parser;
use utils::DiagnosticEmitter;

fn main() -> ExitCode {
    env_logger::init();
    let opts = Opt::parse();

    let mut diag = DiagnosticEmitter::new(Box::new(std::io::stdout()), Box::new(std::io::stderr()));
    let Some(graph) = read_file(&opts.filename, &mut diag) else {
        return ExitCode::from(1);
    };
    let grammar = match &opts.grammar {
        Some(path) => match read_file(path, &mut diag) {
            Some(contents) => Some(contents),
            None => return ExitCode::from(1),
        },
        None => None,
    };

    if cflr_driver::process_source(&graph, grammar.as_deref(), &mut diag, &opts).is_none() {
        return ExitCode::from(1);
    }

    ExitCode::from(0)
}

fn read_file(path: &str, diag: &mut DiagnosticEmitter) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Some(contents),
        Err(err) => {
            diag.err_ln(&format!("Failed to read '{path}': {err}"));
            None
        }
    }
}
