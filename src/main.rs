mod commands;
mod completion;
mod config;
mod error;
mod exec;
mod history;
mod line_source;
mod logging;
mod redirection;
mod separators;
mod shell;
mod tokenize;
mod wildcard;

#[cfg(test)]
mod testutil;

use std::io::{self, IsTerminal};

use config::Config;
use line_source::{EditorSource, ReaderSource};
use shell::Shell;

fn main() -> anyhow::Result<()> {
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("mtlsh: {:#}", e);
        Config::default()
    });
    if let Err(e) = logging::init(&config) {
        eprintln!("mtlsh: {:#}", e);
    }

    let mut shell = Shell::new(&config);
    let stdin = io::stdin();
    if stdin.is_terminal() {
        shell.run(&mut EditorSource::new()?);
    } else {
        shell.run(&mut ReaderSource::new(stdin.lock()));
    }
    Ok(())
}
