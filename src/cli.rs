use std::process;

use clap::Parser as ClapParser;

#[derive(ClapParser)]
#[command(name = "yap", about = "The Yap language interpreter")]
pub(crate) struct Cli {
    /// Script to run (must end in .txt). Starts the REPL when omitted.
    pub(crate) file: Option<String>,
}

/// Like `Cli::parse()`, but bad usage exits 1 (help and version still
/// exit 0).
pub(crate) fn parse() -> Cli {
    Cli::try_parse().unwrap_or_else(|err| {
        let _ = err.print();
        process::exit(if err.use_stderr() { 1 } else { 0 });
    })
}
