use std::fs;
use std::path::Path;
use std::process;

use colored::Colorize;

use yap::interpreter::Interpreter;
use yap::lexer::Lexer;
use yap::parser::Parser;
use yap::value::RuntimeError;

mod cli;
mod repl;

fn main() {
    let cli = cli::parse();
    match cli.file {
        Some(file) => cmd_run(&file),
        None => repl::start(),
    }
}

/// Exit codes: 0 success, 1 bad arguments, 2 unreadable file, 3 parse
/// errors. A recoverable runtime error is the program's result and still
/// exits 0; division by zero aborts.
fn cmd_run(file: &str) {
    if Path::new(file).extension().and_then(|ext| ext.to_str()) != Some("txt") {
        eprintln!("{} expected a '.txt' script, got '{}'", "Error:".red(), file);
        process::exit(1);
    }

    let source = match fs::read_to_string(file) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("{} cannot open '{}': {}", "Error:".red(), file, err);
            process::exit(2);
        }
    };

    let mut parser = Parser::new(Lexer::new(&source));
    let program = parser.parse_program();
    if !parser.errors().is_empty() {
        for err in parser.errors() {
            println!("\t{}", err);
        }
        process::exit(3);
    }

    let mut interpreter = Interpreter::new();
    match interpreter.eval_program(&program) {
        Ok(value) => println!("{}", value.inspect()),
        Err(RuntimeError::DivisionByZero) => fatal("division by zero"),
        Err(err) => println!("ERROR: {}", err),
    }
}

pub(crate) fn fatal(msg: &str) -> ! {
    eprintln!("{} {}", "Fatal:".red().bold(), msg);
    process::exit(1);
}
