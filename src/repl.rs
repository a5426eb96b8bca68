use std::io::{self, BufRead, Write};

use yap::interpreter::Interpreter;
use yap::lexer::Lexer;
use yap::parser::Parser;
use yap::value::RuntimeError;

const PROMPT: &str = "> ";

/// Line-at-a-time loop: each line parses as its own program, but every line
/// evaluates against one persistent environment, so bindings carry over. An
/// empty line (or EOF) exits.
pub(crate) fn start() {
    let stdin = io::stdin();
    let mut interpreter = Interpreter::new();

    loop {
        print!("{}", PROMPT);
        io::stdout().flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }
        let line = line.trim_end_matches('\n').trim_end_matches('\r');
        if line.is_empty() {
            break;
        }

        let mut parser = Parser::new(Lexer::new(line));
        let program = parser.parse_program();
        if !parser.errors().is_empty() {
            for err in parser.errors() {
                println!("\t{}", err);
            }
            continue;
        }

        match interpreter.eval_program(&program) {
            Ok(value) => println!("{}", value.inspect()),
            Err(RuntimeError::DivisionByZero) => crate::fatal("division by zero"),
            Err(err) => println!("ERROR: {}", err),
        }
    }
}
