use std::rc::Rc;

use crate::ast::*;
use crate::lexer::Lexer;
use crate::parser::Parser;
// Re-export the runtime types so `use yap::interpreter::Value` keeps working.
pub use crate::value::{Env, Environment, FunctionValue, HashData, HashKey, RuntimeError, Value};

mod builtins;
mod eval;
mod exec;
mod ops;

/// Tree-walking evaluator. Owns the root (global) environment; every user
/// function call extends the chain from the callee's captured scope, so the
/// interpreter itself stays cheap to hold across REPL lines.
pub struct Interpreter {
    globals: Env,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter {
            globals: Environment::new(),
        }
    }

    /// Single entry point: lex, parse and evaluate `source` against this
    /// interpreter's globals. The first parse error, if any, is the result.
    pub fn run(&mut self, source: &str) -> Result<Value, RuntimeError> {
        let mut parser = Parser::new(Lexer::new(source));
        let program = parser.parse_program();
        if let Some(err) = parser.errors().first() {
            return Err(RuntimeError::new(err.to_string()));
        }
        self.eval_program(&program)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
