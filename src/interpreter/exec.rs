use super::*;

impl Interpreter {
    pub fn eval_program(&mut self, program: &Program) -> Result<Value, RuntimeError> {
        let env = Rc::clone(&self.globals);
        let mut result = Value::Null;
        for stmt in &program.statements {
            match self.eval_stmt(stmt, &env) {
                Ok(value) => result = value,
                // A top-level `sayless` ends the program with its value.
                Err(RuntimeError::Return(value)) => return Ok(*value),
                Err(err) => return Err(err),
            }
        }
        Ok(result)
    }

    pub(super) fn eval_stmt(&mut self, stmt: &Stmt, env: &Env) -> Result<Value, RuntimeError> {
        match stmt {
            Stmt::Let(name, value) => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr, env)?,
                    None => Value::Null,
                };
                env.borrow_mut().define(name.clone(), value);
                Ok(Value::Null)
            }
            Stmt::Const(name, value) => {
                let value = self.eval_expr(value, env)?;
                env.borrow_mut().define_const(name.clone(), value);
                Ok(Value::Null)
            }
            Stmt::Global(name, value) => {
                let value = self.eval_expr(value, env)?;
                Environment::define_global(env, name.clone(), value);
                Ok(Value::Null)
            }
            Stmt::Reassign(name, value) => {
                let value = self.eval_expr(value, env)?;
                Environment::assign(env, name, value)?;
                Ok(Value::Null)
            }
            Stmt::Return(value) => {
                let value = self.eval_expr(value, env)?;
                Err(RuntimeError::Return(Box::new(value)))
            }
            Stmt::Expr(expr) => self.eval_expr(expr, env),
            Stmt::For(for_loop) => self.eval_for(for_loop, env),
        }
    }

    /// Blocks run in the caller's environment (no scope of their own); the
    /// last statement's value is the block's value. `sayless` and errors
    /// short-circuit via `?`.
    pub(super) fn eval_block(&mut self, block: &Block, env: &Env) -> Result<Value, RuntimeError> {
        let mut result = Value::Null;
        for stmt in &block.statements {
            result = self.eval_stmt(stmt, env)?;
        }
        Ok(result)
    }

    /// C-style loop: init once, then test → body → post-steps until the test
    /// goes falsy. An early return from the body unwinds through the loop.
    fn eval_for(&mut self, for_loop: &ForLoop, env: &Env) -> Result<Value, RuntimeError> {
        if let Some(init) = &for_loop.init {
            self.eval_stmt(init, env)?;
        }

        let Some((test, steps)) = for_loop.conditions.split_first() else {
            return Ok(Value::Null);
        };

        loop {
            if !self.eval_expr(test, env)?.is_truthy() {
                return Ok(Value::Null);
            }
            self.eval_block(&for_loop.body, env)?;
            for step in steps {
                self.eval_expr(step, env)?;
            }
        }
    }
}
