use super::*;

impl Interpreter {
    pub(super) fn eval_expr(&mut self, expr: &Expr, env: &Env) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Int(value) => Ok(Value::Int(*value)),
            Expr::Float(value) => Ok(Value::Float(*value)),
            Expr::Bool(value) => Ok(Value::Bool(*value)),
            Expr::Str(value) => Ok(Value::Str(value.clone())),
            Expr::Ident(name) => self.eval_identifier(name, env),
            Expr::Array(elements) => self.eval_array_literal(elements, env),
            Expr::Hash(pairs) => self.eval_hash_literal(pairs, env),
            Expr::Prefix(op, right) => self.eval_prefix(*op, right, env),
            Expr::Postfix(left, op) => match op {
                PostfixOp::Inc => self.eval_step("++", 1, left, env),
                PostfixOp::Dec => self.eval_step("--", -1, left, env),
            },
            Expr::Infix(op, left, right) => {
                let left = self.eval_expr(left, env)?;
                let right = self.eval_expr(right, env)?;
                self.eval_infix(*op, left, right)
            }
            Expr::If {
                condition,
                consequence,
                elifs,
                alternative,
            } => self.eval_if(condition, consequence, elifs, alternative.as_ref(), env),
            Expr::Ternary {
                condition,
                consequence,
                alternative,
            } => {
                if self.eval_expr(condition, env)?.is_truthy() {
                    self.eval_expr(consequence, env)
                } else {
                    self.eval_expr(alternative, env)
                }
            }
            Expr::Function { name, params, body } => {
                let function = Value::Function(Rc::new(FunctionValue {
                    name: name.clone(),
                    params: params.clone(),
                    body: Rc::clone(body),
                    env: Rc::clone(env),
                }));
                // A named literal is also bound where it appears.
                if let Some(name) = name {
                    env.borrow_mut().define(name.clone(), function.clone());
                }
                Ok(function)
            }
            Expr::Call { function, args } => {
                let callee = self.eval_expr(function, env)?;
                let mut arg_values = Vec::with_capacity(args.len());
                for arg in args {
                    arg_values.push(self.eval_expr(arg, env)?);
                }
                self.call_value(callee, arg_values)
            }
            Expr::Index(left, index) => {
                let left = self.eval_expr(left, env)?;
                let index = self.eval_expr(index, env)?;
                self.eval_index(left, index)
            }
        }
    }

    /// The environment chain wins over builtins, so user bindings shadow
    /// `len`, `yap` and friends.
    pub(super) fn eval_identifier(&mut self, name: &str, env: &Env) -> Result<Value, RuntimeError> {
        if let Some(value) = env.borrow().get(name) {
            return Ok(value);
        }
        builtins::lookup(name)
            .ok_or_else(|| RuntimeError::new(format!("identifier not found: {}", name)))
    }

    /// The first element fixes the element type of the literal.
    fn eval_array_literal(&mut self, elements: &[Expr], env: &Env) -> Result<Value, RuntimeError> {
        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            values.push(self.eval_expr(element, env)?);
        }

        if let Some(first) = values.first() {
            let element_type = first.type_name();
            for value in &values[1..] {
                if value.type_name() != element_type {
                    return Err(RuntimeError::new(format!(
                        "type mismatch: cannot have an array of {} and {}",
                        element_type,
                        value.type_name()
                    )));
                }
            }
        }
        Ok(Value::array(values))
    }

    /// Keys keep insertion order; a duplicate key overwrites the value but
    /// keeps the first occurrence's position.
    fn eval_hash_literal(
        &mut self,
        pairs: &[(Expr, Expr)],
        env: &Env,
    ) -> Result<Value, RuntimeError> {
        let mut data = HashData::default();
        for (key_expr, value_expr) in pairs {
            let key = self.eval_expr(key_expr, env)?;
            let hashed = key.hash_key().ok_or_else(|| {
                RuntimeError::new(format!("unusable as hash key: {}", key.type_name()))
            })?;
            let value = self.eval_expr(value_expr, env)?;
            if data.pairs.insert(hashed, (key.clone(), value)).is_none() {
                data.keys.push(key);
            }
        }
        Ok(Value::hash(data))
    }

    fn eval_if(
        &mut self,
        condition: &Expr,
        consequence: &Block,
        elifs: &[ElifClause],
        alternative: Option<&Block>,
        env: &Env,
    ) -> Result<Value, RuntimeError> {
        if self.eval_expr(condition, env)?.is_truthy() {
            return self.eval_block(consequence, env);
        }
        for elif in elifs {
            if self.eval_expr(&elif.condition, env)?.is_truthy() {
                return self.eval_block(&elif.consequence, env);
            }
        }
        match alternative {
            Some(alternative) => self.eval_block(alternative, env),
            None => Ok(Value::Null),
        }
    }

    pub(super) fn call_value(
        &mut self,
        callee: Value,
        args: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        match callee {
            Value::Function(function) => {
                let scope = Environment::enclosed(Rc::clone(&function.env));
                // Arity is not checked: surplus arguments are dropped and
                // missing parameters simply stay unbound.
                for (param, arg) in function.params.iter().zip(args) {
                    scope.borrow_mut().define(param.clone(), arg);
                }
                match self.eval_block(&function.body, &scope) {
                    Err(RuntimeError::Return(value)) => Ok(*value),
                    other => other,
                }
            }
            Value::Builtin(name) => self.call_builtin(name, args),
            other => Err(RuntimeError::new(format!(
                "not a function: {}",
                other.type_name()
            ))),
        }
    }

    pub(super) fn eval_index(&mut self, left: Value, index: Value) -> Result<Value, RuntimeError> {
        match (&left, &index) {
            (Value::Array(elements), Value::Int(i)) => {
                let elements = elements.borrow();
                if *i < 0 || *i as usize >= elements.len() {
                    return Ok(Value::Null);
                }
                Ok(elements[*i as usize].clone())
            }
            (Value::Hash(data), key) => {
                let hashed = key.hash_key().ok_or_else(|| {
                    RuntimeError::new(format!("unusable as hash key: {}", key.type_name()))
                })?;
                Ok(data
                    .borrow()
                    .pairs
                    .get(&hashed)
                    .map(|(_, value)| value.clone())
                    .unwrap_or(Value::Null))
            }
            _ => Err(RuntimeError::new(format!(
                "index operator not supported: {}",
                left.type_name()
            ))),
        }
    }
}
