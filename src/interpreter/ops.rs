use super::*;

impl Interpreter {
    pub(super) fn eval_prefix(
        &mut self,
        op: PrefixOp,
        right: &Expr,
        env: &Env,
    ) -> Result<Value, RuntimeError> {
        match op {
            PrefixOp::Not => {
                let value = self.eval_expr(right, env)?;
                Ok(Value::Bool(!value.is_truthy()))
            }
            PrefixOp::Neg => {
                let value = self.eval_expr(right, env)?;
                match value {
                    Value::Int(v) => Ok(Value::Int(v.wrapping_neg())),
                    Value::Float(v) => Ok(Value::Float(-v)),
                    other => Err(RuntimeError::new(format!(
                        "unknown operator: -{}",
                        other.type_name()
                    ))),
                }
            }
            PrefixOp::Inc => self.eval_step("++", 1, right, env),
            PrefixOp::Dec => self.eval_step("--", -1, right, env),
        }
    }

    /// `++`/`--`, prefix and postfix alike: the operand must be an
    /// identifier naming a numeric binding. The binding is mutated in its
    /// owning scope and the new value is returned.
    pub(super) fn eval_step(
        &mut self,
        op: &str,
        delta: i64,
        operand: &Expr,
        env: &Env,
    ) -> Result<Value, RuntimeError> {
        let Expr::Ident(name) = operand else {
            return Err(RuntimeError::new(format!(
                "operand of '{}' must be an identifier",
                op
            )));
        };
        let current = self.eval_identifier(name, env)?;
        let next = match current {
            Value::Int(v) => Value::Int(v.wrapping_add(delta)),
            Value::Float(v) => Value::Float(v + delta as f64),
            other => {
                return Err(RuntimeError::new(format!(
                    "unknown operator: {}{}",
                    op,
                    other.type_name()
                )))
            }
        };
        Environment::assign(env, name, next)
    }

    pub(super) fn eval_infix(
        &mut self,
        op: InfixOp,
        left: Value,
        right: Value,
    ) -> Result<Value, RuntimeError> {
        match (left, right) {
            (Value::Int(l), Value::Int(r)) => eval_int_infix(op, l, r),
            (Value::Int(l), Value::Float(r)) => eval_float_infix(op, l as f64, r),
            (Value::Float(l), Value::Int(r)) => eval_float_infix(op, l, r as f64),
            (Value::Float(l), Value::Float(r)) => eval_float_infix(op, l, r),
            (Value::Str(l), Value::Str(r)) => eval_string_infix(op, &l, &r),
            // The int side of a mixed string pair joins as its decimal form.
            (Value::Str(l), Value::Int(r)) => eval_string_infix(op, &l, &r.to_string()),
            (Value::Int(l), Value::Str(r)) => eval_string_infix(op, &l.to_string(), &r),
            (left, right) => match op {
                // Identity comparison: scalars by value, arrays/hashes/
                // functions by allocation, mismatched types never equal.
                InfixOp::Eq => Ok(Value::Bool(left == right)),
                InfixOp::Neq => Ok(Value::Bool(left != right)),
                _ if left.type_name() == right.type_name() => Err(RuntimeError::new(format!(
                    "unknown operator: {} {} {}",
                    left.type_name(),
                    op,
                    right.type_name()
                ))),
                _ => Err(RuntimeError::new(format!(
                    "type mismatch: {} {} {}",
                    left.type_name(),
                    op,
                    right.type_name()
                ))),
            },
        }
    }
}

/// Integer arithmetic wraps on overflow; no operation panics.
fn eval_int_infix(op: InfixOp, l: i64, r: i64) -> Result<Value, RuntimeError> {
    let value = match op {
        InfixOp::Add => Value::Int(l.wrapping_add(r)),
        InfixOp::Sub => Value::Int(l.wrapping_sub(r)),
        InfixOp::Mul => Value::Int(l.wrapping_mul(r)),
        InfixOp::Div => {
            if r == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            Value::Int(l.wrapping_div(r))
        }
        InfixOp::Mod => {
            if r == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            Value::Int(l.wrapping_rem(r))
        }
        // Integer base and exponent truncate back to i64.
        InfixOp::Pow => Value::Int((l as f64).powf(r as f64) as i64),
        InfixOp::Lt => Value::Bool(l < r),
        InfixOp::Gt => Value::Bool(l > r),
        InfixOp::Eq => Value::Bool(l == r),
        InfixOp::Neq => Value::Bool(l != r),
    };
    Ok(value)
}

fn eval_float_infix(op: InfixOp, l: f64, r: f64) -> Result<Value, RuntimeError> {
    let value = match op {
        InfixOp::Add => Value::Float(l + r),
        InfixOp::Sub => Value::Float(l - r),
        InfixOp::Mul => Value::Float(l * r),
        InfixOp::Div => {
            if r == 0.0 {
                return Err(RuntimeError::DivisionByZero);
            }
            Value::Float(l / r)
        }
        // `%` is defined for integers only.
        InfixOp::Mod => Value::Null,
        InfixOp::Pow => Value::Float(l.powf(r)),
        InfixOp::Lt => Value::Bool(l < r),
        InfixOp::Gt => Value::Bool(l > r),
        InfixOp::Eq => Value::Bool(l == r),
        InfixOp::Neq => Value::Bool(l != r),
    };
    Ok(value)
}

fn eval_string_infix(op: InfixOp, l: &str, r: &str) -> Result<Value, RuntimeError> {
    match op {
        InfixOp::Add => Ok(Value::Str(format!("{}{}", l, r))),
        InfixOp::Mul => {
            // Whichever side reads as a decimal integer is the count; the
            // other side is the repeated unit.
            if let Ok(count) = l.parse::<i64>() {
                Ok(Value::Str(r.repeat(count.max(0) as usize)))
            } else if let Ok(count) = r.parse::<i64>() {
                Ok(Value::Str(l.repeat(count.max(0) as usize)))
            } else {
                Err(RuntimeError::new(format!(
                    "cannot multiply '{}' and '{}'",
                    l, r
                )))
            }
        }
        other => Err(RuntimeError::new(format!(
            "operator '{}' is not supported for strings",
            other
        ))),
    }
}
