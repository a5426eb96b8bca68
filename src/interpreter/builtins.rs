use std::io::{self, BufRead};

use super::*;

const BUILTINS: [&str; 7] = ["len", "scan", "yap", "append", "pop", "keys", "values"];

/// Builtins resolve only after the environment chain misses, so any user
/// binding shadows them.
pub(super) fn lookup(name: &str) -> Option<Value> {
    BUILTINS
        .iter()
        .find(|&&builtin| builtin == name)
        .map(|&builtin| Value::Builtin(builtin))
}

impl Interpreter {
    pub(super) fn call_builtin(
        &mut self,
        name: &str,
        args: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        match name {
            "len" => builtin_len(&args),
            "scan" => builtin_scan(&args),
            "yap" => builtin_yap(&args),
            "append" => builtin_append(&args),
            "pop" => builtin_pop(&args),
            "keys" => builtin_keys(&args),
            "values" => builtin_values(&args),
            _ => Err(RuntimeError::new(format!(
                "unknown builtin function: '{}'",
                name
            ))),
        }
    }
}

fn arity_error(name: &str, want: &str, got: usize) -> RuntimeError {
    RuntimeError::new(format!(
        "wrong number of arguments to `{}`: expected {}, got {}",
        name, want, got
    ))
}

/// Byte length of a string, element count of an array.
fn builtin_len(args: &[Value]) -> Result<Value, RuntimeError> {
    let [arg] = args else {
        return Err(arity_error("len", "1", args.len()));
    };
    match arg {
        Value::Str(s) => Ok(Value::Int(s.len() as i64)),
        Value::Array(elements) => Ok(Value::Int(elements.borrow().len() as i64)),
        other => Err(RuntimeError::new(format!(
            "argument to `len` not supported, got {}",
            other.type_name()
        ))),
    }
}

/// One line from stdin, without the trailing newline.
fn builtin_scan(args: &[Value]) -> Result<Value, RuntimeError> {
    if !args.is_empty() {
        return Err(arity_error("scan", "0", args.len()));
    }
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|err| RuntimeError::new(format!("scan failed: {}", err)))?;
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(Value::Str(line))
}

/// Print the inspect-form of every argument, space-joined. `\t`/`\n`
/// escapes are already real bytes by the time a string value gets here.
fn builtin_yap(args: &[Value]) -> Result<Value, RuntimeError> {
    let parts: Vec<String> = args.iter().map(Value::inspect).collect();
    println!("{}", parts.join(" "));
    Ok(Value::Null)
}

/// Non-mutating extend: a fresh array holding arg0's elements plus arg1
/// (spliced when arg1 is itself an array, appended whole otherwise).
fn builtin_append(args: &[Value]) -> Result<Value, RuntimeError> {
    let [target, addition] = args else {
        return Err(arity_error("append", "2", args.len()));
    };
    let Value::Array(elements) = target else {
        return Err(RuntimeError::new(format!(
            "first argument to `append` must be an ARRAY, got {}",
            target.type_name()
        )));
    };

    let mut extended = elements.borrow().clone();
    match addition {
        Value::Array(more) => extended.extend(more.borrow().iter().cloned()),
        other => extended.push(other.clone()),
    }
    Ok(Value::array(extended))
}

/// Mutating removal: last element with arity 1, the element at arg1 with
/// arity 2. The passed-in array is modified in place.
fn builtin_pop(args: &[Value]) -> Result<Value, RuntimeError> {
    if args.is_empty() || args.len() > 2 {
        return Err(arity_error("pop", "1 or 2", args.len()));
    }
    let Value::Array(elements) = &args[0] else {
        return Err(RuntimeError::new(format!(
            "first argument to `pop` must be an ARRAY, got {}",
            args[0].type_name()
        )));
    };

    let mut elements = elements.borrow_mut();
    match args.get(1) {
        None => elements
            .pop()
            .ok_or_else(|| RuntimeError::new("cannot pop from an empty array")),
        Some(Value::Int(index)) => {
            if *index < 0 || *index as usize >= elements.len() {
                return Err(RuntimeError::new(format!(
                    "index out of range: array contains {} elements",
                    elements.len()
                )));
            }
            Ok(elements.remove(*index as usize))
        }
        Some(other) => Err(RuntimeError::new(format!(
            "second argument to `pop` must be an INTEGER, got {}",
            other.type_name()
        ))),
    }
}

fn builtin_keys(args: &[Value]) -> Result<Value, RuntimeError> {
    let [arg] = args else {
        return Err(arity_error("keys", "1", args.len()));
    };
    let Value::Hash(data) = arg else {
        return Err(RuntimeError::new(format!(
            "argument to `keys` must be a HASH, got {}",
            arg.type_name()
        )));
    };
    Ok(Value::array(data.borrow().keys.clone()))
}

fn builtin_values(args: &[Value]) -> Result<Value, RuntimeError> {
    let [arg] = args else {
        return Err(arity_error("values", "1", args.len()));
    };
    let Value::Hash(data) = arg else {
        return Err(RuntimeError::new(format!(
            "argument to `values` must be a HASH, got {}",
            arg.type_name()
        )));
    };

    let data = data.borrow();
    let values: Vec<Value> = data
        .keys
        .iter()
        .filter_map(|key| {
            let hashed = key.hash_key()?;
            data.pairs.get(&hashed).map(|(_, value)| value.clone())
        })
        .collect();
    Ok(Value::array(values))
}
