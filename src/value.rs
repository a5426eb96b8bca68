/// Core Yap runtime value type and the environment chain.
///
/// Lives in its own module so the interpreter, the builtins and the driver
/// can all import it without circular dependencies.
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::ast::Block;

// ---------------------------------------------------------------------------
// RuntimeError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{0}")]
    Error(String),
    /// Division by zero is fatal: the driver logs it and aborts the process
    /// instead of reporting it as the program's value.
    #[error("division by zero")]
    DivisionByZero,
    /// Internal `sayless` signal. Block evaluation lets it propagate and the
    /// function-call (or top-level program) evaluator unwraps it; it never
    /// surfaces to user code.
    #[error("return outside of a program")]
    Return(Box<Value>),
}

impl RuntimeError {
    pub fn new(msg: impl Into<String>) -> Self {
        RuntimeError::Error(msg.into())
    }
}

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// A user function together with the environment it captured. Closures share
/// the captured environment with their creator, so mutation through either
/// side is visible to both.
pub struct FunctionValue {
    pub name: Option<String>,
    pub params: Vec<String>,
    pub body: Rc<Block>,
    pub env: Env,
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The captured environment is omitted: it may contain this very
        // function, and printing it would recurse.
        f.debug_struct("FunctionValue")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Hash storage: pair map keyed by `HashKey`, plus the keys in insertion
/// order so `keys()`/`values()` and the inspect form are deterministic.
#[derive(Debug, Default)]
pub struct HashData {
    pub keys: Vec<Value>,
    pub pairs: HashMap<HashKey, (Value, Value)>,
}

#[derive(Debug, Clone)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Null,
    Array(Rc<RefCell<Vec<Value>>>),
    Hash(Rc<RefCell<HashData>>),
    Function(Rc<FunctionValue>),
    Builtin(&'static str),
}

impl Value {
    pub fn array(elements: Vec<Value>) -> Value {
        Value::Array(Rc::new(RefCell::new(elements)))
    }

    pub fn hash(data: HashData) -> Value {
        Value::Hash(Rc::new(RefCell::new(data)))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "INTEGER",
            Value::Float(_) => "FLOAT",
            Value::Bool(_) => "BOOLEAN",
            Value::Str(_) => "STRING",
            Value::Null => "NULL",
            Value::Array(_) => "ARRAY",
            Value::Hash(_) => "HASH",
            Value::Function(_) => "FUNCTION",
            Value::Builtin(_) => "BUILTIN",
        }
    }

    /// Only `Null` and `false` are falsy. `0`, `0.0`, `""` and empty
    /// containers all count as truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Bool(false))
    }

    /// The hash key for this value, or `None` for unhashable kinds.
    pub fn hash_key(&self) -> Option<HashKey> {
        let value = match self {
            Value::Int(v) => *v as u64,
            Value::Float(v) => v.to_bits(),
            Value::Bool(v) => *v as u64,
            Value::Str(v) => fnv1a_64(v.as_bytes()),
            _ => return None,
        };
        Some(HashKey {
            kind: self.type_name(),
            value,
        })
    }

    /// Canonical textual representation, used by `yap`, the driver and the
    /// REPL.
    pub fn inspect(&self) -> String {
        match self {
            Value::Int(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::Bool(v) => v.to_string(),
            Value::Str(v) => v.clone(),
            Value::Null => "null".to_string(),
            Value::Array(elements) => {
                let parts: Vec<String> =
                    elements.borrow().iter().map(Value::inspect).collect();
                format!("[{}]", parts.join(", "))
            }
            Value::Hash(data) => {
                let data = data.borrow();
                let parts: Vec<String> = data
                    .keys
                    .iter()
                    .filter_map(|key| {
                        let hashed = key.hash_key()?;
                        let (key, value) = data.pairs.get(&hashed)?;
                        Some(format!("{}: {}", key.inspect(), value.inspect()))
                    })
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }
            Value::Function(func) => {
                format!("func({}) {{\n{}\n}}", func.params.join(", "), func.body)
            }
            Value::Builtin(_) => "builtin function".to_string(),
        }
    }
}

/// Scalars compare by value, reference kinds by identity. Matches the
/// language's own `==` fallback: two separately-built arrays are not equal.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Hash(a), Value::Hash(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// HashKey
// ---------------------------------------------------------------------------

/// Two values hash-equal iff they share a type tag and the same underlying
/// bit pattern: integers two's-complement, floats `to_bits`, booleans 0/1,
/// strings FNV-1a 64.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HashKey {
    kind: &'static str,
    value: u64,
}

fn fnv1a_64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = OFFSET_BASIS;
    for &byte in bytes {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

pub type Env = Rc<RefCell<Environment>>;

/// One scope in the lexical chain: a name→value map plus a parent link.
/// Chains only ever point outward, so plain `Rc` reference counting is
/// enough to keep captured scopes alive.
pub struct Environment {
    store: HashMap<String, Value>,
    consts: HashSet<String>,
    outer: Option<Env>,
}

impl Environment {
    pub fn new() -> Env {
        Rc::new(RefCell::new(Environment {
            store: HashMap::new(),
            consts: HashSet::new(),
            outer: None,
        }))
    }

    pub fn enclosed(outer: Env) -> Env {
        Rc::new(RefCell::new(Environment {
            store: HashMap::new(),
            consts: HashSet::new(),
            outer: Some(outer),
        }))
    }

    /// Walk the chain; the nearest binding wins.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.store.get(name) {
            return Some(value.clone());
        }
        self.outer.as_ref().and_then(|outer| outer.borrow().get(name))
    }

    /// Bind in the current scope, shadowing any outer binding. A fresh
    /// `propose` also clears a const mark left by an earlier `ackchyually`
    /// of the same name in this scope.
    pub fn define(&mut self, name: String, value: Value) {
        self.consts.remove(&name);
        self.store.insert(name, value);
    }

    pub fn define_const(&mut self, name: String, value: Value) {
        self.store.insert(name.clone(), value);
        self.consts.insert(name);
    }

    /// Bind in the outermost environment of the chain.
    pub fn define_global(env: &Env, name: String, value: Value) {
        let mut current = Rc::clone(env);
        loop {
            let outer = current.borrow().outer.clone();
            match outer {
                Some(outer) => current = outer,
                None => break,
            }
        }
        current.borrow_mut().define(name, value);
    }

    /// Mutate the nearest scope that holds `name`. Bindings are type-locked
    /// once first assigned (a `Null` binding accepts any type), and
    /// constants reject reassignment entirely.
    pub fn assign(env: &Env, name: &str, value: Value) -> Result<Value, RuntimeError> {
        let mut current = Rc::clone(env);
        loop {
            let outer = {
                let mut scope = current.borrow_mut();
                if let Some(existing) = scope.store.get(name) {
                    if scope.consts.contains(name) {
                        return Err(RuntimeError::new(format!(
                            "cannot reassign constant '{}'",
                            name
                        )));
                    }
                    if !matches!(existing, Value::Null)
                        && existing.type_name() != value.type_name()
                    {
                        return Err(RuntimeError::new(format!(
                            "type mismatch: cannot assign {} to '{}' (currently {})",
                            value.type_name(),
                            name,
                            existing.type_name()
                        )));
                    }
                    scope.store.insert(name.to_string(), value.clone());
                    return Ok(value);
                }
                scope.outer.clone()
            };
            match outer {
                Some(outer) => current = outer,
                None => {
                    return Err(RuntimeError::new(format!(
                        "cannot assign to undeclared variable '{}'",
                        name
                    )))
                }
            }
        }
    }
}
