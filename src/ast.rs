use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    Neg, // -
    Not, // !
    Inc, // ++
    Dec, // --
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Lt,
    Gt,
    Eq,
    Neq,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostfixOp {
    Inc,
    Dec,
}

impl fmt::Display for PrefixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PrefixOp::Neg => "-",
            PrefixOp::Not => "!",
            PrefixOp::Inc => "++",
            PrefixOp::Dec => "--",
        })
    }
}

impl fmt::Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InfixOp::Add => "+",
            InfixOp::Sub => "-",
            InfixOp::Mul => "*",
            InfixOp::Div => "/",
            InfixOp::Mod => "%",
            InfixOp::Pow => "**",
            InfixOp::Lt => "<",
            InfixOp::Gt => ">",
            InfixOp::Eq => "==",
            InfixOp::Neq => "!=",
        })
    }
}

impl fmt::Display for PostfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PostfixOp::Inc => "++",
            PostfixOp::Dec => "--",
        })
    }
}

/// A brace-delimited statement sequence. Blocks do not open a scope of their
/// own; they only group statements for `perhaps`, `for` and function bodies.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElifClause {
    pub condition: Expr,
    pub consequence: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForLoop {
    /// Optional `propose`-introduced init, evaluated once in the enclosing
    /// environment.
    pub init: Option<Box<Stmt>>,
    /// First entry is the loop test; the rest run after the body as
    /// post-steps, in order.
    pub conditions: Vec<Expr>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `propose name = value;` — the value may be absent (`propose name;`).
    Let(String, Option<Expr>),
    /// Bare `name = value;` targeting an existing binding.
    Reassign(String, Expr),
    /// `ackchyually name = value;`
    Const(String, Expr),
    /// `worldwide name = value;` — defined in the outermost environment.
    Global(String, Expr),
    /// `sayless value;`
    Return(Expr),
    Expr(Expr),
    For(ForLoop),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Ident(String),
    Array(Vec<Expr>),
    /// Pairs in source order; duplicate keys are resolved at evaluation time.
    Hash(Vec<(Expr, Expr)>),
    Prefix(PrefixOp, Box<Expr>),
    Infix(InfixOp, Box<Expr>, Box<Expr>),
    Postfix(Box<Expr>, PostfixOp),
    If {
        condition: Box<Expr>,
        consequence: Block,
        elifs: Vec<ElifClause>,
        alternative: Option<Block>,
    },
    /// `cond ? a : b` — both branches are single expressions.
    Ternary {
        condition: Box<Expr>,
        consequence: Box<Expr>,
        alternative: Box<Expr>,
    },
    /// `func name(params) { body }` — the name is optional; when present the
    /// evaluator also binds the function in the current environment.
    Function {
        name: Option<String>,
        params: Vec<String>,
        body: Rc<Block>,
    },
    Call {
        function: Box<Expr>,
        args: Vec<Expr>,
    },
    Index(Box<Expr>, Box<Expr>),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

// ---------------------------------------------------------------------------
// Source form
//
// The Display impls print a canonical form that lexes and parses back to an
// AST of the same shape. Compound expressions are parenthesized so the
// precedence that produced them survives the round trip.
// ---------------------------------------------------------------------------

fn join<T: fmt::Display>(items: &[T], sep: &str) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(sep)
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join(&self.statements, " "))
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join(&self.statements, " "))
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Let(name, Some(value)) => write!(f, "propose {} = {};", name, value),
            Stmt::Let(name, None) => write!(f, "propose {};", name),
            Stmt::Reassign(name, value) => write!(f, "{} = {};", name, value),
            Stmt::Const(name, value) => write!(f, "ackchyually {} = {};", name, value),
            Stmt::Global(name, value) => write!(f, "worldwide {} = {};", name, value),
            Stmt::Return(value) => write!(f, "sayless {};", value),
            Stmt::Expr(expr) => write!(f, "{};", expr),
            Stmt::For(for_loop) => write!(f, "{}", for_loop),
        }
    }
}

impl fmt::Display for ForLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "for (")?;
        if let Some(init) = &self.init {
            write!(f, "{} ", init)?;
        }
        write!(f, "{}) {{ {} }}", join(&self.conditions, "; "), self.body)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Int(value) => write!(f, "{}", value),
            Expr::Float(value) => {
                // Keep a decimal point so the float survives re-lexing.
                if value.fract() == 0.0 && value.is_finite() {
                    write!(f, "{:.1}", value)
                } else {
                    write!(f, "{}", value)
                }
            }
            Expr::Bool(value) => write!(f, "{}", value),
            Expr::Str(value) => write!(f, "\"{}\"", value),
            Expr::Ident(name) => f.write_str(name),
            Expr::Array(elements) => write!(f, "[{}]", join(elements, ", ")),
            Expr::Hash(pairs) => {
                let parts: Vec<String> = pairs
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
            Expr::Prefix(op, right) => write!(f, "({}{})", op, right),
            Expr::Infix(op, left, right) => write!(f, "({} {} {})", left, op, right),
            Expr::Postfix(left, op) => write!(f, "({}{})", left, op),
            Expr::If {
                condition,
                consequence,
                elifs,
                alternative,
            } => {
                write!(f, "perhaps ({}) {{ {} }}", condition, consequence)?;
                for elif in elifs {
                    write!(
                        f,
                        " perchance ({}) {{ {} }}",
                        elif.condition, elif.consequence
                    )?;
                }
                if let Some(alternative) = alternative {
                    write!(f, " otherwise {{ {} }}", alternative)?;
                }
                Ok(())
            }
            Expr::Ternary {
                condition,
                consequence,
                alternative,
            } => write!(f, "({} ? {} : {})", condition, consequence, alternative),
            Expr::Function { name, params, body } => {
                write!(f, "func")?;
                if let Some(name) = name {
                    write!(f, " {}", name)?;
                }
                write!(f, "({}) {{ {} }}", params.join(", "), body)
            }
            Expr::Call { function, args } => write!(f, "{}({})", function, join(args, ", ")),
            Expr::Index(left, index) => write!(f, "({}[{}])", left, index),
        }
    }
}
