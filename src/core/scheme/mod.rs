//! Built-in Scheme interpreter
//!
//! A small evaluator for symbolic expressions that operates on a
//! [`KnowledgeStore`](crate::core::store::KnowledgeStore). It is the
//! default implementation of the [`Interpreter`](crate::core::interpreter::Interpreter)
//! collaborator; hosts with their own interpreter can swap it out.
//!
//! - **reader**: text to [`Value`] data
//! - **list**: shared, size-bounded lists
//! - **printer**: canonical textual form of values
//! - **eval**: special forms, builtins and knowledge-store procedures

pub mod eval;
pub mod list;
pub mod printer;
pub mod reader;

use thiserror::Error;

use crate::core::store::NodeRef;

pub use eval::SchemeInterpreter;
pub use list::{List, MAX_NESTING_DEPTH, MAX_VALUE_SIZE};
pub use printer::render_result;
pub use reader::read_all;

/// A Scheme datum, both as read from source and as produced by evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Real(f64),
    Bool(bool),
    Str(String),
    Symbol(String),
    List(List),
    /// Handle to a node in the knowledge store
    Node(NodeRef),
    /// A builtin procedure, named by the symbol that refers to it
    Procedure(String),
    /// Result of forms evaluated for effect (`define`, `set!`)
    Unspecified,
}

impl Value {
    /// Every value except `#f` counts as true
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Bool(false))
    }

    /// Short type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Bool(_) => "boolean",
            Value::Str(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::List(_) => "list",
            Value::Node(_) => "node",
            Value::Procedure(_) => "procedure",
            Value::Unspecified => "unspecified",
        }
    }
}

/// Errors raised while reading or evaluating a command
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("Unbound variable: {0}")]
    UnboundVariable(String),

    #[error("Wrong type argument in {procedure}: expected {expected}, got {found}")]
    WrongType {
        procedure: String,
        expected: &'static str,
        found: String,
    },

    #[error("Wrong number of arguments to {procedure}: expected {expected}, got {found}")]
    Arity {
        procedure: String,
        expected: String,
        found: usize,
    },

    #[error("Nesting deeper than {} levels in {0}", MAX_NESTING_DEPTH)]
    NestingTooDeep(String),

    #[error("Value larger than {} in {0}", MAX_VALUE_SIZE)]
    TooLarge(String),

    #[error("Numerical overflow in {0}")]
    Overflow(String),

    #[error("Division by zero in {0}")]
    DivisionByZero(String),

    #[error("Wrong type to apply: {0}")]
    NotApplicable(String),
}
