//! Evaluator
//!
//! Evaluates data produced by the reader against a knowledge store.
//! The interpreter itself is stateless: variable bindings, nodes and the
//! attentional-focus boundary all live in the store, so every request
//! sharing a store sees the effects of earlier commands.

use std::cmp::Ordering;

use super::{printer, reader, EvalError, List, Value, MAX_VALUE_SIZE};
use crate::core::interpreter::Interpreter;
use crate::core::store::{KnowledgeStore, NodeRef};

/// Builtin procedures, resolved when a symbol has no binding in the store
const BUILTINS: &[&str] = &[
    "+",
    "-",
    "*",
    "/",
    "=",
    "<",
    ">",
    "<=",
    ">=",
    "not",
    "equal?",
    "list",
    "length",
    "car",
    "cdr",
    "null?",
    "string-append",
    "cog-new-node",
    "cog-node",
    "cog-delete!",
    "cog-name",
    "cog-type",
    "cog-count-atoms",
    "cog-get-atoms",
    "cog-af-boundary",
    "cog-set-af-boundary!",
];

/// Default interpreter shipped with the relay
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemeInterpreter;

impl SchemeInterpreter {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate every top-level form in `source`, returning the last value
    pub fn eval_str(&self, store: &KnowledgeStore, source: &str) -> Result<Value, EvalError> {
        let forms = reader::read_all(source)?;

        let mut last = Value::Unspecified;
        for form in &forms {
            last = self.eval(store, form)?;
        }

        Ok(last)
    }

    /// Evaluate a single datum
    pub fn eval(&self, store: &KnowledgeStore, expr: &Value) -> Result<Value, EvalError> {
        match expr {
            Value::Symbol(name) => resolve_symbol(store, name),
            Value::List(items) => match items.split_first() {
                None => Err(EvalError::Syntax("illegal empty combination ()".to_string())),
                Some((head, rest)) => {
                    if let Value::Symbol(keyword) = head {
                        if let Some(result) = self.eval_special_form(store, keyword, rest) {
                            return result;
                        }
                    }

                    let procedure = self.eval(store, head)?;
                    let args = rest
                        .iter()
                        .map(|arg| self.eval(store, arg))
                        .collect::<Result<Vec<_>, _>>()?;
                    apply(store, &procedure, &args)
                }
            },
            other => Ok(other.clone()),
        }
    }

    /// Returns `None` when `keyword` does not name a special form
    fn eval_special_form(
        &self,
        store: &KnowledgeStore,
        keyword: &str,
        args: &[Value],
    ) -> Option<Result<Value, EvalError>> {
        let result = match keyword {
            "quote" => expect_arity("quote", args, 1).map(|_| args[0].clone()),
            "if" => self.eval_if(store, args),
            "define" => self.eval_define(store, args),
            "set!" => self.eval_set(store, args),
            "begin" => args
                .iter()
                .try_fold(Value::Unspecified, |_, form| self.eval(store, form)),
            _ => return None,
        };
        Some(result)
    }

    fn eval_if(&self, store: &KnowledgeStore, args: &[Value]) -> Result<Value, EvalError> {
        if !(2..=3).contains(&args.len()) {
            return Err(EvalError::Arity {
                procedure: "if".to_string(),
                expected: "2 or 3".to_string(),
                found: args.len(),
            });
        }

        if self.eval(store, &args[0])?.is_truthy() {
            self.eval(store, &args[1])
        } else if let Some(alternative) = args.get(2) {
            self.eval(store, alternative)
        } else {
            Ok(Value::Unspecified)
        }
    }

    fn eval_define(&self, store: &KnowledgeStore, args: &[Value]) -> Result<Value, EvalError> {
        expect_arity("define", args, 2)?;
        let name = match &args[0] {
            Value::Symbol(name) => name,
            Value::List(_) => {
                return Err(EvalError::Syntax(
                    "procedure definitions are not supported".to_string(),
                ))
            }
            other => return Err(wrong_type("define", "symbol", other)),
        };

        let value = self.eval(store, &args[1])?;
        store.define(name, value);
        Ok(Value::Unspecified)
    }

    fn eval_set(&self, store: &KnowledgeStore, args: &[Value]) -> Result<Value, EvalError> {
        expect_arity("set!", args, 2)?;
        let Value::Symbol(name) = &args[0] else {
            return Err(wrong_type("set!", "symbol", &args[0]));
        };
        if !store.is_defined(name) {
            return Err(EvalError::UnboundVariable(name.clone()));
        }

        let value = self.eval(store, &args[1])?;
        store.define(name, value);
        Ok(Value::Unspecified)
    }
}

impl Interpreter for SchemeInterpreter {
    fn evaluate(&self, store: &KnowledgeStore, command: &str) -> Result<String, EvalError> {
        let value = self.eval_str(store, command)?;
        Ok(printer::render_result(&value))
    }
}

fn resolve_symbol(store: &KnowledgeStore, name: &str) -> Result<Value, EvalError> {
    if let Some(value) = store.lookup(name) {
        return Ok(value);
    }
    if BUILTINS.contains(&name) || is_node_type(name) {
        return Ok(Value::Procedure(name.to_string()));
    }
    Err(EvalError::UnboundVariable(name.to_string()))
}

/// `ConceptNode`, `GeneNode`, ... act as node constructors
fn is_node_type(name: &str) -> bool {
    name.len() > "Node".len()
        && name.ends_with("Node")
        && name.starts_with(|c: char| c.is_ascii_uppercase())
}

fn apply(store: &KnowledgeStore, procedure: &Value, args: &[Value]) -> Result<Value, EvalError> {
    let Value::Procedure(name) = procedure else {
        return Err(EvalError::NotApplicable(procedure.to_string()));
    };
    let name = name.as_str();

    match name {
        "+" => fold_numbers(name, args, Number::Int(0)),
        "*" => fold_numbers(name, args, Number::Int(1)),
        "-" | "/" => {
            let (first, rest) = args.split_first().ok_or_else(|| EvalError::Arity {
                procedure: name.to_string(),
                expected: "at least 1".to_string(),
                found: 0,
            })?;
            let first = Number::from_value(name, first)?;
            if rest.is_empty() {
                // Unary forms negate or invert
                let identity = if name == "-" { Number::Int(0) } else { Number::Int(1) };
                return identity.combine(name, first).map(Number::into_value);
            }
            rest.iter()
                .try_fold(first, |acc, arg| acc.combine(name, Number::from_value(name, arg)?))
                .map(Number::into_value)
        }
        "=" | "<" | ">" | "<=" | ">=" => compare_chain(name, args),
        "not" => {
            expect_arity(name, args, 1)?;
            Ok(Value::Bool(!args[0].is_truthy()))
        }
        "equal?" => {
            expect_arity(name, args, 2)?;
            Ok(Value::Bool(args[0] == args[1]))
        }
        "list" => Ok(Value::List(List::new(name, args.to_vec())?)),
        "length" => {
            expect_arity(name, args, 1)?;
            let items = as_list(name, &args[0])?;
            Ok(Value::Integer(items.len() as i64))
        }
        "car" => {
            expect_arity(name, args, 1)?;
            as_list(name, &args[0])?
                .first()
                .cloned()
                .ok_or_else(|| wrong_type(name, "pair", &args[0]))
        }
        "cdr" => {
            expect_arity(name, args, 1)?;
            as_list(name, &args[0])?
                .tail()
                .map(Value::List)
                .ok_or_else(|| wrong_type(name, "pair", &args[0]))
        }
        "null?" => {
            expect_arity(name, args, 1)?;
            Ok(Value::Bool(matches!(&args[0], Value::List(items) if items.is_empty())))
        }
        "string-append" => {
            let parts = args
                .iter()
                .map(|arg| as_str(name, arg))
                .collect::<Result<Vec<_>, _>>()?;
            let len = parts.iter().map(|part| part.len()).sum::<usize>();
            if len > MAX_VALUE_SIZE {
                return Err(EvalError::TooLarge(name.to_string()));
            }
            Ok(Value::Str(parts.concat()))
        }
        "cog-new-node" => {
            expect_arity(name, args, 2)?;
            let node_type = as_node_type(name, &args[0])?;
            let node_name = as_str(name, &args[1])?;
            Ok(Value::Node(store.add_node(node_type, node_name)))
        }
        "cog-node" => {
            expect_arity(name, args, 2)?;
            let node_type = as_node_type(name, &args[0])?;
            let node_name = as_str(name, &args[1])?;
            Ok(store
                .get_node(node_type, node_name)
                .map(Value::Node)
                .unwrap_or_else(|| Value::List(List::default())))
        }
        "cog-delete!" => {
            expect_arity(name, args, 1)?;
            Ok(Value::Bool(store.remove_node(as_node(name, &args[0])?)))
        }
        "cog-name" => {
            expect_arity(name, args, 1)?;
            Ok(Value::Str(as_node(name, &args[0])?.name.clone()))
        }
        "cog-type" => {
            expect_arity(name, args, 1)?;
            Ok(Value::Symbol(as_node(name, &args[0])?.node_type.clone()))
        }
        "cog-count-atoms" => match args {
            [] => Ok(Value::Integer(store.node_count() as i64)),
            [node_type] => {
                let node_type = as_node_type(name, node_type)?;
                Ok(Value::Integer(store.nodes_of_type(node_type).len() as i64))
            }
            _ => Err(EvalError::Arity {
                procedure: name.to_string(),
                expected: "0 or 1".to_string(),
                found: args.len(),
            }),
        },
        "cog-get-atoms" => {
            expect_arity(name, args, 1)?;
            let node_type = as_node_type(name, &args[0])?;
            let nodes = store
                .nodes_of_type(node_type)
                .into_iter()
                .map(Value::Node)
                .collect();
            Ok(Value::List(List::new(name, nodes)?))
        }
        "cog-af-boundary" => {
            expect_arity(name, args, 0)?;
            Ok(Value::Integer(store.af_boundary()))
        }
        "cog-set-af-boundary!" => {
            expect_arity(name, args, 1)?;
            match &args[0] {
                Value::Integer(boundary) => Ok(Value::Integer(store.set_af_boundary(*boundary))),
                other => Err(wrong_type(name, "integer", other)),
            }
        }
        node_type if is_node_type(node_type) => {
            expect_arity(name, args, 1)?;
            let node_name = as_str(name, &args[0])?;
            Ok(Value::Node(store.add_node(node_type, node_name)))
        }
        other => Err(EvalError::NotApplicable(other.to_string())),
    }
}

#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i64),
    Real(f64),
}

impl Number {
    fn from_value(procedure: &str, value: &Value) -> Result<Self, EvalError> {
        match value {
            Value::Integer(n) => Ok(Number::Int(*n)),
            Value::Real(x) => Ok(Number::Real(*x)),
            other => Err(wrong_type(procedure, "number", other)),
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Real(x) => x,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Number::Int(n) => Value::Integer(n),
            Number::Real(x) => Value::Real(x),
        }
    }

    /// Exact integer arithmetic when both sides are integers and the
    /// result is representable, real arithmetic otherwise
    fn combine(self, procedure: &str, rhs: Number) -> Result<Number, EvalError> {
        let overflow = || EvalError::Overflow(procedure.to_string());

        if procedure == "/" && rhs.as_f64() == 0.0 {
            return Err(EvalError::DivisionByZero(procedure.to_string()));
        }

        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => match procedure {
                "+" => a.checked_add(b).map(Number::Int).ok_or_else(overflow),
                "-" => a.checked_sub(b).map(Number::Int).ok_or_else(overflow),
                "*" => a.checked_mul(b).map(Number::Int).ok_or_else(overflow),
                _ => {
                    if a.checked_rem(b) == Some(0) {
                        a.checked_div(b).map(Number::Int).ok_or_else(overflow)
                    } else {
                        Ok(Number::Real(a as f64 / b as f64))
                    }
                }
            },
            (lhs, rhs) => {
                let (a, b) = (lhs.as_f64(), rhs.as_f64());
                Ok(Number::Real(match procedure {
                    "+" => a + b,
                    "-" => a - b,
                    "*" => a * b,
                    _ => a / b,
                }))
            }
        }
    }

    fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}

fn fold_numbers(procedure: &str, args: &[Value], identity: Number) -> Result<Value, EvalError> {
    args.iter()
        .try_fold(identity, |acc, arg| {
            acc.combine(procedure, Number::from_value(procedure, arg)?)
        })
        .map(Number::into_value)
}

fn compare_chain(procedure: &str, args: &[Value]) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::Arity {
            procedure: procedure.to_string(),
            expected: "at least 1".to_string(),
            found: 0,
        });
    }

    let numbers = args
        .iter()
        .map(|arg| Number::from_value(procedure, arg))
        .collect::<Result<Vec<_>, _>>()?;

    let holds = numbers.windows(2).all(|pair| {
        let ordering = pair[0].compare(pair[1]);
        match procedure {
            "=" => ordering == Some(Ordering::Equal),
            "<" => ordering == Some(Ordering::Less),
            ">" => ordering == Some(Ordering::Greater),
            "<=" => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
            _ => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        }
    });

    Ok(Value::Bool(holds))
}

fn expect_arity(procedure: &str, args: &[Value], expected: usize) -> Result<(), EvalError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(EvalError::Arity {
            procedure: procedure.to_string(),
            expected: expected.to_string(),
            found: args.len(),
        })
    }
}

fn wrong_type(procedure: &str, expected: &'static str, found: &Value) -> EvalError {
    EvalError::WrongType {
        procedure: procedure.to_string(),
        expected,
        found: found.type_name().to_string(),
    }
}

fn as_list<'a>(procedure: &str, value: &'a Value) -> Result<&'a List, EvalError> {
    match value {
        Value::List(items) => Ok(items),
        other => Err(wrong_type(procedure, "list", other)),
    }
}

fn as_str<'a>(procedure: &str, value: &'a Value) -> Result<&'a str, EvalError> {
    match value {
        Value::Str(s) => Ok(s),
        other => Err(wrong_type(procedure, "string", other)),
    }
}

fn as_node<'a>(procedure: &str, value: &'a Value) -> Result<&'a NodeRef, EvalError> {
    match value {
        Value::Node(node) => Ok(node),
        other => Err(wrong_type(procedure, "node", other)),
    }
}

/// Node types are passed as quoted symbols: `'ConceptNode`
fn as_node_type<'a>(procedure: &str, value: &'a Value) -> Result<&'a str, EvalError> {
    match value {
        Value::Symbol(s) if is_node_type(s) => Ok(s),
        other => Err(wrong_type(procedure, "node type", other)),
    }
}
