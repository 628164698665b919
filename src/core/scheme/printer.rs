//! Printer: canonical textual form of values

use std::fmt::{self, Write};

use super::Value;
use crate::core::store::NodeRef;

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Real(x) => write_real(f, *x),
            Value::Bool(true) => f.write_str("#t"),
            Value::Bool(false) => f.write_str("#f"),
            Value::Str(s) => write_string(f, s),
            Value::Symbol(s) => f.write_str(s),
            Value::List(items) => {
                f.write_char('(')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(' ')?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(')')
            }
            Value::Node(node) => write!(f, "{node}"),
            Value::Procedure(name) => write!(f, "#<procedure {name}>"),
            Value::Unspecified => f.write_str("#<unspecified>"),
        }
    }
}

/// Nodes print as the constructor call that yields them
impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} ", self.node_type)?;
        write_string(f, &self.name)?;
        f.write_char(')')
    }
}

/// Reals always carry a decimal point so they read back as reals
fn write_real(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        f.write_str("+nan.0")
    } else if x.is_infinite() {
        f.write_str(if x > 0.0 { "+inf.0" } else { "-inf.0" })
    } else if x.fract() == 0.0 {
        write!(f, "{x:.1}")
    } else {
        write!(f, "{x}")
    }
}

fn write_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            other => f.write_char(other)?,
        }
    }
    f.write_char('"')
}

/// Serialize an evaluation result the way the interpreter reports it:
/// the printed value and a trailing newline, or nothing for results of
/// forms evaluated purely for effect.
pub fn render_result(value: &Value) -> String {
    match value {
        Value::Unspecified => String::new(),
        other => format!("{other}\n"),
    }
}
