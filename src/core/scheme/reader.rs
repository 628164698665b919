//! Reader: turns command text into data
//!
//! Supports integers, reals, strings with `\"`, `\\`, `\n` and `\t`
//! escapes, `#t`/`#f`, symbols, parenthesized lists, the `'x` quote
//! shorthand and `;` line comments.

use std::iter::Peekable;
use std::str::Chars;

use super::{EvalError, List, Value, MAX_NESTING_DEPTH};

/// Read every top-level datum in `source`
///
/// Empty or comment-only input yields an empty vector.
pub fn read_all(source: &str) -> Result<Vec<Value>, EvalError> {
    let mut reader = Reader {
        chars: source.chars().peekable(),
    };

    let mut forms = Vec::new();
    loop {
        reader.skip_atmosphere();
        if reader.chars.peek().is_none() {
            break;
        }
        forms.push(reader.read_datum(0)?);
    }

    Ok(forms)
}

struct Reader<'a> {
    chars: Peekable<Chars<'a>>,
}

impl Reader<'_> {
    /// Skip whitespace and comments
    fn skip_atmosphere(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() {
                self.chars.next();
            } else if c == ';' {
                while let Some(c) = self.chars.next() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn read_datum(&mut self, depth: usize) -> Result<Value, EvalError> {
        if depth >= MAX_NESTING_DEPTH {
            return Err(EvalError::Syntax(format!(
                "nesting deeper than {MAX_NESTING_DEPTH} levels"
            )));
        }

        self.skip_atmosphere();
        match self.chars.peek().copied() {
            None => Err(EvalError::Syntax("unexpected end of input".to_string())),
            Some('(') => {
                self.chars.next();
                self.read_list(depth)
            }
            Some(')') => Err(EvalError::Syntax("unexpected ')'".to_string())),
            Some('\'') => {
                self.chars.next();
                let quoted = self.read_datum(depth + 1)?;
                let items = vec![Value::Symbol("quote".to_string()), quoted];
                Ok(Value::List(List::new("read", items)?))
            }
            Some('"') => {
                self.chars.next();
                self.read_string()
            }
            Some(_) => self.read_atom(),
        }
    }

    fn read_list(&mut self, depth: usize) -> Result<Value, EvalError> {
        let mut items = Vec::new();
        loop {
            self.skip_atmosphere();
            match self.chars.peek() {
                None => return Err(EvalError::Syntax("missing ')'".to_string())),
                Some(')') => {
                    self.chars.next();
                    return Ok(Value::List(List::new("read", items)?));
                }
                Some(_) => items.push(self.read_datum(depth + 1)?),
            }
        }
    }

    fn read_string(&mut self) -> Result<Value, EvalError> {
        let mut text = String::new();
        loop {
            match self.chars.next() {
                None => return Err(EvalError::Syntax("unterminated string".to_string())),
                Some('"') => return Ok(Value::Str(text)),
                Some('\\') => match self.chars.next() {
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some('"') => text.push('"'),
                    Some('\\') => text.push('\\'),
                    Some(other) => {
                        return Err(EvalError::Syntax(format!(
                            "unknown string escape '\\{other}'"
                        )))
                    }
                    None => return Err(EvalError::Syntax("unterminated string".to_string())),
                },
                Some(c) => text.push(c),
            }
        }
    }

    fn read_atom(&mut self) -> Result<Value, EvalError> {
        let mut token = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() || matches!(c, '(' | ')' | '"' | ';' | '\'') {
                break;
            }
            token.push(c);
            self.chars.next();
        }

        parse_atom(&token)
    }
}

fn parse_atom(token: &str) -> Result<Value, EvalError> {
    match token {
        "#t" | "#true" => return Ok(Value::Bool(true)),
        "#f" | "#false" => return Ok(Value::Bool(false)),
        _ => {}
    }

    if looks_numeric(token) {
        if let Ok(n) = token.parse::<i64>() {
            return Ok(Value::Integer(n));
        }
        if let Ok(x) = token.parse::<f64>() {
            return Ok(Value::Real(x));
        }
    }

    if token.starts_with('#') {
        return Err(EvalError::Syntax(format!("unknown # object: {token}")));
    }

    Ok(Value::Symbol(token.to_string()))
}

/// Digits, optionally after a sign or leading dot. Keeps `+`, `-`, `inf`
/// and `nan` reading as symbols.
fn looks_numeric(token: &str) -> bool {
    let body = token
        .strip_prefix('+')
        .or_else(|| token.strip_prefix('-'))
        .unwrap_or(token);
    let body = body.strip_prefix('.').unwrap_or(body);
    body.chars().next().is_some_and(|c| c.is_ascii_digit())
}
