//! String/list inspection built-ins: `len`, `upper`, `lower`, `substr`.

use super::{define, Arity};
use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

fn builtin_len(args: &[Value]) -> Result<Value, EvalError> {
    match &args[0] {
        Value::Str(s) => Ok(Value::Number(s.chars().count() as f64)),
        Value::List(items) => Ok(Value::Number(items.borrow().len() as f64)),
        other => Err(EvalError::type_error("len", "string or list", other)),
    }
}

fn builtin_upper(args: &[Value]) -> Result<Value, EvalError> {
    match &args[0] {
        Value::Str(s) => Ok(Value::Str(s.to_uppercase())),
        other => Err(EvalError::type_error("upper", "string", other)),
    }
}

fn builtin_lower(args: &[Value]) -> Result<Value, EvalError> {
    match &args[0] {
        Value::Str(s) => Ok(Value::Str(s.to_lowercase())),
        other => Err(EvalError::type_error("lower", "string", other)),
    }
}

/// Extracts by Unicode code-point position, per the indexing convention
/// used throughout the evaluator (see `eval::index_value`).
fn builtin_substr(args: &[Value]) -> Result<Value, EvalError> {
    let s = match &args[0] {
        Value::Str(s) => s,
        other => return Err(EvalError::type_error("substr", "string", other)),
    };
    let start = match &args[1] {
        Value::Number(n) => *n as i64,
        other => return Err(EvalError::type_error("substr", "number", other)),
    };
    let chars: Vec<char> = s.chars().collect();
    let len = chars.len();
    let start = start.max(0) as usize;
    let end = if args.len() == 3 {
        match &args[2] {
            Value::Number(n) => (*n as i64).max(0) as usize,
            other => return Err(EvalError::type_error("substr", "number", other)),
        }
    } else {
        len
    };
    let end = end.min(len);
    if start > end {
        return Ok(Value::Str(String::new()));
    }
    Ok(Value::Str(chars[start..end].iter().collect()))
}

pub fn register(env: &Rc<Environment>) {
    define(env, "len", Arity::Fixed(1), builtin_len);
    define(env, "upper", Arity::Fixed(1), builtin_upper);
    define(env, "lower", Arity::Fixed(1), builtin_lower);
    define(env, "substr", Arity::Range(2, 3), builtin_substr);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_string_is_code_points_not_bytes() {
        let args = [Value::Str("héllo".to_string())];
        assert_eq!(builtin_len(&args).unwrap(), Value::Number(5.0));
    }

    #[test]
    fn test_len_list() {
        let args = [Value::list_from(vec![Value::Number(1.0), Value::Number(2.0)])];
        assert_eq!(builtin_len(&args).unwrap(), Value::Number(2.0));
    }

    #[test]
    fn test_substr_two_and_three_arg_forms() {
        let s = Value::Str("hello world".to_string());
        assert_eq!(
            builtin_substr(&[s.clone(), Value::Number(6.0)]).unwrap(),
            Value::Str("world".to_string())
        );
        assert_eq!(
            builtin_substr(&[s, Value::Number(0.0), Value::Number(5.0)]).unwrap(),
            Value::Str("hello".to_string())
        );
    }

    #[test]
    fn test_upper_lower() {
        let args = [Value::Str("MiXeD".to_string())];
        assert_eq!(builtin_upper(&args).unwrap(), Value::Str("MIXED".to_string()));
        assert_eq!(builtin_lower(&args).unwrap(), Value::Str("mixed".to_string()));
    }
}
