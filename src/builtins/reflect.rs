//! Reflection and I/O built-ins: `type`, `print`, `input`, `range`.

use super::{define, Arity};
use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::io::{self, Write};
use std::rc::Rc;

fn builtin_type(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Str(args[0].type_name().to_string()))
}

/// `print(...)` — writes whitespace-separated values followed by a newline.
/// Distinct from the `:>` statement: this is an ordinary callable, so it can
/// appear as an expression (returning `Nil`) inside a larger call chain.
fn builtin_print(args: &[Value]) -> Result<Value, EvalError> {
    let parts: Vec<String> = args.iter().map(|v| v.to_string()).collect();
    println!("{}", parts.join(" "));
    Ok(Value::Nil)
}

/// Reads one line from stdin, optionally printing a prompt first. Trailing
/// newline is stripped; a read failure (e.g. closed stdin) yields an empty
/// string rather than propagating an I/O error the language has no way to
/// represent.
fn builtin_input(args: &[Value]) -> Result<Value, EvalError> {
    if let Some(Value::Str(prompt)) = args.first() {
        print!("{}", prompt);
        let _ = io::stdout().flush();
    }
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return Ok(Value::Str(String::new()));
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Value::Str(line))
}

/// `range(n)` / `range(start, stop)` / `range(start, stop, step)`, producing
/// a concrete list (Djerba has no lazy iterators).
fn builtin_range(args: &[Value]) -> Result<Value, EvalError> {
    let nums: Result<Vec<f64>, EvalError> = args
        .iter()
        .map(|v| match v {
            Value::Number(n) => Ok(*n),
            other => Err(EvalError::type_error("range", "number", other)),
        })
        .collect();
    let nums = nums?;
    let (start, stop, step) = match nums.len() {
        1 => (0.0, nums[0], 1.0),
        2 => (nums[0], nums[1], 1.0),
        3 => (nums[0], nums[1], nums[2]),
        _ => unreachable!("arity already checked"),
    };
    if step == 0.0 {
        return Err(EvalError::ArithError("range step cannot be zero".to_string()));
    }
    let mut out = Vec::new();
    let mut cur = start;
    if step > 0.0 {
        while cur < stop {
            out.push(Value::Number(cur));
            cur += step;
        }
    } else {
        while cur > stop {
            out.push(Value::Number(cur));
            cur += step;
        }
    }
    Ok(Value::list_from(out))
}

pub fn register(env: &Rc<Environment>) {
    define(env, "type", Arity::Fixed(1), builtin_type);
    define(env, "print", Arity::AtLeast(0), builtin_print);
    define(env, "input", Arity::Range(0, 1), builtin_input);
    define(env, "range", Arity::Range(1, 3), builtin_range);
}
