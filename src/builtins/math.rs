//! Numeric built-ins: constants, unary math functions, variadic min/max, pow.

use super::{define, Arity};
use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

fn as_number(context: &str, v: &Value) -> Result<f64, EvalError> {
    match v {
        Value::Number(n) => Ok(*n),
        other => Err(EvalError::type_error(context, "number", other)),
    }
}

fn builtin_sin(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Number(as_number("sin", &args[0])?.sin()))
}

fn builtin_cos(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Number(as_number("cos", &args[0])?.cos()))
}

fn builtin_tan(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Number(as_number("tan", &args[0])?.tan()))
}

fn builtin_sqrt(args: &[Value]) -> Result<Value, EvalError> {
    let n = as_number("sqrt", &args[0])?;
    if n < 0.0 {
        return Err(EvalError::ArithError(
            "sqrt of a negative number".to_string(),
        ));
    }
    Ok(Value::Number(n.sqrt()))
}

fn builtin_abs(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Number(as_number("abs", &args[0])?.abs()))
}

fn builtin_floor(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Number(as_number("floor", &args[0])?.floor()))
}

fn builtin_ceil(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Number(as_number("ceil", &args[0])?.ceil()))
}

fn builtin_round(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Number(as_number("round", &args[0])?.round()))
}

fn builtin_pow(args: &[Value]) -> Result<Value, EvalError> {
    let base = as_number("pow", &args[0])?;
    let exp = as_number("pow", &args[1])?;
    Ok(Value::Number(base.powf(exp)))
}

fn builtin_min(args: &[Value]) -> Result<Value, EvalError> {
    let mut best = as_number("min", &args[0])?;
    for a in &args[1..] {
        best = best.min(as_number("min", a)?);
    }
    Ok(Value::Number(best))
}

fn builtin_max(args: &[Value]) -> Result<Value, EvalError> {
    let mut best = as_number("max", &args[0])?;
    for a in &args[1..] {
        best = best.max(as_number("max", a)?);
    }
    Ok(Value::Number(best))
}

pub fn register(env: &Rc<Environment>) {
    env.define("PI".to_string(), Value::Number(std::f64::consts::PI));
    env.define("E".to_string(), Value::Number(std::f64::consts::E));

    define(env, "sin", Arity::Fixed(1), builtin_sin);
    define(env, "cos", Arity::Fixed(1), builtin_cos);
    define(env, "tan", Arity::Fixed(1), builtin_tan);
    define(env, "sqrt", Arity::Fixed(1), builtin_sqrt);
    define(env, "abs", Arity::Fixed(1), builtin_abs);
    define(env, "floor", Arity::Fixed(1), builtin_floor);
    define(env, "ceil", Arity::Fixed(1), builtin_ceil);
    define(env, "round", Arity::Fixed(1), builtin_round);
    define(env, "pow", Arity::Fixed(2), builtin_pow);
    define(env, "min", Arity::AtLeast(1), builtin_min);
    define(env, "max", Arity::AtLeast(1), builtin_max);
}
