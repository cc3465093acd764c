//! # Built-in Functions Module
//!
//! Built-in functions for the Djerba interpreter, organized into 4 categories.
//!
//! - **[math]**: numeric functions and constants
//! - **[sequence]**: string/list inspection (`len`, `upper`, `lower`, `substr`)
//! - **[lists]**: in-place list mutation (`push`, `append`, `pop`)
//! - **[reflect]**: `type`, `input`, `range`
//!
//! Each builtin is wrapped in a [`Builtin`] that centralizes arity checking
//! before the underlying function ever sees the argument slice.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

pub mod lists;
pub mod math;
pub mod reflect;
pub mod sequence;

pub use lists::register as register_lists;
pub use math::register as register_math;
pub use reflect::register as register_reflect;
pub use sequence::register as register_sequence;

/// Describes how many arguments a builtin accepts.
#[derive(Debug, Clone, Copy)]
pub enum Arity {
    Fixed(usize),
    Range(usize, usize),
    AtLeast(usize),
}

impl Arity {
    fn describe(&self) -> String {
        match self {
            Arity::Fixed(n) => n.to_string(),
            Arity::Range(lo, hi) => format!("{}-{}", lo, hi),
            Arity::AtLeast(n) => format!("at least {}", n),
        }
    }

    fn accepts(&self, got: usize) -> bool {
        match self {
            Arity::Fixed(n) => got == *n,
            Arity::Range(lo, hi) => got >= *lo && got <= *hi,
            Arity::AtLeast(n) => got >= *n,
        }
    }
}

type BuiltinFn = fn(&[Value]) -> Result<Value, EvalError>;

/// A named built-in function bundled with its arity contract. `call` checks
/// arity once, centrally, so each `BuiltinFn` body only needs to handle types.
pub struct Builtin {
    pub name: String,
    pub arity: Arity,
    func: BuiltinFn,
}

impl std::fmt::Debug for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builtin").field("name", &self.name).finish()
    }
}

impl Builtin {
    pub fn call(&self, args: &[Value]) -> Result<Value, EvalError> {
        if !self.arity.accepts(args.len()) {
            return Err(EvalError::arity_error(
                &self.name,
                self.arity.describe(),
                args.len(),
            ));
        }
        (self.func)(args)
    }
}

fn define(env: &Rc<Environment>, name: &str, arity: Arity, func: BuiltinFn) {
    env.define(
        name.to_string(),
        Value::Builtin(Rc::new(Builtin {
            name: name.to_string(),
            arity,
            func,
        })),
    );
}

/// Register every builtin category in the environment.
pub fn register_builtins(env: &Rc<Environment>) {
    register_math(env);
    register_sequence(env);
    register_lists(env);
    register_reflect(env);
}
