// ABOUTME: Tree-walking evaluator for the Djerba AST

use crate::ast::{BinOp, CmpOp, Expr, LogicOp, Program, Stmt};
use crate::env::{Environment, FunctionDef};
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

/// Non-local control transfer produced by executing a statement. Modeled as
/// an explicit enum rather than thrown exceptions, matching the evaluator's
/// Result-based, non-panic propagation of ordinary errors.
#[derive(Debug)]
pub enum ControlFlow {
    Next,
    Return(Value),
    Break,
    Continue,
}

/// Runs a whole program in a fresh root environment pre-populated with
/// built-ins.
pub fn run_program(program: &Program, raw_floats: bool) -> Result<(), EvalError> {
    crate::value::set_raw_floats(raw_floats);
    let root = Environment::new();
    crate::builtins::register_builtins(&root);
    match run_block(&program.statements, &root)? {
        ControlFlow::Return(_) => Ok(()),
        ControlFlow::Break | ControlFlow::Continue => Err(EvalError::ControlFlowError {
            keyword: "break/continue".to_string(),
        }),
        ControlFlow::Next => Ok(()),
    }
}

pub fn run_block(stmts: &[Stmt], env: &Rc<Environment>) -> Result<ControlFlow, EvalError> {
    for stmt in stmts {
        match eval_stmt(stmt, env)? {
            ControlFlow::Next => continue,
            other => return Ok(other),
        }
    }
    Ok(ControlFlow::Next)
}

fn eval_stmt(stmt: &Stmt, env: &Rc<Environment>) -> Result<ControlFlow, EvalError> {
    match stmt {
        Stmt::Print(args) => {
            let parts: Result<Vec<String>, EvalError> = args
                .iter()
                .map(|a| eval_expr(a, env).map(|v| v.to_string()))
                .collect();
            println!("{}", parts?.join(" "));
            Ok(ControlFlow::Next)
        }
        Stmt::Assign { name, value } => {
            let v = eval_expr(value, env)?;
            env.assign(name, v);
            Ok(ControlFlow::Next)
        }
        Stmt::If {
            cond,
            then_branch,
            else_branch,
        } => {
            if eval_expr(cond, env)?.is_truthy() {
                run_block(then_branch, env)
            } else if let Some(else_branch) = else_branch {
                run_block(else_branch, env)
            } else {
                Ok(ControlFlow::Next)
            }
        }
        Stmt::While { cond, body } => {
            while eval_expr(cond, env)?.is_truthy() {
                match run_block(body, env)? {
                    ControlFlow::Next | ControlFlow::Continue => continue,
                    ControlFlow::Break => break,
                    ret @ ControlFlow::Return(_) => return Ok(ret),
                }
            }
            Ok(ControlFlow::Next)
        }
        Stmt::ForLoop { var, iter, body } => {
            let iterable = eval_expr(iter, env)?;
            let items = match &iterable {
                Value::List(items) => items.borrow().clone(),
                other => {
                    return Err(EvalError::type_error("for-loop iterable", "list", other));
                }
            };
            for item in items {
                env.assign(var, item);
                match run_block(body, env)? {
                    ControlFlow::Next | ControlFlow::Continue => continue,
                    ControlFlow::Break => break,
                    ret @ ControlFlow::Return(_) => return Ok(ret),
                }
            }
            Ok(ControlFlow::Next)
        }
        Stmt::FuncDef { name, params, body } => {
            env.define_func(
                name.clone(),
                FunctionDef {
                    params: params.clone(),
                    body: body.clone(),
                },
            );
            Ok(ControlFlow::Next)
        }
        Stmt::Return(expr) => Ok(ControlFlow::Return(eval_expr(expr, env)?)),
        Stmt::Break => Ok(ControlFlow::Break),
        Stmt::Continue => Ok(ControlFlow::Continue),
        Stmt::ExprStmt(expr) => {
            eval_expr(expr, env)?;
            Ok(ControlFlow::Next)
        }
    }
}

fn eval_expr(expr: &Expr, env: &Rc<Environment>) -> Result<Value, EvalError> {
    match expr {
        Expr::Num(n) => Ok(Value::Number(*n)),
        Expr::Str(s) => Ok(Value::Str(s.clone())),
        Expr::Bool(b) => Ok(Value::Bool(*b)),
        Expr::ListLit(items) => {
            let values: Result<Vec<Value>, EvalError> =
                items.iter().map(|e| eval_expr(e, env)).collect();
            Ok(Value::list_from(values?))
        }
        Expr::Var(name) => env
            .get(name)
            .ok_or_else(|| EvalError::name_error(name.clone())),
        Expr::Index(base, index) => {
            let base_val = eval_expr(base, env)?;
            let index_val = eval_expr(index, env)?;
            index_value(&base_val, &index_val)
        }
        Expr::Call(name, args) => {
            let arg_values: Result<Vec<Value>, EvalError> =
                args.iter().map(|a| eval_expr(a, env)).collect();
            call_function(name, arg_values?, env)
        }
        Expr::BinOp(op, left, right) => {
            let l = eval_expr(left, env)?;
            let r = eval_expr(right, env)?;
            eval_binop(*op, l, r)
        }
        Expr::Compare(op, left, right) => {
            let l = eval_expr(left, env)?;
            let r = eval_expr(right, env)?;
            eval_compare(*op, l, r)
        }
        Expr::Logical(op, left, right) => {
            let l = eval_expr(left, env)?;
            match (op, l.is_truthy()) {
                (LogicOp::And, false) => Ok(Value::Bool(false)),
                (LogicOp::Or, true) => Ok(Value::Bool(true)),
                _ => Ok(Value::Bool(eval_expr(right, env)?.is_truthy())),
            }
        }
        Expr::Not(inner) => Ok(Value::Bool(!eval_expr(inner, env)?.is_truthy())),
    }
}

/// Function call dispatch precedence: a user-defined function visible from
/// the call site wins; otherwise fall back to a builtin bound as a plain
/// variable; otherwise the name is undefined.
///
/// A user function's call frame is rooted at the *global* environment, not
/// the caller's frame — Djerba has dynamic function lookup with lexical
/// variable scoping restricted to the call frame itself, not true closures.
fn call_function(name: &str, args: Vec<Value>, env: &Rc<Environment>) -> Result<Value, EvalError> {
    if let Some(def) = env.get_func(name) {
        if def.params.len() != args.len() {
            return Err(EvalError::arity_error(
                name,
                def.params.len().to_string(),
                args.len(),
            ));
        }
        let call_frame = Environment::with_parent(root_of(env));
        for (param, value) in def.params.iter().zip(args) {
            call_frame.define(param.clone(), value);
        }
        return match run_block(&def.body, &call_frame)? {
            ControlFlow::Return(v) => Ok(v),
            ControlFlow::Next => Ok(Value::Nil),
            ControlFlow::Break | ControlFlow::Continue => Err(EvalError::ControlFlowError {
                keyword: "break/continue".to_string(),
            }),
        };
    }

    if let Some(Value::Builtin(builtin)) = env.get(name) {
        return builtin.call(&args);
    }

    Err(EvalError::name_error(name.to_string()))
}

/// Walks up the parent chain to the root. Since call frames are always
/// either the root itself or a direct child of it, this is at most one hop
/// in practice, but walking the chain keeps the invariant explicit.
fn root_of(env: &Rc<Environment>) -> Rc<Environment> {
    let mut current = Rc::clone(env);
    while let Some(parent) = current.parent() {
        current = parent;
    }
    current
}

fn index_value(base: &Value, index: &Value) -> Result<Value, EvalError> {
    let i = match index {
        Value::Number(n) => *n as i64,
        other => return Err(EvalError::type_error("index", "number", other)),
    };
    match base {
        Value::List(items) => {
            let items = items.borrow();
            let len = items.len();
            let idx = normalize_index(i, len)?;
            Ok(items[idx].clone())
        }
        Value::Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            let len = chars.len();
            let idx = normalize_index(i, len)?;
            Ok(Value::Str(chars[idx].to_string()))
        }
        other => Err(EvalError::type_error("index", "list or string", other)),
    }
}

fn normalize_index(i: i64, len: usize) -> Result<usize, EvalError> {
    if i < 0 || i as usize >= len {
        return Err(EvalError::IndexError { index: i, len });
    }
    Ok(i as usize)
}

fn eval_binop(op: BinOp, l: Value, r: Value) -> Result<Value, EvalError> {
    if op == BinOp::Add {
        if let (Value::Str(a), Value::Str(b)) = (&l, &r) {
            return Ok(Value::Str(format!("{}{}", a, b)));
        }
        if let (Value::List(a), Value::List(b)) = (&l, &r) {
            let mut combined = a.borrow().clone();
            combined.extend(b.borrow().iter().cloned());
            return Ok(Value::list_from(combined));
        }
    }
    let a = as_number("arithmetic", &l)?;
    let b = as_number("arithmetic", &r)?;
    match op {
        BinOp::Add => Ok(Value::Number(a + b)),
        BinOp::Sub => Ok(Value::Number(a - b)),
        BinOp::Mul => Ok(Value::Number(a * b)),
        BinOp::Div => {
            if b == 0.0 {
                Err(EvalError::ArithError("division by zero".to_string()))
            } else {
                Ok(Value::Number(a / b))
            }
        }
        BinOp::Mod => {
            if b == 0.0 {
                Err(EvalError::ArithError("modulo by zero".to_string()))
            } else {
                Ok(Value::Number(a % b))
            }
        }
        BinOp::Pow => Ok(Value::Number(a.powf(b))),
    }
}

fn eval_compare(op: CmpOp, l: Value, r: Value) -> Result<Value, EvalError> {
    let ordering = match (&l, &r) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ if op == CmpOp::Eq || op == CmpOp::NotEq => {
            return Ok(Value::Bool((l == r) == (op == CmpOp::Eq)));
        }
        _ => {
            return Err(EvalError::type_error(
                "comparison",
                "two numbers or two strings",
                &l,
            ));
        }
    };
    let ordering = ordering.ok_or_else(|| {
        EvalError::ArithError("comparison against a non-finite number".to_string())
    })?;
    use std::cmp::Ordering::*;
    let result = match op {
        CmpOp::Eq => ordering == Equal,
        CmpOp::NotEq => ordering != Equal,
        CmpOp::Lt => ordering == Less,
        CmpOp::LtEq => ordering != Greater,
        CmpOp::Gt => ordering == Greater,
        CmpOp::GtEq => ordering != Less,
    };
    Ok(Value::Bool(result))
}

fn as_number(context: &str, v: &Value) -> Result<f64, EvalError> {
    match v {
        Value::Number(n) => Ok(*n),
        other => Err(EvalError::type_error(context, "number", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn run(src: &str) -> Rc<Environment> {
        let tokens = Lexer::new(src).tokenize().unwrap();
        let program = Parser::new(tokens).parse().unwrap();
        let root = Environment::new();
        crate::builtins::register_builtins(&root);
        run_block(&program.statements, &root).unwrap();
        root
    }

    #[test]
    fn test_precedence_law() {
        let tokens = Lexer::new("$x <- 2 + 3 * 4").tokenize().unwrap();
        let program = Parser::new(tokens).parse().unwrap();
        let root = Environment::new();
        run_block(&program.statements, &root).unwrap();
        assert_eq!(root.get("x"), Some(Value::Number(14.0)));
    }

    #[test]
    fn test_assignment_scoping_law_across_function_call() {
        let root = run(
            "$x <- 1
             @ bump() { $x <- $x + 1 }
             bump()",
        );
        assert_eq!(root.get("x"), Some(Value::Number(2.0)));
    }

    #[test]
    fn test_function_isolation_law_params_not_visible_outside() {
        let root = run("@ f(a) { !> a } f(5)");
        assert!(root.get("a").is_none());
    }

    #[test]
    fn test_short_circuit_and_does_not_evaluate_rhs() {
        let root = run(
            "$calls <- 0
             @ tick() { $calls <- $calls + 1 !> true }
             $r <- false and tick()",
        );
        assert_eq!(root.get("calls"), Some(Value::Number(0.0)));
    }

    #[test]
    fn test_short_circuit_or_does_not_evaluate_rhs() {
        let root = run(
            "$calls <- 0
             @ tick() { $calls <- $calls + 1 !> true }
             $r <- true or tick()",
        );
        assert_eq!(root.get("calls"), Some(Value::Number(0.0)));
    }

    #[test]
    fn test_list_aliasing_law() {
        let root = run(
            "$a <- [1, 2]
             $b <- $a
             push($b, 3)",
        );
        assert_eq!(root.get("a"), root.get("b"));
    }

    #[test]
    fn test_control_flow_law_break_exits_nearest_loop() {
        let root = run(
            "$count <- 0
             ~ true {
                 $count <- $count + 1
                 ? $count == 3 { break }
             }",
        );
        assert_eq!(root.get("count"), Some(Value::Number(3.0)));
    }

    #[test]
    fn test_index_error_out_of_range() {
        let tokens = Lexer::new("$x <- [1,2][5]").tokenize().unwrap();
        let program = Parser::new(tokens).parse().unwrap();
        let root = Environment::new();
        let err = run_block(&program.statements, &root).unwrap_err();
        assert!(matches!(err, EvalError::IndexError { .. }));
    }

    #[test]
    fn test_division_by_zero_is_arith_error() {
        let tokens = Lexer::new("$x <- 1 / 0").tokenize().unwrap();
        let program = Parser::new(tokens).parse().unwrap();
        let root = Environment::new();
        let err = run_block(&program.statements, &root).unwrap_err();
        assert!(matches!(err, EvalError::ArithError(_)));
    }
}
