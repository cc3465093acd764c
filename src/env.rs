// ABOUTME: Environment module for managing variable bindings, function definitions, and scopes

use crate::ast::Stmt;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A user-defined function: its parameter names and statement body.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
}

#[derive(Debug)]
pub struct Environment {
    vars: RefCell<HashMap<String, Value>>,
    funcs: RefCell<HashMap<String, Rc<FunctionDef>>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a new global environment with no parent.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            vars: RefCell::new(HashMap::new()),
            funcs: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// Creates a new child environment with a parent.
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            vars: RefCell::new(HashMap::new()),
            funcs: RefCell::new(HashMap::new()),
            parent: Some(parent),
        })
    }

    /// Returns this frame's parent, if any.
    pub fn parent(&self) -> Option<Rc<Environment>> {
        self.parent.clone()
    }

    /// Defines a binding in THIS scope (doesn't walk the parent chain).
    pub fn define(&self, name: String, value: Value) {
        self.vars.borrow_mut().insert(name, value);
    }

    /// Looks up a variable in this scope and parent scopes recursively.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.vars.borrow().get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|p| p.get(name))
    }

    /// Assignment scoping law: rebind in the innermost frame that already
    /// holds `name`; otherwise define it fresh in the innermost (current)
    /// frame. Unlike a plain `set`, this never fails — Djerba has no notion
    /// of an undefined-variable assignment error.
    pub fn assign(&self, name: &str, value: Value) {
        if self.vars.borrow().contains_key(name) {
            self.vars.borrow_mut().insert(name.to_string(), value);
            return;
        }
        if let Some(ref parent) = self.parent {
            if parent.has_var(name) {
                parent.assign(name, value);
                return;
            }
        }
        self.vars.borrow_mut().insert(name.to_string(), value);
    }

    fn has_var(&self, name: &str) -> bool {
        self.vars.borrow().contains_key(name)
            || self.parent.as_ref().is_some_and(|p| p.has_var(name))
    }

    /// Defines a function in THIS scope.
    pub fn define_func(&self, name: String, def: FunctionDef) {
        self.funcs.borrow_mut().insert(name, Rc::new(def));
    }

    /// Looks up a function in this scope and parent scopes recursively.
    pub fn get_func(&self, name: &str) -> Option<Rc<FunctionDef>> {
        if let Some(def) = self.funcs.borrow().get(name) {
            return Some(Rc::clone(def));
        }
        self.parent.as_ref().and_then(|p| p.get_func(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_get() {
        let env = Environment::new();
        env.define("x".to_string(), Value::Number(42.0));
        match env.get("x") {
            Some(Value::Number(n)) => assert_eq!(n, 42.0),
            _ => panic!("Expected Number(42.0)"),
        }
    }

    #[test]
    fn test_undefined_symbol() {
        let env = Environment::new();
        assert!(env.get("undefined").is_none());
    }

    #[test]
    fn test_shadowing() {
        let parent = Environment::new();
        parent.define("x".to_string(), Value::Number(42.0));
        let child = Environment::with_parent(parent);
        child.define("x".to_string(), Value::Number(100.0));
        match child.get("x") {
            Some(Value::Number(n)) => assert_eq!(n, 100.0),
            _ => panic!("Expected Number(100.0)"),
        }
    }

    #[test]
    fn test_parent_lookup() {
        let parent = Environment::new();
        parent.define("x".to_string(), Value::Number(42.0));
        let child = Environment::with_parent(parent);
        match child.get("x") {
            Some(Value::Number(n)) => assert_eq!(n, 42.0),
            _ => panic!("Expected Number(42.0)"),
        }
    }

    #[test]
    fn test_multiple_levels() {
        let grandparent = Environment::new();
        grandparent.define("a".to_string(), Value::Number(1.0));
        let parent = Environment::with_parent(grandparent);
        parent.define("b".to_string(), Value::Number(2.0));
        let child = Environment::with_parent(parent);
        child.define("c".to_string(), Value::Number(3.0));

        assert_eq!(child.get("a"), Some(Value::Number(1.0)));
        assert_eq!(child.get("b"), Some(Value::Number(2.0)));
        assert_eq!(child.get("c"), Some(Value::Number(3.0)));
    }

    /// Assignment scoping law: assigning an already-bound ancestor variable
    /// rebinds it there instead of shadowing it locally.
    #[test]
    fn test_assign_rebinds_ancestor_in_place() {
        let parent = Environment::new();
        parent.define("x".to_string(), Value::Number(1.0));
        let child = Environment::with_parent(parent.clone());

        child.assign("x", Value::Number(2.0));

        assert_eq!(child.get("x"), Some(Value::Number(2.0)));
        assert_eq!(parent.get("x"), Some(Value::Number(2.0)));
    }

    /// Assignment scoping law: assigning a name that exists nowhere in the
    /// chain defines it locally rather than erroring.
    #[test]
    fn test_assign_defines_locally_when_absent() {
        let parent = Environment::new();
        let child = Environment::with_parent(parent.clone());

        child.assign("y", Value::Number(3.0));

        assert_eq!(child.get("y"), Some(Value::Number(3.0)));
        assert!(parent.get("y").is_none());
    }

    #[test]
    fn test_func_define_and_lookup_through_chain() {
        let parent = Environment::new();
        parent.define_func(
            "f".to_string(),
            FunctionDef {
                params: vec!["a".to_string()],
                body: vec![],
            },
        );
        let child = Environment::with_parent(parent);
        assert!(child.get_func("f").is_some());
        assert!(child.get_func("missing").is_none());
    }
}
