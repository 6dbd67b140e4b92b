//! Lexically-scoped variable bindings with a parent chain.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::value::Value;

struct EnvironmentData {
    store: HashMap<String, Value>,
    parent: Option<Environment>,
}

/// A single frame of bindings, cheaply cloneable and shared by reference.
/// Closures capture this handle, not a snapshot, so mutations through a
/// shared parent are visible to every closure holding it.
#[derive(Clone)]
pub struct Environment(Rc<RefCell<EnvironmentData>>);

impl Environment {
    #[must_use]
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(EnvironmentData {
            store: HashMap::new(),
            parent: None,
        })))
    }

    /// A child frame whose lookups fall back to `parent` on miss.
    #[must_use]
    pub fn new_enclosed(parent: &Environment) -> Self {
        Self(Rc::new(RefCell::new(EnvironmentData {
            store: HashMap::new(),
            parent: Some(parent.clone()),
        })))
    }

    /// Walks from this frame up through parents, returning the first match.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        let data = self.0.borrow();
        match data.store.get(name) {
            Some(value) => Some(value.clone()),
            None => data.parent.as_ref().and_then(|parent| parent.get(name)),
        }
    }

    /// Always writes into this frame, never a parent.
    pub fn set(&self, name: String, value: Value) {
        self.0.borrow_mut().store.insert(name, value);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_in_same_frame() {
        let env = Environment::new();
        env.set("x".to_string(), Value::Integer(5));
        assert_eq!(env.get("x"), Some(Value::Integer(5)));
    }

    #[test]
    fn missing_binding_is_none() {
        let env = Environment::new();
        assert_eq!(env.get("missing"), None);
    }

    #[test]
    fn child_sees_parent_bindings() {
        let parent = Environment::new();
        parent.set("x".to_string(), Value::Integer(1));
        let child = Environment::new_enclosed(&parent);
        assert_eq!(child.get("x"), Some(Value::Integer(1)));
    }

    #[test]
    fn set_never_writes_through_to_parent() {
        let parent = Environment::new();
        parent.set("x".to_string(), Value::Integer(1));
        let child = Environment::new_enclosed(&parent);
        child.set("x".to_string(), Value::Integer(2));
        assert_eq!(child.get("x"), Some(Value::Integer(2)));
        assert_eq!(parent.get("x"), Some(Value::Integer(1)));
    }

    #[test]
    fn mutation_through_shared_parent_is_visible_to_other_holders() {
        let parent = Environment::new();
        let held_by_closure_a = parent.clone();
        let held_by_closure_b = parent.clone();
        held_by_closure_a.set("x".to_string(), Value::Integer(42));
        assert_eq!(held_by_closure_b.get("x"), Some(Value::Integer(42)));
    }
}
