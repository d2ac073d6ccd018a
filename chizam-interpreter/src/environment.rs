use crate::object::Object;
use std::collections::HashMap;
use std::rc::Rc;

/// The single flat namespace of a session. Variables and functions share it,
/// and a name can be rebound from one kind of value to another.
#[derive(Debug, PartialEq, Clone)]
pub struct Environment {
    store: HashMap<Rc<str>, Object>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            store: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Object> {
        self.store.get(key)
    }

    pub fn set(&mut self, key: Rc<str>, value: Object) {
        self.store.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Object> {
        self.store.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.store.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
