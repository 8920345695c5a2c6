use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use smol_str::SmolStr;

use crate::value::{PageAddr, Value};

/// Captured environment of a closure - insertion ordered name/value pairs
#[derive(Clone, Default)]
pub struct Scope {
    vars: Vec<(SmolStr, Value)>,
}

impl Scope {
    pub fn new() -> Self {
        Scope { vars: Vec::new() }
    }

    /// Bind `name`, replacing a previous binding in place
    pub fn insert(&mut self, name: impl Into<SmolStr>, value: Value) {
        let name = name.into();
        match self.vars.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.vars.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.vars
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.vars.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// User-defined function: captured scope + bytecode entry point.
///
/// Copying a closure copies the handle, the scope itself stays shared
/// between the copies (captured variables are mutated through it).
#[derive(Clone)]
pub struct Closure {
    scope: Rc<RefCell<Scope>>,
    page_addr: PageAddr,
}

impl Closure {
    pub fn new(scope: Scope, page_addr: PageAddr) -> Self {
        Closure {
            scope: Rc::new(RefCell::new(scope)),
            page_addr,
        }
    }

    pub fn with_shared_scope(scope: Rc<RefCell<Scope>>, page_addr: PageAddr) -> Self {
        Closure { scope, page_addr }
    }

    #[inline(always)]
    pub fn page_addr(&self) -> PageAddr {
        self.page_addr
    }

    pub fn scope(&self) -> Ref<'_, Scope> {
        self.scope.borrow()
    }

    pub fn scope_mut(&self) -> RefMut<'_, Scope> {
        self.scope.borrow_mut()
    }

    pub fn shared_scope(&self) -> &Rc<RefCell<Scope>> {
        &self.scope
    }

    pub(crate) fn try_scope(&self) -> Option<Ref<'_, Scope>> {
        self.scope.try_borrow().ok()
    }
}

/// Same scope object and same entry point
impl PartialEq for Closure {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.scope, &other.scope) && self.page_addr == other.page_addr
    }
}

/// Lists captured names only, a scope may hold the closure itself
impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Closure");
        out.field("page_addr", &self.page_addr);
        match self.try_scope() {
            Some(scope) => {
                let names: Vec<&str> = scope.iter().map(|(name, _)| name).collect();
                out.field("captures", &names);
            }
            None => {
                out.field("captures", &"<borrowed>");
            }
        }
        out.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_insert_replaces() {
        let mut scope = Scope::new();
        scope.insert("a", Value::number(1.0));
        scope.insert("b", Value::number(2.0));
        scope.insert("a", Value::number(3.0));

        assert_eq!(scope.len(), 2);
        assert_eq!(scope.get("a"), Some(&Value::number(3.0)));
        let names: Vec<&str> = scope.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_copies_share_scope() {
        let c = Closure::new(Scope::new(), 7);
        let copy = c.clone();
        copy.scope_mut().insert("x", Value::string("hi"));

        assert_eq!(c.scope().get("x"), Some(&Value::string("hi")));
        assert_eq!(c, copy);
    }

    #[test]
    fn test_equality_needs_same_scope() {
        let a = Closure::new(Scope::new(), 7);
        let b = Closure::new(Scope::new(), 7);
        let c = Closure::with_shared_scope(a.shared_scope().clone(), 8);

        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_debug_of_self_capturing_closure() {
        let c = Closure::new(Scope::new(), 4);
        c.scope_mut().insert("fact", Value::closure(c.clone()));

        let printed = format!("{:?}", c);
        assert_eq!(printed, "Closure { page_addr: 4, captures: [\"fact\"] }");
        assert!(format!("{:?}", *c.scope()).starts_with("{\"fact\": "));

        // break the cycle so the scope is freed
        c.scope_mut().insert("fact", Value::nil());
    }
}
