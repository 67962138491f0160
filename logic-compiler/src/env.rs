use logic_syntax::NodeId;
use std::collections::HashMap;

pub type Scope = HashMap<String, NodeId>;

/// A stack of lexical scopes, innermost last.
#[derive(Debug)]
pub struct Env(Vec<Scope>);

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

impl Env {
    pub fn new() -> Self {
        Env(vec![Scope::new()])
    }

    pub fn declare(&mut self, name: String, declaration: NodeId) {
        if let Some(scope) = self.0.last_mut() {
            scope.insert(name, declaration);
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&NodeId> {
        self.0.iter().rev().find_map(|s| s.get(name))
    }

    pub fn open(&mut self) {
        self.0.push(Scope::new());
    }

    pub fn close(&mut self) {
        self.0.pop();
    }
}
