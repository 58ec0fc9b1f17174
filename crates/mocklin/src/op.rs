use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one interface operation: name plus declared parameter count.
/// Two operations with the same name but different arity are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpId {
    pub name: String,
    pub arity: u8,
}

impl OpId {
    pub fn new(name: impl Into<String>, arity: u8) -> Self {
        OpId {
            name: name.into(),
            arity,
        }
    }
}

impl fmt::Display for OpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}

/// Interface introspection collaborator: enumerates the operations of a
/// target interface, in declaration order. The engine only consumes the
/// list; how it is obtained (codegen, a hand-written table) is the
/// implementor's business.
pub trait Introspect {
    fn operations(&self) -> Vec<OpId>;
}
