use serde::Serialize;
use std::fmt;

use mocklin_value::{matches_prefix, Matcher, Value};

use crate::op::OpId;

/// A recorded, successfully-dispatched call. Appended to the ledger only
/// after a stub resolved; `verified` is the only field that ever changes,
/// and it flips false→true at most once.
#[derive(Debug, Clone, Serialize)]
pub struct Invocation {
    pub op: OpId,
    pub args: Vec<Value>,
    pub(crate) verified: bool,
}

impl Invocation {
    pub(crate) fn new(op: OpId, args: Vec<Value>) -> Self {
        Invocation {
            op,
            args,
            verified: false,
        }
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    /// Positional-prefix match against an optional matcher list; absent
    /// matchers accept anything.
    pub fn accepts(&self, matchers: Option<&[Box<dyn Matcher>]>) -> bool {
        match matchers {
            Some(matchers) => matches_prefix(matchers, &self.args),
            None => true,
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.op)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ")")
    }
}
