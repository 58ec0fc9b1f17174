use std::collections::VecDeque;
use std::rc::Rc;

use mocklin_value::{matches_prefix, Matcher, Value};

use crate::op::OpId;

pub type StubImpl = Rc<dyn Fn(&[Value]) -> Value>;

/// One registered behavior: an operation, an optional matcher list, and an
/// implementation. Immutable once created. Absent matchers mean "match
/// anything".
pub(crate) struct Stub {
    pub(crate) op: OpId,
    pub(crate) matchers: Option<Vec<Box<dyn Matcher>>>,
    pub(crate) imp: StubImpl,
}

impl Stub {
    fn accepts(&self, args: &[Value]) -> bool {
        match &self.matchers {
            Some(matchers) => matches_prefix(matchers, args),
            None => true,
        }
    }
}

/// Ordered collection of stubs, most-recently-registered first, so a later
/// registration shadows earlier ones whenever their matchers overlap.
#[derive(Default)]
pub(crate) struct StubRegistry {
    stubs: VecDeque<Stub>,
}

impl StubRegistry {
    pub(crate) fn register(
        &mut self,
        op: OpId,
        matchers: Option<Vec<Box<dyn Matcher>>>,
        imp: StubImpl,
    ) {
        self.stubs.push_front(Stub { op, matchers, imp });
    }

    /// First stub (in registry order) whose operation equals the query and
    /// whose matchers accept the arguments. `None` means the caller must
    /// fail fatally: an unstubbed call leaves the proxy's behavior
    /// undefined.
    pub(crate) fn resolve(&self, op: &OpId, args: &[Value]) -> Option<&Stub> {
        self.stubs
            .iter()
            .find(|stub| stub.op == *op && stub.accepts(args))
    }
}
