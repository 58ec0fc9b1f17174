use std::rc::Rc;

use mocklin_value::Value;

use crate::error::MockError;
use crate::op::OpId;

/// Maximum declared parameter count a synthesized proxy may forward.
pub const MAX_ARITY: u8 = 5;

/// The uniform interception callback every synthesized operation funnels
/// into: operation id plus argument list in, result out.
pub type DispatchFn = Rc<dyn Fn(&OpId, Vec<Value>) -> Value>;

/// What a proxy builder hands back: the live target instance and a
/// disposal hook the engine runs at teardown so the proxy's backing
/// machinery does not outlive the test.
pub struct ProxyParts<T> {
    pub target: T,
    pub dispose: Box<dyn FnMut()>,
}

/// Proxy construction collaborator: given the interface's operation
/// descriptors and the dispatch callback, produce an instance of the
/// target interface whose every operation forwards into that callback.
///
/// In practice this is a hand-written adapter per interface: a struct
/// holding a [`MockHandle`](crate::mock::MockHandle) whose trait impl
/// converts each method's arguments to `Value` and forwards to dispatch.
pub trait ProxyBuilder {
    type Target;

    fn build(
        &self,
        operations: &[OpId],
        dispatch: DispatchFn,
    ) -> Result<ProxyParts<Self::Target>, MockError>;
}

/// Reject descriptors the dispatch path cannot faithfully forward. An
/// operation with more than [`MAX_ARITY`] parameters fails here, loudly,
/// instead of being silently mis-dispatched through a shorter path.
pub fn check_operations(operations: &[OpId]) -> Result<(), MockError> {
    for op in operations {
        if op.arity > MAX_ARITY {
            return Err(MockError::UnsupportedArity {
                op: op.clone(),
                arity: op.arity,
            });
        }
    }
    Ok(())
}
