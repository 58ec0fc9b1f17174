pub mod callback;
pub mod error;
pub mod invocation;
pub mod mock;
pub mod op;
pub mod proxy;
pub mod report;
mod stub;
mod verify;

pub use callback::Callback;
pub use error::MockError;
pub use invocation::Invocation;
pub use mock::{GivenBuilder, Mock, MockHandle, VerifyBuilder};
pub use op::{Introspect, OpId};
pub use proxy::{check_operations, DispatchFn, ProxyBuilder, ProxyParts, MAX_ARITY};
pub use report::{FailureSink, RecordingSink, Site, StderrSink};
pub use verify::CountPolicy;
