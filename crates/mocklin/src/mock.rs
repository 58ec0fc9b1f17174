use std::cell::RefCell;
use std::rc::{Rc, Weak};

use mocklin_value::{Matcher, Value};

use crate::error::MockError;
use crate::invocation::Invocation;
use crate::op::{Introspect, OpId};
use crate::proxy::{check_operations, DispatchFn, ProxyBuilder};
use crate::report::{FailureSink, Site, StderrSink};
use crate::stub::{StubImpl, StubRegistry};
use crate::verify::{self, CountPolicy};

struct MockCore {
    interface: String,
    site: Site,
    stubs: StubRegistry,
    ledger: Vec<Invocation>,
    sink: Rc<dyn FailureSink>,
}

/// A mock-object engine instance: one stub registry, one invocation
/// ledger, one synthesized proxy.
///
/// Single-threaded by contract. All registrations, dispatched calls, and
/// verifications must happen on the one logical thread running the test;
/// the engine provides no internal synchronization (`Rc`/`RefCell`, not
/// `Send`/`Sync`), and concurrent mutation is undefined behavior of the
/// test, not something the engine guards against.
///
/// Dropping the `Mock` runs the proxy's disposal hook and invalidates
/// every outstanding [`MockHandle`]; a call dispatched afterwards panics
/// with the mock's construction site.
pub struct Mock {
    core: Rc<RefCell<MockCore>>,
    dispose: Option<Box<dyn FnMut()>>,
}

impl std::fmt::Debug for Mock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mock").finish_non_exhaustive()
    }
}

impl Mock {
    /// Create an engine for the named interface, reporting verification
    /// failures to stderr. The caller's source location is recorded as the
    /// construction site used in fatal dispatch messages.
    #[track_caller]
    pub fn new(interface: &str) -> Mock {
        Mock::with_sink(interface, Rc::new(StderrSink))
    }

    #[track_caller]
    pub fn with_sink(interface: &str, sink: Rc<dyn FailureSink>) -> Mock {
        Mock {
            core: Rc::new(RefCell::new(MockCore {
                interface: interface.to_owned(),
                site: Site::caller(),
                stubs: StubRegistry::default(),
                ledger: Vec::new(),
                sink,
            })),
            dispose: None,
        }
    }

    /// Build the engine and its proxy in one step: enumerate the
    /// interface's operations, reject any the dispatch path cannot forward
    /// (arity above [`MAX_ARITY`](crate::proxy::MAX_ARITY)), and hand the
    /// builder a dispatch callback over a fresh handle. The returned
    /// target routes every operation into this mock until the mock is
    /// dropped.
    #[track_caller]
    pub fn synthesize<B: ProxyBuilder>(
        interface: &str,
        introspect: &dyn Introspect,
        builder: &B,
    ) -> Result<(Mock, B::Target), MockError> {
        Mock::synthesize_with_sink(interface, introspect, builder, Rc::new(StderrSink))
    }

    #[track_caller]
    pub fn synthesize_with_sink<B: ProxyBuilder>(
        interface: &str,
        introspect: &dyn Introspect,
        builder: &B,
        sink: Rc<dyn FailureSink>,
    ) -> Result<(Mock, B::Target), MockError> {
        let operations = introspect.operations();
        check_operations(&operations)?;

        let mut mock = Mock::with_sink(interface, sink);
        let handle = mock.handle();
        let dispatch: DispatchFn = Rc::new(move |op, args| handle.dispatch(op, args));
        let parts = builder.build(&operations, dispatch)?;
        mock.dispose = Some(parts.dispose);
        Ok((mock, parts.target))
    }

    pub fn interface(&self) -> String {
        self.core.borrow().interface.clone()
    }

    pub fn construction_site(&self) -> Site {
        self.core.borrow().site
    }

    /// The non-owning back-reference a proxy holds. Handles never keep the
    /// engine alive; dispatch through a handle whose engine was dropped is
    /// fatal.
    pub fn handle(&self) -> MockHandle {
        let core = self.core.borrow();
        MockHandle {
            core: Rc::downgrade(&self.core),
            interface: core.interface.clone(),
            site: core.site,
        }
    }

    /// Register a canned behavior for one operation.
    pub fn given(&self, op: OpId) -> GivenBuilder {
        GivenBuilder {
            core: Rc::clone(&self.core),
            op,
            matchers: None,
        }
    }

    /// Build a targeted verification for one operation.
    pub fn verify(&self, op: OpId) -> VerifyBuilder {
        VerifyBuilder {
            core: Rc::clone(&self.core),
            op,
            matchers: None,
        }
    }

    /// Blanket check: every recorded invocation must already have been
    /// consumed by a targeted verification. Reports through the sink; marks
    /// nothing.
    #[track_caller]
    pub fn verify_all(&self) {
        let site = Site::caller();
        let core = self.core.borrow();
        let subject = format!("the {} mock", core.interface);
        verify::verify_all(&core.ledger, &subject, core.sink.as_ref(), site);
    }

    /// Snapshot of the ledger, in call order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.core.borrow().ledger.clone()
    }

    /// JSON dump of the ledger, for debugging a failing test.
    pub fn ledger_json(&self) -> Result<String, MockError> {
        serde_json::to_string_pretty(&self.core.borrow().ledger)
            .map_err(|e| MockError::Snapshot(e.to_string()))
    }
}

impl Drop for Mock {
    fn drop(&mut self) {
        if let Some(mut dispose) = self.dispose.take() {
            dispose();
        }
    }
}

/// Weak handle from a proxy back to its engine. Cloneable so one proxy can
/// wire several operations to the same engine.
#[derive(Clone)]
pub struct MockHandle {
    core: Weak<RefCell<MockCore>>,
    interface: String,
    site: Site,
}

impl MockHandle {
    /// The uniform interception point (the proxy dispatch contract).
    ///
    /// Resolves the call against the stub registry; on success appends an
    /// invocation to the ledger, runs the stub's implementation, and
    /// returns its result.
    ///
    /// # Panics
    ///
    /// Panics if the owning engine was dropped, or if no registered stub
    /// accepts the call. Both are defects in the test itself, so the
    /// message names the operation and the mock's construction site rather
    /// than returning an error the test could swallow. An unstubbed call
    /// never reaches the ledger.
    pub fn dispatch(&self, op: &OpId, args: Vec<Value>) -> Value {
        let core = match self.core.upgrade() {
            Some(core) => core,
            None => panic!(
                "the {} mock created at {} was dropped; a call to {op} arrived after teardown",
                self.interface, self.site
            ),
        };

        let imp: StubImpl = {
            let core = core.borrow();
            match core.stubs.resolve(op, &args) {
                Some(stub) => Rc::clone(&stub.imp),
                None => panic!(
                    "no stub for {op} on the {} mock created at {}",
                    self.interface, self.site
                ),
            }
        };

        // Record first, then run: the implementation may dispatch back
        // into this mock, so the registry/ledger borrows are released
        // before it executes.
        core.borrow_mut()
            .ledger
            .push(Invocation::new(op.clone(), args.clone()));
        imp(&args)
    }

    pub fn is_live(&self) -> bool {
        self.core.strong_count() > 0
    }
}

/// Builder for a stub registration: `mock.given(op).with_args(...).will(...)`.
pub struct GivenBuilder {
    core: Rc<RefCell<MockCore>>,
    op: OpId,
    matchers: Option<Vec<Box<dyn Matcher>>>,
}

impl GivenBuilder {
    /// Constrain the stub to arguments accepted by these matchers,
    /// compared positionally over the overlapping prefix.
    pub fn with_args(mut self, matchers: Vec<Box<dyn Matcher>>) -> Self {
        self.matchers = Some(matchers);
        self
    }

    /// Register with an implementation over the raw argument list.
    pub fn will(self, imp: impl Fn(&[Value]) -> Value + 'static) {
        self.core
            .borrow_mut()
            .stubs
            .register(self.op, self.matchers, Rc::new(imp));
    }

    /// Register with a fixed return value.
    pub fn will_return(self, value: impl Into<Value>) {
        let value = value.into();
        self.will(move |_| value.clone());
    }
}

/// Builder for a targeted verification:
/// `mock.verify(op).with_args(...).was_called_exactly(n)`.
///
/// Each terminal evaluates the count policy over the unverified ledger
/// entries for this operation that pass the matchers. Success consumes
/// those entries (they can never satisfy a later verification); failure
/// consumes nothing and reports expected vs actual through the sink with
/// the caller's source location.
pub struct VerifyBuilder {
    core: Rc<RefCell<MockCore>>,
    op: OpId,
    matchers: Option<Vec<Box<dyn Matcher>>>,
}

impl VerifyBuilder {
    pub fn with_args(mut self, matchers: Vec<Box<dyn Matcher>>) -> Self {
        self.matchers = Some(matchers);
        self
    }

    /// At least once.
    #[track_caller]
    pub fn was_called(self) {
        self.finish(
            CountPolicy::Between {
                at_least: 1,
                at_most: usize::MAX,
            },
            Site::caller(),
        );
    }

    #[track_caller]
    pub fn was_called_exactly(self, n: usize) {
        self.finish(CountPolicy::Exactly(n), Site::caller());
    }

    #[track_caller]
    pub fn was_called_at_least(self, at_least: usize) {
        self.finish(
            CountPolicy::Between {
                at_least,
                at_most: usize::MAX,
            },
            Site::caller(),
        );
    }

    #[track_caller]
    pub fn was_called_at_most(self, at_most: usize) {
        self.finish(
            CountPolicy::Between {
                at_least: 1,
                at_most,
            },
            Site::caller(),
        );
    }

    #[track_caller]
    pub fn was_called_between(self, at_least: usize, at_most: usize) {
        self.finish(CountPolicy::Between { at_least, at_most }, Site::caller());
    }

    fn finish(self, policy: CountPolicy, site: Site) {
        let mut core = self.core.borrow_mut();
        let sink = Rc::clone(&core.sink);
        let subject = format!("{} on the {} mock", self.op, core.interface);
        verify::run_verification(
            &mut core.ledger,
            Some(&self.op),
            self.matchers.as_deref(),
            policy,
            &subject,
            sink.as_ref(),
            site,
        );
    }
}
