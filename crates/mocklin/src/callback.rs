use std::cell::RefCell;
use std::rc::Rc;

use mocklin_value::{Matcher, Value};

use crate::invocation::Invocation;
use crate::op::OpId;
use crate::report::{FailureSink, Site, StderrSink};
use crate::verify::{self, CountPolicy};

/// The reduced, single-operation sibling of [`Mock`](crate::mock::Mock):
/// records calls made into a user-supplied closure instead of intercepted
/// interface operations. There is no stub registry — `invoke` appends to
/// the ledger directly — and verification reuses the engine's arithmetic
/// unchanged over the one implicit operation.
///
/// Interior mutability lets the closure under test capture a shared
/// reference while the test keeps another for verification. Same
/// single-threaded contract as `Mock`.
pub struct Callback {
    ledger: RefCell<Vec<Invocation>>,
    sink: Rc<dyn FailureSink>,
}

impl Callback {
    pub fn new() -> Callback {
        Callback::with_sink(Rc::new(StderrSink))
    }

    pub fn with_sink(sink: Rc<dyn FailureSink>) -> Callback {
        Callback {
            ledger: RefCell::new(Vec::new()),
            sink,
        }
    }

    /// Record one call. No resolution step: there is nothing to resolve
    /// against, so every invocation enters the ledger.
    pub fn invoke(&self, args: Vec<Value>) {
        let arity = args.len() as u8;
        self.ledger
            .borrow_mut()
            .push(Invocation::new(OpId::new("callback", arity), args));
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.ledger.borrow().clone()
    }

    /// Blanket check: every recorded call must have been consumed by a
    /// targeted verification.
    #[track_caller]
    pub fn verify_all(&self) {
        let site = Site::caller();
        verify::verify_all(
            &self.ledger.borrow(),
            "the callback",
            self.sink.as_ref(),
            site,
        );
    }

    #[track_caller]
    pub fn verify_exactly(&self, n: usize) {
        self.finish(CountPolicy::Exactly(n), None, Site::caller());
    }

    #[track_caller]
    pub fn verify_exactly_with(&self, n: usize, matchers: Vec<Box<dyn Matcher>>) {
        self.finish(CountPolicy::Exactly(n), Some(matchers), Site::caller());
    }

    /// At least once.
    #[track_caller]
    pub fn verify_called(&self) {
        self.finish(
            CountPolicy::Between {
                at_least: 1,
                at_most: usize::MAX,
            },
            None,
            Site::caller(),
        );
    }

    fn finish(
        &self,
        policy: CountPolicy,
        matchers: Option<Vec<Box<dyn Matcher>>>,
        site: Site,
    ) {
        verify::run_verification(
            &mut self.ledger.borrow_mut(),
            None,
            matchers.as_deref(),
            policy,
            "the callback",
            self.sink.as_ref(),
            site,
        );
    }
}

impl Default for Callback {
    fn default() -> Callback {
        Callback::new()
    }
}
