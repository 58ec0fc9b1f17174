use mocklin_value::Matcher;

use crate::invocation::Invocation;
use crate::op::OpId;
use crate::report::{FailureSink, Site};

/// Count constraint of a verification request.
#[derive(Debug, Clone, Copy)]
pub enum CountPolicy {
    Exactly(usize),
    Between { at_least: usize, at_most: usize },
}

impl CountPolicy {
    fn satisfied_by(&self, count: usize) -> bool {
        match *self {
            CountPolicy::Exactly(n) => count == n,
            CountPolicy::Between { at_least, at_most } => {
                count >= at_least && count <= at_most
            }
        }
    }

    fn expectation(&self, subject: &str, actual: usize) -> String {
        match *self {
            CountPolicy::Exactly(n) => format!(
                "expected {subject} to have been invoked exactly {n} times; \
                 was invoked {actual} times"
            ),
            CountPolicy::Between { at_least, at_most } => format!(
                "expected {subject} to have been invoked at least {at_least} \
                 and at most {at_most} times; was invoked {actual} times"
            ),
        }
    }
}

/// Shared verification arithmetic for `Mock` and `Callback`.
///
/// Candidates are the unverified ledger entries for the target operation
/// (all operations when `op` is `None`) whose arguments pass the matcher
/// prefix rule. On success every candidate is consumed (marked verified)
/// so it can never satisfy a later verification; on failure nothing is
/// marked and the mismatch goes to the failure sink.
pub(crate) fn run_verification(
    ledger: &mut [Invocation],
    op: Option<&OpId>,
    matchers: Option<&[Box<dyn Matcher>]>,
    policy: CountPolicy,
    subject: &str,
    sink: &dyn FailureSink,
    site: Site,
) {
    let candidates: Vec<usize> = ledger
        .iter()
        .enumerate()
        .filter(|(_, inv)| op.is_none_or(|op| inv.op == *op))
        .filter(|(_, inv)| inv.accepts(matchers))
        .filter(|(_, inv)| !inv.verified)
        .map(|(i, _)| i)
        .collect();

    if policy.satisfied_by(candidates.len()) {
        for i in candidates {
            ledger[i].verified = true;
        }
    } else {
        sink.fail(&policy.expectation(subject, candidates.len()), site);
    }
}

/// Blanket check: every ledger entry must already be verified. Pure — no
/// marking happens either way.
pub(crate) fn verify_all(
    ledger: &[Invocation],
    subject: &str,
    sink: &dyn FailureSink,
    site: Site,
) {
    let unverified: Vec<String> = ledger
        .iter()
        .filter(|inv| !inv.verified)
        .map(|inv| inv.to_string())
        .collect();

    if !unverified.is_empty() {
        sink.fail(
            &format!(
                "{} invocations on {subject} were unverified: {}",
                unverified.len(),
                unverified.join(", ")
            ),
            site,
        );
    }
}
