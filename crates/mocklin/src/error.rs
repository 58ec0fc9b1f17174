use thiserror::Error;

use crate::op::OpId;

/// Recoverable, construction-time errors. Malformed test setup discovered
/// at call time (an unstubbed call, a call into a dropped mock) is not an
/// error value: it panics, because the test itself is broken.
#[derive(Debug, Error)]
pub enum MockError {
    #[error("unsupported arity for {op}: {arity} parameters (supported 0..=5)")]
    UnsupportedArity { op: OpId, arity: u8 },

    #[error("proxy construction failed: {0}")]
    ProxyConstruction(String),

    #[error("ledger snapshot failed: {0}")]
    Snapshot(String),
}
