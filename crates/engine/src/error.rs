use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The caller's cancellation token fired; partial results are dropped.
    #[error("analysis cancelled")]
    Cancelled,
    /// An internal invariant was broken by the engine itself.
    #[error("contract violation: {0}")]
    ContractViolation(&'static str),
}

/// Reports a broken internal invariant. Debug builds stop at the call site.
pub(crate) fn contract_violation(what: &'static str) -> EngineError {
    debug_assert!(false, "contract violation: {what}");
    EngineError::ContractViolation(what)
}
