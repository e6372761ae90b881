use thiserror::Error;

/// Configuration errors caught before any work is dispatched.
///
/// Everything else that can go wrong during a run (lookup failures, a dead
/// passive source) degrades to warnings on the report instead.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("domain must not be empty")]
    EmptyDomain,
    #[error("concurrency must be at least 1")]
    ZeroConcurrency,
}
