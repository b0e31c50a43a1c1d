//! Terminal run outcomes.

/// How a run ended.
///
/// `Cancelled` and `NotFound` are first-class outcomes, not errors:
/// the only rejected inputs are caught before a run starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The algorithm ran to completion (sorts).
    Completed,
    /// The cancellation token was observed at a step boundary.
    Cancelled,
    /// A search located its target.
    Found,
    /// A search exhausted its space without a match.
    NotFound,
}

impl Outcome {
    /// True for `Cancelled`.
    pub fn is_cancelled(self) -> bool {
        matches!(self, Outcome::Cancelled)
    }
}
