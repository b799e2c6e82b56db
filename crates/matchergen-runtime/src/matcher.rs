//! The matching protocol implemented by generated matchers.

use std::any::Any;

/// A value that can be handed to a [`Matcher`].
///
/// Implemented for every `'static` type, so `&value` coerces to
/// `&dyn Candidate` without any ceremony.
pub trait Candidate: Any {
    /// Returns `self` as `&dyn Any` for checked downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns the name of the concrete type behind this candidate.
    fn type_name(&self) -> &'static str;
}

impl<T: Any> Candidate for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Three-operation value matching protocol.
pub trait Matcher {
    /// Compares `candidate` against the expected values.
    ///
    /// Returns `true` when the candidate does **not** match: either it is not
    /// of the expected type, or at least one accessor returned a different
    /// value. Each call starts from a fresh comparator.
    fn matches(&mut self, candidate: &dyn Candidate) -> bool;

    /// Renders the actual values of the fields that differed in the last call
    /// to [`Matcher::matches`].
    fn describe_actual(&self) -> String;

    /// Renders the expected values of the fields that differed in the last
    /// call to [`Matcher::matches`].
    fn describe_expected(&self) -> String;
}

/// A failed [`verify`] call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, got {actual}")]
pub struct Mismatch {
    /// Rendering of the expected values that differed.
    pub expected: String,
    /// Rendering of the actual values that differed.
    pub actual: String,
}

/// Runs `matcher` against `candidate`.
///
/// # Errors
///
/// Returns [`Mismatch`] carrying both renderings when the candidate differs.
pub fn verify<M>(matcher: &mut M, candidate: &dyn Candidate) -> Result<(), Mismatch>
where
    M: Matcher + ?Sized,
{
    if matcher.matches(candidate) {
        return Err(Mismatch {
            expected: matcher.describe_expected(),
            actual: matcher.describe_actual(),
        });
    }
    Ok(())
}
