//! The continue-or-abort decision shared by every remote-call site.
//!
//! Normal mode aborts on the first error. Force mode logs and proceeds past
//! *any* error, including after a failed fork right before the original is
//! deleted. Force is an explicit opt-in hazard for best-effort batch cleanup.

/// `true` when the caller should keep going.
///
/// No error always continues; an error continues only under `force`. Error
/// reporting is the caller's job.
pub fn resolve<E>(err: Option<&E>, force: bool) -> bool {
    match err {
        None => true,
        Some(_) => force,
    }
}

/// Carries the force flag to the components that make remote calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContinuationPolicy {
    force: bool,
}

impl ContinuationPolicy {
    pub fn new(force: bool) -> Self {
        Self { force }
    }

    pub fn force(&self) -> bool {
        self.force
    }

    /// [`resolve`] against this policy's force flag.
    pub fn proceeds<E>(&self, err: Option<&E>) -> bool {
        resolve(err, self.force)
    }

    /// Fold a call result through the policy.
    ///
    /// `Ok(v)` becomes `Ok(Some(v))`; an error becomes `Ok(None)` when the
    /// policy continues and stays `Err` when it aborts.
    pub fn absorb<T, E>(&self, result: Result<T, E>) -> Result<Option<T>, E> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) if self.proceeds(Some(&err)) => Ok(None),
            Err(err) => Err(err),
        }
    }
}
