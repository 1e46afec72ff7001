//! The scope guard: apply an overwrite set, run a unit of work, restore.
//!
//! Restoration is tied to the guard's lifetime, not to the unit of work
//! returning a value. A panic unwinding out of the unit of work drops the
//! guard and restores before the panic continues.

use tracing::warn;
use veil_core::PropTarget;

use crate::error::{GuardError, GuardResult, RestoreError};
use crate::overwrite::{Overwrite, Overwrites};
use crate::snapshot::{Prior, Snapshot};

/// An applied overwrite set, armed to restore the captured prior values.
///
/// Obtained from [`PropGuard::apply`]. Dropping the guard restores the
/// target best-effort; call [`PropGuard::restore`] instead to surface
/// write-back failures. Most callers want [`with_props`] rather than the
/// guard itself.
pub struct PropGuard<'a, T: PropTarget + ?Sized> {
    target: &'a mut T,
    snapshot: Snapshot,
    armed: bool,
}

impl<'a, T: PropTarget + ?Sized> PropGuard<'a, T> {
    /// Apply `overwrites` to `target`, capturing prior values.
    ///
    /// Entries are applied in the set's iteration order. `Ignore` keys are
    /// skipped entirely; `Remember` keys are captured without writing. If
    /// a write fails, the keys applied before it are restored and the
    /// failure is returned — the target is never left half-overwritten.
    pub fn apply(target: &'a mut T, overwrites: &Overwrites) -> GuardResult<Self> {
        let mut snapshot = Snapshot::default();
        for (key, directive) in overwrites.iter() {
            match directive {
                Overwrite::Ignore => {}
                Overwrite::Remember => {
                    let prior = Prior::from(target.get_prop(key));
                    snapshot.record(key, prior);
                }
                Overwrite::Set(value) => {
                    let prior = Prior::from(target.get_prop(key));
                    if let Err(source) = target.set_prop(key, value.clone()) {
                        if let Err(err) = restore_into(target, &snapshot) {
                            warn!(key = %key, error = %err, "rollback after failed apply was incomplete");
                        }
                        return Err(GuardError::apply(key, source));
                    }
                    snapshot.record(key, prior);
                }
            }
        }
        Ok(Self {
            target,
            snapshot,
            armed: true,
        })
    }

    /// The captured prior values.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Shared access to the overwritten target.
    pub fn target(&self) -> &T {
        &*self.target
    }

    /// Split borrow for the unit of work: the overwritten target plus the
    /// snapshot of prior values.
    pub fn parts(&mut self) -> (&mut T, &Snapshot) {
        (&mut *self.target, &self.snapshot)
    }

    /// Restore every snapshotted key, in capture order, and disarm.
    ///
    /// Best effort: a failed write-back does not stop the remaining keys
    /// from being restored. All failures are aggregated in the error.
    pub fn restore(mut self) -> GuardResult<()> {
        self.armed = false;
        restore_into(&mut *self.target, &self.snapshot).map_err(GuardError::Restore)
    }
}

impl<T: PropTarget + ?Sized> Drop for PropGuard<'_, T> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        // Unwind path: nothing to return the error to. The unit of work's
        // panic stays the primary failure; write-back failures are logged.
        if let Err(err) = restore_into(self.target, &self.snapshot) {
            warn!(error = %err, "restore during unwind failed");
        }
    }
}

/// Write every snapshotted key back to the target, in capture order.
fn restore_into<T: PropTarget + ?Sized>(
    target: &mut T,
    snapshot: &Snapshot,
) -> Result<(), RestoreError> {
    let mut failures = Vec::new();
    for (key, prior) in snapshot.iter() {
        let outcome = match prior {
            Prior::Present(value) => target.set_prop(key, value.clone()),
            Prior::Absent => target.remove_prop(key),
        };
        if let Err(err) = outcome {
            failures.push((key.to_string(), err));
        }
    }
    if failures.is_empty() {
        Ok(())
    } else {
        Err(RestoreError { failures })
    }
}

/// Overwrite `target`'s properties for the duration of `work`, then
/// restore them.
///
/// The unit of work receives the overwritten target and the snapshot of
/// prior values. Restoration runs on every exit path: after a normal
/// return, and during unwind if the unit of work panics (the panic then
/// continues unchanged). An `Err`-valued result from a fallible unit of
/// work is ordinary data: it is returned unchanged inside `Ok` after
/// restoration.
///
/// With an empty overwrite set this degenerates to calling `work` with an
/// empty snapshot.
pub fn with_props<T, F, R>(target: &mut T, overwrites: &Overwrites, work: F) -> GuardResult<R>
where
    T: PropTarget + ?Sized,
    F: FnOnce(&mut T, &Snapshot) -> R,
{
    let mut guard = PropGuard::apply(target, overwrites)?;
    let (target, snapshot) = guard.parts();
    let result = work(target, snapshot);
    guard.restore()?;
    Ok(result)
}

/// Non-mutating alternative for concurrent contexts: clone the target and
/// apply the `Set` entries to the clone. `Ignore` and `Remember` entries
/// apply nothing. The original target is never touched.
pub fn merged<T>(target: &T, overwrites: &Overwrites) -> GuardResult<T>
where
    T: PropTarget + Clone,
{
    let mut copy = target.clone();
    for (key, directive) in overwrites.iter() {
        if let Overwrite::Set(value) = directive {
            copy.set_prop(key, value.clone())
                .map_err(|source| GuardError::apply(key, source))?;
        }
    }
    Ok(copy)
}
