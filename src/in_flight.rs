use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A backend write the dashboard may have outstanding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    SendNow,
    Schedule,
    Cancel(i64),
}

/// The writes currently waiting on the backend, shared by every request.
///
/// A second submission of an operation that is already in flight is refused
/// instead of reaching the backend, and pages rendered meanwhile show that
/// operation as busy.
#[derive(Clone, Debug, Default)]
pub struct InFlight {
    operations: Arc<Mutex<HashSet<Operation>>>,
}

/// Marks its operation as in flight until dropped.
#[derive(Debug)]
pub struct InFlightGuard {
    operations: Arc<Mutex<HashSet<Operation>>>,
    operation: Operation,
}

impl InFlight {
    /// Returns `None` when `operation` is already in flight.
    pub fn begin(&self, operation: Operation) -> Option<InFlightGuard> {
        if !lock(&self.operations).insert(operation) {
            return None;
        }

        Some(InFlightGuard {
            operations: self.operations.clone(),
            operation,
        })
    }

    pub fn contains(&self, operation: Operation) -> bool {
        lock(&self.operations).contains(&operation)
    }

    pub fn cancelling(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = lock(&self.operations)
            .iter()
            .filter_map(|operation| match operation {
                Operation::Cancel(id) => Some(*id),
                _ => None,
            })
            .collect();

        ids.sort_unstable();
        ids
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        lock(&self.operations).remove(&self.operation);
    }
}

// The set stays consistent even if a holder panicked.
fn lock(operations: &Mutex<HashSet<Operation>>) -> MutexGuard<'_, HashSet<Operation>> {
    operations.lock().unwrap_or_else(PoisonError::into_inner)
}
