use std::collections::HashSet;
use std::sync::Mutex;

use super::Control;

/// Controls whose mutation is in flight.
#[derive(Default)]
pub(super) struct BusySet {
    controls: Mutex<HashSet<Control>>,
}

impl BusySet {
    pub fn controls(&self) -> Vec<Control> {
        self.lock().iter().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<Control>> {
        self.controls.lock().unwrap_or_else(|p| p.into_inner())
    }
}

/// Marks a control busy for as long as it lives, including when the owning
/// future is dropped mid-flight.
pub(super) struct BusyGuard<'a> {
    set: &'a BusySet,
    control: Control,
}

impl<'a> BusyGuard<'a> {
    pub fn acquire(set: &'a BusySet, control: Control) -> Option<Self> {
        if set.lock().insert(control.clone()) {
            Some(Self { set, control })
        } else {
            None
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.set.lock().remove(&self.control);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ga_core::mutation::OperationKind;
    use ga_core::RecordId;

    fn approve(id: &str) -> Control {
        Control {
            operation: OperationKind::Approve,
            target: Some(RecordId::from(id)),
        }
    }

    #[test]
    fn test_guard_blocks_same_control_until_dropped() {
        let set = BusySet::default();
        let guard = BusyGuard::acquire(&set, approve("j1")).unwrap();
        assert!(BusyGuard::acquire(&set, approve("j1")).is_none());
        assert!(BusyGuard::acquire(&set, approve("j2")).is_some());

        drop(guard);
        assert!(BusyGuard::acquire(&set, approve("j1")).is_some());
    }
}
