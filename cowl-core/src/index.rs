use alloc::boxed::Box;
use alloc::vec::Vec;
use core::ptr;
use core::sync::atomic::{AtomicPtr, Ordering};

/// A sorted name → position table for one shape's fields.
pub(crate) struct NameIndex {
    entries: Box<[(&'static str, usize)]>,
}

impl NameIndex {
    pub(crate) fn new(names: impl Iterator<Item = &'static str>) -> Self {
        let mut entries: Vec<(&'static str, usize)> =
            names.enumerate().map(|(pos, name)| (name, pos)).collect();
        entries.sort_unstable_by_key(|&(name, _)| name);
        Self {
            entries: entries.into_boxed_slice(),
        }
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .binary_search_by(|&(probe, _)| probe.cmp(&name))
            .ok()
            .map(|slot| self.entries[slot].1)
    }
}

/// The lazily published index slot embedded in every shape.
///
/// Slot life cycle: empty (null) → building (any number of threads, each
/// with a private candidate) → populated. Population is a single
/// compare-exchange; losers drop their candidate and use the winner's. The
/// slot never goes back to empty, so a published index lives as long as the
/// shape does.
pub(crate) struct NameIndexSlot {
    slot: AtomicPtr<NameIndex>,
}

impl NameIndexSlot {
    pub(crate) const fn new() -> Self {
        Self {
            slot: AtomicPtr::new(ptr::null_mut()),
        }
    }

    /// Returns the published index, building and publishing one if the slot
    /// is still empty. Never blocks on another thread's build.
    pub(crate) fn get_or_build(&self, build: impl FnOnce() -> NameIndex) -> &NameIndex {
        let published = self.slot.load(Ordering::Acquire);
        if !published.is_null() {
            // SAFETY: a non-null slot always holds a `Box::into_raw` pointer
            // that is never freed while the slot is alive.
            return unsafe { &*published };
        }

        let candidate = Box::into_raw(Box::new(build()));
        match self.slot.compare_exchange(
            ptr::null_mut(),
            candidate,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            // SAFETY: we just published `candidate`; it is never freed while
            // the slot is alive.
            Ok(_) => unsafe { &*candidate },
            Err(winner) => {
                // Another thread published first. Both candidates are pure
                // functions of the same field list, so theirs is just as
                // good; ours only cost a redundant build.
                // SAFETY: `candidate` was never published, we still own it.
                drop(unsafe { Box::from_raw(candidate) });
                // SAFETY: same as the fast path above.
                unsafe { &*winner }
            }
        }
    }
}

impl Drop for NameIndexSlot {
    fn drop(&mut self) {
        let published = *self.slot.get_mut();
        if !published.is_null() {
            // SAFETY: exclusive access; the pointer came from `Box::into_raw`
            // and was published exactly once.
            drop(unsafe { Box::from_raw(published) });
        }
    }
}
