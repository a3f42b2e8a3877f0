use core::ptr;

use super::{
    contract::{Violation, contract},
    diag::trace_op,
    links::RawLinks,
    traits::Links,
};

/// Links of the eagerly initialised flavor.
///
/// A list headed by `DoubleListLinks` becomes a valid empty cycle as soon as
/// it is pinned and [`init`](super::list::DoubleList::init)ed. As an element,
/// a node must be unlinked again before it is dropped.
///
/// A cycle of one (an empty head) is not reported as linked.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct DoubleListLinks {
    raw: RawLinks,
}

impl DoubleListLinks {
    pub const fn new() -> Self {
        Self {
            raw: RawLinks::new(),
        }
    }
}

unsafe impl Links for DoubleListLinks {
    const STATICALLY_ALLOCATED: bool = false;

    #[allow(clippy::declare_interior_mutable_const)]
    const NEW: Self = Self::new();

    #[inline]
    fn raw(&self) -> &RawLinks {
        &self.raw
    }

    #[inline]
    fn linked(&self) -> bool {
        self.raw.has_neighbours() && !self.raw.is_self_referential()
    }

    #[inline]
    unsafe fn bootstrap(&self) {}
}

impl Drop for DoubleListLinks {
    fn drop(&mut self) {
        trace_op!("drop", ptr::from_ref(&self.raw));
        contract!(!self.linked(), Violation::DroppedWhileLinked);
    }
}

unsafe impl Send for DoubleListLinks {}
