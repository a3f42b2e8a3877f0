use super::{
    contract::{Violation, contract},
    links::RawLinks,
    traits::Links,
};

/// Links of the lazily initialised flavor.
///
/// Nothing is written at construction: the all-null state is what zeroed
/// static storage already holds, so a registrar declared as a `static` is
/// usable before any code has run for it. The first operation that needs a
/// cycle turns the null pair into a cycle of one.
///
/// These nodes are meant for objects that live for the whole program, so
/// dropping one while linked is not checked.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct StaticDoubleListLinks {
    raw: RawLinks,
}

impl StaticDoubleListLinks {
    pub const fn new() -> Self {
        Self {
            raw: RawLinks::new(),
        }
    }
}

unsafe impl Links for StaticDoubleListLinks {
    const STATICALLY_ALLOCATED: bool = true;

    #[allow(clippy::declare_interior_mutable_const)]
    const NEW: Self = Self::new();

    #[inline]
    fn raw(&self) -> &RawLinks {
        &self.raw
    }

    fn linked(&self) -> bool {
        if self.raw.has_neighbours() {
            return true;
        }
        contract!(self.raw.is_null(), Violation::InconsistentLinks);
        false
    }

    #[inline]
    unsafe fn bootstrap(&self) {
        if self.uninitialized() {
            self.raw.point_to_self();
        }
    }
}

unsafe impl Send for StaticDoubleListLinks {}
