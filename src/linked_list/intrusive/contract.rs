use core::fmt;

/// Whether contract checks are compiled in.
///
/// Checks are on in debug builds and whenever the `strict` feature is
/// enabled. With checks off a violated precondition leaves the list in an
/// unspecified (but memory-safe as far as the caller upheld the `unsafe`
/// contracts) state.
pub const CHECKED: bool = cfg!(any(debug_assertions, feature = "strict"));

/// The programmer errors the lists detect.
///
/// None of them is recoverable: a detected violation panics with the
/// message `contract violation: <display>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// A node was linked while it was still part of a list.
    AlreadyLinked,
    /// A node was inserted next to an anchor that is not part of a cycle.
    DetachedAnchor,
    /// A dynamic list was used before `init`.
    UninitializedHead,
    /// A dynamic node was dropped while still linked.
    DroppedWhileLinked,
    /// A dynamic list was dropped with elements still linked.
    DroppedNonEmpty,
    /// The end position was dereferenced.
    PastTheEnd,
    /// A cursor was moved away from a node that had been unlinked.
    StaleIterator,
    /// A node has exactly one null neighbour.
    InconsistentLinks,
}

impl Violation {
    pub const fn message(self) -> &'static str {
        match self {
            Violation::AlreadyLinked => "node is already linked",
            Violation::DetachedAnchor => "anchor node is not linked",
            Violation::UninitializedHead => "dynamic list used before init",
            Violation::DroppedWhileLinked => "node dropped while linked",
            Violation::DroppedNonEmpty => "list dropped while not empty",
            Violation::PastTheEnd => "dereferenced the end position",
            Violation::StaleIterator => "cursor advanced from an unlinked node",
            Violation::InconsistentLinks => "node has exactly one null link",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cold]
#[track_caller]
pub(crate) fn violated(violation: Violation) -> ! {
    panic!("contract violation: {violation}")
}

/// Panics with `$violation` when checks are compiled in and `$cond` is false.
macro_rules! contract {
    ($cond:expr, $violation:expr $(,)?) => {
        if $crate::linked_list::intrusive::contract::CHECKED && !$cond {
            $crate::linked_list::intrusive::contract::violated($violation);
        }
    };
}

pub(crate) use contract;
