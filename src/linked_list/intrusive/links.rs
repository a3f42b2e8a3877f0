use core::{
    cell::Cell,
    marker::PhantomPinned,
    pin::Pin,
    ptr::{self, NonNull},
};

use super::{
    contract::{Violation, contract},
    diag::trace_op,
};

/// The pair of neighbour pointers every list node is built on.
///
/// `RawLinks` carries the relinking algorithms but no initialisation
/// policy; [`DoubleListLinks`](super::double::DoubleListLinks) and
/// [`StaticDoubleListLinks`](super::static_double::StaticDoubleListLinks)
/// wrap it and decide when the self-referential "empty" state is
/// established.
///
/// The pointers never own anything. A fresh value is all zeros, so it can
/// live in zero-initialised static storage.
#[derive(Debug)]
pub struct RawLinks {
    previous: Cell<Option<NonNull<RawLinks>>>,
    next: Cell<Option<NonNull<RawLinks>>>,
    _pin: PhantomPinned,
}

impl RawLinks {
    /// Creates unlinked links, both pointers null.
    pub const fn new() -> Self {
        Self {
            previous: Cell::new(None),
            next: Cell::new(None),
            _pin: PhantomPinned,
        }
    }

    #[inline]
    pub fn next(&self) -> Option<NonNull<RawLinks>> {
        self.next.get()
    }

    #[inline]
    pub fn previous(&self) -> Option<NonNull<RawLinks>> {
        self.previous.get()
    }

    /// Overwrites the next pointer.
    ///
    /// # Safety
    ///
    /// `next` must be null or point to links that stay valid while this node
    /// can reach them. The cycle is not repaired.
    #[inline]
    pub unsafe fn set_next(&self, next: Option<NonNull<RawLinks>>) {
        self.next.set(next);
    }

    /// Overwrites the previous pointer.
    ///
    /// # Safety
    ///
    /// Same as [`set_next`](Self::set_next).
    #[inline]
    pub unsafe fn set_previous(&self, previous: Option<NonNull<RawLinks>>) {
        self.previous.set(previous);
    }

    #[inline]
    pub fn as_ptr(&self) -> NonNull<RawLinks> {
        NonNull::from(self)
    }

    /// Both pointers are null.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.next.get().is_none() && self.previous.get().is_none()
    }

    /// Both pointers are non-null.
    #[inline]
    pub fn has_neighbours(&self) -> bool {
        self.next.get().is_some() && self.previous.get().is_some()
    }

    /// The node is a cycle of one.
    #[inline]
    pub fn is_self_referential(&self) -> bool {
        let me = Some(self.as_ptr());
        self.next.get() == me && self.previous.get() == me
    }

    /// Points both neighbours at this node, the empty state of a head.
    ///
    /// The node must be null or already a cycle of one.
    pub fn initialize(self: Pin<&Self>) {
        contract!(
            self.is_null() || self.is_self_referential(),
            Violation::AlreadyLinked
        );
        self.get_ref().point_to_self();
    }

    pub(crate) fn point_to_self(&self) {
        trace_op!("initialize", ptr::from_ref(self));
        let me = Some(self.as_ptr());
        self.previous.set(me);
        self.next.set(me);
    }

    /// Inserts `node` right after this one.
    ///
    /// # Safety
    ///
    /// `node` must be unlinked. Both nodes must stay valid and must not move
    /// for as long as either is linked into the cycle this creates.
    pub unsafe fn link_next(&self, node: &RawLinks) {
        trace_op!("link_next", ptr::from_ref(self), ptr::from_ref(node));
        let next = self.anchor_next();
        let node_ptr = node.as_ptr();

        node.previous.set(Some(self.as_ptr()));
        node.next.set(Some(next));

        // Neighbours last: the old next first, then this node.
        unsafe { next.as_ref() }.previous.set(Some(node_ptr));
        self.next.set(Some(node_ptr));
    }

    /// Inserts `node` right before this one.
    ///
    /// # Safety
    ///
    /// Same as [`link_next`](Self::link_next).
    pub unsafe fn link_previous(&self, node: &RawLinks) {
        trace_op!("link_previous", ptr::from_ref(self), ptr::from_ref(node));
        let previous = self.anchor_previous();
        let node_ptr = node.as_ptr();

        node.next.set(Some(self.as_ptr()));
        node.previous.set(Some(previous));

        unsafe { previous.as_ref() }.next.set(Some(node_ptr));
        self.previous.set(Some(node_ptr));
    }

    /// Removes this node from its cycle and nulls both pointers.
    ///
    /// Unlinking a null node, or a cycle of one, does nothing.
    pub fn unlink(&self) {
        if self.is_null() {
            trace_op!("unlink_nop", ptr::from_ref(self));
            return;
        }
        contract!(self.has_neighbours(), Violation::InconsistentLinks);
        if self.is_self_referential() {
            trace_op!("unlink_nop", ptr::from_ref(self));
            return;
        }

        trace_op!("unlink", ptr::from_ref(self));
        if let (Some(previous), Some(next)) = (self.previous.get(), self.next.get()) {
            // SAFETY: linked neighbours stay valid while linked, as promised
            // to `link_next`/`link_previous`.
            unsafe {
                previous.as_ref().next.set(Some(next));
                next.as_ref().previous.set(Some(previous));
            }
        }
        self.reset();
    }

    /// Forces both pointers back to null without touching the neighbours.
    ///
    /// # Safety
    ///
    /// Neighbours still pointing here are left dangling; the caller must have
    /// detached them (for example with a list `clear`).
    #[inline]
    pub unsafe fn nullify(&self) {
        self.reset();
    }

    #[inline]
    pub(crate) fn reset(&self) {
        self.previous.set(None);
        self.next.set(None);
    }

    fn anchor_next(&self) -> NonNull<RawLinks> {
        contract!(self.next.get().is_some(), Violation::DetachedAnchor);
        match self.next.get() {
            Some(next) => next,
            None => {
                self.point_to_self();
                self.as_ptr()
            }
        }
    }

    fn anchor_previous(&self) -> NonNull<RawLinks> {
        contract!(self.previous.get().is_some(), Violation::DetachedAnchor);
        match self.previous.get() {
            Some(previous) => previous,
            None => {
                self.point_to_self();
                self.as_ptr()
            }
        }
    }
}

impl Default for RawLinks {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl Send for RawLinks {}
