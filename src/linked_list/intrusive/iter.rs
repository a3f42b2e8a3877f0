use core::{fmt, iter::FusedIterator, marker::PhantomData, ptr::NonNull};

use super::{
    contract::{Violation, contract, violated},
    links::RawLinks,
    traits::Adapter,
};

/// A position in a list, in the manner of a C++ bidirectional iterator.
///
/// A cursor sits either on an element or on the list's sentinel (the `end`
/// position). It moves in both directions and wraps around through the
/// sentinel, since the list is a cycle. Two cursors are equal when they sit
/// on the same node.
///
/// Unlinking the element under a cursor invalidates that cursor; cursors on
/// other elements stay valid.
pub struct Cursor<'a, A: Adapter> {
    node: NonNull<RawLinks>,
    end: NonNull<RawLinks>,
    _marker: PhantomData<&'a A::Value>,
}

impl<'a, A: Adapter> Cursor<'a, A> {
    #[inline]
    pub(crate) fn new(node: NonNull<RawLinks>, end: NonNull<RawLinks>) -> Self {
        Self {
            node,
            end,
            _marker: PhantomData,
        }
    }

    /// Whether the cursor sits on the sentinel.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.node == self.end
    }

    /// The value under the cursor, `None` at the end.
    ///
    /// The reference lives as long as the list borrow; linking promised the
    /// value outlives it.
    #[inline]
    pub fn get(&self) -> Option<&'a A::Value> {
        // SAFETY: linking promised the element outlives every borrow of the
        // list taken while it was linked, and `'a` is such a borrow.
        self.as_ptr().map(|value| unsafe { value.as_ref() })
    }

    /// The value under the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end.
    #[inline]
    pub fn value(&self) -> &'a A::Value {
        match self.get() {
            Some(value) => value,
            None => violated(Violation::PastTheEnd),
        }
    }

    /// Pointer to the value under the cursor, `None` at the end.
    #[inline]
    pub fn as_ptr(&self) -> Option<NonNull<A::Value>> {
        if self.is_end() {
            None
        } else {
            Some(unsafe { A::value_of(self.node) })
        }
    }

    /// Pointer to the links under the cursor; the sentinel at the end.
    #[inline]
    pub fn links_ptr(&self) -> NonNull<RawLinks> {
        self.node
    }

    pub fn move_next(&mut self) {
        let next = unsafe { self.node.as_ref() }.next();
        self.node = self.step(next);
    }

    pub fn move_prev(&mut self) {
        let previous = unsafe { self.node.as_ref() }.previous();
        self.node = self.step(previous);
    }

    fn step(&self, to: Option<NonNull<RawLinks>>) -> NonNull<RawLinks> {
        contract!(to.is_some(), Violation::StaleIterator);
        to.unwrap_or(self.end)
    }
}

impl<A: Adapter> Clone for Cursor<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: Adapter> Copy for Cursor<'_, A> {}

impl<A: Adapter> PartialEq for Cursor<'_, A> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<A: Adapter> Eq for Cursor<'_, A> {}

impl<A: Adapter> fmt::Debug for Cursor<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("node", &self.node)
            .field("end", &self.is_end())
            .finish()
    }
}

/// An iterator over the values of a list, front to back.
///
/// The iterator borrows the list, so a fresh traversal is one
/// [`iter`](super::list::DoubleList::iter) call away.
pub struct Iter<'a, A: Adapter> {
    front: Cursor<'a, A>,
    back: Cursor<'a, A>,
    finished: bool,
}

impl<'a, A: Adapter> Iter<'a, A> {
    /// Creates an iterator over the cycle anchored at `head`.
    pub(crate) fn new(head: &'a RawLinks) -> Self {
        let end = head.as_ptr();
        let front = Cursor::new(head.next().unwrap_or(end), end);
        let back = Cursor::new(head.previous().unwrap_or(end), end);
        Self {
            finished: front.is_end(),
            front,
            back,
        }
    }
}

impl<'a, A: Adapter> Iterator for Iter<'a, A> {
    type Item = &'a A::Value;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let value = self.front.get()?;
        if self.front == self.back {
            self.finished = true;
        } else {
            self.front.move_next();
        }
        Some(value)
    }
}

impl<A: Adapter> DoubleEndedIterator for Iter<'_, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let value = self.back.get()?;
        if self.front == self.back {
            self.finished = true;
        } else {
            self.back.move_prev();
        }
        Some(value)
    }
}

impl<A: Adapter> FusedIterator for Iter<'_, A> {}

impl<A: Adapter> Clone for Iter<'_, A> {
    fn clone(&self) -> Self {
        Self {
            front: self.front,
            back: self.back,
            finished: self.finished,
        }
    }
}
