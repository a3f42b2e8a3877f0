use core::{fmt, marker::PhantomData, pin::Pin, ptr, ptr::NonNull};

use super::{
    contract::{Violation, contract},
    diag::{trace_construct, trace_op},
    double::DoubleListLinks,
    iter::{Cursor, Iter},
    links::RawLinks,
    traits::{Adapter, Links},
};

/// The zero-offset adapter: the elements are the links themselves.
pub struct Identity<T>(PhantomData<fn() -> T>);

unsafe impl<T: Links> Adapter for Identity<T> {
    type Owner = T;
    type Links = T;
    type Value = T;

    const OFFSET: usize = 0;
}

/// A circular doubly linked list of link nodes.
///
/// The list owns a single sentinel node of flavor `H` and links elements of
/// type `T` around it. Nothing is allocated and nothing is owned: the list
/// only rewires pointers stored in the elements.
///
/// With `H = DoubleListLinks` the list must be pinned and [`init`]ed before
/// use, and must be empty when dropped. With `H = StaticDoubleListLinks` the
/// list is a valid, uninitialised list as soon as its storage is zeroed and
/// initialises itself on first use.
///
/// [`init`]: Self::init
pub struct DoubleList<T: Links, H: Links = DoubleListLinks> {
    head: H,
    _marker: PhantomData<*const T>,
}

impl<T: Links, H: Links> DoubleList<T, H> {
    /// Creates a list whose head is null, the zero-initialised state.
    pub const fn new() -> Self {
        Self {
            head: H::NEW,
            _marker: PhantomData,
        }
    }

    /// Finishes construction once the list has its final address.
    ///
    /// The dynamic flavor becomes an empty cycle here; calling `init` again
    /// leaves an initialised list as it is. The static flavor is left
    /// untouched and initialises itself on first use.
    pub fn init(self: Pin<&mut Self>) -> Pin<&Self> {
        let this = self.into_ref();
        trace_construct!("init", ptr::from_ref(this.head_links()));
        if !H::STATICALLY_ALLOCATED && this.head.uninitialized() {
            // SAFETY: a list that was never initialised has no elements.
            unsafe { this.clear() };
        }
        this
    }

    /// Whether a static list has not been used yet. Always `false` for the
    /// dynamic flavor.
    #[inline]
    pub fn uninitialized(&self) -> bool {
        H::STATICALLY_ALLOCATED && self.head.uninitialized()
    }

    /// Whether no element is linked.
    pub fn empty(&self) -> bool {
        match self.head_links().next() {
            Some(next) => next == self.head_links().as_ptr(),
            None => true,
        }
    }

    /// Makes the list empty without visiting the elements.
    ///
    /// # Safety
    ///
    /// Elements that were linked keep pointing at their old neighbours and
    /// still read as linked. Each of them must be
    /// [`nullify`](Links::nullify)'d before it is unlinked, linked or dropped
    /// again, since unlinking through the stale pointers rewrites this head.
    pub unsafe fn clear(self: Pin<&Self>) {
        trace_op!("clear", ptr::from_ref(self.head_links()));
        self.head_links().point_to_self();
    }

    /// The first element, `None` when the list is empty.
    pub fn head(&self) -> Option<NonNull<T>> {
        if self.empty() {
            None
        } else {
            self.head_links().next().map(NonNull::cast)
        }
    }

    /// The last element, `None` when the list is empty.
    pub fn tail(&self) -> Option<NonNull<T>> {
        if self.empty() {
            None
        } else {
            self.head_links().previous().map(NonNull::cast)
        }
    }

    /// Links `node` as the last element.
    ///
    /// # Safety
    ///
    /// `node` must stay alive and in place for as long as it is linked, and
    /// the list must outlive its membership. References handed out by
    /// [`iter`](Self::iter) and cursors borrow the list, not the node, so
    /// `node` must also outlive every borrow of the list taken while it was
    /// linked.
    pub unsafe fn link_tail(self: Pin<&Self>, node: Pin<&T>) {
        self.prepare();
        contract!(!node.linked(), Violation::AlreadyLinked);
        unsafe { self.head_links().link_previous(node.get_ref().raw()) };
    }

    /// Links `node` as the first element.
    ///
    /// # Safety
    ///
    /// Same as [`link_tail`](Self::link_tail).
    pub unsafe fn link_head(self: Pin<&Self>, node: Pin<&T>) {
        self.prepare();
        contract!(!node.linked(), Violation::AlreadyLinked);
        unsafe { self.head_links().link_next(node.get_ref().raw()) };
    }

    /// A cursor on the first element, or the end when the list is empty.
    pub fn begin(self: Pin<&Self>) -> Cursor<'_, Identity<T>> {
        self.prepare();
        let head = self.get_ref().head_links();
        Cursor::new(head.next().unwrap_or(head.as_ptr()), head.as_ptr())
    }

    /// A cursor on the sentinel.
    pub fn end(self: Pin<&Self>) -> Cursor<'_, Identity<T>> {
        self.prepare();
        let head = self.get_ref().head_links().as_ptr();
        Cursor::new(head, head)
    }

    pub fn iter(self: Pin<&Self>) -> Iter<'_, Identity<T>> {
        self.prepare();
        Iter::new(self.get_ref().head_links())
    }

    /// Number of linked elements; walks the whole list.
    pub fn count(self: Pin<&Self>) -> usize {
        self.iter().count()
    }

    /// The sentinel's links.
    #[inline]
    pub fn head_links(&self) -> &RawLinks {
        self.head.raw()
    }

    /// Lazily initialises a static head; flags a dynamic head that skipped
    /// `init`.
    pub(crate) fn prepare(self: Pin<&Self>) {
        if self.head.uninitialized() {
            contract!(H::STATICALLY_ALLOCATED, Violation::UninitializedHead);
            self.head_links().point_to_self();
        }
    }
}

impl<T: Links, H: Links> Drop for DoubleList<T, H> {
    fn drop(&mut self) {
        trace_construct!("drop", ptr::from_ref(self.head_links()));
        if !H::STATICALLY_ALLOCATED {
            let empty = self.empty();
            self.head_links().reset();
            contract!(empty, Violation::DroppedNonEmpty);
        }
    }
}

impl<T: Links, H: Links> Default for DoubleList<T, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Links, H: Links> fmt::Debug for DoubleList<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoubleList")
            .field("uninitialized", &self.uninitialized())
            .field("empty", &self.empty())
            .finish()
    }
}

impl<'a, T: Links, H: Links> IntoIterator for Pin<&'a DoubleList<T, H>> {
    type Item = &'a T;
    type IntoIter = Iter<'a, Identity<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

unsafe impl<T: Links + Send, H: Links + Send> Send for DoubleList<T, H> {}
