use core::{fmt, pin::Pin, ptr::NonNull};

use super::{
    double::DoubleListLinks,
    iter::{Cursor, Iter},
    list::DoubleList,
    traits::{Adapter, Links},
};

/// A list of objects that carry their own links.
///
/// The adapter `A` names the owning type, the links field inside it and the
/// value type handed out; `H` picks the head flavor. Going from an owner to
/// its links and back is a constant offset, known at compile time.
///
/// ```
/// use core::pin::pin;
/// use static_lists::intrusive_adapter;
/// use static_lists::linked_list::intrusive::prelude::*;
///
/// struct Driver {
///     name: &'static str,
///     links: DoubleListLinks,
/// }
///
/// intrusive_adapter!(DriverLinks = Driver { links: DoubleListLinks });
///
/// let uart = pin!(Driver { name: "uart", links: DoubleListLinks::new() });
/// let spi = pin!(Driver { name: "spi", links: DoubleListLinks::new() });
///
/// let drivers = pin!(IntrusiveList::<DriverLinks>::new());
/// let drivers = drivers.init();
/// unsafe {
///     drivers.link_tail(uart.as_ref());
///     drivers.link_tail(spi.as_ref());
/// }
///
/// let names: Vec<_> = drivers.iter().map(|d| d.name).collect();
/// assert_eq!(names, ["uart", "spi"]);
///
/// while drivers.unlink_head().is_some() {}
/// ```
pub struct IntrusiveList<A: Adapter, H: Links = DoubleListLinks> {
    list: DoubleList<A::Links, H>,
}

impl<A: Adapter, H: Links> IntrusiveList<A, H> {
    pub const fn new() -> Self {
        Self {
            list: DoubleList::new(),
        }
    }

    /// See [`DoubleList::init`].
    pub fn init(mut self: Pin<&mut Self>) -> Pin<&Self> {
        // SAFETY: `list` is structurally pinned.
        unsafe { self.as_mut().map_unchecked_mut(|this| &mut this.list) }.init();
        self.into_ref()
    }

    /// The underlying list of links.
    #[inline]
    pub fn links(self: Pin<&Self>) -> Pin<&DoubleList<A::Links, H>> {
        // SAFETY: `list` is structurally pinned.
        unsafe { self.map_unchecked(|this| &this.list) }
    }

    #[inline]
    pub fn uninitialized(&self) -> bool {
        self.list.uninitialized()
    }

    #[inline]
    pub fn empty(&self) -> bool {
        self.list.empty()
    }

    /// Makes the list empty without visiting the values.
    ///
    /// # Safety
    ///
    /// See [`DoubleList::clear`].
    pub unsafe fn clear(self: Pin<&Self>) {
        unsafe { self.links().clear() };
    }

    /// The first value, `None` when the list is empty.
    pub fn head(&self) -> Option<NonNull<A::Value>> {
        self.list
            .head()
            .map(|links| unsafe { A::value_of(links.cast()) })
    }

    /// The last value, `None` when the list is empty.
    pub fn tail(&self) -> Option<NonNull<A::Value>> {
        self.list
            .tail()
            .map(|links| unsafe { A::value_of(links.cast()) })
    }

    /// Links `value` as the last element.
    ///
    /// # Safety
    ///
    /// `value` must stay alive and in place for as long as it is linked, and
    /// the list must outlive its membership. References handed out by
    /// [`iter`](Self::iter) and cursors borrow the list, not the value, so
    /// `value` must also outlive every borrow of the list taken while it was
    /// linked.
    pub unsafe fn link_tail(self: Pin<&Self>, value: Pin<&A::Value>) {
        unsafe { self.links().link_tail(Self::links_of(value)) };
    }

    /// Links `value` as the first element.
    ///
    /// # Safety
    ///
    /// Same as [`link_tail`](Self::link_tail).
    pub unsafe fn link_head(self: Pin<&Self>, value: Pin<&A::Value>) {
        unsafe { self.links().link_head(Self::links_of(value)) };
    }

    /// Unlinks the first value and returns it, `None` when the list is
    /// empty.
    pub fn unlink_head(self: Pin<&Self>) -> Option<NonNull<A::Value>> {
        let first = self.list.head()?;
        Some(unsafe { Self::detach(first) })
    }

    /// Unlinks the last value and returns it, `None` when the list is empty.
    pub fn unlink_tail(self: Pin<&Self>) -> Option<NonNull<A::Value>> {
        let last = self.list.tail()?;
        Some(unsafe { Self::detach(last) })
    }

    /// A cursor on the first value, or the end when the list is empty.
    pub fn begin(self: Pin<&Self>) -> Cursor<'_, A> {
        let links = self.links();
        links.prepare();
        let head = links.get_ref().head_links();
        Cursor::new(head.next().unwrap_or(head.as_ptr()), head.as_ptr())
    }

    /// A cursor on the sentinel.
    pub fn end(self: Pin<&Self>) -> Cursor<'_, A> {
        let links = self.links();
        links.prepare();
        let head = links.get_ref().head_links().as_ptr();
        Cursor::new(head, head)
    }

    /// A cursor on `value`.
    ///
    /// # Safety
    ///
    /// `value` must be linked into this list.
    pub unsafe fn cursor_from(self: Pin<&Self>, value: &A::Value) -> Cursor<'_, A> {
        let head = self.get_ref().list.head_links().as_ptr();
        Cursor::new(A::links_of(value).raw().as_ptr(), head)
    }

    pub fn iter(self: Pin<&Self>) -> Iter<'_, A> {
        let links = self.links();
        links.prepare();
        Iter::new(links.get_ref().head_links())
    }

    /// Number of linked values; walks the whole list.
    pub fn count(self: Pin<&Self>) -> usize {
        self.iter().count()
    }

    fn links_of(value: Pin<&A::Value>) -> Pin<&A::Links> {
        // SAFETY: the links are a field of the pinned value.
        unsafe { value.map_unchecked(A::links_of) }
    }

    /// # Safety
    ///
    /// `links` must be an element of this list.
    unsafe fn detach(links: NonNull<A::Links>) -> NonNull<A::Value> {
        unsafe {
            links.as_ref().unlink();
            A::value_of(links.cast())
        }
    }
}

impl<A: Adapter, H: Links> Default for IntrusiveList<A, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Adapter, H: Links> fmt::Debug for IntrusiveList<A, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntrusiveList")
            .field("uninitialized", &self.uninitialized())
            .field("empty", &self.empty())
            .finish()
    }
}

impl<'a, A: Adapter, H: Links> IntoIterator for Pin<&'a IntrusiveList<A, H>> {
    type Item = &'a A::Value;
    type IntoIter = Iter<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

unsafe impl<A: Adapter, H: Links + Send> Send for IntrusiveList<A, H> where A::Value: Send {}
