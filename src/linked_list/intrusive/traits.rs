use core::{
    mem,
    pin::Pin,
    ptr::{self, NonNull},
};

use super::{
    contract::{Violation, contract},
    links::RawLinks,
};

/// The capability set shared by both node flavors.
///
/// A flavor decides when a node becomes a valid cycle of one and what
/// `linked` means; the relinking itself is done by [`RawLinks`]. Lists pick
/// their head flavor through a type parameter, so the choice costs nothing
/// at runtime.
///
/// # Safety
///
/// Implementors must be `#[repr(transparent)]` over [`RawLinks`]: lists cast
/// `NonNull<RawLinks>` to `NonNull<Self>` and back. `NEW` must be the all-null
/// state.
pub unsafe trait Links: Sized {
    /// `true` for the lazily initialised flavor whose lists may live in
    /// zero-initialised static storage.
    const STATICALLY_ALLOCATED: bool;

    /// Unlinked links, usable in constant contexts.
    #[allow(clippy::declare_interior_mutable_const)]
    const NEW: Self;

    fn raw(&self) -> &RawLinks;

    /// Whether the node is part of a list.
    fn linked(&self) -> bool;

    /// Establishes the self-referential state if this flavor initialises
    /// lazily and the node is still null.
    ///
    /// # Safety
    ///
    /// The node must not move afterwards while it can be reached through its
    /// own pointers.
    unsafe fn bootstrap(&self);

    /// Whether the node has not been initialised yet.
    #[inline]
    fn uninitialized(&self) -> bool {
        let raw = self.raw();
        raw.next().is_none() || raw.previous().is_none()
    }

    #[inline]
    fn next(&self) -> Option<NonNull<RawLinks>> {
        self.raw().next()
    }

    #[inline]
    fn previous(&self) -> Option<NonNull<RawLinks>> {
        self.raw().previous()
    }

    /// Points both neighbours at this node.
    fn initialize(self: Pin<&Self>) {
        // SAFETY: the raw links are a structurally pinned field.
        unsafe { self.map_unchecked(Self::raw) }.initialize();
    }

    /// Inserts `node` right after this one.
    ///
    /// # Safety
    ///
    /// Both nodes must stay valid and must not move while linked.
    unsafe fn link_next(&self, node: &Self) {
        contract!(!node.linked(), Violation::AlreadyLinked);
        unsafe {
            self.bootstrap();
            self.raw().link_next(node.raw());
        }
    }

    /// Inserts `node` right before this one.
    ///
    /// # Safety
    ///
    /// Same as [`link_next`](Self::link_next).
    unsafe fn link_previous(&self, node: &Self) {
        contract!(!node.linked(), Violation::AlreadyLinked);
        unsafe {
            self.bootstrap();
            self.raw().link_previous(node.raw());
        }
    }

    /// Removes the node from its list. Does nothing if it is not linked.
    #[inline]
    fn unlink(&self) {
        self.raw().unlink();
    }

    /// Resets both pointers to null.
    ///
    /// # Safety
    ///
    /// See [`RawLinks::nullify`].
    #[inline]
    unsafe fn nullify(&self) {
        unsafe { self.raw().nullify() };
    }
}

/// Maps an owning type to the links embedded in it.
///
/// This is the configuration of an [`IntrusiveList`](super::intrusive::IntrusiveList):
/// the owner, the type and offset of its links field, and the value type
/// handed to callers. Usually generated with `#[derive(Intrusive)]` or
/// [`intrusive_adapter!`](crate::intrusive_adapter).
///
/// # Safety
///
/// `OFFSET` must be the byte offset of a field of type `Links` inside
/// `Owner`. `Value` must be `Owner` itself or a type sharing its address and
/// layout, since owner addresses are handed out as `Value` pointers.
pub unsafe trait Adapter {
    type Owner;
    type Links: Links;
    type Value;

    const OFFSET: usize;

    /// Locates the links inside `value`.
    #[inline]
    fn links_of(value: &Self::Value) -> &Self::Links {
        // SAFETY: guaranteed by the trait contract.
        unsafe {
            &*ptr::from_ref(value)
                .cast::<u8>()
                .add(Self::OFFSET)
                .cast::<Self::Links>()
        }
    }

    /// Recovers the value that embeds `links`.
    ///
    /// # Safety
    ///
    /// `links` must point to the links field of a live `Owner`.
    #[inline]
    unsafe fn value_of(links: NonNull<RawLinks>) -> NonNull<Self::Value> {
        unsafe {
            NonNull::new_unchecked(
                links
                    .as_ptr()
                    .cast::<u8>()
                    .sub(Self::OFFSET)
                    .cast::<Self::Value>(),
            )
        }
    }
}

/// Whether `Value` has the size and alignment of `Owner`, as an adapter's
/// value type must. Generated adapters assert this at compile time.
#[doc(hidden)]
pub const fn same_layout<Owner, Value>() -> bool {
    mem::size_of::<Owner>() == mem::size_of::<Value>()
        && mem::align_of::<Owner>() == mem::align_of::<Value>()
}
