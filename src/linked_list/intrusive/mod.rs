//! # Intrusive Circular Lists
//!
//! Doubly linked, circular lists whose nodes live inside the objects they
//! link. Nothing is allocated: a list is one sentinel node, and linking or
//! unlinking an element only rewires the two pointers stored in it.
//!
//! ## Core Components
//!
//! - [`links::RawLinks`]: the pointer pair and the relinking algorithms.
//! - [`double::DoubleListLinks`]: the eager flavor. A list headed by it is
//!   pinned and [`init`](list::DoubleList::init)ed, and must be empty when
//!   dropped.
//! - [`static_double::StaticDoubleListLinks`]: the lazy flavor. All-zero
//!   storage is a valid uninitialised list, so registrars can be `static`s
//!   that other statics link into before `main`.
//! - [`list::DoubleList`]: the list container, over link nodes.
//! - [`intrusive::IntrusiveList`]: the same list over owning objects,
//!   configured by an [`traits::Adapter`].
//! - [`iter::Cursor`] and [`iter::Iter`]: bidirectional traversal.
//!
//! ## Safety
//!
//! Linking is `unsafe`. The caller promises that:
//!
//! - A linked node stays alive and in place until it is unlinked, and past
//!   that for as long as a borrow of the list taken while it was linked is
//!   alive. Iterators and cursors hand out references tied to the list
//!   borrow, not to the node.
//! - A node is in at most one list through the same links field.
//! - No node is linked or unlinked while a traversal is running, except the
//!   element a cursor has already moved past.
//!
//! Precondition violations that can be detected (linking a linked node,
//! using a dynamic list before `init`, dropping a linked dynamic node and so
//! on) panic when [`contract::CHECKED`] is on.

pub mod contract;
pub mod double;
#[allow(clippy::module_inception)]
pub mod intrusive;
pub mod iter;
pub mod links;
pub mod list;
pub mod static_double;
pub mod traits;

mod diag;
mod macros;

pub use static_lists_derive::Intrusive;

/// The types needed to declare and use lists.
pub mod prelude {
    pub use super::{
        Intrusive,
        double::DoubleListLinks,
        intrusive::IntrusiveList,
        iter::{Cursor, Iter},
        links::RawLinks,
        list::{DoubleList, Identity},
        static_double::StaticDoubleListLinks,
        traits::{Adapter, Links},
    };
}

#[cfg(test)]
mod tests;
