//! Allocation-free intrusive lists.
//!
//! The links of an element are stored in the element itself, so putting an
//! object in a list never allocates and never fails. Lists only borrow their
//! elements; who owns an element and how long it lives is up to the caller.
//!
//! # Examples
//!
//! A dynamic list over bare link nodes:
//!
//! ```
//! use core::pin::pin;
//! use static_lists::linked_list::intrusive::prelude::*;
//!
//! let a = pin!(DoubleListLinks::new());
//! let b = pin!(DoubleListLinks::new());
//!
//! let list = pin!(DoubleList::<DoubleListLinks>::new());
//! let list = list.init();
//! assert!(list.empty());
//!
//! unsafe {
//!     list.link_tail(a.as_ref());
//!     list.link_head(b.as_ref());
//! }
//! assert_eq!(list.count(), 2);
//! assert_eq!(list.head(), Some(b.as_ref().get_ref().into()));
//!
//! a.unlink();
//! b.unlink();
//! assert!(list.empty());
//! ```
//!
//! A static registrar that needs no constructor to run:
//!
//! ```
//! use core::pin::Pin;
//! use static_lists::linked_list::intrusive::prelude::*;
//!
//! struct Holder(DoubleList<StaticDoubleListLinks, StaticDoubleListLinks>);
//!
//! // SAFETY: the example is single-threaded.
//! unsafe impl Sync for Holder {}
//!
//! static REGISTRY: Holder = Holder(DoubleList::new());
//!
//! let registry = Pin::static_ref(&REGISTRY.0);
//! assert!(registry.uninitialized());
//! assert!(registry.empty());
//!
//! let entry: &'static StaticDoubleListLinks = Box::leak(Box::new(StaticDoubleListLinks::new()));
//! unsafe { registry.link_tail(Pin::static_ref(entry)) };
//! assert!(!registry.uninitialized());
//! assert_eq!(registry.count(), 1);
//! ```
pub mod intrusive;
