extern crate std;

use std::{vec, vec::Vec};

use core::{
    mem::offset_of,
    pin::{Pin, pin},
    ptr,
};

use crate::linked_list::intrusive::{
    Intrusive, double::DoubleListLinks, intrusive::IntrusiveList,
    static_double::StaticDoubleListLinks,
    traits::{Adapter, Links, same_layout},
};

struct Item {
    value: u32,
    links: DoubleListLinks,
}

impl Item {
    fn new(value: u32) -> Self {
        Self {
            value,
            links: DoubleListLinks::new(),
        }
    }
}

crate::intrusive_adapter!(ItemLinks = Item { links: DoubleListLinks });

#[derive(Intrusive)]
#[intrusive(crate_path = "crate")]
struct Person {
    age: u32,
    #[links(adapter = ByAge)]
    by_age: DoubleListLinks,
    #[links(adapter = ByName)]
    by_name: DoubleListLinks,
}

impl Person {
    fn new(age: u32) -> Self {
        Self {
            age,
            by_age: DoubleListLinks::new(),
            by_name: DoubleListLinks::new(),
        }
    }
}

#[derive(Intrusive)]
#[intrusive(crate_path = "crate")]
struct Slot<T> {
    value: T,
    #[links(adapter = SlotLinks)]
    links: DoubleListLinks,
}

struct Job {
    id: u32,
    links: DoubleListLinks,
}

#[repr(transparent)]
struct JobHandle(Job);

crate::intrusive_adapter!(JobHandles = Job { links: DoubleListLinks } => JobHandle);

fn values<H: Links>(list: Pin<&IntrusiveList<ItemLinks, H>>) -> Vec<u32> {
    list.iter().map(|item| item.value).collect()
}

#[test]
fn test_adapter_offsets() {
    assert_eq!(<ItemLinks as Adapter>::OFFSET, offset_of!(Item, links));
    assert_eq!(<ByAge as Adapter>::OFFSET, offset_of!(Person, by_age));
    assert_eq!(<ByName as Adapter>::OFFSET, offset_of!(Person, by_name));
    assert_eq!(
        <SlotLinks<u64> as Adapter>::OFFSET,
        offset_of!(Slot<u64>, links)
    );
}

#[test]
fn test_value_type_layout_check() {
    assert!(same_layout::<Item, Item>());
    assert!(same_layout::<Job, JobHandle>());
    assert!(!same_layout::<Item, [u64; 64]>());
    assert!(!same_layout::<Item, u8>());
    assert_eq!(<JobHandles as Adapter>::OFFSET, offset_of!(Job, links));
}

#[test]
fn test_link_and_iterate_owners() {
    let a = pin!(Item::new(1));
    let b = pin!(Item::new(2));
    let c = pin!(Item::new(3));
    let list = pin!(IntrusiveList::<ItemLinks>::new());
    let list = list.init();

    unsafe {
        list.link_tail(b.as_ref());
        list.link_tail(c.as_ref());
        list.link_head(a.as_ref());
    }

    assert_eq!(values(list), vec![1, 2, 3]);
    assert_eq!(
        list.iter().rev().map(|item| item.value).collect::<Vec<_>>(),
        vec![3, 2, 1]
    );
    assert_eq!(list.count(), 3);
    assert!(ptr::eq(list.head().unwrap().as_ptr(), &*a));
    assert!(ptr::eq(list.tail().unwrap().as_ptr(), &*c));

    while list.unlink_head().is_some() {}
    assert!(list.empty());
}

#[test]
fn test_unlink_head_and_tail() {
    let a = pin!(Item::new(1));
    let b = pin!(Item::new(2));
    let c = pin!(Item::new(3));
    let list = pin!(IntrusiveList::<ItemLinks>::new());
    let list = list.init();
    assert!(list.unlink_head().is_none());
    assert!(list.unlink_tail().is_none());

    unsafe {
        list.link_tail(a.as_ref());
        list.link_tail(b.as_ref());
        list.link_tail(c.as_ref());
    }

    let first = list.unlink_head().unwrap();
    assert_eq!(unsafe { first.as_ref() }.value, 1);
    let last = list.unlink_tail().unwrap();
    assert_eq!(unsafe { last.as_ref() }.value, 3);
    assert_eq!(values(list), vec![2]);

    assert_eq!(unsafe { list.unlink_tail().unwrap().as_ref() }.value, 2);
    assert!(list.unlink_head().is_none());
    assert!(list.empty());
}

#[test]
fn test_cursor_from_value() {
    let a = pin!(Item::new(1));
    let b = pin!(Item::new(2));
    let c = pin!(Item::new(3));
    let list = pin!(IntrusiveList::<ItemLinks>::new());
    let list = list.init();

    unsafe {
        list.link_tail(a.as_ref());
        list.link_tail(b.as_ref());
        list.link_tail(c.as_ref());
    }

    let mut cursor = unsafe { list.cursor_from(&b) };
    assert_eq!(cursor.value().value, 2);
    cursor.move_next();
    assert_eq!(cursor.value().value, 3);
    cursor.move_next();
    assert!(cursor.is_end());
    cursor.move_prev();
    cursor.move_prev();
    cursor.move_prev();
    assert_eq!(cursor, list.begin());
    assert_eq!(cursor.value().value, 1);

    while list.unlink_tail().is_some() {}
}

#[test]
fn test_one_object_in_two_lists() {
    let young = pin!(Person::new(20));
    let middle = pin!(Person::new(40));
    let old = pin!(Person::new(60));
    let ages = pin!(IntrusiveList::<ByAge>::new());
    let ages = ages.init();
    let names = pin!(IntrusiveList::<ByName>::new());
    let names = names.init();

    unsafe {
        for person in [young.as_ref(), middle.as_ref(), old.as_ref()] {
            ages.link_tail(person);
            names.link_head(person);
        }
    }

    let by_age: Vec<_> = ages.iter().map(|p| p.age).collect();
    let by_name: Vec<_> = names.iter().map(|p| p.age).collect();
    assert_eq!(by_age, vec![20, 40, 60]);
    assert_eq!(by_name, vec![60, 40, 20]);

    // Leaving one list does not touch the other.
    middle.by_age.unlink();
    assert_eq!(ages.count(), 2);
    assert_eq!(names.count(), 3);

    while ages.unlink_head().is_some() {}
    while names.unlink_head().is_some() {}
}

#[test]
fn test_generic_owner() {
    let first = pin!(Slot {
        value: "first",
        links: DoubleListLinks::new(),
    });
    let second = pin!(Slot {
        value: "second",
        links: DoubleListLinks::new(),
    });
    let list = pin!(IntrusiveList::<SlotLinks<&str>>::new());
    let list = list.init();

    unsafe {
        list.link_head(second.as_ref());
        list.link_head(first.as_ref());
    }

    let slots: Vec<_> = list.into_iter().map(|slot| slot.value).collect();
    assert_eq!(slots, vec!["first", "second"]);

    while list.unlink_head().is_some() {}
}

#[test]
fn test_value_type_override() {
    let job = pin!(JobHandle(Job {
        id: 7,
        links: DoubleListLinks::new(),
    }));
    let list = pin!(IntrusiveList::<JobHandles>::new());
    let list = list.init();

    unsafe { list.link_tail(job.as_ref()) };
    let handle = list.iter().next().unwrap();
    assert_eq!(handle.0.id, 7);
    assert!(ptr::eq(handle, &*job));

    list.unlink_head();
    assert!(list.empty());
}

#[test]
fn test_static_head_over_dynamic_elements() {
    let a = pin!(Item::new(1));
    let list = pin!(IntrusiveList::<ItemLinks, StaticDoubleListLinks>::new());
    let list = list.init();
    assert!(list.uninitialized());
    assert!(list.empty());

    unsafe { list.link_tail(a.as_ref()) };
    assert!(!list.uninitialized());
    assert_eq!(values(list), vec![1]);

    list.unlink_tail();
    assert!(list.empty());
}

#[test]
fn test_reference_survives_unlink_while_value_lives() {
    let a = pin!(Item::new(42));
    let list = pin!(IntrusiveList::<ItemLinks>::new());
    let list = list.init();
    unsafe { list.link_tail(a.as_ref()) };

    // The reference borrows the list; `a` outlives that borrow.
    let first = list.iter().next().unwrap();
    a.links.unlink();
    assert!(list.empty());
    assert_eq!(first.value, 42);
    assert!(ptr::eq(first, &*a));
}
