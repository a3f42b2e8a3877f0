#![no_std]

pub mod linked_list;
