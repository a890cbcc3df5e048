//! Arena-backed ordered maps for Rust.
//!
//! This crate provides two maps with the same ordered key-value contract:
//!
//! - [`OrderedMap`] - an unbalanced binary search tree, the baseline whose height follows the
//!   insertion order
//! - [`BalancedOrderedMap`] - a red-black tree whose height never exceeds `2 * log2(n + 1)`
//!
//! Both support lookups, in-place value replacement on re-insert, removal, minimum and maximum,
//! in-order successor and predecessor queries, and lazy [`traversal`] iterators in in-order,
//! pre-order, post-order and level order.
//!
//! # Example
//!
//! ```
//! use rbtree_map::{BalancedOrderedMap, OrderedMap, TreeError};
//!
//! let mut chain = OrderedMap::new();
//! let mut balanced = BalancedOrderedMap::new();
//! for key in 1..=5 {
//!     chain.insert(key, key * 10);
//!     balanced.insert(key, key * 10);
//! }
//!
//! assert_eq!(chain.height(), Some(4));
//! assert!(balanced.height() <= Some(3));
//!
//! assert_eq!(balanced.successor(&3), Ok(&4));
//! assert_eq!(balanced.successor(&5), Err(TreeError::NoSuccessor));
//! assert!(chain.iter().eq(balanced.iter()));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **No unsafe code** - Nodes live in an arena and link to each other by index
//! - **Recursion-free** - Traversals, height, clone and drop use explicit work lists, so even a
//!   degenerate `OrderedMap` cannot overflow the stack
//!
//! # Implementation
//!
//! Nodes are stored in a slot arena owned by the map and addressed by 32-bit handles;
//! `Option<Handle>` doubles as the "missing child" marker, so the red-black tree needs no shared
//! sentinel node. When a node with two children is removed, its in-order successor's entry is
//! moved into the node's slot and the successor's slot is freed instead.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod raw;

pub mod balanced_map;
pub mod ordered_map;
pub mod traversal;

pub use balanced_map::{BalancedOrderedMap, TreeStats};
pub use error::{Result, TreeError};
pub use ordered_map::OrderedMap;
