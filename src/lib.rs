//! An order-statistic red-black tree map for Rust.
//!
//! This crate provides [`OSRBTreeMap`], an ordered map with a `BTreeMap`-like API backed by
//! a red-black tree whose nodes also record the size of their subtree. Besides the usual
//! O(log n) lookup, insertion and removal it answers positional queries in O(log n):
//!
//! - [`rank`](OSRBTreeMap::rank) - the 1-based sorted position of a key (0 if absent)
//! - [`select`](OSRBTreeMap::select) - the key at a 1-based sorted position
//! - [`successor`](OSRBTreeMap::successor) / [`predecessor`](OSRBTreeMap::predecessor) -
//!   the neighbouring keys of a stored key
//! - Indexing by [`Rank`] - e.g., `map[Rank(0)]` for the first value
//!
//! # Example
//!
//! ```
//! use osrb_tree::OSRBTreeMap;
//!
//! let mut scores = OSRBTreeMap::new();
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//! scores.insert("Carol", 92);
//!
//! assert_eq!(scores.get("Bob"), Some(&85));
//! assert_eq!(scores.rank("Carol"), 3);
//! assert_eq!(scores.select(1), Ok(&"Alice"));
//! assert_eq!(scores.successor("Alice"), Some(&"Bob"));
//! ```
//!
//! # Implementation
//!
//! Nodes live in an arena and link to each other by integer handles. One reserved handle
//! stands for the tree's sentinel: every missing child, and the root's parent, points at
//! it. Rotations repair subtree sizes alongside the red-black fixups, so both the coloring
//! invariants and the size invariant hold between public calls.
//!
//! The map is single-owner and performs no internal synchronization.

#![no_std]
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
mod order_statistic;
mod raw;

pub mod osrbtree_map;

pub use error::{Error, Result};
pub use order_statistic::Rank;
pub use osrbtree_map::{OSRBTreeMap, TraversalOrder};
