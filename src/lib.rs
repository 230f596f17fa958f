//! Order-statistic AVL tree for Rust.
//!
//! This crate provides [`AvlTree`], a height-balanced binary search tree over
//! `i64` keys whose nodes carry their subtree size. On top of ordered insertion
//! it answers two order-statistic queries in O(log n):
//!
//! - [`select`](AvlTree::select) - the node holding the i-th smallest key
//! - [`rank`](AvlTree::rank) - the sorted position of a node
//!
//! Both use 1-based positions.
//!
//! # Example
//!
//! ```
//! use avl_ostree::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! for key in [20, 10, 30, 5, 15, 25, 35] {
//!     tree.insert(key);
//! }
//!
//! // Inorder traversal is sorted.
//! assert!(tree.iter().eq([5, 10, 15, 20, 25, 30, 35]));
//!
//! // The smallest and largest keys by rank.
//! let first = tree.select(tree.root(), 1).unwrap();
//! assert_eq!(tree.key(first), 5);
//! assert_eq!(tree.get_by_rank(7), Some(35));
//!
//! // Rank of a node.
//! let twenty = tree.find(20).unwrap();
//! assert_eq!(tree.rank(twenty), 4);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Stable handles** - Nodes live in an arena and are addressed by [`Handle`];
//!   rotations relink nodes but never move them
//! - **Explicit root threading** - [`insert_at`](AvlTree::insert_at) accepts and
//!   returns the root, for callers that track roots themselves
//!
//! # Implementation
//!
//! Every node stores its key, child links, a parent back-link, its subtree
//! height and its subtree size. Insertion is the textbook recursive AVL insert:
//! after each step down the height and size are re-derived from the children,
//! and one of the four single/double rotation cases restores balance. `select`
//! descends by subtree size; `rank` climbs parent links.
//!
//! Duplicate keys are ignored and there is no removal.

#![cfg_attr(not(test), no_std)]
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

mod raw;

pub mod avl_tree;

pub use avl_tree::AvlTree;
pub use raw::Handle;
