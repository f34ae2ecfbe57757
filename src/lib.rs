//! # zdd-rs: Families of Sets as Decision Diagrams in Rust
//!
//! **`zdd-rs`** is a safe, factory-centric library for representing and manipulating
//! **families of finite sets** as zero-suppressed decision diagrams (ZDDs).
//! It is designed for combinatorial problems where huge collections of sets share structure.
//!
//! ## What is a family diagram?
//!
//! A family of sets over ordered keys is stored as a directed acyclic graph. Every node
//! branches on one key: the take branch holds the sets containing the key, the skip branch
//! the sets without it. Nodes whose take branch is empty are suppressed entirely, and all
//! remaining nodes are hash-consed, so every family has exactly one live representation.
//! Equality of families is pointer equality of handles.
//!
//! ## Key Features
//!
//! - **Factory-Centric Architecture**: All construction goes through the
//!   [`Factory`][crate::factory::Factory]. This enforces canonicalization (hash consing)
//!   and the key-ordering invariant.
//! - **Cheap Handles**: Families are held through reference-counted [`Zdd`][crate::node::Zdd]
//!   handles; nodes are reclaimed automatically when the last handle drops.
//! - **Memoized Algebra**: Union, intersection, symmetric difference, and subtraction each
//!   keep a computed table, so shared subproblems are solved once.
//! - **Generic Keys**: Any `Ord + Hash + Clone` type can serve as the key universe.
//! - **Exact Counting**: Families too large to enumerate are counted exactly with big integers.
//!
//! ## Quick Start
//!
//! Add `zdd-rs` to your `Cargo.toml` and start building families:
//!
//! ```toml
//! [dependencies]
//! zdd-rs = "0.1"
//! ```
//!
//! ## Basic Usage
//!
//! ```rust
//! use num_bigint::BigUint;
//! use zdd_rs::factory::Factory;
//!
//! // 1. Initialize the factory
//! let factory: Factory<u32> = Factory::default();
//!
//! // 2. Build families of sets
//! let a = factory.family([vec![1, 2], vec![3]]);
//! let b = factory.family([vec![3], vec![4]]);
//!
//! // 3. Combine them; note that the factory performs the operations!
//! let both = factory.intersection(&a, &b);
//! let either = factory.union(&a, &b);
//!
//! // 4. Check properties
//! assert!(both.contains(&[3]));
//! assert_eq!(factory.count(&either), BigUint::from(3u32));
//!
//! // 5. Equal families are identical handles
//! assert_eq!(both, factory.family([vec![3]]));
//! ```
//!
//! ## Core Components
//!
//! - **[`factory`]**: The heart of the library. Contains the
//!   [`Factory`][crate::factory::Factory] and node construction.
//! - **[`ops`]**: The memoized set-algebra operations.
//! - **[`iter`]**: Enumeration of and membership queries on families.
//! - **[`dot`]**: Utilities for visualizing families using Graphviz.
//!
//! For a deep dive into the implementation details, check the [`factory`] module documentation.

pub mod cache;
pub mod dot;
pub mod factory;
pub mod iter;
pub mod node;
pub mod ops;
pub mod utils;
pub mod weakset;
