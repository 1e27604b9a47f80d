//! # stackplane-catalog
//!
//! The stack-kind catalog and dependency resolution for Stackplane.
//!
//! Handles:
//! - **Stack**: the body contract every stack kind implements.
//! - **Catalog**: registration and lookup of the fixed set of stack kinds.
//! - **Graph**: dependency graph construction and cycle detection over
//!   `petgraph`.
//! - **Resolver**: deterministic instantiation-order resolution for a
//!   requested set of stack kinds.

pub mod catalog;
pub mod graph;
pub mod resolver;
pub mod stack;
