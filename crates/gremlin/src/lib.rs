// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Fluent builder for strand traversals.
//!
//! A [`TraversalSource`] spawns [`Traversal`]s, every builder method appends one instruction to the
//! traversal's bytecode. Iterating a traversal compiles it with the machine and pulls its results.
//!
//! ```ignore
//! let g = TraversalSource::new();
//! let count = g.inject([1, 2, 3, 4]).map("x -> x + 1").filter("x > 2").count().next()?;
//! assert_eq!(count, Value::int8(3));
//! ```

mod anonymous;
mod argument;
mod predicate;
mod source;
mod traversal;

pub use anonymous::{Anonymous, __};
pub use argument::IntoArgument;
pub use predicate::P;
pub use source::TraversalSource;
pub use strand_bytecode::Token;
pub use traversal::Traversal;
