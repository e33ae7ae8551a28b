// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Strand machine - compiler and runtime for traversal bytecode.
//!
//! A [`Bytecode`](strand_bytecode::Bytecode) is compiled into a [`Compilation`]: an ordered list
//! of step functions plus the injected start traversers. A compilation is executed lazily by a
//! processor backend:
//! - **Pipes** pulls one traverser at a time through a chain of steps
//! - **Dataflow** runs every function over the complete batch produced by the previous one
//!
//! Both backends produce the same multiset of results.
//!
//! # Example
//!
//! ```ignore
//! let mut bytecode = Bytecode::new();
//! bytecode.add_instruction(Coefficient::unity(), Operator::Inject, [1.into(), 2.into()]);
//! bytecode.add_instruction(Coefficient::unity(), Operator::Map, ["x -> x + 1".into()]);
//!
//! let mut compilation = Compilation::compile(bytecode)?;
//! while compilation.has_next()? {
//!     println!("{}", compilation.next()?);
//! }
//! ```

pub mod barrier;
mod compile;
pub mod config;
pub mod expression;
pub mod function;
pub mod processor;
pub mod traverser;

pub use compile::Compilation;
pub use config::{MachineConfig, ProcessorKind};
pub use processor::{MachineProcessor, Processor};
pub use traverser::{LoopId, Path, Traverser, TraverserFactory, TraverserSet};
