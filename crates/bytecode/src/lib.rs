// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! The bytecode of the strand traversal machine.
//!
//! A [`Bytecode`] is an ordered list of [`Instruction`]s plus a list of source instructions that
//! configure how it gets executed. It is produced by a builder, compiled by the machine and never
//! modified in any other way than by appending.

mod argument;
mod bytecode;
mod coefficient;
mod instruction;
mod symbol;

pub use argument::Argument;
pub use bytecode::Bytecode;
pub use coefficient::Coefficient;
pub use instruction::{Instruction, SourceInstruction};
pub use symbol::{Oper, Operator, Pred, SourceOperator, Token};
