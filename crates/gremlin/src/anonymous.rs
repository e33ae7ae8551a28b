// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strand_bytecode::{Argument, Bytecode, Coefficient, Operator, Token};
use strand_machine::MachineConfig;
use strand_type::Value;

use crate::{IntoArgument, P, Traversal};

/// Starts traversals without a source, used as arguments of other steps.
///
/// ```ignore
/// g.inject([1, 2, 3]).filter(__.map("x -> x * 2").is_p(P::gt(2)))
/// ```
pub const __: Anonymous = Anonymous;

#[derive(Clone, Copy, Debug)]
pub struct Anonymous;

impl Anonymous {
	/// An empty traversal passing every traverser through.
	pub fn start(&self) -> Traversal {
		Traversal::new(Bytecode::new(), MachineConfig::new())
	}

	/// A nested traversal ignoring its input and starting from `values` instead.
	pub fn inject<V: Into<Value>>(&self, values: impl IntoIterator<Item = V>) -> Traversal {
		let mut bytecode = Bytecode::new();
		let starts = values.into_iter().map(|value| Argument::Value(value.into()));
		bytecode.add_instruction(Coefficient::unity(), Operator::Inject, starts);
		Traversal::new(bytecode, MachineConfig::new())
	}

	pub fn barrier(&self) -> Traversal {
		self.start().barrier()
	}

	pub fn choose(&self, guard: impl IntoArgument, then: impl IntoArgument) -> Traversal {
		self.start().choose(guard, then)
	}

	pub fn constant(&self, value: impl Into<Value>) -> Traversal {
		self.start().constant(value)
	}

	pub fn count(&self) -> Traversal {
		self.start().count()
	}

	pub fn filter(&self, predicate: impl IntoArgument) -> Traversal {
		self.start().filter(predicate)
	}

	pub fn flat_map(&self, function: impl IntoArgument) -> Traversal {
		self.start().flat_map(function)
	}

	pub fn group_count(&self) -> Traversal {
		self.start().group_count()
	}

	pub fn has(&self, key: impl IntoArgument, value: impl IntoArgument) -> Traversal {
		self.start().has(key, value)
	}

	pub fn has_key(&self, key: impl IntoArgument) -> Traversal {
		self.start().has_key(key)
	}

	pub fn identity(&self) -> Traversal {
		self.start().identity()
	}

	pub fn incr(&self) -> Traversal {
		self.start().incr()
	}

	pub fn is(&self, value: impl IntoArgument) -> Traversal {
		self.start().is(value)
	}

	pub fn is_p(&self, predicate: P) -> Traversal {
		self.start().is_p(predicate)
	}

	pub fn join(&self, kind: Token, other: impl IntoArgument) -> Traversal {
		self.start().join(kind, other)
	}

	pub fn loops(&self) -> Traversal {
		self.start().loops()
	}

	pub fn map(&self, function: impl IntoArgument) -> Traversal {
		self.start().map(function)
	}

	pub fn path(&self) -> Traversal {
		self.start().path()
	}

	pub fn repeat(&self, body: impl IntoArgument) -> Traversal {
		self.start().repeat(body)
	}

	pub fn sum(&self) -> Traversal {
		self.start().sum()
	}

	pub fn unfold(&self) -> Traversal {
		self.start().unfold()
	}

	pub fn union(&self, traversals: impl IntoIterator<Item = Traversal>) -> Traversal {
		self.start().union(traversals)
	}
}
